//! Error types for the camera controller.

use thiserror::Error;

/// Errors raised while building or validating a controller configuration.
///
/// The per-frame path never fails; configuration is the only fallible surface.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Wheel pinch speed below the supported minimum (or NaN).
    #[error("Mouse scroll speed must be at least {min}, got {value}")]
    ScrollSpeed { value: f32, min: f32 },

    /// Zoom limits are not a positive, ordered range.
    #[error("Invalid zoom range: min {min}, max {max}")]
    ZoomRange { min: f32, max: f32 },

    /// Default zoom is not a positive finite number.
    #[error("Invalid default zoom: {0}")]
    DefaultZoom(f32),

    /// Tap distance or duration threshold is negative or NaN.
    #[error("Invalid tap threshold: {0}")]
    TapThreshold(String),

    /// Bounds are inverted or too small to hold any view.
    #[error("Invalid bounds: x [{min_x}, {max_x}], y [{min_y}, {max_y}]")]
    Bounds {
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
    },

    /// TOML configuration could not be parsed.
    #[error("Configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
