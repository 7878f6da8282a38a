//! Configuration types for the camera controller.

use crate::bounds::BOUNDS_MARGIN;
use crate::error::ConfigError;
use pinchpan_common::Bounds;
use serde::{Deserialize, Serialize};

/// Smallest accepted wheel pinch speed.
pub const MIN_SCROLL_SPEED: f32 = 0.01;

/// Gesture thresholds, input selection, zoom limits and camera bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Maximum movement in pixels for a contact to count as a tap.
    #[serde(default = "default_max_distance_for_tap")]
    pub max_distance_for_tap: f32,
    /// Maximum contact duration in seconds for a tap.
    #[serde(default = "default_max_duration_for_tap")]
    pub max_duration_for_tap: f32,
    /// Drive gestures from the mouse even when touch is available.
    #[serde(default = "default_true")]
    pub force_use_mouse: bool,
    /// Pinch speed simulated by one wheel notch.
    #[serde(default = "default_mouse_scroll_speed")]
    pub mouse_scroll_speed: f32,
    /// Whether gestures move the camera at all.
    #[serde(default = "default_true")]
    pub control_camera: bool,
    /// Accept gestures that start over UI elements.
    #[serde(default)]
    pub ignore_ui: bool,
    #[serde(default = "default_zoom")]
    pub default_zoom: f32,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f32,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f32,
    /// Keep the visible area inside the bound rectangle.
    #[serde(default)]
    pub use_bounds: bool,
    #[serde(default = "default_bound_min")]
    pub bound_min_x: f32,
    #[serde(default = "default_bound_max")]
    pub bound_max_x: f32,
    #[serde(default = "default_bound_min")]
    pub bound_min_y: f32,
    #[serde(default = "default_bound_max")]
    pub bound_max_y: f32,
}

fn default_max_distance_for_tap() -> f32 {
    40.0
}

fn default_max_duration_for_tap() -> f32 {
    0.4
}

fn default_mouse_scroll_speed() -> f32 {
    2.0
}

fn default_zoom() -> f32 {
    5.0
}

fn default_min_zoom() -> f32 {
    1.0
}

fn default_max_zoom() -> f32 {
    10.0
}

fn default_bound_min() -> f32 {
    -150.0
}

fn default_bound_max() -> f32 {
    150.0
}

fn default_true() -> bool {
    true
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_distance_for_tap: default_max_distance_for_tap(),
            max_duration_for_tap: default_max_duration_for_tap(),
            force_use_mouse: default_true(),
            mouse_scroll_speed: default_mouse_scroll_speed(),
            control_camera: default_true(),
            ignore_ui: false,
            default_zoom: default_zoom(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            use_bounds: false,
            bound_min_x: default_bound_min(),
            bound_max_x: default_bound_max(),
            bound_min_y: default_bound_min(),
            bound_max_y: default_bound_max(),
        }
    }
}

impl ControllerConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> ControllerConfigBuilder {
        ControllerConfigBuilder::default()
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or fails validation.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // `!(x >= y)` also rejects NaN
        if !(self.mouse_scroll_speed >= MIN_SCROLL_SPEED) {
            return Err(ConfigError::ScrollSpeed {
                value: self.mouse_scroll_speed,
                min: MIN_SCROLL_SPEED,
            });
        }

        if !(self.max_distance_for_tap >= 0.0) {
            return Err(ConfigError::TapThreshold(format!(
                "max distance {}",
                self.max_distance_for_tap
            )));
        }
        if !(self.max_duration_for_tap >= 0.0) {
            return Err(ConfigError::TapThreshold(format!(
                "max duration {}",
                self.max_duration_for_tap
            )));
        }

        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom && self.max_zoom.is_finite()) {
            return Err(ConfigError::ZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }

        if !(self.default_zoom > 0.0 && self.default_zoom.is_finite()) {
            return Err(ConfigError::DefaultZoom(self.default_zoom));
        }

        let bounds = self.bounds();
        if !bounds.is_valid()
            || bounds.width() <= 2.0 * BOUNDS_MARGIN
            || bounds.height() <= 2.0 * BOUNDS_MARGIN
        {
            return Err(ConfigError::Bounds {
                min_x: self.bound_min_x,
                max_x: self.bound_max_x,
                min_y: self.bound_min_y,
                max_y: self.bound_max_y,
            });
        }

        Ok(())
    }

    /// The bound rectangle, regardless of `use_bounds`.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.bound_min_x,
            self.bound_max_x,
            self.bound_min_y,
            self.bound_max_y,
        )
    }

    /// Clamp a zoom value to `[min_zoom, max_zoom]`.
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

/// Builder for creating a `ControllerConfig`.
#[derive(Default)]
pub struct ControllerConfigBuilder {
    config: ControllerConfig,
}

impl ControllerConfigBuilder {
    /// Sets the tap distance (pixels) and duration (seconds) thresholds.
    #[must_use]
    pub fn tap_thresholds(mut self, max_distance: f32, max_duration: f32) -> Self {
        self.config.max_distance_for_tap = max_distance;
        self.config.max_duration_for_tap = max_duration;
        self
    }

    #[must_use]
    pub fn force_use_mouse(mut self, force: bool) -> Self {
        self.config.force_use_mouse = force;
        self
    }

    #[must_use]
    pub fn mouse_scroll_speed(mut self, speed: f32) -> Self {
        self.config.mouse_scroll_speed = speed;
        self
    }

    #[must_use]
    pub fn control_camera(mut self, control: bool) -> Self {
        self.config.control_camera = control;
        self
    }

    #[must_use]
    pub fn ignore_ui(mut self, ignore: bool) -> Self {
        self.config.ignore_ui = ignore;
        self
    }

    /// Sets the default zoom and the allowed zoom range.
    #[must_use]
    pub fn zoom(mut self, default: f32, min: f32, max: f32) -> Self {
        self.config.default_zoom = default;
        self.config.min_zoom = min;
        self.config.max_zoom = max;
        self
    }

    /// Enables bounding to `bounds`.
    #[must_use]
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.config.use_bounds = true;
        self.config.bound_min_x = bounds.min_x;
        self.config.bound_max_x = bounds.max_x;
        self.config.bound_min_y = bounds.min_y;
        self.config.bound_max_y = bounds.max_y;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> Result<ControllerConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ControllerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_distance_for_tap, 40.0);
        assert_eq!(config.max_duration_for_tap, 0.4);
        assert!(config.force_use_mouse);
        assert!(!config.use_bounds);
        assert_eq!(config.bounds(), Bounds::new(-150.0, 150.0, -150.0, 150.0));
    }

    #[test]
    fn test_builder() {
        let config = ControllerConfig::builder()
            .zoom(4.0, 2.0, 8.0)
            .bounds(Bounds::new(-10.0, 10.0, -5.0, 5.0))
            .ignore_ui(true)
            .build()
            .unwrap();
        assert!(config.use_bounds);
        assert!(config.ignore_ui);
        assert_eq!(config.clamp_zoom(100.0), 8.0);
        assert_eq!(config.clamp_zoom(0.5), 2.0);
    }

    #[test]
    fn test_validation_scroll_speed() {
        let config = ControllerConfig {
            mouse_scroll_speed: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ScrollSpeed { .. })
        ));

        let config = ControllerConfig {
            mouse_scroll_speed: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zoom_range() {
        assert!(ControllerConfig::builder()
            .zoom(5.0, 10.0, 1.0)
            .build()
            .is_err());
        assert!(ControllerConfig::builder().zoom(5.0, 0.0, 1.0).build().is_err());
        assert!(ControllerConfig::builder().zoom(0.0, 1.0, 10.0).build().is_err());
    }

    #[test]
    fn test_validation_tap_and_bounds() {
        assert!(ControllerConfig::builder()
            .tap_thresholds(-1.0, 0.4)
            .build()
            .is_err());
        assert!(ControllerConfig::builder()
            .bounds(Bounds::new(10.0, -10.0, 0.0, 5.0))
            .build()
            .is_err());
        assert!(ControllerConfig::builder()
            .bounds(Bounds::new(0.0, 0.001, 0.0, 5.0))
            .build()
            .is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = ControllerConfig::from_toml_str(
            r#"
            max_distance_for_tap = 25.0
            use_bounds = true
            bound_min_x = -20.0
            bound_max_x = 20.0
            "#,
        )
        .unwrap();
        assert_eq!(config.max_distance_for_tap, 25.0);
        assert_eq!(config.max_duration_for_tap, 0.4);
        assert!(config.use_bounds);
        assert_eq!(config.bounds(), Bounds::new(-20.0, 20.0, -150.0, 150.0));
    }

    #[test]
    fn test_from_toml_errors() {
        assert!(matches!(
            ControllerConfig::from_toml_str("min_zoom = \"small\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ControllerConfig::from_toml_str("min_zoom = 20.0"),
            Err(ConfigError::ZoomRange { .. })
        ));
    }
}
