//! # pinchpan-camera: touch and mouse camera control
//!
//! This crate recognizes gestures (tap, swipe, pinch) from normalized input and
//! uses them to drive a 2D camera: swipe pans, pinch zooms around the pinch
//! center, and a timed auto-move glides the camera to a target.
//!
//! ## Features
//!
//! - **Gesture events**: start/end touch, tap, swipe and pinch, with listeners
//! - **Pan and zoom**: world follows the finger, zoom stays anchored under the pinch
//! - **Bounds**: keep an orthographic view inside a world rectangle
//! - **Auto-move**: glide to a world position or grid cell
//!
//! ## Example
//!
//! ```rust
//! use pinchpan_camera::{CameraController, ControllerConfig, SimpleCamera};
//! use pinchpan_input::InputFrame;
//!
//! let camera = SimpleCamera::orthographic(800, 600, 5.0);
//! let mut controller = CameraController::new(camera, ControllerConfig::default())?;
//! controller.listeners_mut().on_tap(|p| println!("tapped at {p}"));
//!
//! // Once per rendered frame
//! controller.frame(&InputFrame::default());
//! # Ok::<(), pinchpan_camera::ConfigError>(())
//! ```

mod auto_move;
mod bounds;
mod config;
mod control;
mod controller;
mod error;
mod events;
mod gesture;
mod proptest_policy;
mod ui;
mod viewport;

pub use auto_move::{AutoMove, Grid, RectGrid, ARRIVAL_EPSILON};
pub use bounds::{confine, BOUNDS_MARGIN};
pub use config::{ControllerConfig, ControllerConfigBuilder, MIN_SCROLL_SPEED};
pub use control::CameraControl;
pub use controller::{
    CameraController, CameraControllerBuilder, MAX_FIELD_OF_VIEW, MIN_FIELD_OF_VIEW,
    MIN_ORTHOGRAPHIC_SIZE,
};
pub use error::ConfigError;
pub use events::{GestureEvent, GestureKind, GestureListeners, ListenerId};
pub use gesture::GestureRecognizer;
pub use ui::{UiHitTest, UiRegions};
pub use viewport::{visible_world_rect, Projection, SimpleCamera, Viewport};
