//! Gesture-driven camera controller.
//!
//! [`CameraController`] owns the pieces of the per-frame pipeline: the input
//! source, the gesture recognizer, the listeners and the camera policy. The
//! host calls [`CameraController::update`] and then
//! [`CameraController::late_update`] once per rendered frame (or
//! [`CameraController::frame`] for both).

use crate::auto_move::{AutoMove, Grid};
use crate::bounds::confine;
use crate::config::ControllerConfig;
use crate::control::CameraControl;
use crate::error::ConfigError;
use crate::events::{GestureEvent, GestureListeners};
use crate::gesture::GestureRecognizer;
use crate::ui::UiHitTest;
use crate::viewport::{Projection, Viewport};
use pinchpan_common::{Bounds, IVec3, Vec2, Vec3};
use pinchpan_input::{source_for, InputFrame, InputMode, InputSource};
use std::fmt;
use tracing::{debug, trace};

/// Orthographic size never drops below this during a pinch.
pub const MIN_ORTHOGRAPHIC_SIZE: f32 = 0.1;
/// Field of view limits (degrees) for perspective pinch.
pub const MIN_FIELD_OF_VIEW: f32 = 0.1;
pub const MAX_FIELD_OF_VIEW: f32 = 179.9;
/// Pinch distances are floored here before dividing.
const MIN_PINCH_DISTANCE: f32 = 1e-4;

/// Builder for [`CameraController`].
pub struct CameraControllerBuilder<V> {
    viewport: V,
    config: ControllerConfig,
    touch_supported: bool,
    ui: Option<Box<dyn UiHitTest>>,
}

impl<V: Viewport> CameraControllerBuilder<V> {
    #[must_use]
    pub fn config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    /// Whether the platform reports touch support. Defaults to false.
    #[must_use]
    pub fn touch_supported(mut self, supported: bool) -> Self {
        self.touch_supported = supported;
        self
    }

    /// UI hit tester consulted when gestures begin and taps complete.
    #[must_use]
    pub fn ui_hit_test<U: UiHitTest + 'static>(mut self, ui: U) -> Self {
        self.ui = Some(Box::new(ui));
        self
    }

    /// Validate the configuration and build the controller.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> Result<CameraController<V>, ConfigError> {
        self.config.validate()?;

        let mode = InputMode::select(self.config.force_use_mouse, self.touch_supported);
        let source = source_for(mode, self.config.mouse_scroll_speed);

        let mut viewport = self.viewport;
        if viewport.is_orthographic() {
            viewport.set_zoom(self.config.default_zoom);
        }
        debug!("Creating camera controller with config: {:?}", self.config);

        Ok(CameraController {
            viewport,
            config: self.config,
            source,
            recognizer: GestureRecognizer::new(),
            listeners: GestureListeners::new(),
            control: CameraControl::new(),
            ui: self.ui,
            auto_move: None,
        })
    }
}

/// Interprets touch/mouse gestures and drives a [`Viewport`] with them.
pub struct CameraController<V> {
    viewport: V,
    config: ControllerConfig,
    source: Box<dyn InputSource>,
    recognizer: GestureRecognizer,
    listeners: GestureListeners,
    control: CameraControl,
    ui: Option<Box<dyn UiHitTest>>,
    auto_move: Option<AutoMove>,
}

impl<V: Viewport> CameraController<V> {
    /// Start building a controller for `viewport`.
    pub fn builder(viewport: V) -> CameraControllerBuilder<V> {
        CameraControllerBuilder {
            viewport,
            config: ControllerConfig::default(),
            touch_supported: false,
            ui: None,
        }
    }

    /// Build a mouse-driven controller (no touch support, no UI).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(viewport: V, config: ControllerConfig) -> Result<Self, ConfigError> {
        Self::builder(viewport).config(config).build()
    }

    /// Per-frame entry point: read input, classify, apply camera policy and
    /// advance the auto-move.
    pub fn update(&mut self, input: &InputFrame) {
        let snapshot = self.source.snapshot(input);
        let events = self
            .recognizer
            .process(&snapshot, input.time, &self.config, self.ui.as_deref());

        for event in &events {
            self.apply(event);
        }
        if snapshot.is_empty() {
            self.control.rearm();
        }

        self.step_auto_move(input.delta_time);
    }

    /// Post-movement entry point: enforce the bounds on the frame's final pose.
    pub fn late_update(&mut self) {
        if self.config.control_camera && self.config.use_bounds && self.viewport.is_orthographic()
        {
            confine(&mut self.viewport, &self.config.bounds());
        }
    }

    /// [`update`](Self::update) followed by [`late_update`](Self::late_update).
    pub fn frame(&mut self, input: &InputFrame) {
        self.update(input);
        self.late_update();
    }

    fn apply(&mut self, event: &GestureEvent) {
        match *event {
            GestureEvent::StartTouch { .. } => {
                self.control.rearm();
                self.listeners.dispatch(event);
            }
            GestureEvent::EndTouch { .. } => {
                self.listeners.dispatch(event);
                self.control.rearm();
            }
            GestureEvent::Tap { .. } => self.listeners.dispatch(event),
            GestureEvent::Swipe { delta, .. } => {
                self.listeners.dispatch(event);
                if self.camera_active() {
                    self.pan(delta);
                }
            }
            GestureEvent::Pinch {
                center,
                old_distance,
                new_distance,
            } => {
                self.listeners.dispatch(event);
                if self.camera_active() {
                    self.zoom_around(center, old_distance, new_distance);
                }
            }
        }
    }

    fn camera_active(&self) -> bool {
        self.config.control_camera && self.control.is_enabled()
    }

    /// Move the camera so the world follows the finger.
    fn pan(&mut self, delta: Vec2) {
        let origin = self.viewport.screen_to_world(Vec3::ZERO);
        let moved = self.viewport.screen_to_world(delta.extend(0.0));
        let shift = moved - origin;
        trace!("Pan by ({:.3}, {:.3})", -shift.x, -shift.y);
        let position = self.viewport.position();
        self.viewport.set_position(position - shift);
    }

    /// Scale the zoom by `old / new`, keeping the world point under `center` fixed.
    fn zoom_around(&mut self, center: Vec2, old_distance: f32, new_distance: f32) {
        let ratio = old_distance / new_distance.max(MIN_PINCH_DISTANCE);
        match self.viewport.projection() {
            Projection::Orthographic => {
                let anchor = center.extend(0.0);
                let before = self.viewport.screen_to_world(anchor);
                let size = (self.viewport.zoom() * ratio)
                    .max(MIN_ORTHOGRAPHIC_SIZE)
                    .clamp(self.config.min_zoom, self.config.max_zoom);
                trace!("Pinch zoom {:.3} -> {:.3}", self.viewport.zoom(), size);
                self.viewport.set_zoom(size);
                let after = self.viewport.screen_to_world(anchor);
                let position = self.viewport.position();
                self.viewport.set_position(position - (after - before));
            }
            Projection::Perspective => {
                let fov = (self.viewport.zoom() * ratio).clamp(MIN_FIELD_OF_VIEW, MAX_FIELD_OF_VIEW);
                trace!("Pinch field of view {:.2} -> {:.2}", self.viewport.zoom(), fov);
                self.viewport.set_zoom(fov);
            }
        }
    }

    fn step_auto_move(&mut self, delta_time: f32) {
        let (min_zoom, max_zoom) = (self.config.min_zoom, self.config.max_zoom);
        if let Some(task) = self.auto_move.as_mut() {
            if !task.step(&mut self.viewport, delta_time, min_zoom, max_zoom) {
                debug!("Auto-move finished");
                self.auto_move = None;
            }
        }
    }

    /// Glide the camera to `position` and `zoom` over `time` seconds,
    /// replacing any glide in progress.
    pub fn auto_move_to_world_position(&mut self, position: Vec3, zoom: f32, time: f32) {
        if self.auto_move.is_some() {
            debug!("Replacing running auto-move");
        }
        debug!(
            "Auto-move to ({:.2}, {:.2}, {:.2}) zoom {:.2} over {:.2}s",
            position.x, position.y, position.z, zoom, time
        );
        self.auto_move = Some(AutoMove::new(&self.viewport, position, zoom, time));
    }

    /// Glide to a grid cell. Does nothing without a grid.
    pub fn auto_move_to_grid_coordinate(
        &mut self,
        grid: Option<&dyn Grid>,
        coordinate: IVec3,
        zoom: f32,
        time: f32,
    ) {
        match grid {
            Some(grid) => {
                let position = grid.cell_to_world(coordinate);
                self.auto_move_to_world_position(position, zoom, time);
            }
            None => debug!("No grid for auto-move to cell {}, ignoring", coordinate),
        }
    }

    /// Stop the glide in progress, leaving the camera where it is.
    pub fn cancel_auto_move(&mut self) {
        if self.auto_move.take().is_some() {
            debug!("Auto-move cancelled");
        }
    }

    /// Suppress pan/zoom for the rest of the current gesture.
    pub fn cancel_camera_for_this_gesture(&self) {
        self.control.cancel_for_this_gesture();
    }

    /// Handle for cancelling camera movement from inside listeners.
    pub fn camera_control(&self) -> CameraControl {
        self.control.clone()
    }

    pub fn is_camera_control_enabled(&self) -> bool {
        self.control.is_enabled()
    }

    pub fn listeners(&self) -> &GestureListeners {
        &self.listeners
    }

    pub fn listeners_mut(&mut self) -> &mut GestureListeners {
        &mut self.listeners
    }

    /// Has the player at least one finger on the screen?
    pub fn is_touching(&self) -> bool {
        self.recognizer.is_touching()
    }

    /// Last known contact position in screen space.
    pub fn touch_position(&self) -> Vec2 {
        self.recognizer.touch_position()
    }

    pub fn auto_moving(&self) -> bool {
        self.auto_move.is_some()
    }

    /// Current zoom magnitude (orthographic half-height, or field of view).
    pub fn orthographic_size(&self) -> f32 {
        self.viewport.zoom()
    }

    pub fn input_mode(&self) -> InputMode {
        self.source.mode()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn set_control_camera(&mut self, control: bool) {
        self.config.control_camera = control;
    }

    pub fn set_ignore_ui(&mut self, ignore: bool) {
        self.config.ignore_ui = ignore;
    }

    pub fn set_use_bounds(&mut self, use_bounds: bool) {
        self.config.use_bounds = use_bounds;
    }

    pub fn bounds(&self) -> Bounds {
        self.config.bounds()
    }

    pub fn min_x(&self) -> f32 {
        self.config.bound_min_x
    }

    pub fn max_x(&self) -> f32 {
        self.config.bound_max_x
    }

    pub fn min_y(&self) -> f32 {
        self.config.bound_min_y
    }

    pub fn max_y(&self) -> f32 {
        self.config.bound_max_y
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Take the viewport back, dropping the controller.
    pub fn into_viewport(self) -> V {
        self.viewport
    }

    pub fn screen_to_world(&self, position: Vec3) -> Vec3 {
        self.viewport.screen_to_world(position)
    }

    pub fn world_to_screen(&self, position: Vec3) -> Vec3 {
        self.viewport.world_to_screen(position)
    }

    pub fn screen_to_viewport(&self, position: Vec3) -> Vec3 {
        self.viewport.screen_to_viewport(position)
    }
}

impl<V: fmt::Debug> fmt::Debug for CameraController<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraController")
            .field("viewport", &self.viewport)
            .field("config", &self.config)
            .field("source", &self.source)
            .field("recognizer", &self.recognizer)
            .field("listeners", &self.listeners)
            .field("control", &self.control)
            .field("auto_move", &self.auto_move)
            .finish()
    }
}
