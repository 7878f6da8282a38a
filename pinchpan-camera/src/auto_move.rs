//! Timed glide of the camera to a target pose.

use crate::viewport::Viewport;
use pinchpan_common::{clamp01, lerp, IVec3, Vec3};
use tracing::debug;

/// The task completes once the camera is this close to the target.
pub const ARRIVAL_EPSILON: f32 = 0.01;

/// Maps grid cells (tilemap coordinates) to world positions.
pub trait Grid {
    fn cell_to_world(&self, cell: IVec3) -> Vec3;
}

/// Regular grid with cells of `cell_size` starting at `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectGrid {
    pub origin: Vec3,
    pub cell_size: Vec3,
}

impl RectGrid {
    pub fn new(origin: Vec3, cell_size: Vec3) -> Self {
        Self { origin, cell_size }
    }
}

impl Grid for RectGrid {
    fn cell_to_world(&self, cell: IVec3) -> Vec3 {
        self.origin + cell.as_vec3() * self.cell_size
    }
}

/// One in-flight camera glide, advanced once per frame by [`AutoMove::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct AutoMove {
    target_position: Vec3,
    target_zoom: f32,
    duration: f32,
    elapsed: f32,
    base_position: Vec3,
    base_zoom: f32,
    reached_end: bool,
}

impl AutoMove {
    /// Start a glide from the viewport's current pose.
    pub fn new<V: Viewport + ?Sized>(
        viewport: &V,
        target_position: Vec3,
        target_zoom: f32,
        duration: f32,
    ) -> Self {
        Self {
            target_position,
            target_zoom,
            duration,
            elapsed: 0.0,
            base_position: viewport.position(),
            base_zoom: viewport.zoom(),
            reached_end: false,
        }
    }

    pub fn target_position(&self) -> Vec3 {
        self.target_position
    }

    pub fn target_zoom(&self) -> f32 {
        self.target_zoom
    }

    /// Interpolation parameter for the next step, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            clamp01(self.elapsed / self.duration)
        }
    }

    /// Advance by one frame. Returns false once the task is finished.
    ///
    /// Completion is decided by distance to the target, not elapsed time. If
    /// the end pose was already applied and something (the bounds pass) keeps
    /// the camera away from it, the task gives up instead of fighting it.
    ///
    /// Zoom is only driven on orthographic viewports; a perspective field of
    /// view is left alone. On arrival the zoom snaps to the clamped target, so
    /// a glide whose target position is the current position changes zoom at
    /// once instead of over the duration.
    pub fn step<V: Viewport + ?Sized>(
        &mut self,
        viewport: &mut V,
        delta_time: f32,
        min_zoom: f32,
        max_zoom: f32,
    ) -> bool {
        let orthographic = viewport.is_orthographic();
        if viewport.position().distance(self.target_position) <= ARRIVAL_EPSILON {
            if orthographic {
                viewport.set_zoom(self.target_zoom.clamp(min_zoom, max_zoom));
            }
            return false;
        }
        if self.reached_end {
            debug!(
                "Auto-move target ({:.2}, {:.2}) unreachable, stopping",
                self.target_position.x, self.target_position.y
            );
            return false;
        }

        let t = self.progress();
        viewport.set_position(self.base_position.lerp(self.target_position, t));
        if orthographic {
            viewport.set_zoom(lerp(self.base_zoom, self.target_zoom, t).clamp(min_zoom, max_zoom));
        }
        self.elapsed += delta_time;
        self.reached_end = t >= 1.0;
        true
    }
}
