//! The camera host seen through a narrow transform + zoom interface.
//!
//! Screen coordinates are pixels, world coordinates are whatever the host
//! renders in. [`Viewport`] is all the gesture layer needs from a camera;
//! [`SimpleCamera`] is an in-memory implementation for headless hosts and
//! tests.

use pinchpan_common::{Vec2, Vec3};
use std::fmt;
use tracing::{debug, trace};

/// Camera projection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Projection {
    /// Zoom is the half-height of the visible area in world units
    Orthographic,
    /// Zoom is the vertical field of view in degrees
    Perspective,
}

/// Mutation and projection interface of the camera being driven.
pub trait Viewport {
    /// Camera position in world space.
    fn position(&self) -> Vec3;

    fn set_position(&mut self, position: Vec3);

    /// Orthographic half-height, or field of view in degrees for perspective.
    fn zoom(&self) -> f32;

    fn set_zoom(&mut self, zoom: f32);

    fn projection(&self) -> Projection;

    /// Map a screen point to world space. `z` is the distance in front of the
    /// camera; 0 lets the implementation pick its reference plane.
    fn screen_to_world(&self, screen: Vec3) -> Vec3;

    fn world_to_screen(&self, world: Vec3) -> Vec3;

    /// Screen point normalized to `[0, 1]` over the viewport.
    fn screen_to_viewport(&self, screen: Vec3) -> Vec3 {
        let (w, h) = (self.pixel_width().max(1), self.pixel_height().max(1));
        Vec3::new(screen.x / w as f32, screen.y / h as f32, screen.z)
    }

    fn pixel_width(&self) -> u32;

    fn pixel_height(&self) -> u32;

    fn is_orthographic(&self) -> bool {
        self.projection() == Projection::Orthographic
    }
}

impl<T: Viewport + ?Sized> Viewport for &mut T {
    fn position(&self) -> Vec3 {
        (**self).position()
    }

    fn set_position(&mut self, position: Vec3) {
        (**self).set_position(position)
    }

    fn zoom(&self) -> f32 {
        (**self).zoom()
    }

    fn set_zoom(&mut self, zoom: f32) {
        (**self).set_zoom(zoom)
    }

    fn projection(&self) -> Projection {
        (**self).projection()
    }

    fn screen_to_world(&self, screen: Vec3) -> Vec3 {
        (**self).screen_to_world(screen)
    }

    fn world_to_screen(&self, world: Vec3) -> Vec3 {
        (**self).world_to_screen(world)
    }

    fn screen_to_viewport(&self, screen: Vec3) -> Vec3 {
        (**self).screen_to_viewport(screen)
    }

    fn pixel_width(&self) -> u32 {
        (**self).pixel_width()
    }

    fn pixel_height(&self) -> u32 {
        (**self).pixel_height()
    }
}

/// World-space rectangle currently visible through an orthographic viewport.
pub fn visible_world_rect<V: Viewport + ?Sized>(viewport: &V) -> pinchpan_common::Bounds {
    let (w, h) = (viewport.pixel_width() as f32, viewport.pixel_height() as f32);
    let a = viewport.screen_to_world(Vec3::ZERO);
    let b = viewport.screen_to_world(Vec3::new(w, h, 0.0));
    pinchpan_common::Bounds::new(a.x.min(b.x), a.x.max(b.x), a.y.min(b.y), a.y.max(b.y))
}

/// Distance to the z = 0 plane used when a perspective query passes z = 0.
const DEFAULT_PLANE_DISTANCE: f32 = 10.0;

/// Minimal 2D camera looking down +z.
///
/// Screen origin is the top-left pixel with y growing downward; world y grows
/// upward.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleCamera {
    position: Vec3,
    orthographic_size: f32,
    field_of_view: f32,
    projection: Projection,
    width: u32,
    height: u32,
}

impl SimpleCamera {
    /// Create an orthographic camera at the origin.
    pub fn orthographic(width: u32, height: u32, orthographic_size: f32) -> Self {
        debug!(
            "Creating orthographic camera {}x{} size {:.2}",
            width, height, orthographic_size
        );
        Self {
            position: Vec3::ZERO,
            orthographic_size,
            field_of_view: 60.0,
            projection: Projection::Orthographic,
            width,
            height,
        }
    }

    /// Create a perspective camera placed `DEFAULT_PLANE_DISTANCE` in front of z = 0.
    pub fn perspective(width: u32, height: u32, field_of_view: f32) -> Self {
        debug!(
            "Creating perspective camera {}x{} fov {:.1}",
            width, height, field_of_view
        );
        Self {
            position: Vec3::new(0.0, 0.0, -DEFAULT_PLANE_DISTANCE),
            orthographic_size: 5.0,
            field_of_view,
            projection: Projection::Perspective,
            width,
            height,
        }
    }

    /// Builder-style position override.
    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the window size (called on window resize)
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        if self.width != width || self.height != height {
            debug!("Camera window size changed to {}x{}", width, height);
            self.width = width;
            self.height = height;
        }
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    pub fn orthographic_size(&self) -> f32 {
        self.orthographic_size
    }

    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    /// World units per screen pixel at `distance` in front of the camera.
    fn units_per_pixel(&self, distance: f32) -> f32 {
        let h = self.height.max(1) as f32;
        match self.projection {
            Projection::Orthographic => 2.0 * self.orthographic_size / h,
            Projection::Perspective => {
                let half = distance * (self.field_of_view.to_radians() / 2.0).tan();
                2.0 * half / h
            }
        }
    }

    fn plane_distance(&self, z: f32) -> f32 {
        if z > 0.0 {
            z
        } else if self.position.z < 0.0 {
            -self.position.z
        } else {
            DEFAULT_PLANE_DISTANCE
        }
    }

    fn half_screen(&self) -> Vec2 {
        Vec2::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

impl Viewport for SimpleCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        trace!(
            "Camera moved to ({:.3}, {:.3}, {:.3})",
            position.x,
            position.y,
            position.z
        );
        self.position = position;
    }

    fn zoom(&self) -> f32 {
        match self.projection {
            Projection::Orthographic => self.orthographic_size,
            Projection::Perspective => self.field_of_view,
        }
    }

    fn set_zoom(&mut self, zoom: f32) {
        match self.projection {
            Projection::Orthographic => self.orthographic_size = zoom,
            Projection::Perspective => self.field_of_view = zoom,
        }
    }

    fn projection(&self) -> Projection {
        self.projection
    }

    fn screen_to_world(&self, screen: Vec3) -> Vec3 {
        let half = self.half_screen();
        let (k, dz) = match self.projection {
            Projection::Orthographic => (self.units_per_pixel(0.0), screen.z),
            Projection::Perspective => {
                let d = self.plane_distance(screen.z);
                (self.units_per_pixel(d), d)
            }
        };
        Vec3::new(
            self.position.x + (screen.x - half.x) * k,
            self.position.y + (half.y - screen.y) * k,
            self.position.z + dz,
        )
    }

    fn world_to_screen(&self, world: Vec3) -> Vec3 {
        let half = self.half_screen();
        let dz = world.z - self.position.z;
        let k = match self.projection {
            Projection::Orthographic => self.units_per_pixel(0.0),
            Projection::Perspective => self.units_per_pixel(dz.max(f32::EPSILON)),
        };
        Vec3::new(
            (world.x - self.position.x) / k + half.x,
            half.y - (world.y - self.position.y) / k,
            dz,
        )
    }

    fn pixel_width(&self) -> u32 {
        self.width
    }

    fn pixel_height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for SimpleCamera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Camera({:?}, win={}x{}, pos={:.2},{:.2},{:.2}, zoom={:.2})",
            self.projection,
            self.width,
            self.height,
            self.position.x,
            self.position.y,
            self.position.z,
            self.zoom()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_orthographic_center_maps_to_position() {
        let cam = SimpleCamera::orthographic(800, 600, 5.0).at(Vec3::new(3.0, -2.0, 0.0));
        let world = cam.screen_to_world(Vec3::new(400.0, 300.0, 0.0));
        assert!(approx(world, Vec3::new(3.0, -2.0, 0.0)));
    }

    #[test]
    fn test_orthographic_scale_and_orientation() {
        let cam = SimpleCamera::orthographic(800, 600, 5.0);
        // Top-left corner: half-height 5 up, half-width 5 * 4/3 left
        let world = cam.screen_to_world(Vec3::ZERO);
        assert!(approx(world, Vec3::new(-20.0 / 3.0, 5.0, 0.0)));
    }

    #[test]
    fn test_screen_world_round_trip() {
        let cam = SimpleCamera::orthographic(1024, 768, 2.5).at(Vec3::new(10.0, 4.0, 0.0));
        let screen = Vec3::new(123.0, 456.0, 0.0);
        assert!(approx(cam.world_to_screen(cam.screen_to_world(screen)), screen));

        let cam = SimpleCamera::perspective(1024, 768, 60.0);
        let screen = Vec3::new(700.0, 100.0, 0.0);
        let back = cam.world_to_screen(cam.screen_to_world(screen));
        assert!((back.x - screen.x).abs() < 1e-2 && (back.y - screen.y).abs() < 1e-2);
    }

    #[test]
    fn test_zoom_follows_projection() {
        let mut cam = SimpleCamera::orthographic(800, 600, 5.0);
        cam.set_zoom(7.0);
        assert_eq!(cam.orthographic_size(), 7.0);

        cam.set_projection(Projection::Perspective);
        cam.set_zoom(45.0);
        assert_eq!(cam.field_of_view(), 45.0);
        assert_eq!(cam.orthographic_size(), 7.0);
        assert!(!cam.is_orthographic());
    }

    #[test]
    fn test_screen_to_viewport() {
        let cam = SimpleCamera::orthographic(800, 600, 5.0);
        let v = cam.screen_to_viewport(Vec3::new(400.0, 150.0, 0.0));
        assert_eq!(v, Vec3::new(0.5, 0.25, 0.0));
    }

    #[test]
    fn test_visible_rect() {
        let cam = SimpleCamera::orthographic(800, 600, 3.0).at(Vec3::new(1.0, 1.0, 0.0));
        let rect = visible_world_rect(&cam);
        assert!((rect.height() - 6.0).abs() < 1e-4);
        assert!((rect.width() - 8.0).abs() < 1e-4);
        assert!((rect.center() - Vec2::new(1.0, 1.0)).length() < 1e-4);
    }

    #[test]
    fn test_mut_ref_is_viewport() {
        fn nudge<V: Viewport>(mut viewport: V) {
            viewport.set_position(Vec3::new(1.0, 2.0, 0.0));
        }

        let mut cam = SimpleCamera::orthographic(800, 600, 5.0);
        nudge(&mut cam);
        assert_eq!(cam.position(), Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_display() {
        let cam = SimpleCamera::orthographic(1024, 768, 1.5);
        let s = cam.to_string();
        assert!(s.contains("1024x768"));
        assert!(s.contains("zoom=1.50"));
    }
}
