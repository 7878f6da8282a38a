//! Keeps an orthographic camera's visible area inside a world rectangle.

use crate::viewport::Viewport;
use pinchpan_common::{Bounds, Vec3};
use tracing::trace;

/// Inset kept between the visible area and the bounds to avoid edge seams.
pub const BOUNDS_MARGIN: f32 = 0.001;

/// Smallest orthographic size the bounds pass will shrink to.
const MIN_CONFINED_SIZE: f32 = 1e-4;

/// Shrink the zoom until the view fits in `bounds`, then slide the camera so
/// the visible rectangle lies inside them.
///
/// Only meaningful for orthographic viewports; the caller checks projection.
pub fn confine<V: Viewport + ?Sized>(viewport: &mut V, bounds: &Bounds) {
    let (w, h) = (viewport.pixel_width() as f32, viewport.pixel_height() as f32);
    if w <= 0.0 || h <= 0.0 {
        return;
    }

    let mut size = viewport.zoom();
    size = size.min(bounds.height() / 2.0 - BOUNDS_MARGIN);
    size = size.min(h * bounds.width() / (2.0 * w) - BOUNDS_MARGIN);
    size = size.max(MIN_CONFINED_SIZE);
    if size != viewport.zoom() {
        trace!("Bounds shrink zoom {:.3} -> {:.3}", viewport.zoom(), size);
        viewport.set_zoom(size);
    }

    // Half the visible extent on each axis
    let margin = (viewport.screen_to_world(Vec3::new(w / 2.0, h / 2.0, 0.0))
        - viewport.screen_to_world(Vec3::ZERO))
    .abs();

    let position = viewport.position();
    // max/min rather than clamp: a degenerate margin must not panic
    let x = position
        .x
        .max(bounds.min_x + margin.x)
        .min(bounds.max_x - margin.x);
    let y = position
        .y
        .max(bounds.min_y + margin.y)
        .min(bounds.max_y - margin.y);

    if x != position.x || y != position.y {
        trace!(
            "Bounds move camera ({:.3}, {:.3}) -> ({:.3}, {:.3})",
            position.x,
            position.y,
            x,
            y
        );
        viewport.set_position(Vec3::new(x, y, position.z));
    }
}
