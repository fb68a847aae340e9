//! Conversions between widget-local and screen coordinates.
//!
//! Drop targets report their bounds in density-independent units relative to
//! their window's content area. Hit-testing happens in physical screen pixels
//! so that a pointer held over one window can be matched against targets
//! living in another.

use kurbo::{Point, Rect};

/// Approximate title bar height in density-independent units.
///
/// This is not measured from the real window decoration; see
/// [`DragConfig::chrome_offset`](crate::DragConfig::chrome_offset).
pub const DEFAULT_CHROME_OFFSET: f64 = 20.0;

/// Map local bounds to a screen-space rectangle.
///
/// `window_origin` is the outer top-left of the owning window in physical
/// pixels, `density` the window's scale factor.
pub fn screen_bounds(local: Rect, density: f64, window_origin: Point, chrome_offset: f64) -> Rect {
    let left = window_origin.x + local.x0 * density;
    let top = window_origin.y + (local.y0 + chrome_offset) * density;
    let right = left + local.width() * density;
    let bottom = top + local.height() * density;
    Rect::new(left, top, right, bottom)
}

/// Map a point in a window's content area to physical screen pixels.
///
/// Unlike [`screen_bounds`], this takes the content (inner) origin, so no
/// chrome compensation applies.
pub fn local_to_screen(local: Point, density: f64, content_origin: Point) -> Point {
    Point::new(
        content_origin.x + local.x * density,
        content_origin.y + local.y * density,
    )
}
