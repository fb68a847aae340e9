//! Window handles used to resolve screen positions at hit-test time.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use kurbo::Point;

/// Something that knows where a top-level window currently sits on screen.
///
/// Both origins are in physical pixels. `None` means the platform cannot
/// report a position (e.g. Wayland), in which case the window's drop targets
/// never match.
pub trait ScreenOrigin {
    /// Top-left corner of the window frame, decorations included.
    fn outer_origin(&self) -> Option<Point>;

    /// Top-left corner of the content area.
    fn inner_origin(&self) -> Option<Point>;
}

impl ScreenOrigin for winit::window::Window {
    fn outer_origin(&self) -> Option<Point> {
        self.outer_position()
            .ok()
            .map(|p| Point::new(p.x as f64, p.y as f64))
    }

    fn inner_origin(&self) -> Option<Point> {
        self.inner_position()
            .ok()
            .map(|p| Point::new(p.x as f64, p.y as f64))
    }
}

/// A fixed origin with no window decoration.
impl ScreenOrigin for Point {
    fn outer_origin(&self) -> Option<Point> {
        Some(*self)
    }

    fn inner_origin(&self) -> Option<Point> {
        Some(*self)
    }
}

/// A movable origin with no window decoration.
impl ScreenOrigin for Cell<Point> {
    fn outer_origin(&self) -> Option<Point> {
        Some(self.get())
    }

    fn inner_origin(&self) -> Option<Point> {
        Some(self.get())
    }
}

impl<T: ScreenOrigin + ?Sized> ScreenOrigin for Arc<T> {
    fn outer_origin(&self) -> Option<Point> {
        (**self).outer_origin()
    }

    fn inner_origin(&self) -> Option<Point> {
        (**self).inner_origin()
    }
}

/// Stable key for a top-level window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowKey(pub u64);

impl From<winit::window::WindowId> for WindowKey {
    fn from(id: winit::window::WindowId) -> Self {
        Self(u64::from(id))
    }
}

/// Non-owning reference to a window: a key plus a way to read its origin.
#[derive(Clone)]
pub struct WindowRef {
    pub key: WindowKey,
    origin: Rc<dyn ScreenOrigin>,
}

impl WindowRef {
    pub fn new(key: WindowKey, origin: Rc<dyn ScreenOrigin>) -> Self {
        Self { key, origin }
    }

    pub fn outer_origin(&self) -> Option<Point> {
        self.origin.outer_origin()
    }

    pub fn inner_origin(&self) -> Option<Point> {
        self.origin.inner_origin()
    }
}

impl fmt::Debug for WindowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowRef")
            .field("key", &self.key)
            .field("outer_origin", &self.outer_origin())
            .finish()
    }
}
