//! Drop targets: identity, bounds and behavior hooks.

use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};

use kurbo::{Point, Rect};
use uuid::Uuid;

use crate::geometry::screen_bounds;
use crate::window::WindowRef;

/// Unique identifier for a mounted drop target.
pub type DropTargetId = Uuid;

/// Generate a fresh drop target identity.
pub fn new_target_id() -> DropTargetId {
    Uuid::new_v4()
}

/// Behavior of a drop target for payloads of type `P`.
pub trait DropHandler<P> {
    /// Whether the target wants to be notified when `payload` enters it.
    fn accepts(&mut self, _payload: &P) -> bool {
        true
    }

    /// Take the payload. Returns whether the drop succeeded.
    fn on_drop(&mut self, payload: &P) -> bool;

    fn on_enter(&mut self, _payload: &P) {}

    fn on_exit(&mut self, _payload: &P) {}
}

type Predicate<P> = Box<dyn FnMut(&P) -> bool>;
type Notify<P> = Box<dyn FnMut(&P)>;

/// Closure-backed [`DropHandler`].
pub struct DropCallbacks<P> {
    accepts: Predicate<P>,
    on_drop: Predicate<P>,
    on_enter: Notify<P>,
    on_exit: Notify<P>,
}

impl<P: 'static> DropCallbacks<P> {
    /// Accept everything, ignore enter/exit.
    pub fn new(on_drop: impl FnMut(&P) -> bool + 'static) -> Self {
        Self {
            accepts: Box::new(|_: &P| true),
            on_drop: Box::new(on_drop),
            on_enter: Box::new(|_: &P| {}),
            on_exit: Box::new(|_: &P| {}),
        }
    }

    pub fn with_accepts(mut self, accepts: impl FnMut(&P) -> bool + 'static) -> Self {
        self.accepts = Box::new(accepts);
        self
    }

    pub fn with_enter(mut self, on_enter: impl FnMut(&P) + 'static) -> Self {
        self.on_enter = Box::new(on_enter);
        self
    }

    pub fn with_exit(mut self, on_exit: impl FnMut(&P) + 'static) -> Self {
        self.on_exit = Box::new(on_exit);
        self
    }
}

impl<P> DropHandler<P> for DropCallbacks<P> {
    fn accepts(&mut self, payload: &P) -> bool {
        (self.accepts)(payload)
    }

    fn on_drop(&mut self, payload: &P) -> bool {
        (self.on_drop)(payload)
    }

    fn on_enter(&mut self, payload: &P) {
        (self.on_enter)(payload)
    }

    fn on_exit(&mut self, payload: &P) {
        (self.on_exit)(payload)
    }
}

/// Adapts a handler for one variant of a sum-type payload.
///
/// Payloads the projection rejects are never accepted, never dropped, and
/// produce no enter/exit calls on the inner handler.
pub struct VariantTarget<P, T, H> {
    project: fn(&P) -> Option<&T>,
    inner: H,
    _payload: PhantomData<fn(&P)>,
}

impl<P, T, H: DropHandler<T>> VariantTarget<P, T, H> {
    pub fn new(project: fn(&P) -> Option<&T>, inner: H) -> Self {
        Self {
            project,
            inner,
            _payload: PhantomData,
        }
    }
}

impl<P, T, H: DropHandler<T>> DropHandler<P> for VariantTarget<P, T, H> {
    fn accepts(&mut self, payload: &P) -> bool {
        (self.project)(payload).is_some_and(|value| self.inner.accepts(value))
    }

    fn on_drop(&mut self, payload: &P) -> bool {
        (self.project)(payload).is_some_and(|value| self.inner.on_drop(value))
    }

    fn on_enter(&mut self, payload: &P) {
        if let Some(value) = (self.project)(payload) {
            self.inner.on_enter(value);
        }
    }

    fn on_exit(&mut self, payload: &P) {
        if let Some(value) = (self.project)(payload) {
            self.inner.on_exit(value);
        }
    }
}

/// A registered drop target.
pub struct DropTargetRecord<P> {
    /// Bounds relative to the window's content area, density-independent.
    pub bounds: Rect,
    /// Scale factor from density-independent units to physical pixels.
    pub density: f64,
    /// Owning window; only read for its current position.
    pub window: WindowRef,
    handler: Box<dyn DropHandler<P>>,
}

impl<P> DropTargetRecord<P> {
    pub fn new(
        bounds: Rect,
        density: f64,
        window: WindowRef,
        handler: impl DropHandler<P> + 'static,
    ) -> Self {
        Self {
            bounds,
            density,
            window,
            handler: Box::new(handler),
        }
    }

    /// Current screen-space bounds, if the window position is known.
    pub fn screen_bounds(&self, chrome_offset: f64) -> Option<Rect> {
        let origin = self.window.outer_origin()?;
        Some(screen_bounds(self.bounds, self.density, origin, chrome_offset))
    }

    /// Whether `point` (physical screen pixels) falls inside this target.
    pub fn contains(&self, point: Point, chrome_offset: f64) -> bool {
        self.screen_bounds(chrome_offset)
            .is_some_and(|bounds| bounds.contains(point))
    }

    pub(crate) fn can_accept(&mut self, payload: &P) -> bool {
        contained("accepts", false, || self.handler.accepts(payload))
    }

    pub(crate) fn do_drop(&mut self, payload: &P) -> bool {
        contained("on_drop", false, || self.handler.on_drop(payload))
    }

    pub(crate) fn do_enter(&mut self, payload: &P) {
        contained("on_enter", (), || self.handler.on_enter(payload))
    }

    pub(crate) fn do_exit(&mut self, payload: &P) {
        contained("on_exit", (), || self.handler.on_exit(payload))
    }
}

impl<P> std::fmt::Debug for DropTargetRecord<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropTargetRecord")
            .field("bounds", &self.bounds)
            .field("density", &self.density)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

/// Run a hook, turning a panic into `default`.
fn contained<R>(hook: &str, default: R, f: impl FnOnce() -> R) -> R {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            log::warn!("Drop target hook `{}` panicked; using its default", hook);
            default
        }
    }
}
