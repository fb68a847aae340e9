//! The contract between the application shell and a demo.

use std::cell::RefCell;
use std::rc::Rc;

use crossdrop_widgets::WindowContext;

use crate::config::WindowSpec;

/// A multi-window demo driven by [`App`](crate::App).
pub trait Demo {
    /// What the demo's drag sources carry.
    type Payload: Clone + 'static;

    /// Windows to open at startup, in order.
    fn windows(&self) -> Vec<WindowSpec>;

    /// Draw window `window` (an index into [`Demo::windows`]).
    fn ui(&mut self, window: usize, ui: &mut egui::Ui, dnd: &WindowContext<Self::Payload>);

    /// Apply actions queued during the last frame. Returns whether anything
    /// changed, in which case every window is redrawn.
    fn apply_pending(&mut self) -> bool;
}

/// Actions pushed by drop hooks and drag sources, drained after each frame.
///
/// Hooks run inside the coordinator and must not touch demo state directly.
pub struct ActionQueue<A>(Rc<RefCell<Vec<A>>>);

impl<A> ActionQueue<A> {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Vec::new())))
    }

    pub fn push(&self, action: A) {
        self.0.borrow_mut().push(action);
    }

    /// Take every queued action, oldest first.
    pub fn drain(&self) -> Vec<A> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl<A> Clone for ActionQueue<A> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A> Default for ActionQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}
