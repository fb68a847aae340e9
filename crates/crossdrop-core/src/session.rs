//! The drag session state machine.
//!
//! A session is either idle or carrying exactly one payload. Every pointer
//! update re-evaluates which targets the pointer is over and fires
//! enter/exit notifications on the transitions; releasing performs a single
//! hit-test and hands the payload to the target under the pointer.

use kurbo::Point;

use crate::registry::DropTargetRegistry;
use crate::target::DropTargetId;

/// The in-flight drag.
#[derive(Debug)]
pub struct ActiveDrag<P, V> {
    /// The dragged value.
    pub payload: P,
    /// Renders the floating preview for `payload`.
    pub preview: V,
    /// Last known pointer position in physical screen pixels.
    pub pointer: Option<Point>,
}

/// Session state.
#[derive(Debug)]
pub enum DragSession<P, V> {
    Idle,
    Dragging(ActiveDrag<P, V>),
}

impl<P, V> Default for DragSession<P, V> {
    fn default() -> Self {
        Self::Idle
    }
}

/// Direction of a boundary crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingKind {
    Entered,
    Exited,
}

/// A notification fired while moving the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub target: DropTargetId,
    pub kind: CrossingKind,
}

/// Result of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropOutcome {
    /// Target under the pointer at release, if any.
    pub target: Option<DropTargetId>,
    /// Whether that target's drop hook reported success.
    pub accepted: bool,
}

impl<P, V> DragSession<P, V> {
    pub fn new() -> Self {
        Self::Idle
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn active(&self) -> Option<&ActiveDrag<P, V>> {
        match self {
            Self::Dragging(active) => Some(active),
            Self::Idle => None,
        }
    }

    /// Current pointer position; only present while dragging.
    pub fn pointer(&self) -> Option<Point> {
        self.active().and_then(|active| active.pointer)
    }

    /// Begin dragging `payload`. An ongoing drag is replaced without
    /// notifications.
    pub fn start(&mut self, payload: P, preview: V) {
        if self.is_dragging() {
            log::debug!("Drag started while another drag was active; replacing it");
        }
        *self = Self::Dragging(ActiveDrag {
            payload,
            preview,
            pointer: None,
        });
    }

    /// Move the pointer and fire enter/exit hooks on boundary crossings.
    ///
    /// Enter requires the target to accept the payload. Exit is fired for any
    /// target the pointer leaves, whether or not it accepted the payload.
    pub fn update_pointer(
        &mut self,
        position: Point,
        registry: &mut DropTargetRegistry<P>,
        chrome_offset: f64,
    ) -> Vec<Crossing> {
        let Self::Dragging(active) = self else {
            log::debug!("Ignoring pointer update without an active drag");
            return Vec::new();
        };

        let previous = active.pointer.replace(position);
        let mut crossings = Vec::new();

        for (id, record) in registry.iter_mut() {
            let is_inside = record.contains(position, chrome_offset);
            let was_inside = previous.is_some_and(|old| record.contains(old, chrome_offset));

            if is_inside && !was_inside && record.can_accept(&active.payload) {
                record.do_enter(&active.payload);
                crossings.push(Crossing {
                    target: id,
                    kind: CrossingKind::Entered,
                });
            }
            // TODO: decide whether exit should also require `accepts`; targets that
            // rejected the payload currently still see an exit.
            if !is_inside && was_inside {
                record.do_exit(&active.payload);
                crossings.push(Crossing {
                    target: id,
                    kind: CrossingKind::Exited,
                });
            }
        }

        crossings
    }

    /// Release the drag over whatever target is under the pointer.
    ///
    /// Always returns to idle.
    pub fn end(&mut self, registry: &mut DropTargetRegistry<P>, chrome_offset: f64) -> DropOutcome {
        let Self::Dragging(active) = std::mem::replace(self, Self::Idle) else {
            log::debug!("Ignoring drag end without an active drag");
            return DropOutcome::default();
        };

        let Some(pointer) = active.pointer else {
            return DropOutcome::default();
        };

        let Some(target) = registry.hit_test(pointer, chrome_offset) else {
            return DropOutcome::default();
        };

        let accepted = registry
            .get_mut(target)
            .is_some_and(|record| record.do_drop(&active.payload));

        DropOutcome {
            target: Some(target),
            accepted,
        }
    }

    /// Abandon the drag without notifying any target.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        *self = Self::Idle;
        was_dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{new_target_id, DropCallbacks, DropTargetRecord};
    use crate::window::{WindowKey, WindowRef};
    use kurbo::Rect;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call<P> {
        Accepts(P),
        Drop(P),
        Enter(P),
        Exit(P),
    }

    type Log<P> = Rc<RefCell<Vec<Call<P>>>>;

    fn recording<P: Clone + 'static>(log: &Log<P>, accept: bool, drop_result: bool) -> DropCallbacks<P> {
        let (a, d, e, x) = (log.clone(), log.clone(), log.clone(), log.clone());
        DropCallbacks::new(move |p: &P| {
            d.borrow_mut().push(Call::Drop(p.clone()));
            drop_result
        })
        .with_accepts(move |p: &P| {
            a.borrow_mut().push(Call::Accepts(p.clone()));
            accept
        })
        .with_enter(move |p: &P| e.borrow_mut().push(Call::Enter(p.clone())))
        .with_exit(move |p: &P| x.borrow_mut().push(Call::Exit(p.clone())))
    }

    fn notifications<P: Clone>(log: &Log<P>) -> Vec<Call<P>> {
        log.borrow()
            .iter()
            .filter(|call| !matches!(call, Call::Accepts(_)))
            .cloned()
            .collect()
    }

    fn target_a<P: Clone + 'static>(
        registry: &mut DropTargetRegistry<P>,
        log: &Log<P>,
        accept: bool,
    ) -> DropTargetId {
        let window = WindowRef::new(WindowKey(1), Rc::new(Point::ZERO));
        let id = new_target_id();
        registry.register(
            id,
            DropTargetRecord::new(
                Rect::new(0.0, 0.0, 100.0, 100.0),
                1.0,
                window,
                recording(log, accept, true),
            ),
        );
        id
    }

    #[test]
    fn test_enter_then_drop() {
        let log: Log<i32> = Rc::default();
        let mut registry = DropTargetRegistry::new();
        let a = target_a(&mut registry, &log, true);
        let mut session = DragSession::new();

        session.start(42, ());
        let crossings = session.update_pointer(Point::new(50.0, 50.0), &mut registry, 0.0);
        assert_eq!(
            crossings,
            vec![Crossing {
                target: a,
                kind: CrossingKind::Entered
            }]
        );

        let outcome = session.end(&mut registry, 0.0);
        assert_eq!(
            outcome,
            DropOutcome {
                target: Some(a),
                accepted: true
            }
        );
        assert_eq!(notifications(&log), vec![Call::Enter(42), Call::Drop(42)]);
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_release_outside_any_target() {
        let log: Log<String> = Rc::default();
        let mut registry = DropTargetRegistry::new();
        target_a(&mut registry, &log, true);
        let mut session = DragSession::new();

        session.start("x".to_string(), ());
        session.update_pointer(Point::new(500.0, 500.0), &mut registry, 0.0);
        let outcome = session.end(&mut registry, 0.0);

        assert!(!outcome.accepted);
        assert_eq!(outcome.target, None);
        assert!(notifications(&log).is_empty());
    }

    #[test]
    fn test_rejecting_target_still_sees_exit() {
        let log: Log<i32> = Rc::default();
        let mut registry = DropTargetRegistry::new();
        target_a(&mut registry, &log, false);
        let mut session = DragSession::new();

        session.start(1, ());
        session.update_pointer(Point::new(50.0, 50.0), &mut registry, 0.0);
        assert!(notifications(&log).is_empty());

        session.update_pointer(Point::new(150.0, 50.0), &mut registry, 0.0);
        assert_eq!(notifications(&log), vec![Call::Exit(1)]);
    }

    #[test]
    fn test_drop_without_prior_enter() {
        let log: Log<i32> = Rc::default();
        let mut registry = DropTargetRegistry::new();
        let a = target_a(&mut registry, &log, false);
        let mut session = DragSession::new();

        session.start(5, ());
        session.update_pointer(Point::new(10.0, 10.0), &mut registry, 0.0);
        let outcome = session.end(&mut registry, 0.0);

        assert_eq!(outcome.target, Some(a));
        assert!(outcome.accepted);
        assert_eq!(notifications(&log), vec![Call::Drop(5)]);
    }

    #[test]
    fn test_enter_exit_alternate() {
        let log: Log<i32> = Rc::default();
        let mut registry = DropTargetRegistry::new();
        target_a(&mut registry, &log, true);
        let mut session = DragSession::new();

        session.start(3, ());
        let path = [
            (150.0, 50.0),
            (50.0, 50.0),
            (60.0, 60.0),
            (70.0, 70.0),
            (150.0, 50.0),
            (160.0, 50.0),
            (20.0, 20.0),
            (200.0, 200.0),
        ];
        for (x, y) in path {
            session.update_pointer(Point::new(x, y), &mut registry, 0.0);
        }

        assert_eq!(
            notifications(&log),
            vec![Call::Enter(3), Call::Exit(3), Call::Enter(3), Call::Exit(3)]
        );
    }

    #[test]
    fn test_cancel_fires_nothing() {
        let log: Log<i32> = Rc::default();
        let mut registry = DropTargetRegistry::new();
        target_a(&mut registry, &log, true);
        let mut session = DragSession::new();

        session.start(9, ());
        session.update_pointer(Point::new(50.0, 50.0), &mut registry, 0.0);
        log.borrow_mut().clear();

        assert!(session.cancel());
        assert!(!session.is_dragging());
        assert_eq!(session.pointer(), None);
        assert!(log.borrow().is_empty());

        // Idle now; nothing to release.
        assert_eq!(session.end(&mut registry, 0.0), DropOutcome::default());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_start_replaces_active_drag() {
        let mut session: DragSession<i32, ()> = DragSession::new();
        session.start(1, ());
        session.start(2, ());

        assert_eq!(session.active().map(|a| a.payload), Some(2));
        assert_eq!(session.pointer(), None);
    }

    #[test]
    fn test_idle_transitions_are_noops() {
        let mut registry: DropTargetRegistry<i32> = DropTargetRegistry::new();
        let mut session: DragSession<i32, ()> = DragSession::new();

        assert!(session.update_pointer(Point::ZERO, &mut registry, 0.0).is_empty());
        assert_eq!(session.pointer(), None);
        assert!(!session.end(&mut registry, 0.0).accepted);
        assert!(!session.cancel());
    }

    #[test]
    fn test_end_without_pointer_update() {
        let log: Log<i32> = Rc::default();
        let mut registry = DropTargetRegistry::new();
        target_a(&mut registry, &log, true);
        let mut session = DragSession::new();

        session.start(4, ());
        assert!(!session.end(&mut registry, 0.0).accepted);
        assert!(log.borrow().is_empty());
    }
}
