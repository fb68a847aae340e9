//! The application-wide drag-and-drop coordinator.
//!
//! One coordinator is created at startup and shared by every window, so a
//! drag that starts in one window can end over a target in another. It owns
//! the drop target registry and the drag session, and pushes [`DragEvent`]s to
//! subscribed listeners synchronously after each transition.
//!
//! Drop target hooks run while the coordinator is mutably borrowed; they must
//! not call back into it.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use kurbo::Point;

use crate::config::DragConfig;
use crate::preview::PreviewPlacement;
use crate::registry::DropTargetRegistry;
use crate::session::{ActiveDrag, CrossingKind, DragSession};
use crate::target::{DropTargetId, DropTargetRecord};
use crate::window::WindowKey;

/// Coordinator shared between windows on the UI thread.
pub type SharedCoordinator<P, V> = Rc<RefCell<DragCoordinator<P, V>>>;

/// Session transitions, as seen by listeners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    Started,
    Moved(Point),
    Entered(DropTargetId),
    Exited(DropTargetId),
    Dropped {
        target: Option<DropTargetId>,
        accepted: bool,
    },
    Cancelled,
}

type Listener = Box<dyn FnMut(&DragEvent)>;

/// Registry + session + listeners.
pub struct DragCoordinator<P, V = ()> {
    config: DragConfig,
    registry: DropTargetRegistry<P>,
    session: DragSession<P, V>,
    listeners: Vec<Listener>,
}

impl<P, V> DragCoordinator<P, V> {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            registry: DropTargetRegistry::new(),
            session: DragSession::new(),
            listeners: Vec::new(),
        }
    }

    /// Create a coordinator ready to be handed to every window.
    pub fn shared(config: DragConfig) -> SharedCoordinator<P, V> {
        Rc::new(RefCell::new(Self::new(config)))
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn registry(&self) -> &DropTargetRegistry<P> {
        &self.registry
    }

    /// Be notified of every session transition.
    pub fn subscribe(&mut self, listener: impl FnMut(&DragEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn register_drop_target(&mut self, id: DropTargetId, record: DropTargetRecord<P>) {
        if self.registry.register(id, record) {
            log::debug!("Registered drop target {}", id);
        }
    }

    pub fn unregister_drop_target(&mut self, id: DropTargetId) {
        if self.registry.unregister(id).is_some() {
            log::debug!("Unregistered drop target {}", id);
        }
    }

    /// Unregister every target of `window` not in `live`.
    pub fn retain_window(&mut self, window: WindowKey, live: &HashSet<DropTargetId>) {
        let removed = self.registry.retain_window(window, live);
        if removed > 0 {
            log::debug!("Swept {} unmounted drop target(s) from {:?}", removed, window);
        }
    }

    pub fn start_drag(&mut self, payload: P, preview: V) {
        self.session.start(payload, preview);
        log::debug!("Drag started");
        self.emit(DragEvent::Started);
    }

    /// Move the pointer (physical screen pixels).
    pub fn update_drag_pointer(&mut self, position: Point) {
        if !self.session.is_dragging() {
            return;
        }
        let crossings =
            self.session
                .update_pointer(position, &mut self.registry, self.config.chrome_offset);
        self.emit(DragEvent::Moved(position));
        for crossing in crossings {
            let event = match crossing.kind {
                CrossingKind::Entered => DragEvent::Entered(crossing.target),
                CrossingKind::Exited => DragEvent::Exited(crossing.target),
            };
            self.emit(event);
        }
    }

    /// Release the drag. Returns whether a target took the payload.
    pub fn end_drag(&mut self) -> bool {
        if !self.session.is_dragging() {
            return false;
        }
        let outcome = self
            .session
            .end(&mut self.registry, self.config.chrome_offset);
        match outcome.target {
            Some(target) => log::info!("Dropped on {} (accepted: {})", target, outcome.accepted),
            None => log::info!("Dropped outside any target"),
        }
        self.emit(DragEvent::Dropped {
            target: outcome.target,
            accepted: outcome.accepted,
        });
        outcome.accepted
    }

    pub fn cancel_drag(&mut self) {
        if self.session.cancel() {
            log::debug!("Drag cancelled");
            self.emit(DragEvent::Cancelled);
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    /// Pointer position of the active drag.
    pub fn pointer(&self) -> Option<Point> {
        self.session.pointer()
    }

    pub fn active(&self) -> Option<&ActiveDrag<P, V>> {
        self.session.active()
    }

    /// Where the floating preview should be, if anywhere.
    pub fn preview_placement(&self) -> Option<PreviewPlacement> {
        PreviewPlacement::for_session(&self.session, &self.config)
    }

    fn emit(&mut self, event: DragEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{new_target_id, DropCallbacks};
    use crate::window::WindowRef;
    use kurbo::Rect;

    fn coordinator_with_target(
        dropped: Rc<RefCell<Vec<i32>>>,
    ) -> (DragCoordinator<i32>, DropTargetId) {
        let mut coordinator = DragCoordinator::new(DragConfig {
            chrome_offset: 0.0,
            ..Default::default()
        });
        let id = new_target_id();
        let window = WindowRef::new(WindowKey(7), Rc::new(Point::ZERO));
        coordinator.register_drop_target(
            id,
            DropTargetRecord::new(
                Rect::new(0.0, 0.0, 100.0, 100.0),
                1.0,
                window,
                DropCallbacks::new(move |n: &i32| {
                    dropped.borrow_mut().push(*n);
                    true
                }),
            ),
        );
        (coordinator, id)
    }

    #[test]
    fn test_listeners_see_full_lifecycle() {
        let dropped = Rc::new(RefCell::new(Vec::new()));
        let (mut coordinator, id) = coordinator_with_target(dropped.clone());
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        coordinator.subscribe(move |event| sink.borrow_mut().push(*event));

        coordinator.start_drag(42, ());
        coordinator.update_drag_pointer(Point::new(50.0, 50.0));
        assert!(coordinator.end_drag());

        assert_eq!(*dropped.borrow(), vec![42]);
        assert_eq!(
            *events.borrow(),
            vec![
                DragEvent::Started,
                DragEvent::Moved(Point::new(50.0, 50.0)),
                DragEvent::Entered(id),
                DragEvent::Dropped {
                    target: Some(id),
                    accepted: true
                },
            ]
        );
    }

    #[test]
    fn test_chrome_offset_shifts_targets() {
        let dropped = Rc::new(RefCell::new(Vec::new()));
        let (mut coordinator, _) = coordinator_with_target(dropped.clone());
        coordinator.config = DragConfig::default();

        coordinator.start_drag(1, ());
        // Inside the local rect but above it once the 20 unit title bar is added.
        coordinator.update_drag_pointer(Point::new(50.0, 10.0));
        assert!(!coordinator.end_drag());
        assert!(dropped.borrow().is_empty());
    }

    #[test]
    fn test_idle_calls_emit_nothing() {
        let (mut coordinator, _) = coordinator_with_target(Rc::default());
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        coordinator.subscribe(move |event| sink.borrow_mut().push(*event));

        coordinator.update_drag_pointer(Point::new(1.0, 1.0));
        assert!(!coordinator.end_drag());
        coordinator.cancel_drag();
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_cancel_clears_preview() {
        let (mut coordinator, _) = coordinator_with_target(Rc::default());
        coordinator.start_drag(1, ());
        coordinator.update_drag_pointer(Point::new(300.0, 300.0));
        assert!(coordinator.preview_placement().is_some());

        coordinator.cancel_drag();
        assert!(!coordinator.is_dragging());
        assert!(coordinator.preview_placement().is_none());
    }

    #[test]
    fn test_shared_across_windows() {
        let shared: SharedCoordinator<i32, ()> = DragCoordinator::shared(DragConfig::default());
        let other = shared.clone();
        shared.borrow_mut().start_drag(5, ());
        assert!(other.borrow().is_dragging());
    }
}
