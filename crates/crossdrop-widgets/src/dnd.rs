//! Drag sources, drop targets and the preview, bound to egui.
//!
//! Each top-level window owns a [`WindowContext`] that shares the
//! application's coordinator. Within a frame, widgets call [`drag_source`]
//! and [`drop_target`]; targets that were not drawn during the frame are
//! unregistered by [`WindowContext::end_frame`].

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;

use crossdrop_core::{
    new_target_id, DragGesture, DropHandler, DropTargetId, DropTargetRecord, GestureEvent,
    SharedCoordinator, WindowRef,
};
use egui::{Key, PointerButton, Pos2, Response, Ui};
use kurbo::{Point, Rect};

/// Renders a payload inside the floating preview window.
pub type PreviewFn<P> = Rc<dyn Fn(&mut Ui, &P)>;

/// Coordinator whose sessions carry an egui preview renderer.
pub type UiCoordinator<P> = SharedCoordinator<P, PreviewFn<P>>;

/// Wrap a closure as a [`PreviewFn`].
pub fn preview_fn<P>(render: impl Fn(&mut Ui, &P) + 'static) -> PreviewFn<P> {
    Rc::new(render)
}

/// What a drag source did this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSourceOutcome {
    Idle,
    Dragging,
    /// Released over a target that took the payload.
    Dropped,
    /// Released outside any target, or the target refused.
    Rejected,
    Cancelled,
}

impl DragSourceOutcome {
    pub fn succeeded(self) -> bool {
        self == Self::Dropped
    }
}

/// Per-window binding to the shared coordinator.
pub struct WindowContext<P> {
    coordinator: UiCoordinator<P>,
    window: WindowRef,
    content_origin: Cell<Option<Point>>,
    pixels_per_point: Cell<f64>,
    live: RefCell<HashSet<DropTargetId>>,
}

impl<P> WindowContext<P> {
    pub fn new(coordinator: UiCoordinator<P>, window: WindowRef) -> Self {
        Self {
            coordinator,
            window,
            content_origin: Cell::new(None),
            pixels_per_point: Cell::new(1.0),
            live: RefCell::new(HashSet::new()),
        }
    }

    pub fn coordinator(&self) -> &UiCoordinator<P> {
        &self.coordinator
    }

    pub fn window(&self) -> &WindowRef {
        &self.window
    }

    pub fn pixels_per_point(&self) -> f64 {
        self.pixels_per_point.get()
    }

    /// Snapshot the window position and scale. Call before drawing.
    pub fn begin_frame(&self, ctx: &egui::Context) {
        self.pixels_per_point.set(ctx.pixels_per_point() as f64);
        self.content_origin.set(self.window.inner_origin());
        self.live.borrow_mut().clear();
    }

    /// Unregister targets that were not drawn this frame.
    pub fn end_frame(&self) {
        let live = self.live.borrow();
        self.coordinator
            .borrow_mut()
            .retain_window(self.window.key, &live);
    }

    /// Window-local position (points) to physical screen pixels.
    pub fn to_screen(&self, pos: Pos2) -> Option<Point> {
        let origin = self.content_origin.get()?;
        Some(crossdrop_core::local_to_screen(
            Point::new(pos.x as f64, pos.y as f64),
            self.pixels_per_point(),
            origin,
        ))
    }

    pub fn is_dragging(&self) -> bool {
        self.coordinator.borrow().is_dragging()
    }

    /// Whether releasing now would drop on `target` (same hit-test as
    /// [`DragCoordinator::end_drag`](crossdrop_core::DragCoordinator::end_drag)).
    pub fn drag_hovers(&self, target: DropTargetId) -> bool {
        let coordinator = self.coordinator.borrow();
        let chrome_offset = coordinator.config().chrome_offset;
        coordinator
            .pointer()
            .and_then(|p| coordinator.registry().hit_test(p, chrome_offset))
            == Some(target)
    }
}

/// Drive a drag session from `response`, carrying a clone of `item`.
///
/// `response` must sense drags. Press, motion and release are converted to
/// screen coordinates and fed through a [`DragGesture`] stored in egui's
/// temporary memory; Escape cancels.
pub fn drag_source<P: Clone>(
    ui: &Ui,
    ctx: &WindowContext<P>,
    response: &Response,
    item: &P,
    preview: &PreviewFn<P>,
) -> DragSourceOutcome {
    let id = response.id.with("crossdrop_gesture");
    let threshold = ctx.coordinator.borrow().config().drag_threshold;
    let mut gesture = ui
        .data(|d| d.get_temp::<DragGesture>(id))
        .unwrap_or_else(|| DragGesture::new(threshold));

    let (press_origin, latest, escape) = ui.input(|i| {
        (
            i.pointer.press_origin(),
            i.pointer.latest_pos(),
            i.key_pressed(Key::Escape),
        )
    });

    if response.drag_started_by(PointerButton::Primary) {
        if let Some(origin) = press_origin.and_then(|p| ctx.to_screen(p)) {
            gesture.press(origin);
        }
    }

    let event = if gesture.is_active() && escape {
        gesture.abort()
    } else if response.dragged_by(PointerButton::Primary) {
        latest
            .and_then(|p| ctx.to_screen(p))
            .and_then(|p| gesture.drag_to(p))
    } else if gesture.is_active() {
        gesture.release()
    } else {
        None
    };

    ui.data_mut(|d| d.insert_temp(id, gesture));

    let outcome = match event {
        Some(GestureEvent::Start { at }) => {
            let mut coordinator = ctx.coordinator.borrow_mut();
            coordinator.start_drag(item.clone(), preview.clone());
            coordinator.update_drag_pointer(at);
            DragSourceOutcome::Dragging
        }
        Some(GestureEvent::Update(at)) => {
            ctx.coordinator.borrow_mut().update_drag_pointer(at);
            DragSourceOutcome::Dragging
        }
        Some(GestureEvent::End) => {
            if ctx.coordinator.borrow_mut().end_drag() {
                DragSourceOutcome::Dropped
            } else {
                DragSourceOutcome::Rejected
            }
        }
        Some(GestureEvent::Cancel) => {
            ctx.coordinator.borrow_mut().cancel_drag();
            DragSourceOutcome::Cancelled
        }
        None if gesture.is_dragging() => DragSourceOutcome::Dragging,
        None => DragSourceOutcome::Idle,
    };

    if outcome == DragSourceOutcome::Dragging {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
    }
    outcome
}

/// Identity of the drop target drawn from `ui` with `id_salt`.
///
/// Stable across frames, so it can be looked up before the target itself is
/// laid out (e.g. to tint a column the pointer is over).
pub fn target_id(ui: &Ui, id_salt: impl Hash) -> DropTargetId {
    let key = ui.id().with(("crossdrop_target", id_salt));
    ui.data_mut(|d| *d.get_temp_mut_or_insert_with(key, new_target_id))
}

/// Register `rect` as a drop target for this frame.
///
/// The target keeps the same identity across frames as long as it is drawn
/// from the same parent with the same `id_salt`.
pub fn drop_target<P>(
    ui: &Ui,
    ctx: &WindowContext<P>,
    id_salt: impl Hash,
    rect: egui::Rect,
    handler: impl DropHandler<P> + 'static,
) -> DropTargetId {
    let id = target_id(ui, id_salt);

    let bounds = Rect::new(
        rect.min.x as f64,
        rect.min.y as f64,
        rect.max.x as f64,
        rect.max.y as f64,
    );
    let record = DropTargetRecord::new(
        bounds,
        ctx.pixels_per_point(),
        ctx.window.clone(),
        handler,
    );
    ctx.coordinator.borrow_mut().register_drop_target(id, record);
    ctx.live.borrow_mut().insert(id);
    id
}

/// Render the active drag's preview. Returns `false` when nothing is dragged.
pub fn show_preview<P>(ui: &mut Ui, coordinator: &UiCoordinator<P>) -> bool {
    let coordinator = coordinator.borrow();
    let Some(active) = coordinator.active() else {
        return false;
    };
    (active.preview)(ui, &active.payload);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossdrop_core::{DragConfig, DragCoordinator, DropCallbacks, ScreenOrigin, WindowKey};
    use egui::{vec2, Event, Modifiers, RawInput, Sense};

    fn context_at(origin: Point) -> WindowContext<i32> {
        let coordinator = DragCoordinator::shared(DragConfig::default());
        WindowContext::new(coordinator, WindowRef::new(WindowKey(1), Rc::new(origin)))
    }

    fn undecorated(config: DragConfig) -> WindowContext<i32> {
        let coordinator = DragCoordinator::shared(config);
        WindowContext::new(coordinator, WindowRef::new(WindowKey(1), Rc::new(Point::ZERO)))
    }

    /// A window at the screen origin whose title bar is 32 pixels tall.
    struct TallTitleBar;

    impl ScreenOrigin for TallTitleBar {
        fn outer_origin(&self) -> Option<Point> {
            Some(Point::ZERO)
        }

        fn inner_origin(&self) -> Option<Point> {
            Some(Point::new(0.0, 32.0))
        }
    }

    fn register(ctx: &WindowContext<i32>, bounds: Rect, drops: &Rc<Cell<usize>>) -> DropTargetId {
        let id = new_target_id();
        let drops = drops.clone();
        ctx.coordinator().borrow_mut().register_drop_target(
            id,
            DropTargetRecord::new(
                bounds,
                1.0,
                ctx.window().clone(),
                DropCallbacks::new(move |_: &i32| {
                    drops.set(drops.get() + 1);
                    true
                }),
            ),
        );
        id
    }

    fn press(x: f32, y: f32, pressed: bool) -> Event {
        Event::PointerButton {
            pos: Pos2::new(x, y),
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    fn moved(x: f32, y: f32) -> Event {
        Event::PointerMoved(Pos2::new(x, y))
    }

    fn escape() -> Event {
        Event::Key {
            key: Key::Escape,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::NONE,
        }
    }

    /// Run one egui frame per entry of `frames`, with a 100x40 drag source
    /// at the top-left of the panel. Returns the source's outcome per frame.
    fn drive_source(ctx: &WindowContext<i32>, frames: Vec<Vec<Event>>) -> Vec<DragSourceOutcome> {
        let egui_ctx = egui::Context::default();
        let preview = preview_fn(|_: &mut Ui, _: &i32| {});
        let mut outcomes = Vec::new();
        for events in frames {
            let input = RawInput {
                screen_rect: Some(egui::Rect::from_min_size(Pos2::ZERO, vec2(400.0, 400.0))),
                events,
                ..Default::default()
            };
            let _ = egui_ctx.run(input, |c| {
                ctx.begin_frame(c);
                egui::CentralPanel::default().show(c, |ui| {
                    let (_, response) = ui.allocate_exact_size(vec2(100.0, 40.0), Sense::drag());
                    outcomes.push(drag_source(ui, ctx, &response, &42, &preview));
                });
            });
        }
        outcomes
    }

    #[test]
    fn test_screen_conversion_uses_frame_snapshot() {
        let ctx = context_at(Point::new(100.0, 100.0));
        assert_eq!(ctx.to_screen(Pos2::new(10.0, 10.0)), None);

        ctx.begin_frame(&egui::Context::default());
        assert_eq!(
            ctx.to_screen(Pos2::new(10.0, 20.0)),
            Some(Point::new(110.0, 120.0))
        );
    }

    #[test]
    fn test_undrawn_targets_are_swept() {
        let ctx = context_at(Point::ZERO);
        register(&ctx, Rect::new(0.0, 0.0, 10.0, 10.0), &Rc::new(Cell::new(0)));

        ctx.begin_frame(&egui::Context::default());
        ctx.end_frame();
        assert!(ctx.coordinator().borrow().registry().is_empty());
    }

    #[test]
    fn test_drag_hovers_matches_drop_under_title_bar() {
        let coordinator = DragCoordinator::shared(DragConfig::default());
        let ctx: WindowContext<i32> =
            WindowContext::new(coordinator, WindowRef::new(WindowKey(1), Rc::new(TallTitleBar)));
        let drops = Rc::new(Cell::new(0));
        // Default chrome offset (20) puts this at screen y 20..120.
        let id = register(&ctx, Rect::new(0.0, 0.0, 100.0, 100.0), &drops);
        let preview = preview_fn(|_: &mut Ui, _: &i32| {});

        assert!(!ctx.drag_hovers(id));

        // Below the target in screen space, though inside it relative to
        // the content area.
        ctx.coordinator().borrow_mut().start_drag(1, preview.clone());
        ctx.coordinator()
            .borrow_mut()
            .update_drag_pointer(Point::new(50.0, 127.0));
        let hovered = ctx.drag_hovers(id);
        let dropped = ctx.coordinator().borrow_mut().end_drag();
        assert!(!hovered);
        assert_eq!(hovered, dropped);

        ctx.coordinator().borrow_mut().start_drag(2, preview);
        ctx.coordinator()
            .borrow_mut()
            .update_drag_pointer(Point::new(50.0, 60.0));
        let hovered = ctx.drag_hovers(id);
        let dropped = ctx.coordinator().borrow_mut().end_drag();
        assert!(hovered);
        assert_eq!(hovered, dropped);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_drag_hovers_only_the_first_overlapping_target() {
        let ctx = context_at(Point::ZERO);
        let drops = Rc::new(Cell::new(0));
        let first = register(&ctx, Rect::new(0.0, 0.0, 100.0, 100.0), &drops);
        let second = register(&ctx, Rect::new(0.0, 0.0, 100.0, 100.0), &drops);

        ctx.coordinator()
            .borrow_mut()
            .start_drag(1, preview_fn(|_: &mut Ui, _: &i32| {}));
        ctx.coordinator()
            .borrow_mut()
            .update_drag_pointer(Point::new(50.0, 50.0));
        assert!(ctx.drag_hovers(first));
        assert!(!ctx.drag_hovers(second));
    }

    #[test]
    fn test_release_over_target_drops() {
        let ctx = undecorated(DragConfig {
            chrome_offset: 0.0,
            ..Default::default()
        });
        let drops = Rc::new(Cell::new(0));
        register(&ctx, Rect::new(200.0, 200.0, 300.0, 300.0), &drops);

        let outcomes = drive_source(
            &ctx,
            vec![
                vec![],
                vec![moved(20.0, 20.0), press(20.0, 20.0, true)],
                vec![moved(80.0, 80.0)],
                vec![moved(150.0, 150.0)],
                vec![moved(250.0, 250.0)],
                vec![press(250.0, 250.0, false)],
                vec![],
            ],
        );

        assert_eq!(outcomes[0], DragSourceOutcome::Idle);
        assert!(outcomes.contains(&DragSourceOutcome::Dragging));
        let dropped = outcomes
            .iter()
            .filter(|o| **o == DragSourceOutcome::Dropped)
            .count();
        assert_eq!(dropped, 1);
        assert_eq!(outcomes.last(), Some(&DragSourceOutcome::Idle));
        assert_eq!(drops.get(), 1);
        assert!(!ctx.is_dragging());
    }

    #[test]
    fn test_release_outside_targets_is_rejected() {
        let ctx = undecorated(DragConfig {
            chrome_offset: 0.0,
            ..Default::default()
        });
        let drops = Rc::new(Cell::new(0));
        register(&ctx, Rect::new(200.0, 200.0, 300.0, 300.0), &drops);

        let outcomes = drive_source(
            &ctx,
            vec![
                vec![],
                vec![moved(20.0, 20.0), press(20.0, 20.0, true)],
                vec![moved(80.0, 80.0)],
                vec![moved(150.0, 350.0)],
                vec![press(150.0, 350.0, false)],
            ],
        );

        assert!(outcomes.contains(&DragSourceOutcome::Rejected));
        assert!(!outcomes.contains(&DragSourceOutcome::Dropped));
        assert_eq!(drops.get(), 0);
        assert!(!ctx.is_dragging());
    }

    #[test]
    fn test_escape_cancels_drag() {
        let ctx = undecorated(DragConfig {
            chrome_offset: 0.0,
            ..Default::default()
        });
        let drops = Rc::new(Cell::new(0));
        register(&ctx, Rect::new(200.0, 200.0, 300.0, 300.0), &drops);

        let outcomes = drive_source(
            &ctx,
            vec![
                vec![],
                vec![moved(20.0, 20.0), press(20.0, 20.0, true)],
                vec![moved(80.0, 80.0)],
                vec![moved(250.0, 250.0)],
                vec![escape()],
                vec![press(250.0, 250.0, false)],
                vec![],
            ],
        );

        assert_eq!(outcomes[4], DragSourceOutcome::Cancelled);
        assert!(outcomes[5..].iter().all(|o| *o == DragSourceOutcome::Idle));
        assert_eq!(drops.get(), 0);
        assert!(!ctx.is_dragging());
    }

    #[test]
    fn test_motion_below_threshold_stays_a_click() {
        let ctx = undecorated(DragConfig {
            chrome_offset: 0.0,
            drag_threshold: 200.0,
            ..Default::default()
        });
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        ctx.coordinator()
            .borrow_mut()
            .subscribe(move |event| sink.borrow_mut().push(*event));

        let outcomes = drive_source(
            &ctx,
            vec![
                vec![],
                vec![moved(20.0, 20.0), press(20.0, 20.0, true)],
                vec![moved(60.0, 60.0)],
                vec![press(60.0, 60.0, false)],
                vec![],
            ],
        );

        assert!(outcomes.iter().all(|o| *o == DragSourceOutcome::Idle));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_drop_target_identity_is_stable_across_frames() {
        let ctx = context_at(Point::ZERO);
        let egui_ctx = egui::Context::default();
        let mut ids = Vec::new();

        for draw in [true, true, true, false] {
            let _ = egui_ctx.run(RawInput::default(), |c| {
                ctx.begin_frame(c);
                egui::CentralPanel::default().show(c, |ui| {
                    if draw {
                        let rect = egui::Rect::from_min_size(Pos2::ZERO, vec2(50.0, 50.0));
                        ids.push(drop_target(
                            ui,
                            &ctx,
                            "zone",
                            rect,
                            DropCallbacks::new(|_: &i32| true),
                        ));
                        assert_eq!(target_id(ui, "zone"), ids[0]);
                        assert_ne!(target_id(ui, "other"), ids[0]);
                    }
                });
                ctx.end_frame();
            });
            if draw {
                assert_eq!(ctx.coordinator().borrow().registry().len(), 1);
            }
        }

        assert_eq!(ids.len(), 3);
        assert!(ids.iter().all(|id| *id == ids[0]));
        // Not drawn in the last frame.
        assert!(ctx.coordinator().borrow().registry().is_empty());
    }

    #[test]
    fn test_show_preview_only_while_dragging() {
        let coordinator: UiCoordinator<i32> = DragCoordinator::shared(DragConfig::default());
        let rendered = Rc::new(Cell::new(None));
        let sink = rendered.clone();
        let preview = preview_fn(move |_: &mut Ui, n: &i32| sink.set(Some(*n)));

        let egui_ctx = egui::Context::default();
        let _ = egui_ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                assert!(!show_preview(ui, &coordinator));
                coordinator.borrow_mut().start_drag(7, preview.clone());
                assert!(show_preview(ui, &coordinator));
            });
        });
        assert_eq!(rendered.get(), Some(7));
    }
}
