//! Icon trays: drag icons between windows and drop them on a tray's bar.

use crossdrop_core::DropCallbacks;
use crossdrop_widgets::{
    drag_source, drop_bar_frame, drop_target, preview_fn, sizing, theme, PreviewFn, WindowContext,
};
use egui::{Align2, Color32, CornerRadius, FontId, Frame, Sense, Stroke, Ui};

use crate::config::WindowSpec;
use crate::demo::{ActionQueue, Demo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Edit,
    Delete,
    Add,
    Refresh,
    Home,
    Done,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Edit => "✏",
            Icon::Delete => "🗑",
            Icon::Add => "➕",
            Icon::Refresh => "🔄",
            Icon::Home => "🏠",
            Icon::Done => "✔",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Icon::Edit => "Edit",
            Icon::Delete => "Delete",
            Icon::Add => "Add",
            Icon::Refresh => "Refresh",
            Icon::Home => "Home",
            Icon::Done => "Done",
        }
    }
}

/// One tray window.
#[derive(Debug, Clone, PartialEq)]
pub struct IconsState {
    pub window: WindowSpec,
    pub icons: Vec<Icon>,
    /// A drag is hovering the drop bar.
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconsAction {
    Add(Icon),
    /// Removes the first occurrence.
    Remove(Icon),
    SetActive(bool),
}

/// Reducer for a tray.
#[derive(Debug, Clone)]
pub struct IconsController {
    state: IconsState,
}

impl IconsController {
    pub fn new(state: IconsState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &IconsState {
        &self.state
    }

    pub fn trigger_action(&mut self, action: IconsAction) {
        match action {
            IconsAction::Add(icon) => self.state.icons.push(icon),
            IconsAction::Remove(icon) => {
                if let Some(pos) = self.state.icons.iter().position(|i| *i == icon) {
                    self.state.icons.remove(pos);
                }
            }
            IconsAction::SetActive(active) => self.state.is_active = active,
        }
    }
}

/// Two trays at fixed positions.
pub struct IconsDemo {
    trays: Vec<IconsController>,
    queue: ActionQueue<(usize, IconsAction)>,
}

impl IconsDemo {
    pub fn new() -> Self {
        let tray = |title: &str, x: f64, y: f64, icons: Vec<Icon>| {
            IconsController::new(IconsState {
                window: WindowSpec::new(title, (300.0, 400.0)).at(x, y),
                icons,
                is_active: false,
            })
        };
        Self {
            trays: vec![
                tray("Icons 1", 100.0, 100.0, vec![Icon::Edit, Icon::Delete, Icon::Add]),
                tray("Icons 2", 300.0, 150.0, vec![Icon::Refresh, Icon::Home, Icon::Done]),
            ],
            queue: ActionQueue::new(),
        }
    }

    pub fn trays(&self) -> &[IconsController] {
        &self.trays
    }
}

impl Default for IconsDemo {
    fn default() -> Self {
        Self::new()
    }
}

fn icon_preview() -> PreviewFn<Icon> {
    preview_fn(|ui: &mut Ui, icon: &Icon| {
        ui.centered_and_justified(|ui| {
            ui.label(egui::RichText::new(icon.glyph()).size(48.0).color(theme::TEXT));
        });
    })
}

impl Demo for IconsDemo {
    type Payload = Icon;

    fn windows(&self) -> Vec<WindowSpec> {
        self.trays.iter().map(|t| t.state().window.clone()).collect()
    }

    fn ui(&mut self, window: usize, ui: &mut Ui, dnd: &WindowContext<Icon>) {
        let Some(tray) = self.trays.get(window) else {
            return;
        };
        let state = tray.state();
        let preview = icon_preview();

        Frame::new()
            .stroke(Stroke::new(1.0, Color32::BLACK))
            .corner_radius(CornerRadius::same(sizing::CORNER_RADIUS))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                for (i, icon) in state.icons.iter().enumerate() {
                    ui.push_id(i, |ui| {
                        let (rect, response) = ui.allocate_exact_size(
                            egui::vec2(ui.available_width(), sizing::ICON_ROW),
                            Sense::drag(),
                        );
                        ui.painter().text(
                            rect.left_center() + egui::vec2(8.0, 0.0),
                            Align2::LEFT_CENTER,
                            icon.glyph(),
                            FontId::proportional(20.0),
                            theme::TEXT,
                        );
                        let response = response.on_hover_text(icon.name());
                        if drag_source(ui, dnd, &response, icon, &preview).succeeded() {
                            self.queue.push((window, IconsAction::Remove(*icon)));
                        }
                    });
                }
            });

        ui.add_space(5.0);

        let bar = drop_bar_frame(state.is_active).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.set_min_height(sizing::DROP_BAR);
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("Drop icons here").color(theme::TEXT_MUTED));
            });
        });

        let (on_drop, on_enter, on_exit) = (self.queue.clone(), self.queue.clone(), self.queue.clone());
        drop_target(
            ui,
            dnd,
            "drop-bar",
            bar.response.rect,
            DropCallbacks::new(move |icon: &Icon| {
                on_drop.push((window, IconsAction::Add(*icon)));
                on_drop.push((window, IconsAction::SetActive(false)));
                true
            })
            .with_enter(move |_: &Icon| on_enter.push((window, IconsAction::SetActive(true))))
            .with_exit(move |_: &Icon| on_exit.push((window, IconsAction::SetActive(false)))),
        );
    }

    fn apply_pending(&mut self) -> bool {
        let actions = self.queue.drain();
        let changed = !actions.is_empty();
        for (window, action) in actions {
            if let Some(tray) = self.trays.get_mut(window) {
                log::debug!("Tray {}: {:?}", window, action);
                tray.trigger_action(action);
            }
        }
        changed
    }
}
