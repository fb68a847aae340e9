//! Kanban-style ToDo boards whose cards move between windows.
//!
//! Two layouts share one state and reducer: a window per assignee, or one
//! board with a swimlane per assignee next to a backlog window.

use std::fmt;

use crossdrop_core::DropCallbacks;
use crossdrop_widgets::{
    card_content, card_frame, column_frame, drag_source, draggable_card, drop_bar_frame,
    drop_target, preview_fn, section_label, separator, target_id, theme, PreviewFn,
    WindowContext,
};
use egui::Ui;

use crate::config::WindowSpec;
use crate::demo::{ActionQueue, Demo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activity {
    Todo,
    Planning,
    InProgress,
    Testing,
    Done,
}

impl Activity {
    pub const ALL: [Activity; 5] = [
        Activity::Todo,
        Activity::Planning,
        Activity::InProgress,
        Activity::Testing,
        Activity::Done,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Activity::Todo => "TODO",
            Activity::Planning => "PLANNING",
            Activity::InProgress => "IN_PROGRESS",
            Activity::Testing => "TESTING",
            Activity::Done => "DONE",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub assignee: String,
    pub activity: Activity,
    pub title: String,
    pub description: String,
}

impl TodoItem {
    pub fn new(assignee: &str, activity: Activity, title: &str, description: &str) -> Self {
        Self {
            assignee: assignee.to_string(),
            activity,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodoState {
    pub assignees: Vec<String>,
    pub items: Vec<TodoItem>,
}

impl TodoState {
    pub fn seeded() -> Self {
        let peter = "Peter Parker";
        let homer = "Homer Simpson";
        Self {
            assignees: vec![peter.to_string(), homer.to_string()],
            items: vec![
                TodoItem::new(peter, Activity::Todo, "Become Spiderman", "Get bitten by radioactive spider"),
                TodoItem::new(peter, Activity::Todo, "Be a Hero", "Do Spidy stuff"),
                TodoItem::new(homer, Activity::Todo, "Drink Duff", "At Moe's"),
                TodoItem::new(homer, Activity::Todo, "Work", "No nuclear meltdown this time"),
            ],
        }
    }

    /// Items in `activity` assigned to `assignee`, in insertion order.
    pub fn find<'a>(
        &'a self,
        activity: Activity,
        assignee: &'a str,
    ) -> impl Iterator<Item = &'a TodoItem> + 'a {
        self.items
            .iter()
            .filter(move |item| item.activity == activity && item.assignee == assignee)
    }

    /// Items in `activity` across every assignee.
    pub fn in_activity(&self, activity: Activity) -> impl Iterator<Item = &TodoItem> + '_ {
        self.items.iter().filter(move |item| item.activity == activity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoAction {
    /// Move `item` to a column, possibly reassigning it.
    Transition {
        item: TodoItem,
        new_activity: Activity,
        new_assignee: String,
    },
}

/// Reducer for the board.
#[derive(Debug, Clone)]
pub struct TodoController {
    state: TodoState,
}

impl TodoController {
    pub fn new(state: TodoState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &TodoState {
        &self.state
    }

    /// The updated item is always appended; the old one is removed if present.
    pub fn trigger_action(&mut self, action: TodoAction) {
        match action {
            TodoAction::Transition {
                item,
                new_activity,
                new_assignee,
            } => {
                if let Some(pos) = self.state.items.iter().position(|i| *i == item) {
                    self.state.items.remove(pos);
                } else {
                    log::debug!("Transitioning unknown item '{}'", item.title);
                }
                self.state.items.push(TodoItem {
                    assignee: new_assignee,
                    activity: new_activity,
                    ..item
                });
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoLayout {
    /// One board window per assignee.
    PerAssignee,
    /// One board with a swimlane per assignee, plus a backlog window.
    SharedBoard,
}

pub struct TodoDemo {
    layout: TodoLayout,
    controller: TodoController,
    queue: ActionQueue<TodoAction>,
}

impl TodoDemo {
    pub fn new(layout: TodoLayout) -> Self {
        Self {
            layout,
            controller: TodoController::new(TodoState::seeded()),
            queue: ActionQueue::new(),
        }
    }

    pub fn controller(&self) -> &TodoController {
        &self.controller
    }
}

fn card_preview() -> PreviewFn<TodoItem> {
    preview_fn(|ui: &mut Ui, item: &TodoItem| {
        card_frame().show(ui, |ui| {
            ui.set_min_size(ui.available_size());
            card_content(ui, &item.title, &item.description);
        });
    })
}

fn transition_to(
    queue: &ActionQueue<TodoAction>,
    activity: Activity,
    assignee: &str,
) -> DropCallbacks<TodoItem> {
    let queue = queue.clone();
    let assignee = assignee.to_string();
    DropCallbacks::new(move |item: &TodoItem| {
        queue.push(TodoAction::Transition {
            item: item.clone(),
            new_activity: activity,
            new_assignee: assignee.clone(),
        });
        true
    })
}

/// The backlog's drop zone: sends a card back to TODO, keeping its assignee.
/// Cards already in TODO are refused.
fn backlog_target(queue: &ActionQueue<TodoAction>) -> DropCallbacks<TodoItem> {
    let queue = queue.clone();
    DropCallbacks::new(move |item: &TodoItem| {
        if item.activity == Activity::Todo {
            return false;
        }
        queue.push(TodoAction::Transition {
            item: item.clone(),
            new_activity: Activity::Todo,
            new_assignee: item.assignee.clone(),
        });
        true
    })
    .with_accepts(|item: &TodoItem| item.activity != Activity::Todo)
}

/// Draggable cards, one after another.
fn cards<'a>(
    ui: &mut Ui,
    dnd: &WindowContext<TodoItem>,
    items: impl Iterator<Item = &'a TodoItem>,
    preview: &PreviewFn<TodoItem>,
) {
    for (i, item) in items.enumerate() {
        ui.push_id(i, |ui| {
            let response = draggable_card(ui, &item.title, &item.description);
            drag_source(ui, dnd, &response, item, preview);
        });
        ui.add_space(2.0);
    }
}

/// The five activity columns of one assignee.
fn board_row(
    ui: &mut Ui,
    dnd: &WindowContext<TodoItem>,
    state: &TodoState,
    queue: &ActionQueue<TodoAction>,
    assignee: &str,
    min_height: f32,
) {
    let preview = card_preview();
    ui.columns(Activity::ALL.len(), |columns| {
        for (ui, activity) in columns.iter_mut().zip(Activity::ALL) {
            let highlight = dnd.drag_hovers(target_id(ui, (assignee, activity)));
            let column = column_frame(highlight).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.set_min_height(min_height);
                section_label(ui, activity.label());
                ui.add_space(5.0);
                cards(ui, dnd, state.find(activity, assignee), &preview);
            });
            drop_target(
                ui,
                dnd,
                (assignee, activity),
                column.response.rect,
                transition_to(queue, activity, assignee),
            );
        }
    });
}

impl TodoDemo {
    fn assignee_window(&self, ui: &mut Ui, dnd: &WindowContext<TodoItem>, assignee: &str) {
        section_label(ui, &format!("ToDo Items for: {}", assignee));
        separator(ui);
        let height = ui.available_height() - 12.0;
        board_row(ui, dnd, self.controller.state(), &self.queue, assignee, height);
    }

    fn shared_board(&self, ui: &mut Ui, dnd: &WindowContext<TodoItem>) {
        let state = self.controller.state();
        let lanes = state.assignees.len().max(1) as f32;
        let lane_height = (ui.available_height() / lanes - 40.0).max(80.0);
        for assignee in &state.assignees {
            ui.push_id(assignee, |ui| {
                section_label(ui, assignee);
                board_row(ui, dnd, state, &self.queue, assignee, lane_height);
            });
            ui.add_space(8.0);
        }
    }

    fn backlog(&self, ui: &mut Ui, dnd: &WindowContext<TodoItem>) {
        let state = self.controller.state();
        section_label(ui, "Backlog");
        separator(ui);

        let preview = card_preview();
        egui::ScrollArea::vertical()
            .drag_to_scroll(false)
            .max_height(ui.available_height() - 70.0)
            .show(ui, |ui| {
                for (i, item) in state.in_activity(Activity::Todo).enumerate() {
                    ui.push_id(i, |ui| {
                        let response = draggable_card(ui, &item.title, &item.description);
                        ui.label(
                            egui::RichText::new(&item.assignee)
                                .size(10.0)
                                .color(theme::TEXT_MUTED),
                        );
                        drag_source(ui, dnd, &response, item, &preview);
                    });
                    ui.add_space(4.0);
                }
            });

        let hovered = dnd.drag_hovers(target_id(ui, "backlog"));
        let zone = drop_bar_frame(hovered).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.set_min_height(50.0);
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("Drop to move back to TODO").color(theme::TEXT_MUTED));
            });
        });

        drop_target(ui, dnd, "backlog", zone.response.rect, backlog_target(&self.queue));
    }
}

impl Demo for TodoDemo {
    type Payload = TodoItem;

    fn windows(&self) -> Vec<WindowSpec> {
        match self.layout {
            TodoLayout::PerAssignee => self
                .controller
                .state()
                .assignees
                .iter()
                .enumerate()
                .map(|(i, assignee)| {
                    let offset = 60.0 * i as f64;
                    WindowSpec::new(format!("ToDo: {}", assignee), (900.0, 450.0))
                        .at(100.0 + offset, 100.0 + 480.0 * i as f64)
                })
                .collect(),
            TodoLayout::SharedBoard => vec![
                WindowSpec::new("ToDo board", (1000.0, 640.0)).at(100.0, 100.0),
                WindowSpec::new("Backlog", (300.0, 640.0)).at(1130.0, 100.0),
            ],
        }
    }

    fn ui(&mut self, window: usize, ui: &mut Ui, dnd: &WindowContext<TodoItem>) {
        match self.layout {
            TodoLayout::PerAssignee => {
                let Some(assignee) = self.controller.state().assignees.get(window).cloned() else {
                    return;
                };
                self.assignee_window(ui, dnd, &assignee);
            }
            TodoLayout::SharedBoard if window == 0 => self.shared_board(ui, dnd),
            TodoLayout::SharedBoard => self.backlog(ui, dnd),
        }
    }

    fn apply_pending(&mut self) -> bool {
        let actions = self.queue.drain();
        let changed = !actions.is_empty();
        for action in actions {
            log::debug!("{:?}", action);
            self.controller.trigger_action(action);
        }
        changed
    }
}
