//! egui bindings for cross-window drag and drop.
//!
//! This crate attaches the crossdrop coordinator to egui widgets:
//!
//! - **Drag sources**: turn a widget's drag response into drag sessions
//! - **Drop targets**: register a widget's rect with the shared registry
//! - **Previews**: render the active payload inside the floating window
//! - **Cards**: frames and cards used by the demo boards

pub mod cards;
pub mod dnd;
pub mod layout;

pub use cards::{card_content, card_frame, column_frame, draggable_card, drop_bar_frame};
pub use dnd::{
    drag_source, drop_target, preview_fn, show_preview, target_id, DragSourceOutcome, PreviewFn,
    UiCoordinator, WindowContext,
};
pub use layout::{section_label, separator};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Card and drop bar corner radius
    pub const CORNER_RADIUS: u8 = 5;
    /// Card and column border width
    pub const BORDER_WIDTH: f32 = 2.0;
    /// Height of an icon row in the tray
    pub const ICON_ROW: f32 = 30.0;
    /// Height of the tray's drop bar
    pub const DROP_BAR: f32 = 50.0;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Card and column border
    pub const BORDER: Color32 = Color32::DARK_GRAY;
    /// Drop bar border when idle
    pub const DROP_IDLE: Color32 = Color32::BLACK;
    /// Drop bar border while a drag hovers it
    pub const DROP_ACTIVE: Color32 = Color32::RED;
    /// Card background
    pub const CARD_BG: Color32 = Color32::WHITE;
    /// Column background while hovered by an accepted drag
    pub const HOVER_BG: Color32 = Color32::from_rgb(235, 245, 255);
}
