//! Frames and cards used by the demo boards.

use egui::{Color32, CornerRadius, Frame, Margin, Response, Sense, Stroke, Ui};

use crate::{sizing, theme};

/// White card with a dark border.
pub fn card_frame() -> Frame {
    Frame::new()
        .fill(theme::CARD_BG)
        .corner_radius(CornerRadius::same(sizing::CORNER_RADIUS))
        .stroke(Stroke::new(sizing::BORDER_WIDTH, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 6,
            offset: [0, 2],
            color: Color32::from_black_alpha(12),
        })
        .inner_margin(Margin::same(10))
}

/// Board column; tinted while an accepted drag hovers it.
pub fn column_frame(highlight: bool) -> Frame {
    let fill = if highlight {
        theme::HOVER_BG
    } else {
        Color32::TRANSPARENT
    };
    Frame::new()
        .fill(fill)
        .corner_radius(CornerRadius::same(sizing::CORNER_RADIUS))
        .stroke(Stroke::new(1.0, Color32::from_gray(210)))
        .inner_margin(Margin::same(6))
}

/// Drop bar border; red while `active`.
pub fn drop_bar_frame(active: bool) -> Frame {
    let border = if active {
        theme::DROP_ACTIVE
    } else {
        theme::DROP_IDLE
    };
    Frame::new()
        .corner_radius(CornerRadius::same(sizing::CORNER_RADIUS))
        .stroke(Stroke::new(sizing::BORDER_WIDTH, border))
        .inner_margin(Margin::symmetric(12, 6))
}

/// Title over a muted description.
pub fn card_content(ui: &mut Ui, title: &str, description: &str) {
    ui.label(egui::RichText::new(title).strong().color(theme::TEXT));
    ui.label(
        egui::RichText::new(description)
            .size(11.0)
            .color(theme::TEXT_MUTED),
    );
}

/// A card that senses drags over its whole area.
pub fn draggable_card(ui: &mut Ui, title: &str, description: &str) -> Response {
    let inner = card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        card_content(ui, title, description);
    });
    let response = inner.response.interact(Sense::drag());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
    }
    response
}
