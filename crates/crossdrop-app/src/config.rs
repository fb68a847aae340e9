//! Window layout and appearance of a demo application.

/// One top-level window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub title: String,
    /// Initial outer position in logical pixels; platform default if `None`.
    pub position: Option<(f64, f64)>,
    /// Inner size in logical pixels.
    pub size: (f64, f64),
}

impl WindowSpec {
    pub fn new(title: impl Into<String>, size: (f64, f64)) -> Self {
        Self {
            title: title.into(),
            position: None,
            size,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some((x, y));
        self
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Title of the floating preview window.
    pub preview_title: String,
    pub background_color: egui::Color32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preview_title: "Drag preview".to_string(),
            background_color: egui::Color32::from_rgb(250, 250, 250),
        }
    }
}
