//! Placement of the floating drag preview.

use kurbo::{Point, Rect, Size};

use crate::config::DragConfig;
use crate::session::DragSession;

/// Where the preview surface goes while a drag is in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewPlacement {
    /// Top-left corner in physical screen pixels (the pointer position).
    pub position: Point,
    /// Size in density-independent units.
    pub size: Size,
}

impl PreviewPlacement {
    /// Visible only while dragging with a known pointer position.
    pub fn for_session<P, V>(session: &DragSession<P, V>, config: &DragConfig) -> Option<Self> {
        let position = session.pointer()?;
        Some(Self {
            position,
            size: config.preview_size,
        })
    }

    /// Screen rectangle covered at the given density.
    pub fn screen_rect(&self, density: f64) -> Rect {
        Rect::from_origin_size(
            self.position,
            Size::new(self.size.width * density, self.size.height * density),
        )
    }
}
