//! The floating window that follows the pointer during a drag.
//!
//! Created hidden at startup. It carries no state of its own: position and
//! visibility come from the coordinator's [`PreviewPlacement`], and the
//! content is the active drag's preview renderer.

use std::cell::Cell;
use std::rc::Rc;

use crossdrop_core::{DragEvent, PreviewPlacement};
use crossdrop_widgets::{show_preview, UiCoordinator};
use kurbo::Size;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::window::{Window, WindowAttributes, WindowId, WindowLevel};

use crate::gpu::Gpu;
use crate::viewport::Viewport;

/// Borderless, always on top, fixed size, initially hidden. Showing it must
/// not take focus from the window the drag started in.
pub fn attributes(title: &str, size: Size) -> WindowAttributes {
    Window::default_attributes()
        .with_title(title)
        .with_active(false)
        .with_decorations(false)
        .with_resizable(false)
        .with_window_level(WindowLevel::AlwaysOnTop)
        .with_visible(false)
        .with_inner_size(LogicalSize::new(size.width, size.height))
}

pub struct PreviewWindow {
    viewport: Viewport,
    visible: bool,
    dirty: Rc<Cell<bool>>,
}

impl PreviewWindow {
    /// Wrap `viewport` and subscribe to the coordinator's session events.
    pub fn new<P>(viewport: Viewport, coordinator: &UiCoordinator<P>) -> Self {
        // Pointer events must reach the windows underneath.
        if let Err(e) = viewport.window().set_cursor_hittest(false) {
            log::warn!("Preview window cannot ignore the cursor: {}", e);
        }

        let dirty = Rc::new(Cell::new(false));
        let flag = dirty.clone();
        coordinator.borrow_mut().subscribe(move |event| {
            if !matches!(event, DragEvent::Entered(_) | DragEvent::Exited(_)) {
                flag.set(true);
            }
        });

        Self {
            viewport,
            visible: false,
            dirty,
        }
    }

    pub fn id(&self) -> WindowId {
        self.viewport.id()
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Show, move or hide the window if the session changed since last call.
    pub fn sync<P>(&mut self, coordinator: &UiCoordinator<P>) {
        if !self.dirty.replace(false) {
            return;
        }
        let placement = coordinator.borrow().preview_placement();
        self.apply(placement);
    }

    fn apply(&mut self, placement: Option<PreviewPlacement>) {
        let window = self.viewport.window();
        match placement {
            Some(placement) => {
                window.set_outer_position(PhysicalPosition::new(
                    placement.position.x.round() as i32,
                    placement.position.y.round() as i32,
                ));
                if !self.visible {
                    window.set_visible(true);
                    self.visible = true;
                }
                window.request_redraw();
            }
            None if self.visible => {
                window.set_visible(false);
                self.visible = false;
            }
            None => {}
        }
    }

    pub fn render<P>(&mut self, gpu: &Gpu, background: egui::Color32, coordinator: &UiCoordinator<P>) {
        if !self.visible {
            return;
        }
        self.viewport.render(gpu, background, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::new().fill(background).inner_margin(egui::Margin::same(4)))
                .show(ctx, |ui| {
                    show_preview(ui, coordinator);
                });
        });
    }
}
