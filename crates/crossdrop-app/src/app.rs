//! Multi-window application shell.
//!
//! Opens every window a [`Demo`] asks for plus the preview window, all
//! sharing one drag coordinator.

use std::rc::Rc;

use crossdrop_core::{DragConfig, DragCoordinator, WindowKey, WindowRef};
use crossdrop_widgets::{UiCoordinator, WindowContext};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::AppConfig;
use crate::demo::Demo;
use crate::error::{AppError, AppResult};
use crate::gpu::Gpu;
use crate::preview_window::{self, PreviewWindow};
use crate::viewport::Viewport;

struct DemoWindow<P> {
    index: usize,
    viewport: Viewport,
    dnd: WindowContext<P>,
}

/// Main application struct.
pub struct App<D: Demo> {
    config: AppConfig,
    demo: D,
    coordinator: UiCoordinator<D::Payload>,
    instance: wgpu::Instance,
    gpu: Option<Gpu>,
    windows: Vec<DemoWindow<D::Payload>>,
    preview: Option<PreviewWindow>,
    was_dragging: bool,
    error: Option<AppError>,
}

impl<D: Demo> App<D> {
    /// Create an application with default drag and shell configuration.
    pub fn new(demo: D) -> Self {
        Self::with_config(demo, DragConfig::default(), AppConfig::default())
    }

    pub fn with_config(demo: D, drag_config: DragConfig, config: AppConfig) -> Self {
        Self {
            config,
            demo,
            coordinator: DragCoordinator::shared(drag_config),
            instance: wgpu::Instance::new(&wgpu::InstanceDescriptor::default()),
            gpu: None,
            windows: Vec::new(),
            preview: None,
            was_dragging: false,
            error: None,
        }
    }

    /// Run until every window is closed or startup fails.
    pub fn run(mut self) -> AppResult<()> {
        let event_loop = EventLoop::new()?;
        event_loop.run_app(&mut self)?;
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn create_viewport(
        &mut self,
        event_loop: &ActiveEventLoop,
        attributes: WindowAttributes,
    ) -> AppResult<Viewport> {
        let window = std::sync::Arc::new(event_loop.create_window(attributes)?);
        let surface = self.instance.create_surface(window.clone())?;
        let gpu = match self.gpu.take() {
            Some(gpu) => gpu,
            None => Gpu::new(&self.instance, &surface)?,
        };
        let viewport = Viewport::new(&gpu, window, surface);
        self.gpu = Some(gpu);
        viewport
    }

    fn open_windows(&mut self, event_loop: &ActiveEventLoop) -> AppResult<()> {
        for (index, spec) in self.demo.windows().into_iter().enumerate() {
            let mut attributes = Window::default_attributes()
                .with_title(&spec.title)
                .with_inner_size(LogicalSize::new(spec.size.0, spec.size.1));
            if let Some((x, y)) = spec.position {
                attributes = attributes.with_position(LogicalPosition::new(x, y));
            }

            let viewport = self.create_viewport(event_loop, attributes)?;
            let window = viewport.window().clone();
            let window_ref = WindowRef::new(WindowKey::from(window.id()), Rc::new(window));
            log::info!("Opened window '{}'", spec.title);

            self.windows.push(DemoWindow {
                index,
                viewport,
                dnd: WindowContext::new(self.coordinator.clone(), window_ref),
            });
        }

        let preview_size = self.coordinator.borrow().config().preview_size;
        let attributes = preview_window::attributes(&self.config.preview_title, preview_size);
        let viewport = self.create_viewport(event_loop, attributes)?;
        self.preview = Some(PreviewWindow::new(viewport, &self.coordinator));
        Ok(())
    }

    fn redraw(&mut self, slot: usize) {
        let Some(gpu) = &self.gpu else {
            return;
        };
        let Some(window) = self.windows.get_mut(slot) else {
            return;
        };
        let demo = &mut self.demo;
        let background = self.config.background_color;
        let DemoWindow {
            index,
            viewport,
            dnd,
        } = window;

        let repaint = viewport.render(gpu, background, |ctx| {
            dnd.begin_frame(ctx);
            egui::CentralPanel::default()
                .frame(egui::Frame::new().fill(background).inner_margin(egui::Margin::same(8)))
                .show(ctx, |ui| demo.ui(*index, ui, dnd));
            dnd.end_frame();
        });

        let changed = self.demo.apply_pending();
        let dragging = self.coordinator.borrow().is_dragging();
        if changed || dragging || dragging != self.was_dragging {
            // Drops and hover state can affect any window.
            for window in &self.windows {
                window.viewport.window().request_redraw();
            }
        } else if repaint {
            window_request_redraw(&self.windows, slot);
        }
        self.was_dragging = dragging;
    }

    fn preview_event(&mut self, event: WindowEvent) {
        let Some(preview) = &mut self.preview else {
            return;
        };
        preview.viewport_mut().on_window_event(&event);
        match event {
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &self.gpu {
                    preview.viewport_mut().resize(gpu, size);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(gpu) = &self.gpu {
                    preview.render(gpu, self.config.background_color, &self.coordinator);
                }
            }
            _ => {}
        }
    }
}

fn window_request_redraw<P>(windows: &[DemoWindow<P>], slot: usize) {
    if let Some(window) = windows.get(slot) {
        window.viewport.window().request_redraw();
    }
}

impl<D: Demo> ApplicationHandler for App<D> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.windows.is_empty() {
            return;
        }
        log::info!("Creating windows...");
        if let Err(e) = self.open_windows(event_loop) {
            log::error!("Startup failed: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.preview.as_ref().is_some_and(|p| p.id() == window_id) {
            self.preview_event(event);
            return;
        }

        let Some(slot) = self
            .windows
            .iter()
            .position(|w| w.viewport.id() == window_id)
        else {
            return;
        };

        let repaint = self.windows[slot].viewport.on_window_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &self.gpu {
                    self.windows[slot].viewport.resize(gpu, size);
                }
                window_request_redraw(&self.windows, slot);
            }

            WindowEvent::RedrawRequested => {
                self.redraw(slot);
            }

            _ => {
                if repaint {
                    window_request_redraw(&self.windows, slot);
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(preview) = &mut self.preview {
            preview.sync(&self.coordinator);
        }
    }
}
