//! CrossDrop Application
//!
//! A winit + wgpu + egui shell that opens several top-level windows sharing
//! one drag coordinator, the floating preview window, and the demos built on
//! top of them.

mod app;
mod config;
mod demo;
mod error;
mod gpu;
mod preview_window;
mod viewport;

pub mod demos;

pub use app::App;
pub use config::{AppConfig, WindowSpec};
pub use demo::{ActionQueue, Demo};
pub use error::{AppError, AppResult};
