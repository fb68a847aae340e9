//! Errors raised while bringing up windows and the GPU.

use thiserror::Error;

/// Errors that can occur in the application shell.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("Surface creation failed: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("No suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("Device request failed: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("Surface is not supported by the adapter")]
    UnsupportedSurface,

    #[error("Invalid drag configuration: {0}")]
    Config(#[from] crossdrop_core::ConfigError),
}

/// Result type for application shell operations.
pub type AppResult<T> = Result<T, AppError>;
