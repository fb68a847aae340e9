//! GPU device shared by every window.

use crate::error::AppResult;

/// Adapter, device and queue, created once against the first window's surface.
pub struct Gpu {
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl Gpu {
    pub fn new(instance: &wgpu::Instance, compatible: &wgpu::Surface<'_>) -> AppResult<Self> {
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            force_fallback_adapter: false,
            compatible_surface: Some(compatible),
        }))?;
        let info = adapter.get_info();
        log::info!("Using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("crossdrop device"),
            ..Default::default()
        }))?;

        Ok(Self {
            adapter,
            device,
            queue,
        })
    }
}
