use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Sample count used when multisampling is requested and supported.
const MSAA_SAMPLES: u32 = 4;

/// Surface and device options, derived from the game's `Config`.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format when one exists. Off by default: colors
    /// are authored as display values and written through unchanged.
    pub prefer_srgb: bool,
    pub vsync: bool,
    /// Request 4x multisampling for shape edges.
    pub msaa: bool,
    /// Ignored when the surface does not support it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            vsync: true,
            msaa: false,
            alpha_mode: None,
            desired_maximum_frame_latency: 2,
        }
    }
}

/// Device, queue and configured surface for one window.
///
/// Owns the multisampled color target when MSAA is on.
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    /// Physical pixels; may be zero while minimized.
    size: PhysicalSize<u32>,
    sample_count: u32,
    msaa_view: Option<wgpu::TextureView>,
}

/// One acquired swapchain image plus the encoder recording into it.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    /// Multisampled target to render into; resolves to `view`.
    pub msaa_view: Option<wgpu::TextureView>,
    pub encoder: wgpu::CommandEncoder,
}

/// What the runtime should do after failing to acquire a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    Reconfigured,
    SkipFrame,
    /// Out of memory; the window cannot be drawn to anymore.
    Fatal,
}

impl<'w> Gpu<'w> {
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("turtle device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits()),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device")?;

        let caps = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&caps.formats, init.prefer_srgb)
            .context("surface reports no formats")?;
        let sample_count = if init.msaa {
            let flags = adapter.get_texture_format_features(format).flags;
            choose_sample_count(|n| flags.sample_count_supported(n))
        } else {
            1
        };
        if init.msaa && sample_count == 1 {
            log::warn!("{MSAA_SAMPLES}x MSAA unsupported for {format:?}; rendering without it");
        }

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: present_mode(init.vsync),
            alpha_mode: choose_alpha_mode(&caps.alpha_modes, init.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };
        surface.configure(&device, &config);

        let info = adapter.get_info();
        log::info!("gpu ready: {} ({:?}), {format:?}, {sample_count}x", info.name, info.backend);

        let mut gpu = Gpu { surface, device, queue, config, size, sample_count, msaa_view: None };
        gpu.rebuild_msaa_target();
        Ok(gpu)
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    fn has_area(&self) -> bool {
        self.size.width > 0 && self.size.height > 0
    }

    pub fn set_vsync(&mut self, enabled: bool) {
        let mode = present_mode(enabled);
        if self.config.present_mode == mode {
            return;
        }
        self.config.present_mode = mode;
        if self.has_area() {
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// A zero size is recorded but not applied; wgpu rejects empty surfaces.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if !self.has_area() {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.rebuild_msaa_target();
    }

    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("turtle frame encoder"),
        });
        Ok(GpuFrame { surface_texture, view, msaa_view: self.msaa_view.clone(), encoder })
    }

    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame { surface_texture, encoder, .. } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }

    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        match err {
            SurfaceError::Lost | SurfaceError::Outdated => {
                if self.has_area() {
                    self.surface.configure(&self.device, &self.config);
                }
                SurfaceErrorAction::Reconfigured
            }
            SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
            SurfaceError::Timeout | SurfaceError::Other => SurfaceErrorAction::SkipFrame,
        }
    }

    fn rebuild_msaa_target(&mut self) {
        self.msaa_view = (self.sample_count > 1).then(|| {
            self.device
                .create_texture(&wgpu::TextureDescriptor {
                    label: Some("turtle msaa target"),
                    size: wgpu::Extent3d {
                        width: self.config.width,
                        height: self.config.height,
                        depth_or_array_layers: 1,
                    },
                    mip_level_count: 1,
                    sample_count: self.sample_count,
                    dimension: wgpu::TextureDimension::D2,
                    format: self.config.format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                })
                .create_view(&wgpu::TextureViewDescriptor::default())
        });
    }
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync { wgpu::PresentMode::AutoVsync } else { wgpu::PresentMode::AutoNoVsync }
}

/// First format whose sRGB-ness matches the preference, else the first format.
fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb() == prefer_srgb)
        .or_else(|| formats.first().copied())
}

fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    wanted: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    wanted
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

fn choose_sample_count(supported: impl Fn(u32) -> bool) -> u32 {
    if supported(MSAA_SAMPLES) { MSAA_SAMPLES } else { 1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode as Alpha, TextureFormat as Fmt};

    #[test]
    fn linear_format_is_preferred_by_default() {
        let formats = [Fmt::Bgra8UnormSrgb, Fmt::Bgra8Unorm];
        assert_eq!(choose_surface_format(&formats, false), Some(Fmt::Bgra8Unorm));
        assert_eq!(choose_surface_format(&formats, true), Some(Fmt::Bgra8UnormSrgb));
    }

    #[test]
    fn falls_back_to_first_format() {
        assert_eq!(choose_surface_format(&[Fmt::Rgba8UnormSrgb], false), Some(Fmt::Rgba8UnormSrgb));
        assert_eq!(choose_surface_format(&[], false), None);
    }

    #[test]
    fn unsupported_alpha_mode_is_replaced() {
        let supported = [Alpha::Opaque, Alpha::PreMultiplied];
        assert_eq!(choose_alpha_mode(&supported, Some(Alpha::PreMultiplied)), Alpha::PreMultiplied);
        assert_eq!(choose_alpha_mode(&supported, Some(Alpha::PostMultiplied)), Alpha::Opaque);
        assert_eq!(choose_alpha_mode(&[], None), Alpha::Auto);
    }

    #[test]
    fn msaa_falls_back_to_single_sample() {
        assert_eq!(choose_sample_count(|n| n <= 8), MSAA_SAMPLES);
        assert_eq!(choose_sample_count(|n| n == 1), 1);
    }

    #[test]
    fn vsync_maps_to_auto_modes() {
        assert_eq!(present_mode(true), wgpu::PresentMode::AutoVsync);
        assert_eq!(present_mode(false), wgpu::PresentMode::AutoNoVsync);
    }
}
