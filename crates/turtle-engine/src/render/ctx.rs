use crate::coords::Viewport;

/// Renderer-facing context (device/queue + target format + viewport).
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Multisample count of the color target pipelines must match.
    pub sample_count: u32,
    pub viewport: Viewport, // logical px
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        sample_count: u32,
        viewport: Viewport,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            sample_count: sample_count.max(1),
            viewport,
        }
    }
}

/// Target for drawing (encoder + color view).
///
/// With MSAA, `color_view` is the multisampled texture and `resolve_target`
/// the swapchain view.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
    pub resolve_target: Option<&'a wgpu::TextureView>,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view, resolve_target: None }
    }

    #[inline]
    pub fn multisampled(
        encoder: &'a mut wgpu::CommandEncoder,
        msaa_view: &'a wgpu::TextureView,
        resolve_target: &'a wgpu::TextureView,
    ) -> Self {
        Self { encoder, color_view: msaa_view, resolve_target: Some(resolve_target) }
    }
}
