//! Shared GPU types and utilities used by all shape renderers.

use std::marker::PhantomData;
use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::RenderCtx;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    pub(super) fn from_ctx(ctx: &RenderCtx<'_>) -> Self {
        Self {
            viewport: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
            _pad: [0.0; 2],
        }
    }

    /// Bind group layout entry for the uniform at `binding`, vertex stage only.
    pub(super) fn layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(std::mem::size_of::<Self>() as u64),
            },
            count: None,
        }
    }

    pub(super) fn create_buffer(ctx: &RenderCtx<'_>, label: &str) -> wgpu::Buffer {
        ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<Self>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }
}

// ── sampled textures ──────────────────────────────────────────────────────

/// Filterable 2D float texture read by the fragment stage.
pub(super) fn texture_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

pub(super) fn sampler_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

/// Bilinear, clamped, single mip level.
pub(super) fn linear_sampler(ctx: &RenderCtx<'_>, label: &str) -> wgpu::Sampler {
    ctx.device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    })
}

/// Creates a sampled 2D texture and fills it with `pixels`, rows tightly packed.
pub(super) fn upload_texture(
    ctx: &RenderCtx<'_>,
    label: &str,
    format: wgpu::TextureFormat,
    (width, height): (u32, u32),
    pixels: &[u8],
) -> wgpu::Texture {
    let texture = create_sampled_texture(ctx, label, format, (width, height));
    write_region(ctx, &texture, format, (0, 0), (width, height), pixels);
    texture
}

pub(super) fn create_sampled_texture(
    ctx: &RenderCtx<'_>,
    label: &str,
    format: wgpu::TextureFormat,
    (width, height): (u32, u32),
) -> wgpu::Texture {
    ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    })
}

/// Writes a `w`×`h` block of `pixels` at `(x, y)`.
pub(super) fn write_region(
    ctx: &RenderCtx<'_>,
    texture: &wgpu::Texture,
    format: wgpu::TextureFormat,
    (x, y): (u32, u32),
    (w, h): (u32, u32),
    pixels: &[u8],
) {
    let bytes_per_texel = format.block_copy_size(None).unwrap_or(4);
    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d { x, y, z: 0 },
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(w * bytes_per_texel),
            rows_per_image: Some(h),
        },
        wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
    );
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Unit quad vertex + index buffers shared by every instanced shape.
pub(super) struct QuadGeometry {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
}

impl QuadGeometry {
    pub(super) fn new(ctx: &RenderCtx<'_>, label: &str) -> Self {
        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} quad vbo")),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} quad ibo")),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self { vbo, ibo }
    }

    /// Binds the quad at vertex slot 0 and the index buffer.
    pub(super) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.set_index_buffer(self.ibo.slice(..), wgpu::IndexFormat::Uint16);
    }
}

// ── instance buffer ───────────────────────────────────────────────────────

/// Growable vertex buffer (power-of-two capacity, min 64), used for
/// per-instance and per-vertex data alike.
pub(super) struct InstanceBuffer<T> {
    label: &'static str,
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
    _marker: PhantomData<T>,
}

impl<T: Pod> InstanceBuffer<T> {
    pub(super) fn new(label: &'static str) -> Self {
        Self { label, buffer: None, capacity: 0, _marker: PhantomData }
    }

    /// Uploads `data`, growing the buffer first if needed.
    pub(super) fn upload(&mut self, ctx: &RenderCtx<'_>, data: &[T]) {
        if data.is_empty() {
            return;
        }
        if data.len() > self.capacity || self.buffer.is_none() {
            let new_cap = data.len().next_power_of_two().max(64);
            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: (new_cap * std::mem::size_of::<T>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = new_cap;
        }
        if let Some(buffer) = self.buffer.as_ref() {
            ctx.queue.write_buffer(buffer, 0, bytemuck::cast_slice(data));
        }
    }

    pub(super) fn buffer(&self) -> Option<&wgpu::Buffer> {
        self.buffer.as_ref()
    }
}

// ── pipeline ──────────────────────────────────────────────────────────────

/// What a pipeline was built for; a change forces a rebuild.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(super) struct PipelineKey {
    pub format: wgpu::TextureFormat,
    pub samples: u32,
}

impl PipelineKey {
    pub(super) fn of(ctx: &RenderCtx<'_>) -> Self {
        Self { format: ctx.surface_format, samples: ctx.sample_count }
    }
}

/// Builds an instanced quad pipeline with premultiplied-alpha blending.
///
/// The shader must expose `vs_main` and `fs_main`.
pub(super) fn build_quad_pipeline(
    ctx: &RenderCtx<'_>,
    label: &str,
    source: &'static str,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    instance_layout: wgpu::VertexBufferLayout<'static>,
) -> wgpu::RenderPipeline {
    build_pipeline(ctx, label, source, bind_group_layouts, &[QuadVertex::layout(), instance_layout])
}

/// Triangle-list pipeline over arbitrary vertex buffers, premultiplied-alpha
/// blended into the surface format.
pub(super) fn build_pipeline(
    ctx: &RenderCtx<'_>,
    label: &str,
    source: &'static str,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    buffers: &[wgpu::VertexBufferLayout<'static>],
) -> wgpu::RenderPipeline {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{label} shader")),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{label} pipeline layout")),
        bind_group_layouts,
        immediate_size: 0,
    });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{label} pipeline")),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(premul_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: ctx.sample_count,
            ..Default::default()
        },
        multiview_mask: None,
        cache: None,
    })
}

/// Line width passed to shaders: `0` selects fill.
#[inline]
pub(super) fn shader_line_width(mode: crate::scene::DrawMode, line_width: f32) -> f32 {
    match mode {
        crate::scene::DrawMode::Fill => 0.0,
        crate::scene::DrawMode::Line => line_width.max(f32::EPSILON),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawMode;

    #[test]
    fn instance_layouts_are_tightly_packed() {
        assert_eq!(std::mem::size_of::<ViewportUniform>(), 16);
        assert_eq!(std::mem::size_of::<QuadVertex>(), 8);
    }

    #[test]
    fn fill_maps_to_zero_line_width() {
        assert_eq!(shader_line_width(DrawMode::Fill, 3.0), 0.0);
        assert_eq!(shader_line_width(DrawMode::Line, 3.0), 3.0);
        assert!(shader_line_width(DrawMode::Line, 0.0) > 0.0);
    }
}
