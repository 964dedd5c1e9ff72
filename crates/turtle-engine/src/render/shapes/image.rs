use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::graphics::{ImageId, ImageStore};
use crate::render::RenderCtx;
use crate::scene::shapes::ImageCmd;

use super::common::{
    build_quad_pipeline, linear_sampler, sampler_layout_entry, texture_layout_entry, upload_texture,
    InstanceBuffer, PipelineKey, QuadGeometry, ViewportUniform,
};

/// GPU copy of one loaded image.
struct ImageTexture {
    // Kept alive for the bind group.
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// Renderer for `DrawCmd::Image`.
///
/// Each image is uploaded once, on first draw, as a premultiplied RGBA8
/// texture. Textures of released images are dropped at the start of the next
/// frame. Consecutive draws of the same image share one draw call.
pub struct ImageRenderer {
    pipeline_key: Option<PipelineKey>,
    pipeline: Option<wgpu::RenderPipeline>,

    viewport_bgl: Option<wgpu::BindGroupLayout>,
    texture_bgl: Option<wgpu::BindGroupLayout>,
    viewport_bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,

    textures: HashMap<ImageId, ImageTexture>,

    quad: Option<QuadGeometry>,
    instances: InstanceBuffer<ImageInstance>,
    staged: Vec<ImageInstance>,
    /// Image of each staged instance, parallel to `staged`.
    staged_images: Vec<ImageId>,
}

impl Default for ImageRenderer {
    fn default() -> Self {
        Self {
            pipeline_key: None,
            pipeline: None,
            viewport_bgl: None,
            texture_bgl: None,
            viewport_bind_group: None,
            viewport_ubo: None,
            sampler: None,
            textures: HashMap::new(),
            quad: None,
            instances: InstanceBuffer::new("turtle image instance vbo"),
            staged: Vec::new(),
            staged_images: Vec::new(),
        }
    }
}

impl ImageRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears staged instances and drops textures of released images.
    pub fn begin(&mut self, images: &ImageStore) {
        self.staged.clear();
        self.staged_images.clear();
        self.textures.retain(|id, _| images.is_live(*id));
    }

    pub fn staged(&self) -> u32 {
        self.staged.len() as u32
    }

    /// Stages one image quad, uploading its texture if this is its first draw.
    pub fn push(&mut self, ctx: &RenderCtx<'_>, cmd: &ImageCmd, images: &ImageStore) {
        if !self.textures.contains_key(&cmd.image) {
            let Some(data) = images.get(cmd.image) else {
                log::warn!("ImageRenderer: unknown {:?}, skipping", cmd.image);
                return;
            };
            if data.width == 0 || data.height == 0 {
                return;
            }
            self.ensure_pipeline(ctx);
            self.ensure_sampler(ctx);
            let Some(texture) = self.upload(ctx, data.width, data.height, &data.rgba) else {
                return;
            };
            self.textures.insert(cmd.image, texture);
        }

        self.staged.push(ImageInstance {
            center: [cmd.center.x, cmd.center.y],
            half_size: [cmd.size.x * 0.5, cmd.size.y * 0.5],
            rotation: [cmd.rotation, 0.0],
            tint: cmd.tint.to_array(),
            uv_min: [cmd.uv.origin.x, cmd.uv.origin.y],
            uv_max: [cmd.uv.max().x, cmd.uv.max().y],
        });
        self.staged_images.push(cmd.image);
    }

    pub fn prepare(&mut self, ctx: &RenderCtx<'_>) {
        if self.staged.is_empty() {
            return;
        }
        self.ensure_pipeline(ctx);
        self.ensure_sampler(ctx);
        self.ensure_viewport_binding(ctx);
        if self.quad.is_none() {
            self.quad = Some(QuadGeometry::new(ctx, "turtle image"));
        }

        if let Some(ubo) = self.viewport_ubo.as_ref() {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::from_ctx(ctx)));
        }
        self.instances.upload(ctx, &self.staged);
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        if range.is_empty() {
            return;
        }
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(viewport_bg) = self.viewport_bind_group.as_ref() else { return };
        let Some(quad) = self.quad.as_ref() else { return };
        let Some(instance_vbo) = self.instances.buffer() else { return };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, viewport_bg, &[]);
        quad.bind(rpass);
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));

        for (id, run) in image_runs(&self.staged_images, range) {
            let Some(texture) = self.textures.get(&id) else { continue };
            rpass.set_bind_group(1, &texture.bind_group, &[]);
            rpass.draw_indexed(0..6, 0, run);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn upload(&self, ctx: &RenderCtx<'_>, width: u32, height: u32, rgba: &[u8]) -> Option<ImageTexture> {
        let bgl = self.texture_bgl.as_ref()?;
        let sampler = self.sampler.as_ref()?;

        let texture = upload_texture(
            ctx,
            "turtle image texture",
            wgpu::TextureFormat::Rgba8Unorm,
            (width, height),
            rgba,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("turtle image bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Some(ImageTexture { _texture: texture, bind_group })
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let key = PipelineKey::of(ctx);
        if self.pipeline_key == Some(key) && self.pipeline.is_some() {
            return;
        }

        let viewport_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("turtle image viewport bgl"),
            entries: &[ViewportUniform::layout_entry(0)],
        });

        let texture_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("turtle image texture bgl"),
            entries: &[texture_layout_entry(0), sampler_layout_entry(1)],
        });

        let pipeline = build_quad_pipeline(
            ctx,
            "turtle image",
            include_str!("shaders/image.wgsl"),
            &[&viewport_bgl, &texture_bgl],
            ImageInstance::layout(),
        );

        // Texture bind groups reference the old layout.
        self.textures.clear();
        self.pipeline_key = Some(key);
        self.pipeline = Some(pipeline);
        self.viewport_bgl = Some(viewport_bgl);
        self.texture_bgl = Some(texture_bgl);
        self.viewport_bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(linear_sampler(ctx, "turtle image sampler"));
    }

    fn ensure_viewport_binding(&mut self, ctx: &RenderCtx<'_>) {
        if self.viewport_bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.viewport_bgl.as_ref() else { return };

        let viewport_ubo = ViewportUniform::create_buffer(ctx, "turtle image viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("turtle image viewport bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.viewport_bind_group = Some(bind_group);
    }
}

/// Splits `range` into maximal runs drawing the same image.
fn image_runs(ids: &[ImageId], range: Range<u32>) -> Vec<(ImageId, Range<u32>)> {
    let mut runs: Vec<(ImageId, Range<u32>)> = Vec::new();
    for i in range {
        let Some(&id) = ids.get(i as usize) else { break };
        match runs.last_mut() {
            Some((last, run)) if *last == id => run.end = i + 1,
            _ => runs.push((id, i..i + 1)),
        }
    }
    runs
}

/// Instance data layout (56 bytes):
///
///  offset  0  center     [f32; 2]   loc 1
///  offset  8  half_size  [f32; 2]   loc 2
///  offset 16  rotation   [f32; 2]   loc 3  (.x = radians, .y unused)
///  offset 24  tint       [f32; 4]   loc 4
///  offset 40  uv_min     [f32; 2]   loc 5
///  offset 48  uv_max     [f32; 2]   loc 6
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ImageInstance {
    center: [f32; 2],
    half_size: [f32; 2],
    rotation: [f32; 2],
    tint: [f32; 4],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

impl ImageInstance {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // half_size
        3 => Float32x2, // rotation
        4 => Float32x4, // tint
        5 => Float32x2, // uv_min
        6 => Float32x2  // uv_max
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ImageInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_merge_consecutive_draws_of_one_image() {
        let (a, b) = (ImageId(0), ImageId(1));
        let ids = [a, a, b, a, a];
        assert_eq!(
            image_runs(&ids, 0..5),
            vec![(a, 0..2), (b, 2..3), (a, 3..5)]
        );
        assert_eq!(image_runs(&ids, 1..3), vec![(a, 1..2), (b, 2..3)]);
        assert!(image_runs(&ids, 2..2).is_empty());
    }

    #[test]
    fn instance_carries_source_region() {
        assert_eq!(std::mem::size_of::<ImageInstance>(), 56);
    }
}
