use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::render::RenderCtx;
use crate::scene::shapes::TextCmd;
use crate::text::FontSystem;

use super::atlas::GlyphAtlas;
use super::common::{
    build_quad_pipeline, linear_sampler, sampler_layout_entry, texture_layout_entry,
    InstanceBuffer, PipelineKey, QuadGeometry, ViewportUniform,
};

/// Renderer for `DrawCmd::Text`.
///
/// Text is laid out with fontdue each frame; glyph bitmaps live in a shared
/// [`GlyphAtlas`] and are drawn as one textured quad per glyph.
pub struct TextRenderer {
    pipeline_key: Option<PipelineKey>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,

    atlas: Option<GlyphAtlas>,

    quad: Option<QuadGeometry>,
    instances: InstanceBuffer<GlyphInstance>,
    staged: Vec<GlyphInstance>,

    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            pipeline_key: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            sampler: None,
            atlas: None,
            quad: None,
            instances: InstanceBuffer::new("turtle text instance vbo"),
            staged: Vec::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.staged.clear();
    }

    pub fn staged(&self) -> u32 {
        self.staged.len() as u32
    }

    /// Stages one instance per visible glyph of `cmd`.
    pub fn push(&mut self, ctx: &RenderCtx<'_>, cmd: &TextCmd, fonts: &FontSystem) {
        if cmd.text.is_empty() {
            return;
        }
        let Some(font) = fonts.get(cmd.font) else {
            log::warn!("text skipped: unknown {:?}", cmd.font);
            return;
        };

        self.layout.reset(&LayoutSettings {
            x: cmd.origin.x,
            y: cmd.origin.y,
            max_width: cmd.max_width,
            ..LayoutSettings::default()
        });
        self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size, 0));

        let atlas = self.atlas.get_or_insert_with(|| GlyphAtlas::new(ctx));
        let color = cmd.color.to_array();

        for glyph in self.layout.glyphs() {
            if !glyph.char_data.rasterize() || glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let Some(slot) = atlas.slot(ctx, font, glyph.key) else { continue };
            self.staged.push(GlyphInstance {
                dst_min: [glyph.x, glyph.y],
                dst_max: [glyph.x + glyph.width as f32, glyph.y + glyph.height as f32],
                uv_min: slot.uv_min,
                uv_max: slot.uv_max,
                color,
            });
        }
    }

    pub fn prepare(&mut self, ctx: &RenderCtx<'_>) {
        if self.staged.is_empty() {
            return;
        }
        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        if self.quad.is_none() {
            self.quad = Some(QuadGeometry::new(ctx, "turtle text"));
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
        let (Some(pipeline), Some(bind_group), Some(quad), Some(instance_vbo)) = (
            self.pipeline.as_ref(),
            self.bind_group.as_ref(),
            self.quad.as_ref(),
            self.instances.buffer(),
        ) else {
            return;
        };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        quad.bind(rpass);
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.draw_indexed(0..6, 0, range);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let key = PipelineKey::of(ctx);
        if self.pipeline_key == Some(key) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("turtle text bgl"),
            entries: &[
                ViewportUniform::layout_entry(0),
                texture_layout_entry(1),
                sampler_layout_entry(2),
            ],
        });
        let pipeline = build_quad_pipeline(
            ctx,
            "turtle text",
            include_str!("shaders/text.wgsl"),
            &[&bgl],
            GlyphInstance::layout(),
        );

        self.pipeline_key = Some(key);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let sampler = self.sampler.get_or_insert_with(|| linear_sampler(ctx, "turtle text sampler"));
        let (Some(bgl), Some(atlas)) = (self.bind_group_layout.as_ref(), self.atlas.as_ref()) else {
            return;
        };

        let viewport_ubo = ViewportUniform::create_buffer(ctx, "turtle text viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("turtle text bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: viewport_ubo.as_entire_binding() },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(atlas.view()),
                },
                wgpu::BindGroupEntry { binding: 2, resource: wgpu::BindingResource::Sampler(sampler) },
            ],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }
}

/// One glyph quad: destination rect in logical pixels, atlas rect in UV.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x2,
        5 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_renderer_stages_nothing() {
        let mut r = TextRenderer::new();
        r.begin();
        assert_eq!(r.staged(), 0);
        assert_eq!(std::mem::size_of::<GlyphInstance>(), 48);
    }
}
