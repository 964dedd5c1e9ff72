use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::RectCmd;

use super::common::{
    build_quad_pipeline, shader_line_width, InstanceBuffer, PipelineKey, QuadGeometry,
    ViewportUniform,
};

/// Rectangle renderer.
///
/// Geometry is provided as logical pixels, converted to NDC in the vertex shader using viewport.
/// Rotation happens about the rectangle's center. Color is premultiplied RGBA (`paint::Color`).
pub struct RectRenderer {
    pipeline_key: Option<PipelineKey>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad: Option<QuadGeometry>,
    instances: InstanceBuffer<RectInstance>,
    staged: Vec<RectInstance>,
}

impl Default for RectRenderer {
    fn default() -> Self {
        Self {
            pipeline_key: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            quad: None,
            instances: InstanceBuffer::new("turtle rect instance vbo"),
            staged: Vec::new(),
        }
    }
}

impl RectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.staged.clear();
    }

    pub fn staged(&self) -> u32 {
        self.staged.len() as u32
    }

    /// Stages one rectangle. Negative sizes are mirrored; empty ones are skipped.
    pub fn push(&mut self, cmd: &RectCmd) {
        let (w, h) = (cmd.size.x.abs(), cmd.size.y.abs());
        if w.is_nan() || h.is_nan() || w == 0.0 || h == 0.0 {
            return;
        }
        self.staged.push(RectInstance {
            center: [cmd.center.x, cmd.center.y],
            half_size: [w * 0.5, h * 0.5],
            rot_lw: [cmd.rotation, shader_line_width(cmd.mode, cmd.line_width)],
            color: cmd.color.to_array(),
        });
    }

    pub fn prepare(&mut self, ctx: &RenderCtx<'_>) {
        if self.staged.is_empty() {
            return;
        }
        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        if self.quad.is_none() {
            self.quad = Some(QuadGeometry::new(ctx, "turtle rect"));
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
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad) = self.quad.as_ref() else { return };
        let Some(instance_vbo) = self.instances.buffer() else { return };

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

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("turtle rect bgl"),
                entries: &[ViewportUniform::layout_entry(0)],
            });

        let pipeline = build_quad_pipeline(
            ctx,
            "turtle rect",
            include_str!("shaders/rect.wgsl"),
            &[&bind_group_layout],
            RectInstance::layout(),
        );

        self.pipeline_key = Some(key);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = ViewportUniform::create_buffer(ctx, "turtle rect viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("turtle rect bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }
}

/// Instance data layout (40 bytes):
///
///  offset  0  center     [f32; 2]   loc 1
///  offset  8  half_size  [f32; 2]   loc 2
///  offset 16  rot_lw     [f32; 2]   loc 3  (.x = rotation rad, .y = line width, 0 = fill)
///  offset 24  color      [f32; 4]   loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RectInstance {
    center: [f32; 2],
    half_size: [f32; 2],
    rot_lw: [f32; 2],
    color: [f32; 4],
}

impl RectInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // half_size
        3 => Float32x2, // rot_lw
        4 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::DrawMode;

    fn cmd(size: Vec2) -> RectCmd {
        RectCmd {
            center: Vec2::new(50.0, 50.0),
            size,
            rotation: 0.5,
            mode: DrawMode::Line,
            color: Color::WHITE,
            line_width: 1.0,
        }
    }

    #[test]
    fn negative_sizes_are_mirrored_and_empty_skipped() {
        let mut r = RectRenderer::new();
        r.push(&cmd(Vec2::new(-20.0, 10.0)));
        r.push(&cmd(Vec2::new(0.0, 10.0)));
        assert_eq!(r.staged(), 1);
        assert_eq!(r.staged[0].half_size, [10.0, 5.0]);
        assert_eq!(r.staged[0].rot_lw, [0.5, 1.0]);
    }
}
