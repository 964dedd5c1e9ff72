use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::CircleCmd;

use super::common::{
    build_quad_pipeline, shader_line_width, InstanceBuffer, PipelineKey, QuadGeometry,
    ViewportUniform,
};

/// Renderer for `DrawCmd::Circle`.
///
/// Filled circles and outlines are both drawn as antialiased SDF quads; an
/// outline is a ring of `line_width` centered on the radius.
pub struct CircleRenderer {
    pipeline_key: Option<PipelineKey>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad: Option<QuadGeometry>,
    instances: InstanceBuffer<CircleInstance>,
    staged: Vec<CircleInstance>,
}

impl Default for CircleRenderer {
    fn default() -> Self {
        Self {
            pipeline_key: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            quad: None,
            instances: InstanceBuffer::new("turtle circle instance vbo"),
            staged: Vec::new(),
        }
    }
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the instances staged for the previous frame.
    pub fn begin(&mut self) {
        self.staged.clear();
    }

    /// Number of instances staged so far this frame.
    pub fn staged(&self) -> u32 {
        self.staged.len() as u32
    }

    /// Stages one circle. Degenerate radii are skipped.
    pub fn push(&mut self, cmd: &CircleCmd) {
        if cmd.radius.is_nan() || cmd.radius <= 0.0 {
            return;
        }
        self.staged.push(CircleInstance {
            center: [cmd.center.x, cmd.center.y],
            radius_lw: [cmd.radius, shader_line_width(cmd.mode, cmd.line_width)],
            color: cmd.color.to_array(),
        });
    }

    /// Builds GPU state on demand and uploads the staged instances.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>) {
        if self.staged.is_empty() {
            return;
        }
        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        if self.quad.is_none() {
            self.quad = Some(QuadGeometry::new(ctx, "turtle circle"));
        }

        if let Some(ubo) = self.viewport_ubo.as_ref() {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::from_ctx(ctx)));
        }
        self.instances.upload(ctx, &self.staged);
    }

    /// Draws staged instances `range` into an open pass.
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

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let key = PipelineKey::of(ctx);
        if self.pipeline_key == Some(key) && self.pipeline.is_some() {
            return;
        }

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("turtle circle bgl"),
                entries: &[ViewportUniform::layout_entry(0)],
            });

        let pipeline = build_quad_pipeline(
            ctx,
            "turtle circle",
            include_str!("shaders/circle.wgsl"),
            &[&bind_group_layout],
            CircleInstance::layout(),
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

        let viewport_ubo = ViewportUniform::create_buffer(ctx, "turtle circle viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("turtle circle bind group"),
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

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (32 bytes):
///
///  offset  0  center     [f32; 2]   loc 1
///  offset  8  radius_lw  [f32; 2]   loc 2  (.x = radius, .y = line width, 0 = fill)
///  offset 16  color      [f32; 4]   loc 3
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radius_lw: [f32; 2],
    color: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // radius_lw
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
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

    fn cmd(radius: f32, mode: DrawMode) -> CircleCmd {
        CircleCmd {
            center: Vec2::new(10.0, 20.0),
            radius,
            mode,
            color: Color::WHITE,
            line_width: 2.0,
        }
    }

    #[test]
    fn staging_skips_degenerate_radii() {
        let mut r = CircleRenderer::new();
        r.push(&cmd(5.0, DrawMode::Fill));
        r.push(&cmd(0.0, DrawMode::Fill));
        r.push(&cmd(f32::NAN, DrawMode::Fill));
        r.push(&cmd(3.0, DrawMode::Line));
        assert_eq!(r.staged(), 2);
        assert_eq!(r.staged[0].radius_lw, [5.0, 0.0]);
        assert_eq!(r.staged[1].radius_lw, [3.0, 2.0]);

        r.begin();
        assert_eq!(r.staged(), 0);
    }

    #[test]
    fn instance_is_32_bytes() {
        assert_eq!(std::mem::size_of::<CircleInstance>(), 32);
    }
}
