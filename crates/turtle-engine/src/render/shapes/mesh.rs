use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::MeshCmd;

use super::common::{build_pipeline, InstanceBuffer, PipelineKey, ViewportUniform};

/// Renderer for `DrawCmd::Mesh`.
///
/// Not instanced: every command contributes its own vertices, so a run of
/// meshes is one contiguous vertex range drawn with a single call.
pub struct MeshRenderer {
    pipeline_key: Option<PipelineKey>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    vertices: InstanceBuffer<MeshVertex>,
    staged: Vec<MeshVertex>,
}

impl Default for MeshRenderer {
    fn default() -> Self {
        Self {
            pipeline_key: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            vertices: InstanceBuffer::new("turtle mesh vbo"),
            staged: Vec::new(),
        }
    }
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.staged.clear();
    }

    /// Vertices staged so far; runs are vertex ranges.
    pub fn staged(&self) -> u32 {
        self.staged.len() as u32
    }

    /// Stages the triangles of `cmd`, skipping any with a non-finite corner.
    pub fn push(&mut self, cmd: &MeshCmd) {
        let color = cmd.color.to_array();
        for tri in cmd.vertices.chunks_exact(3) {
            if !tri.iter().all(|v| v.is_finite()) {
                continue;
            }
            self.staged.extend(tri.iter().map(|v| MeshVertex { pos: [v.x, v.y], color }));
        }
    }

    pub fn prepare(&mut self, ctx: &RenderCtx<'_>) {
        if self.staged.is_empty() {
            return;
        }
        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);

        if let Some(ubo) = self.viewport_ubo.as_ref() {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::from_ctx(ctx)));
        }
        self.vertices.upload(ctx, &self.staged);
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        if range.is_empty() {
            return;
        }
        let (Some(pipeline), Some(bind_group), Some(vbo)) =
            (self.pipeline.as_ref(), self.bind_group.as_ref(), self.vertices.buffer())
        else {
            return;
        };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(range, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let key = PipelineKey::of(ctx);
        if self.pipeline_key == Some(key) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("turtle mesh bgl"),
            entries: &[ViewportUniform::layout_entry(0)],
        });
        let pipeline = build_pipeline(
            ctx,
            "turtle mesh",
            include_str!("shaders/mesh.wgsl"),
            &[&bgl],
            &[MeshVertex::layout()],
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
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = ViewportUniform::create_buffer(ctx, "turtle mesh viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("turtle mesh bind group"),
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

/// Vertex layout (24 bytes): position in pixels at loc 0, premultiplied
/// color at loc 1.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct MeshVertex {
    pos: [f32; 2],
    color: [f32; 4],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    #[test]
    fn stages_vertices_and_drops_non_finite_triangles() {
        let mut r = MeshRenderer::new();
        let good = [Vec2::zero(), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        let bad = [Vec2::zero(), Vec2::new(f32::NAN, 0.0), Vec2::new(0.0, 10.0)];
        let vertices = good.iter().chain(&bad).chain(&good).copied().collect();
        r.push(&MeshCmd { vertices, color: Color::WHITE });

        assert_eq!(r.staged(), 6);
        assert_eq!(r.staged[1].pos, [10.0, 0.0]);
        assert_eq!(std::mem::size_of::<MeshVertex>(), 24);

        r.begin();
        assert_eq!(r.staged(), 0);
    }
}
