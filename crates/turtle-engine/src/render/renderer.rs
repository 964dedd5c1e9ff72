use std::ops::Range;

use crate::platform::Frame;
use crate::scene::{DrawCmd, DrawKind};

use super::shapes::circle::CircleRenderer;
use super::shapes::image::ImageRenderer;
use super::shapes::mesh::MeshRenderer;
use super::shapes::rect::RectRenderer;
use super::shapes::text::TextRenderer;
use super::{RenderCtx, RenderTarget};

/// Draws a whole frame in a single pass.
///
/// Commands are painted in insertion order. Consecutive commands of the same
/// kind become one instanced draw, so switching pipelines costs one call per
/// run rather than per shape.
#[derive(Default)]
pub struct Renderer {
    rects: RectRenderer,
    circles: CircleRenderer,
    texts: TextRenderer,
    images: ImageRenderer,
    meshes: MeshRenderer,
    /// Instance (or, for meshes, vertex) ranges per run, in paint order.
    runs: Vec<(DrawKind, Range<u32>)>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, frame: &Frame<'_>) {
        self.stage(ctx, frame);

        self.rects.prepare(ctx);
        self.circles.prepare(ctx);
        self.texts.prepare(ctx);
        self.images.prepare(ctx);
        self.meshes.prepare(ctx);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("turtle frame pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: target.resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(frame.clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for (kind, range) in &self.runs {
            let range = range.clone();
            match kind {
                DrawKind::Rect => self.rects.draw(&mut rpass, range),
                DrawKind::Circle => self.circles.draw(&mut rpass, range),
                DrawKind::Text => self.texts.draw(&mut rpass, range),
                DrawKind::Image => self.images.draw(&mut rpass, range),
                DrawKind::Mesh => self.meshes.draw(&mut rpass, range),
            }
        }
    }

    /// Converts the draw list into per-kind instances and the run table.
    fn stage(&mut self, ctx: &RenderCtx<'_>, frame: &Frame<'_>) {
        self.runs.clear();
        self.rects.begin();
        self.circles.begin();
        self.texts.begin();
        self.images.begin(frame.images);
        self.meshes.begin();

        let items = frame.draw_list.items();
        for (kind, cmds) in plan_runs(items) {
            let start = self.staged(kind);
            for cmd in &items[cmds] {
                match cmd {
                    DrawCmd::Rect(c) => self.rects.push(c),
                    DrawCmd::Circle(c) => self.circles.push(c),
                    DrawCmd::Text(c) => self.texts.push(ctx, c, frame.fonts),
                    DrawCmd::Image(c) => self.images.push(ctx, c, frame.images),
                    DrawCmd::Mesh(c) => self.meshes.push(c),
                }
            }
            let end = self.staged(kind);
            if end > start {
                self.runs.push((kind, start..end));
            }
        }
    }

    fn staged(&self, kind: DrawKind) -> u32 {
        match kind {
            DrawKind::Rect => self.rects.staged(),
            DrawKind::Circle => self.circles.staged(),
            DrawKind::Text => self.texts.staged(),
            DrawKind::Image => self.images.staged(),
            DrawKind::Mesh => self.meshes.staged(),
        }
    }
}

/// Splits `items` into maximal runs of one kind, as index ranges.
pub(crate) fn plan_runs(items: &[DrawCmd]) -> Vec<(DrawKind, Range<usize>)> {
    let mut runs: Vec<(DrawKind, Range<usize>)> = Vec::new();
    for (i, cmd) in items.iter().enumerate() {
        let kind = cmd.kind();
        match runs.last_mut() {
            Some((last, range)) if *last == kind => range.end = i + 1,
            _ => runs.push((kind, i..i + 1)),
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::{DrawList, DrawMode};

    #[test]
    fn runs_preserve_insertion_order() {
        let mut list = DrawList::new();
        let c = Color::WHITE;
        list.push_rect(Vec2::zero(), Vec2::new(1.0, 1.0), 0.0, DrawMode::Fill, c, 1.0);
        list.push_rect(Vec2::zero(), Vec2::new(1.0, 1.0), 0.0, DrawMode::Line, c, 1.0);
        list.push_circle(Vec2::zero(), 1.0, DrawMode::Fill, c, 1.0);
        list.push_rect(Vec2::zero(), Vec2::new(1.0, 1.0), 0.0, DrawMode::Fill, c, 1.0);

        assert_eq!(
            plan_runs(list.items()),
            vec![
                (DrawKind::Rect, 0..2),
                (DrawKind::Circle, 2..3),
                (DrawKind::Rect, 3..4),
            ]
        );
    }

    #[test]
    fn empty_list_has_no_runs() {
        assert!(plan_runs(&[]).is_empty());
    }
}
