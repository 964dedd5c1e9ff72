//! Single-channel glyph atlas.

use std::collections::HashMap;

use fontdue::layout::GlyphRasterConfig;

use crate::render::RenderCtx;

use super::common::{create_sampled_texture, write_region};

pub(super) const ATLAS_SIZE: u32 = 2048;
const PADDING: u32 = 1;
const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::R8Unorm;

/// Normalized texture coordinates of one cached glyph.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) struct AtlasSlot {
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
}

/// Row-by-row rectangle packer. Rectangles never move once placed.
#[derive(Debug)]
pub(super) struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    pub(super) fn new(size: u32) -> Self {
        Self { size, cursor_x: PADDING, cursor_y: PADDING, row_height: 0, full: false }
    }

    pub(super) fn is_full(&self) -> bool {
        self.full
    }

    /// Top-left corner for a `w`×`h` rectangle, or `None` once out of room.
    pub(super) fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full || w + 2 * PADDING > self.size {
            return None;
        }
        if self.cursor_x + w + PADDING > self.size {
            self.cursor_y += self.row_height + PADDING;
            self.cursor_x = PADDING;
            self.row_height = 0;
        }
        if self.cursor_y + h + PADDING > self.size {
            self.full = true;
            return None;
        }

        let at = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + PADDING;
        self.row_height = self.row_height.max(h);
        Some(at)
    }
}

/// GPU texture plus the glyphs rasterized into it so far.
pub(super) struct GlyphAtlas {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    packer: ShelfPacker,
    slots: HashMap<GlyphRasterConfig, AtlasSlot>,
}

impl GlyphAtlas {
    pub(super) fn new(ctx: &RenderCtx<'_>) -> Self {
        let texture = create_sampled_texture(ctx, "turtle glyph atlas", FORMAT, (ATLAS_SIZE, ATLAS_SIZE));
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view, packer: ShelfPacker::new(ATLAS_SIZE), slots: HashMap::new() }
    }

    pub(super) fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Returns the slot for `key`, rasterizing with `font` on first use.
    pub(super) fn slot(
        &mut self,
        ctx: &RenderCtx<'_>,
        font: &fontdue::Font,
        key: GlyphRasterConfig,
    ) -> Option<AtlasSlot> {
        if let Some(slot) = self.slots.get(&key) {
            return Some(*slot);
        }
        if self.packer.is_full() {
            return None;
        }

        let (metrics, bitmap) = font.rasterize_config(key);
        let (w, h) = (metrics.width as u32, metrics.height as u32);
        if w == 0 || h == 0 {
            return None;
        }
        let Some((x, y)) = self.packer.place(w, h) else {
            log::warn!("glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); some glyphs will be missing");
            return None;
        };
        write_region(ctx, &self.texture, FORMAT, (x, y), (w, h), &bitmap);

        let size = ATLAS_SIZE as f32;
        let slot = AtlasSlot {
            uv_min: [x as f32 / size, y as f32 / size],
            uv_max: [(x + w) as f32 / size, (y + h) as f32 / size],
        };
        self.slots.insert(key, slot);
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_to_next_row_when_width_runs_out() {
        let mut p = ShelfPacker::new(32);
        assert_eq!(p.place(10, 4), Some((1, 1)));
        assert_eq!(p.place(10, 6), Some((12, 1)));
        // 23 + 10 + 1 > 32: new row below the tallest glyph so far.
        assert_eq!(p.place(10, 3), Some((1, 8)));
    }

    #[test]
    fn reports_full_and_stays_full() {
        let mut p = ShelfPacker::new(16);
        assert_eq!(p.place(14, 14), Some((1, 1)));
        assert_eq!(p.place(2, 2), None);
        assert!(p.is_full());
        assert_eq!(p.place(1, 1), None);
    }

    #[test]
    fn oversized_rect_is_refused_without_filling() {
        let mut p = ShelfPacker::new(16);
        assert_eq!(p.place(15, 1), None);
        assert!(!p.is_full());
        assert_eq!(p.place(4, 4), Some((1, 1)));
    }
}
