use crate::coords::Rect;

/// Pixel region of an image, for drawing part of a sprite sheet.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Quad {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Quad {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// The part of `self` inside a `width`×`height` image, as normalized
    /// texture coordinates plus its clipped size in pixels. `None` if nothing
    /// of the quad overlaps the image.
    pub(crate) fn clip_to(self, (width, height): (u32, u32)) -> Option<(Rect, (u32, u32))> {
        let x0 = self.x.min(width);
        let y0 = self.y.min(height);
        let x1 = self.x.saturating_add(self.width).min(width);
        let y1 = self.y.saturating_add(self.height).min(height);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        let (w, h) = (width as f32, height as f32);
        let uv = Rect::new(
            x0 as f32 / w,
            y0 as f32 / h,
            (x1 - x0) as f32 / w,
            (y1 - y0) as f32 / h,
        );
        Some((uv, (x1 - x0, y1 - y0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_maps_to_normalized_region() {
        let (uv, size) = Quad::new(16, 0, 16, 8).clip_to((64, 32)).unwrap();
        assert_eq!(uv, Rect::new(0.25, 0.0, 0.25, 0.25));
        assert_eq!(size, (16, 8));
    }

    #[test]
    fn quad_is_clipped_to_the_image() {
        let (uv, size) = Quad::new(48, 24, 32, 32).clip_to((64, 32)).unwrap();
        assert_eq!(size, (16, 8));
        assert_eq!(uv.max(), crate::coords::Vec2::new(1.0, 1.0));
    }

    #[test]
    fn quad_outside_the_image_is_empty() {
        assert_eq!(Quad::new(64, 0, 8, 8).clip_to((64, 32)), None);
        assert_eq!(Quad::new(0, 0, 0, 8).clip_to((64, 32)), None);
    }
}
