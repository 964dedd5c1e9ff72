use crate::coords::{Rect, Vec2};
use crate::graphics::ImageId;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Whole texture in normalized coordinates.
pub const FULL_UV: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

/// Textured quad payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCmd {
    pub image: ImageId,
    pub center: Vec2,
    /// Drawn size in logical pixels (source size times scale).
    pub size: Vec2,
    pub rotation: f32,
    /// Multiplied with every texel.
    pub tint: Color,
    /// Source region in normalized texture coordinates.
    pub uv: Rect,
}

impl DrawList {
    #[inline]
    pub fn push_image(
        &mut self,
        image: ImageId,
        center: Vec2,
        size: Vec2,
        rotation: f32,
        tint: Color,
        uv: Rect,
    ) {
        self.push(DrawCmd::Image(ImageCmd { image, center, size, rotation, tint, uv }));
    }
}
