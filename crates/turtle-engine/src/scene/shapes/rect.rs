use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, DrawMode};

/// Rectangle draw payload, rotated about its center.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub center: Vec2,
    pub size: Vec2,
    /// Clockwise rotation in radians (y points down).
    pub rotation: f32,
    pub mode: DrawMode,
    pub color: Color,
    pub line_width: f32,
}

impl RectCmd {
    /// Top-left corner before rotation.
    #[inline]
    pub fn top_left(&self) -> Vec2 {
        self.center - self.size * 0.5
    }
}

impl DrawList {
    #[inline]
    pub fn push_rect(
        &mut self,
        center: Vec2,
        size: Vec2,
        rotation: f32,
        mode: DrawMode,
        color: Color,
        line_width: f32,
    ) {
        self.push(DrawCmd::Rect(RectCmd { center, size, rotation, mode, color, line_width }));
    }
}
