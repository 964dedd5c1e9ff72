use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, DrawMode};

/// Circle draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub mode: DrawMode,
    pub color: Color,
    /// Outline width; ignored for [`DrawMode::Fill`].
    pub line_width: f32,
}

impl DrawList {
    #[inline]
    pub fn push_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        mode: DrawMode,
        color: Color,
        line_width: f32,
    ) {
        self.push(DrawCmd::Circle(CircleCmd { center, radius, mode, color, line_width }));
    }
}
