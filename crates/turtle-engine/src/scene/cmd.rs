use crate::scene::shapes::circle::CircleCmd;
use crate::scene::shapes::image::ImageCmd;
use crate::scene::shapes::mesh::MeshCmd;
use crate::scene::shapes::rect::RectCmd;
use crate::scene::shapes::text::TextCmd;

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here
/// - implement push helpers inside that shape module
/// - add a matching renderer under `render::shapes::*`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Circle(CircleCmd),
    Text(TextCmd),
    Image(ImageCmd),
    Mesh(MeshCmd),
}

/// Discriminant used by the renderer to batch runs of the same kind.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawKind {
    Rect,
    Circle,
    Text,
    Image,
    Mesh,
}

impl DrawCmd {
    #[inline]
    pub fn kind(&self) -> DrawKind {
        match self {
            DrawCmd::Rect(_) => DrawKind::Rect,
            DrawCmd::Circle(_) => DrawKind::Circle,
            DrawCmd::Text(_) => DrawKind::Text,
            DrawCmd::Image(_) => DrawKind::Image,
            DrawCmd::Mesh(_) => DrawKind::Mesh,
        }
    }
}
