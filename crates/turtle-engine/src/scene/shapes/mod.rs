pub(crate) mod circle;
pub(crate) mod image;
pub(crate) mod mesh;
pub(crate) mod rect;
pub(crate) mod text;

pub use circle::CircleCmd;
pub use image::ImageCmd;
pub use mesh::MeshCmd;
pub use rect::RectCmd;
pub use text::TextCmd;
