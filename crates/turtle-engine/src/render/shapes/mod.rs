//! Shape renderers. Each stages instances (vertices, for meshes) for one [`crate::scene::DrawKind`]
//! and draws sub-ranges of them inside the frame pass.

mod atlas;
mod common;

pub mod circle;
pub mod image;
pub mod mesh;
pub mod rect;
pub mod text;
