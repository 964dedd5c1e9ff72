//! Immediate-mode drawing front-end.
//!
//! [`Graphics`] records into a renderer-agnostic [`DrawList`](crate::scene::DrawList)
//! that the platform presents at the end of the frame. It also owns every
//! font and image loaded by the application.

mod geometry;
mod quad;
mod state;
mod texture;

pub use crate::scene::DrawMode;
pub use quad::Quad;
pub use state::{Font, Graphics, DEFAULT_ARC_SEGMENTS, DEFAULT_FONT_SIZE, SYSTEM_FONT_CANDIDATES};
pub use texture::{ImageData, ImageId, ImageLoadError, ImageStore};
