//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands
//! - preserve call order: the frame is painted exactly in insertion order
//! - keep shape-specific helpers isolated per shape file under `scene::shapes`

mod cmd;
mod list;
mod mode;

pub mod shapes;

pub use cmd::{DrawCmd, DrawKind};
pub use list::DrawList;
pub use mode::DrawMode;
