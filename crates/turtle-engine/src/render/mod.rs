//! GPU rendering subsystem.
//!
//! [`Renderer`] consumes a frame's draw list and issues GPU commands via wgpu.
//! Each shape renderer owns its own GPU resources (pipelines, buffers).
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.

mod ctx;
mod renderer;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use renderer::Renderer;
