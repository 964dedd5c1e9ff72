//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer and
//! exposes them to the session as a [`crate::platform::Platform`].

mod host;
mod runtime;

pub use runtime::Runtime;
