//! Color model shared by the graphics front-end and renderers.

mod color;

pub use color::Color;
