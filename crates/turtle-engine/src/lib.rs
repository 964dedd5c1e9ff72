//! Turtle engine crate.
//!
//! A small 2D game framework: implement [`App`], hand it to [`Runtime::run`]
//! and the session drives load, update and draw each frame, with shapes,
//! text, images, audio, edge-triggered input and a rapier-backed physics
//! world available through [`Context`].
//!
//! Errors raised by game code switch the session to an error screen instead
//! of crashing the process.

pub mod audio;
pub mod coords;
pub mod core;
pub mod device;
pub mod graphics;
pub mod input;
pub mod logging;
pub mod math;
pub mod paint;
pub mod physics;
pub mod platform;
pub mod render;
pub mod scene;
pub mod session;
pub mod text;
pub mod time;
pub mod window;

pub use crate::audio::{Audio, SourceId, SourceKind};
pub use crate::coords::Vec2;
pub use crate::core::{App, Config, Context, Modules, VERSION};
pub use crate::core::filesystem;
pub use crate::graphics::{DrawMode, Font, Graphics, ImageId, Quad};
pub use crate::input::{Key, MouseButton};
pub use crate::math::{NoiseType, Random};
pub use crate::paint::Color;
pub use crate::physics::{BodyType, Collider, Shape, World};
pub use crate::session::{Session, SessionState, ShutdownReport};
pub use crate::window::Runtime;
