//! Core engine-facing contracts.
//!
//! The interface between the session (frame loop) and game code: the [`App`]
//! trait, its [`Config`], and the per-callback [`Context`] with the
//! keyboard/mouse/window/event helpers it exposes.

mod app;
pub mod filesystem;
mod config;
mod ctx;
mod event;
mod system;
mod version;
mod window;

pub use app::App;
pub use config::{Config, Modules};
pub use ctx::Context;
pub use event::Event;
pub use system::{Os, processor_count};
pub use version::{VERSION, Version, VersionError};
pub use window::Window;
