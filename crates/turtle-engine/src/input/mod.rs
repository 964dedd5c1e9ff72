//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Platform code folds native events into an [`InputCollector`]; the session
//! takes one [`InputSnapshot`] per frame and derives edges from consecutive
//! snapshots.

mod collector;
mod edges;
mod keyboard;
mod mouse;
pub(crate) mod platform;
mod snapshot;
mod types;

pub use collector::{InputCollector, RawEvent};
pub use edges::{EdgeSink, InputEvent, detect, dispatch_edges};
pub use keyboard::Keyboard;
pub use mouse::Mouse;
pub use snapshot::InputSnapshot;
pub use types::{CursorKind, Key, MouseButton, TRACKED_BUTTONS, TRACKED_KEYS};
