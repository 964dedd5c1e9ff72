//! Time subsystem.
//!
//! - [`FrameClock`] measures wall-clock time between presented frames; the
//!   winit backend owns one.
//! - [`Timer`] is the application-facing view: delta, rolling average, FPS.

mod frame_clock;
mod timer;

pub use frame_clock::FrameClock;
pub use timer::Timer;
