//! Frame loop and session lifecycle.
//!
//! A [`Session`] owns the subsystems the game sees, derives input edges every
//! frame, runs the app callbacks in a fixed order, and falls back to an error
//! screen once anything raises through the shared [`ErrorReporter`].

mod dispatch;
mod error;
mod error_screen;
mod reporter;
#[allow(clippy::module_inception)]
mod session;
mod state;

pub use error::SessionError;
pub use reporter::ErrorReporter;
pub use session::{Session, ShutdownReport};
pub use state::SessionState;
