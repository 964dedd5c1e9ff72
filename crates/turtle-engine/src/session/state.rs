use std::fmt;

/// Lifecycle of a [`Session`](super::Session).
///
/// `Configuring → Initializing → Running ⇄ ErrorDisplay → ShuttingDown → Closed`.
/// `Running ⇄ ErrorDisplay` only ever goes one way in practice: once an error
/// is raised the session stays on the error screen until it closes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SessionState {
    Configuring,
    Initializing,
    Running,
    ErrorDisplay,
    ShuttingDown,
    Closed,
}

impl SessionState {
    /// States in which [`Session::frame`](super::Session::frame) does work.
    pub fn is_live(self) -> bool {
        matches!(self, SessionState::Running | SessionState::ErrorDisplay)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Configuring => "configuring",
            SessionState::Initializing => "initializing",
            SessionState::Running => "running",
            SessionState::ErrorDisplay => "error display",
            SessionState::ShuttingDown => "shutting down",
            SessionState::Closed => "closed",
        };
        f.write_str(s)
    }
}
