/// Application-level event requests.
#[derive(Debug, Clone, Default)]
pub struct Event {
    quit_requested: bool,
}

impl Event {
    /// Asks the session to quit at the next frame boundary.
    ///
    /// [`App::quit`](super::App::quit) is consulted first and may cancel.
    pub fn quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub(crate) fn take_quit(&mut self) -> bool {
        std::mem::take(&mut self.quit_requested)
    }
}
