use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct ErrorSlot {
    message: Option<String>,
}

/// Shared handle to the session's error slot.
///
/// Loaders and the session hold clones; any of them can raise. The first
/// message wins and stays for the rest of the session. Later messages are
/// only logged.
#[derive(Debug, Clone, Default)]
pub struct ErrorReporter(Rc<RefCell<ErrorSlot>>);

impl ErrorReporter {
    pub fn raise(&self, message: impl Into<String>) {
        let message = message.into();
        log::error!("{message}");

        let mut slot = self.0.borrow_mut();
        if slot.message.is_none() {
            slot.message = Some(message);
        }
    }

    pub fn has_error(&self) -> bool {
        self.0.borrow().message.is_some()
    }

    pub fn message(&self) -> Option<String> {
        self.0.borrow().message.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_error_wins() {
        let errors = ErrorReporter::default();
        assert!(!errors.has_error());

        let loader = errors.clone();
        loader.raise("Image file does not exist: a.png");
        errors.raise("second");

        assert!(errors.has_error());
        assert_eq!(errors.message().as_deref(), Some("Image file does not exist: a.png"));
    }
}
