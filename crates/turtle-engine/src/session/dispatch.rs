use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::core::{App, Context};
use crate::input::{EdgeSink, InputEvent};

use super::ErrorReporter;

/// Runs one application callback, turning a panic into a raised error.
pub(super) fn guarded<R>(errors: &ErrorReporter, stage: &str, f: impl FnOnce() -> R) -> Option<R> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(r) => Some(r),
        Err(payload) => {
            errors.raise(format!("{stage}: {}", panic_message(payload.as_ref())));
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "application panicked"
    }
}

/// Routes detected edges to the matching [`App`] callback.
pub(super) struct Dispatcher<'c, 'a> {
    pub app: &'c mut dyn App,
    pub ctx: &'c mut Context<'a>,
    /// When false only window-level events are delivered.
    pub game_events: bool,
}

impl EdgeSink for Dispatcher<'_, '_> {
    fn key_repeat(&self) -> bool {
        self.ctx.keyboard.has_key_repeat()
    }

    fn emit(&mut self, event: InputEvent) {
        let errors = self.ctx.errors;
        // A raised error suppresses game events for the rest of the frame.
        if !event.is_window_level() && (!self.game_events || errors.has_error()) {
            return;
        }
        let (app, ctx) = (&mut *self.app, &mut *self.ctx);
        guarded(errors, "event", || deliver(app, ctx, event));
    }
}

fn deliver(app: &mut dyn App, ctx: &mut Context<'_>, event: InputEvent) {
    match event {
        InputEvent::FilesDropped(paths) => app.files_dropped(ctx, &paths),
        InputEvent::DirectoriesDropped(paths) => app.directories_dropped(ctx, &paths),
        InputEvent::Focus(f) => app.focus(ctx, f),
        InputEvent::MouseFocus(f) => app.mouse_focus(ctx, f),
        InputEvent::Resize { width, height } => app.resize(ctx, width, height),
        InputEvent::Visible(v) => app.visible(ctx, v),
        InputEvent::KeyPressed { key, repeat } => app.key_pressed(ctx, key, repeat),
        InputEvent::KeyReleased(key) => app.key_released(ctx, key),
        InputEvent::MouseMoved { x, y, dx, dy } => app.mouse_moved(ctx, x, y, dx, dy),
        InputEvent::MousePressed { x, y, button } => app.mouse_pressed(ctx, x, y, button),
        InputEvent::MouseReleased { x, y, button } => app.mouse_released(ctx, x, y, button),
        InputEvent::WheelMoved(amount) => app.wheel_moved(ctx, amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guarded_catches_panics() {
        let errors = ErrorReporter::default();
        let out: Option<()> = guarded(&errors, "update", || panic!("boom"));
        assert!(out.is_none());
        assert_eq!(errors.message().as_deref(), Some("update: boom"));
    }

    #[test]
    fn guarded_passes_values_through() {
        let errors = ErrorReporter::default();
        assert_eq!(guarded(&errors, "quit", || true), Some(true));
        assert!(!errors.has_error());
    }
}
