//! Headless platform.
//!
//! Runs a session without a window, GPU, or audio device. Input is scripted
//! as a queue of snapshots; presented frames and clipboard writes are
//! recorded so tests can inspect them.

use std::collections::VecDeque;

use crate::core::Config;
use crate::input::InputSnapshot;
use crate::paint::Color;
use crate::scene::DrawCmd;

use super::{Frame, Icon, Platform, PlatformError, WindowCommand};

/// Copy of one presented frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentedFrame {
    pub clear: Color,
    pub commands: Vec<DrawCmd>,
}

impl PresentedFrame {
    /// Concatenated text of every text command, in draw order.
    pub fn text(&self) -> String {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub struct HeadlessPlatform {
    script: VecDeque<InputSnapshot>,
    last: InputSnapshot,
    close_when_exhausted: bool,
    dt: f32,

    window_open: bool,
    open_error: Option<String>,
    icon: Option<Icon>,
    vsync: Option<bool>,
    desktop: (u32, u32),

    clipboard: Option<String>,
    clipboard_writes: Vec<String>,
    clipboard_fails: bool,

    frames: Vec<PresentedFrame>,
    commands: Vec<WindowCommand>,
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            last: InputSnapshot::default(),
            close_when_exhausted: true,
            dt: 1.0 / 60.0,
            window_open: false,
            open_error: None,
            icon: None,
            vsync: None,
            desktop: (1920, 1080),
            clipboard: None,
            clipboard_writes: Vec::new(),
            clipboard_fails: false,
            frames: Vec::new(),
            commands: Vec::new(),
        }
    }

    // ── scripting ─────────────────────────────────────────────────────────

    /// Queues one snapshot per frame, in order.
    pub fn with_frames(mut self, frames: impl IntoIterator<Item = InputSnapshot>) -> Self {
        self.script.extend(frames);
        self
    }

    pub fn push_frame(&mut self, snapshot: InputSnapshot) {
        self.script.push_back(snapshot);
    }

    /// Fixed delta reported by [`Platform::frame_time`].
    pub fn with_frame_time(mut self, dt: f32) -> Self {
        self.dt = dt;
        self
    }

    /// When the script runs out, keep repeating the last state instead of
    /// requesting close.
    pub fn keep_open_when_exhausted(mut self) -> Self {
        self.close_when_exhausted = false;
        self
    }

    pub fn fail_open_window(mut self, message: impl Into<String>) -> Self {
        self.open_error = Some(message.into());
        self
    }

    pub fn fail_clipboard(mut self) -> Self {
        self.clipboard_fails = true;
        self
    }

    // ── inspection ────────────────────────────────────────────────────────

    pub fn frames(&self) -> &[PresentedFrame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&PresentedFrame> {
        self.frames.last()
    }

    pub fn clipboard_writes(&self) -> &[String] {
        &self.clipboard_writes
    }

    pub fn applied_commands(&self) -> &[WindowCommand] {
        &self.commands
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn vsync(&self) -> Option<bool> {
        self.vsync
    }

    pub fn is_window_open(&self) -> bool {
        self.window_open
    }
}

impl Platform for HeadlessPlatform {
    fn open_window(&mut self, config: &Config) -> Result<(u32, u32), PlatformError> {
        if let Some(message) = &self.open_error {
            return Err(PlatformError::Window(message.clone()));
        }
        self.window_open = true;
        self.last = InputSnapshot::baseline(config.width, config.height);
        log::debug!("headless window opened ({}x{})", config.width, config.height);
        Ok((config.width, config.height))
    }

    fn set_icon(&mut self, icon: Icon) -> Result<(), PlatformError> {
        self.icon = Some(icon);
        Ok(())
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.vsync = Some(enabled);
    }

    fn poll_input(&mut self) -> InputSnapshot {
        match self.script.pop_front() {
            Some(snapshot) => {
                self.last = snapshot.persistent();
                snapshot
            }
            None if self.close_when_exhausted => self.last.persistent().with_close_requested(),
            None => self.last.persistent(),
        }
    }

    fn frame_time(&mut self) -> f32 {
        self.dt
    }

    fn present(&mut self, frame: Frame<'_>) -> Result<(), PlatformError> {
        self.frames.push(PresentedFrame {
            clear: frame.clear,
            commands: frame.draw_list.items().to_vec(),
        });
        Ok(())
    }

    fn set_clipboard_text(&mut self, text: &str) -> Result<(), PlatformError> {
        if self.clipboard_fails {
            return Err(PlatformError::Clipboard("headless clipboard disabled".to_string()));
        }
        self.clipboard = Some(text.to_string());
        self.clipboard_writes.push(text.to_string());
        Ok(())
    }

    fn clipboard_text(&mut self) -> Result<String, PlatformError> {
        if self.clipboard_fails {
            return Err(PlatformError::Clipboard("headless clipboard disabled".to_string()));
        }
        Ok(self.clipboard.clone().unwrap_or_default())
    }

    fn apply(&mut self, command: WindowCommand) {
        if let WindowCommand::SetSize { width, height } = command {
            self.last.window_size = (width, height);
        }
        self.commands.push(command);
    }

    fn desktop_dimensions(&self, display: usize) -> Option<(u32, u32)> {
        (display == 0).then_some(self.desktop)
    }

    fn close_window(&mut self) {
        self.window_open = false;
    }
}
