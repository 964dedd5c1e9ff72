use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::audio::Audio;
use crate::core::{App, Config, Context, Event, VERSION, Window};
use crate::graphics::{Graphics, SYSTEM_FONT_CANDIDATES};
use crate::input::{InputSnapshot, Key, Keyboard, Mouse, MouseButton, dispatch_edges};
use crate::math::Random;
use crate::platform::{Frame, Icon, Platform};
use crate::time::Timer;

use super::dispatch::{Dispatcher, guarded};
use super::{ErrorReporter, SessionError, SessionState, error_screen};

static SESSION_OPEN: AtomicBool = AtomicBool::new(false);

/// Releases the process-wide session slot on drop.
#[derive(Debug)]
struct InstanceGuard;

impl InstanceGuard {
    fn acquire() -> Result<Self, SessionError> {
        SESSION_OPEN
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InstanceGuard)
            .map_err(|_| SessionError::AlreadyOpen)
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        SESSION_OPEN.store(false, Ordering::Release);
    }
}

/// Counts of what shutdown released.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ShutdownReport {
    pub fonts: usize,
    pub images: usize,
    pub sources: usize,
    pub exit_code: i32,
}

/// Everything a callback context borrows.
struct Subsystems {
    graphics: Graphics,
    audio: Audio,
    keyboard: Keyboard,
    mouse: Mouse,
    window: Window,
    event: Event,
    timer: Timer,
    random: Random,
}

impl Subsystems {
    fn new(errors: &ErrorReporter) -> Self {
        Self {
            graphics: Graphics::new(errors.clone()),
            audio: Audio::disabled(errors.clone()),
            keyboard: Keyboard::default(),
            mouse: Mouse::default(),
            window: Window::from_config(&Config::default()),
            event: Event::default(),
            timer: Timer::new(),
            random: Random::new(),
        }
    }

    fn context<'a>(
        &'a mut self,
        platform: &'a mut dyn Platform,
        errors: &'a ErrorReporter,
    ) -> Context<'a> {
        Context {
            graphics: &mut self.graphics,
            audio: &mut self.audio,
            keyboard: &mut self.keyboard,
            mouse: &mut self.mouse,
            window: &mut self.window,
            event: &mut self.event,
            timer: &self.timer,
            random: &mut self.random,
            platform,
            errors,
        }
    }

    fn sync(&mut self, snapshot: &InputSnapshot) {
        let (w, h) = snapshot.window_size;
        self.graphics.set_dimensions(w, h);
        self.keyboard.sync(snapshot);
        self.mouse.sync(snapshot);
        self.window.sync(snapshot);
    }

    /// Hands queued window and mouse requests to the platform.
    fn apply_commands(&mut self, platform: &mut dyn Platform) {
        let commands = self.window.drain_commands().into_iter().chain(self.mouse.drain_commands());
        for command in commands {
            log::debug!("window command: {command:?}");
            platform.apply(command);
        }
        let (w, h) = self.window.dimensions();
        self.graphics.set_dimensions(w, h);
    }

    fn present(&mut self, platform: &mut dyn Platform) {
        let frame = Frame {
            clear: self.graphics.background_color(),
            draw_list: self.graphics.draw_list(),
            fonts: self.graphics.fonts(),
            images: self.graphics.images(),
        };
        if let Err(e) = platform.present(frame) {
            log::warn!("present failed: {e}");
        }
    }
}

/// Left click or Ctrl+C held.
fn confirm_held(snapshot: &InputSnapshot) -> bool {
    snapshot.button_down(MouseButton::Left)
        || (snapshot.key_down(Key::Control) && snapshot.key_down(Key::C))
}

fn load_icon(path: &Path) -> Result<Icon, String> {
    if !path.is_file() {
        return Err(format!("Icon file does not exist: {}", path.display()));
    }
    let rgba = image::open(path)
        .map_err(|e| format!("Could not decode icon {}: {e}", path.display()))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Icon { rgba: rgba.into_raw(), width, height })
}

/// The frame loop state machine.
///
/// Only one session may be open per process. The session owns every
/// subsystem the game sees through [`Context`] and drives a [`Platform`]:
///
/// 1. [`configure`](Self::configure) asks the app for its [`Config`]
/// 2. [`initialize`](Self::initialize) opens the window and subsystems and
///    calls [`App::load`]
/// 3. [`frame`](Self::frame) runs once per presented frame
/// 4. [`shutdown`](Self::shutdown) releases everything exactly once
///
/// [`run`](Self::run) chains all four for platforms that poll.
pub struct Session {
    state: SessionState,
    args: Vec<String>,
    config: Config,
    errors: ErrorReporter,
    subsystems: Subsystems,
    previous: InputSnapshot,
    loaded: bool,
    copied: bool,
    confirm_latched: bool,
    shut_down: bool,
    _guard: InstanceGuard,
}

impl Session {
    /// Opens the process-wide session. `args` reach [`App::load`] verbatim.
    pub fn open(args: Vec<String>) -> Result<Self, SessionError> {
        let guard = InstanceGuard::acquire()?;
        let errors = ErrorReporter::default();
        log::info!("turtle {VERSION}");
        Ok(Self {
            state: SessionState::Configuring,
            args,
            config: Config::default(),
            subsystems: Subsystems::new(&errors),
            errors,
            previous: InputSnapshot::default(),
            loaded: false,
            copied: false,
            confirm_latched: false,
            shut_down: false,
            _guard: guard,
        })
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn error_message(&self) -> Option<String> {
        self.errors.message()
    }

    /// Whether the error message has been copied to the clipboard.
    pub fn copied(&self) -> bool {
        self.copied
    }

    /// Raises a session error from outside a callback.
    pub fn raise_error(&self, message: impl Into<String>) {
        self.errors.raise(message);
    }

    pub fn graphics(&self) -> &Graphics {
        &self.subsystems.graphics
    }

    pub fn timer(&self) -> &Timer {
        &self.subsystems.timer
    }

    pub fn is_window_open(&self) -> bool {
        self.subsystems.window.is_open()
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            log::info!("session: {} -> {next}", self.state);
            self.state = next;
        }
    }

    fn enter_error_display(&mut self) {
        // A button already held when the error appears is not a click.
        self.confirm_latched = confirm_held(&self.previous);
        self.transition(SessionState::ErrorDisplay);
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Asks the app for its configuration and checks the declared version.
    pub fn configure(&mut self, app: &mut dyn App) {
        if self.state != SessionState::Configuring {
            log::warn!("configure called while {}", self.state);
            return;
        }

        if let Some(config) = guarded(&self.errors, "configure", || app.configure()) {
            self.config = config;
        }
        if let Some(declared) = &self.config.version {
            if let Err(e) = VERSION.check_compatible(declared) {
                self.errors.raise(e.to_string());
            }
        }

        self.subsystems.window = Window::from_config(&self.config);
        self.transition(SessionState::Initializing);
    }

    /// Opens the window and subsystems, then calls [`App::load`] once.
    pub fn initialize(&mut self, platform: &mut dyn Platform, app: &mut dyn App) {
        if self.state != SessionState::Initializing {
            log::warn!("initialize called while {}", self.state);
            return;
        }
        let config = self.config.clone();

        match platform.open_window(&config) {
            Ok((w, h)) => {
                self.subsystems.window.set_open(true);
                self.subsystems.graphics.set_dimensions(w, h);
                self.previous = InputSnapshot::baseline(w, h);
            }
            Err(e) => self.errors.raise(format!("Could not open window: {e}")),
        }

        if let Some(path) = &config.icon {
            match load_icon(path).and_then(|icon| platform.set_icon(icon).map_err(|e| e.to_string())) {
                Ok(()) => log::debug!("window icon set from {}", path.display()),
                Err(message) => self.errors.raise(message),
            }
        }

        platform.set_vsync(config.vsync);

        if config.modules.font {
            let mut candidates = vec![config.font.clone()];
            candidates.extend(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));
            if self.subsystems.graphics.install_default_font(&candidates).is_none() {
                self.errors
                    .raise(format!("Font file does not exist: {}", config.font.display()));
            }
        }

        if config.modules.audio {
            if let Err(e) = self.subsystems.audio.open_device() {
                log::warn!("audio disabled: {e}");
            }
        }

        if !self.loaded {
            self.loaded = true;
            let errors = &self.errors;
            let args = &self.args;
            let mut ctx = self.subsystems.context(platform, errors);
            guarded(errors, "load", || app.load(&mut ctx, args));
        }
        self.subsystems.apply_commands(platform);

        if self.errors.has_error() {
            self.enter_error_display();
        } else {
            self.transition(SessionState::Running);
        }
    }

    /// Runs one frame. Does nothing unless the session is running or showing
    /// the error screen.
    pub fn frame(&mut self, platform: &mut dyn Platform, app: &mut dyn App) {
        match self.state {
            SessionState::Running => self.running_frame(platform, app),
            SessionState::ErrorDisplay => self.error_frame(platform, app),
            other => log::debug!("frame skipped while {other}"),
        }
    }

    fn running_frame(&mut self, platform: &mut dyn Platform, app: &mut dyn App) {
        let snapshot = platform.poll_input();
        self.subsystems.sync(&snapshot);

        {
            let mut ctx = self.subsystems.context(platform, &self.errors);
            let mut sink = Dispatcher { app: &mut *app, ctx: &mut ctx, game_events: true };
            dispatch_edges(&self.previous, &snapshot, &mut sink);
        }
        let close_requested = snapshot.close_requested;
        self.previous = snapshot;

        if self.errors.has_error() {
            if close_requested {
                self.transition(SessionState::ShuttingDown);
            } else {
                self.error_frame_render(platform);
            }
            return;
        }

        let quit_requested = self.subsystems.event.take_quit();
        if close_requested || quit_requested {
            let mut ctx = self.subsystems.context(platform, &self.errors);
            let cancel = guarded(&self.errors, "quit", || app.quit(&mut ctx)).unwrap_or(false);
            if !cancel {
                self.transition(SessionState::ShuttingDown);
                return;
            }
            log::info!("quit cancelled by the application");
        }
        self.subsystems.apply_commands(platform);

        let dt = platform.frame_time();
        self.subsystems.timer.tick(dt);

        {
            let mut ctx = self.subsystems.context(platform, &self.errors);
            guarded(&self.errors, "update", || app.update(&mut ctx, dt));
        }
        self.subsystems.apply_commands(platform);
        if self.errors.has_error() {
            self.error_frame_render(platform);
            return;
        }

        self.subsystems.graphics.begin_frame();
        {
            let mut ctx = self.subsystems.context(platform, &self.errors);
            guarded(&self.errors, "draw", || app.draw(&mut ctx));
        }
        self.subsystems.apply_commands(platform);
        if self.errors.has_error() {
            self.error_frame_render(platform);
            return;
        }

        self.subsystems.present(platform);
    }

    /// Switches to the error screen and draws it for the current frame.
    fn error_frame_render(&mut self, platform: &mut dyn Platform) {
        self.enter_error_display();
        self.render_error_screen(platform);
    }

    fn error_frame(&mut self, platform: &mut dyn Platform, app: &mut dyn App) {
        let snapshot = platform.poll_input();
        self.subsystems.sync(&snapshot);

        {
            let mut ctx = self.subsystems.context(platform, &self.errors);
            let mut sink = Dispatcher { app: &mut *app, ctx: &mut ctx, game_events: false };
            dispatch_edges(&self.previous, &snapshot, &mut sink);
        }
        // Only the OS can end the error screen.
        self.subsystems.event.take_quit();

        if snapshot.close_requested {
            self.previous = snapshot;
            self.transition(SessionState::ShuttingDown);
            return;
        }

        let confirm = confirm_held(&snapshot);
        if confirm && !self.confirm_latched {
            self.copy_error(platform);
        }
        self.confirm_latched = confirm;
        self.previous = snapshot;

        self.subsystems.apply_commands(platform);
        let dt = platform.frame_time();
        self.subsystems.timer.tick(dt);
        self.render_error_screen(platform);
    }

    fn copy_error(&mut self, platform: &mut dyn Platform) {
        let message = self.errors.message().unwrap_or_default();
        match platform.set_clipboard_text(&message) {
            Ok(()) => {
                if !self.copied {
                    log::info!("error message copied to clipboard");
                }
                self.copied = true;
            }
            Err(e) => log::warn!("{e}"),
        }
    }

    fn render_error_screen(&mut self, platform: &mut dyn Platform) {
        let message = self.errors.message().unwrap_or_default();
        error_screen::render(&mut self.subsystems.graphics, &message, self.copied);
        self.subsystems.present(platform);
    }

    /// Releases fonts, images and audio sources, closes the audio device and
    /// the window. Runs once; later calls return `None`.
    pub fn shutdown(&mut self, platform: &mut dyn Platform) -> Option<ShutdownReport> {
        if self.shut_down {
            log::debug!("shutdown already ran");
            return None;
        }
        self.shut_down = true;
        self.transition(SessionState::ShuttingDown);

        let s = &mut self.subsystems;
        let fonts = s.graphics.release_fonts();
        let images = s.graphics.release_images();
        let sources = s.audio.release_sources();
        s.audio.close();
        platform.close_window();
        s.window.set_open(false);

        log::info!("released {fonts} fonts, {images} images, {sources} sources");
        self.transition(SessionState::Closed);
        Some(ShutdownReport { fonts, images, sources, exit_code: 0 })
    }

    /// Configures, initializes and runs frames until the session shuts down.
    pub fn run(&mut self, platform: &mut dyn Platform, app: &mut dyn App) -> ShutdownReport {
        self.configure(app);
        self.initialize(platform, app);
        while self.state.is_live() {
            self.frame(platform, app);
        }
        self.shutdown(platform).unwrap_or_default()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if !self.shut_down {
            log::warn!("session dropped without shutdown");
        }
    }
}
