//! End-to-end session runs on the headless platform.

use std::sync::Mutex;

use turtle_engine::input::InputSnapshot;
use turtle_engine::platform::HeadlessPlatform;
use turtle_engine::session::SessionError;
use turtle_engine::{
    App, Color, Config, Context, DrawMode, Key, Modules, MouseButton, Session, SessionState,
};

// One session per process: tests touching `Session` run one at a time.
static LOCK: Mutex<()> = Mutex::new(());

fn headless_config() -> Config {
    Config::default().with_modules(Modules { audio: false, font: false })
}

fn baseline() -> InputSnapshot {
    InputSnapshot::baseline(800, 600)
}

fn error_background() -> Color {
    Color::from_srgb_u8(89, 157, 220, 255)
}

/// Records every callback it receives.
#[derive(Default)]
struct Recorder {
    config: Option<Config>,
    calls: Vec<String>,
    fail_load: Option<String>,
    raise_in_update_at: Option<usize>,
    quit_on_update_at: Option<usize>,
    cancel_quits: usize,
    updates: usize,
}

impl Recorder {
    fn with_config(config: Config) -> Self {
        Self { config: Some(config), ..Self::default() }
    }

    fn count(&self, name: &str) -> usize {
        self.calls.iter().filter(|c| c.as_str() == name).count()
    }
}

impl App for Recorder {
    fn configure(&mut self) -> Config {
        self.calls.push("configure".into());
        self.config.clone().unwrap_or_else(headless_config)
    }

    fn load(&mut self, ctx: &mut Context<'_>, args: &[String]) {
        self.calls.push(format!("load {}", args.join(" ")).trim_end().to_string());
        if let Some(message) = &self.fail_load {
            ctx.raise_error(message.clone());
        }
    }

    fn update(&mut self, ctx: &mut Context<'_>, _dt: f32) {
        self.calls.push("update".into());
        self.updates += 1;
        if self.raise_in_update_at == Some(self.updates) {
            ctx.raise_error("update failed");
        }
        if self.quit_on_update_at == Some(self.updates) {
            ctx.event.quit();
        }
    }

    fn draw(&mut self, ctx: &mut Context<'_>) {
        self.calls.push("draw".into());
        ctx.graphics.rectangle(DrawMode::Fill, 0.0, 0.0, 10.0, 10.0);
    }

    fn quit(&mut self, _ctx: &mut Context<'_>) -> bool {
        self.calls.push("quit".into());
        if self.cancel_quits > 0 {
            self.cancel_quits -= 1;
            return true;
        }
        false
    }

    fn key_pressed(&mut self, _ctx: &mut Context<'_>, key: Key, is_repeat: bool) {
        self.calls.push(format!("key_pressed {key} {is_repeat}"));
    }

    fn key_released(&mut self, _ctx: &mut Context<'_>, key: Key) {
        self.calls.push(format!("key_released {key}"));
    }

    fn mouse_moved(&mut self, _ctx: &mut Context<'_>, x: f32, y: f32, dx: f32, dy: f32) {
        self.calls.push(format!("mouse_moved {x} {y} {dx} {dy}"));
    }

    fn mouse_pressed(&mut self, _ctx: &mut Context<'_>, x: f32, y: f32, button: MouseButton) {
        self.calls.push(format!("mouse_pressed {x} {y} {button:?}"));
    }

    fn mouse_released(&mut self, _ctx: &mut Context<'_>, x: f32, y: f32, button: MouseButton) {
        self.calls.push(format!("mouse_released {x} {y} {button:?}"));
    }

    fn resize(&mut self, _ctx: &mut Context<'_>, width: u32, height: u32) {
        self.calls.push(format!("resize {width} {height}"));
    }

    fn focus(&mut self, _ctx: &mut Context<'_>, focused: bool) {
        self.calls.push(format!("focus {focused}"));
    }
}

// ── lifecycle ─────────────────────────────────────────────────────────────

#[test]
fn clean_run_calls_load_once_then_update_before_draw() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let mut platform = HeadlessPlatform::new().with_frames([baseline(), baseline()]);
    let mut app = Recorder::default();

    let mut session = Session::open(vec!["--level".into(), "2".into()]).unwrap();
    let report = session.run(&mut platform, &mut app);

    // Two scripted frames, then the close request is vetoed by nobody.
    assert_eq!(
        app.calls,
        vec!["configure", "load --level 2", "update", "draw", "update", "draw", "quit"]
    );
    assert_eq!(report.exit_code, 0);
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(platform.frames().len(), 2);
    assert!(!platform.is_window_open());
    assert_eq!(platform.vsync(), Some(true));
}

#[test]
fn quit_can_be_cancelled() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let mut platform = HeadlessPlatform::new().with_frames(vec![baseline(); 3]);
    let mut app = Recorder { cancel_quits: 1, quit_on_update_at: Some(2), ..Recorder::default() };

    let mut session = Session::open(Vec::new()).unwrap();
    session.run(&mut platform, &mut app);

    // update #2 requests quit; frame 3 sees it and the app cancels. After the
    // script runs out the OS close request goes through.
    assert_eq!(app.count("quit"), 2);
    assert_eq!(app.updates, 3);
    assert_eq!(session.state(), SessionState::Closed);
}

#[test]
fn shutdown_runs_once() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let mut platform = HeadlessPlatform::new();
    let mut app = Recorder::default();

    let mut session = Session::open(Vec::new()).unwrap();
    session.configure(&mut app);
    session.initialize(&mut platform, &mut app);
    assert_eq!(session.state(), SessionState::Running);
    assert!(platform.is_window_open());

    let first = session.shutdown(&mut platform);
    assert!(first.is_some());
    assert!(session.shutdown(&mut platform).is_none());
    assert_eq!(session.state(), SessionState::Closed);
    assert!(!platform.is_window_open());
}

#[test]
fn shutdown_releases_loaded_images() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());

    let dir = std::env::temp_dir().join(format!("turtle-session-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("pixel.png");
    image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255])).save(&path).unwrap();

    struct Loader(std::path::PathBuf);
    impl App for Loader {
        fn configure(&mut self) -> Config {
            headless_config()
        }
        fn load(&mut self, ctx: &mut Context<'_>, _args: &[String]) {
            assert!(ctx.graphics.new_image(&self.0).is_some());
            assert!(ctx.graphics.new_image(&self.0).is_some());
        }
    }

    let mut platform = HeadlessPlatform::new();
    let mut session = Session::open(Vec::new()).unwrap();
    let report = session.run(&mut platform, &mut Loader(path));

    assert_eq!(report.images, 2);
    assert_eq!(report.fonts, 0);
    assert_eq!(report.sources, 0);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn second_session_is_refused_while_one_is_open() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());

    let first = Session::open(Vec::new()).unwrap();
    assert_eq!(Session::open(Vec::new()).err(), Some(SessionError::AlreadyOpen));
    drop(first);
    assert!(Session::open(Vec::new()).is_ok());
}

// ── input dispatch ────────────────────────────────────────────────────────

#[test]
fn edges_are_dispatched_in_fixed_order_before_update() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let frames = [
        baseline()
            .with_focus(false)
            .with_key(Key::A)
            .with_mouse(5.0, 6.0)
            .with_button(MouseButton::Left),
        baseline().with_mouse(5.0, 6.0),
    ];
    let mut platform = HeadlessPlatform::new().with_frames(frames);
    let mut app = Recorder::default();

    let mut session = Session::open(Vec::new()).unwrap();
    session.configure(&mut app);
    session.initialize(&mut platform, &mut app);
    session.frame(&mut platform, &mut app);
    session.frame(&mut platform, &mut app);
    session.shutdown(&mut platform);

    assert_eq!(
        app.calls[2..],
        [
            "focus false",
            "key_pressed A false",
            "mouse_moved 5 6 5 6",
            "mouse_pressed 5 6 Left",
            "update",
            "draw",
            "focus true",
            "key_released A",
            "mouse_released 5 6 Left",
            "update",
            "draw",
        ]
    );
}

#[test]
fn held_keys_repeat_only_when_enabled() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());

    struct Repeater {
        presses: Vec<bool>,
    }
    impl App for Repeater {
        fn configure(&mut self) -> Config {
            headless_config()
        }
        fn load(&mut self, ctx: &mut Context<'_>, _args: &[String]) {
            ctx.keyboard.set_key_repeat(true);
        }
        fn key_pressed(&mut self, _ctx: &mut Context<'_>, _key: Key, is_repeat: bool) {
            self.presses.push(is_repeat);
        }
    }

    let held = baseline().with_key(Key::Space);
    let mut platform = HeadlessPlatform::new().with_frames(vec![held; 3]);
    let mut app = Repeater { presses: Vec::new() };

    let mut session = Session::open(Vec::new()).unwrap();
    session.run(&mut platform, &mut app);

    // Three scripted frames plus the closing frame still holding the key.
    assert_eq!(app.presses, vec![false, true, true, true]);
}

// ── error display ─────────────────────────────────────────────────────────

#[test]
fn missing_icon_shows_error_screen_without_game_callbacks() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let config = headless_config().with_icon("does/not/exist.png");
    let mut platform = HeadlessPlatform::new().with_frames(vec![baseline(); 3]);
    let mut app = Recorder::with_config(config);

    let mut session = Session::open(Vec::new()).unwrap();
    session.configure(&mut app);
    session.initialize(&mut platform, &mut app);

    assert_eq!(session.state(), SessionState::ErrorDisplay);
    assert_eq!(
        session.error_message().as_deref(),
        Some("Icon file does not exist: does/not/exist.png")
    );
    // Load still ran exactly once.
    assert_eq!(app.count("load"), 1);

    while session.state().is_live() {
        session.frame(&mut platform, &mut app);
    }
    session.shutdown(&mut platform);

    assert_eq!(app.count("update"), 0);
    assert_eq!(app.count("draw"), 0);
    assert_eq!(app.count("quit"), 0);
    assert_eq!(platform.frames().len(), 3);
    assert!(platform.frames().iter().all(|f| f.clear == error_background()));
}

#[test]
fn error_is_copied_once_per_click() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let click = baseline().with_button(MouseButton::Left);
    let ctrl_c = baseline().with_key(Key::Control).with_key(Key::C);
    let frames = [baseline(), click.clone(), click.clone(), baseline(), click, baseline(), ctrl_c];
    let mut platform = HeadlessPlatform::new().with_frames(frames);
    let mut app = Recorder { fail_load: Some("boom".into()), ..Recorder::default() };

    let mut session = Session::open(Vec::new()).unwrap();
    session.run(&mut platform, &mut app);

    assert_eq!(platform.clipboard_writes(), ["boom", "boom", "boom"]);
    assert!(session.copied());
}

#[test]
fn error_screen_shows_message_then_copied_hint() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let config = Config::default()
        .with_modules(Modules { audio: false, font: true })
        .with_font("does/not/exist.ttf");
    let click = baseline().with_button(MouseButton::Left);
    let mut platform = HeadlessPlatform::new().with_frames([baseline(), click, baseline()]);
    let mut app = Recorder { fail_load: Some("boom".into()), ..Recorder::with_config(config) };

    let mut session = Session::open(Vec::new()).unwrap();
    let report = session.run(&mut platform, &mut app);

    // The missing bundled font falls back instead of raising a second error.
    assert_eq!(session.error_message().as_deref(), Some("boom"));
    let texts: Vec<String> = platform.frames().iter().map(|f| f.text()).collect();
    assert_eq!(
        texts,
        [
            "Error\nboom\nClick or press Ctrl+C to copy this error",
            "Error\nboom\nCopied to clipboard!",
            "Error\nboom\nCopied to clipboard!",
        ]
    );
    assert_eq!(report.fonts, 1);
}

#[test]
fn error_screen_has_text_with_font_module_off() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let mut platform = HeadlessPlatform::new().with_frames([baseline()]);
    let mut app = Recorder { fail_load: Some("boom".into()), ..Recorder::default() };

    let mut session = Session::open(Vec::new()).unwrap();
    let report = session.run(&mut platform, &mut app);

    let frame = &platform.frames()[0];
    assert_eq!(frame.clear, error_background());
    assert_eq!(frame.text(), "Error\nboom\nClick or press Ctrl+C to copy this error");
    // The embedded font was installed for the error screen and released.
    assert_eq!(report.fonts, 1);
}

#[test]
fn button_held_when_error_appears_is_not_a_click() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let click = baseline().with_button(MouseButton::Left);
    let mut platform = HeadlessPlatform::new().with_frames(vec![click; 3]);
    let mut app = Recorder { raise_in_update_at: Some(1), ..Recorder::default() };

    let mut session = Session::open(Vec::new()).unwrap();
    session.run(&mut platform, &mut app);

    assert!(platform.clipboard_writes().is_empty());
    assert!(!session.copied());
    assert_eq!(app.count("update"), 1);
    assert_eq!(app.count("draw"), 0);
}

#[test]
fn clipboard_failure_keeps_error_screen_up() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let click = baseline().with_button(MouseButton::Left);
    let mut platform = HeadlessPlatform::new().fail_clipboard().with_frames([baseline(), click]);
    let mut app = Recorder { fail_load: Some("boom".into()), ..Recorder::default() };

    let mut session = Session::open(Vec::new()).unwrap();
    session.run(&mut platform, &mut app);

    assert!(!session.copied());
    assert_eq!(session.state(), SessionState::Closed);
}

#[test]
fn window_level_events_still_reach_the_app_on_error_screen() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let frames = [baseline().with_window_size(1024, 768).with_key(Key::A)];
    let mut platform = HeadlessPlatform::new().with_frames(frames);
    let mut app = Recorder { fail_load: Some("boom".into()), ..Recorder::default() };

    let mut session = Session::open(Vec::new()).unwrap();
    session.run(&mut platform, &mut app);

    assert_eq!(app.count("resize 1024 768"), 1);
    assert!(!app.calls.iter().any(|c| c.starts_with("key_")));
}

#[test]
fn version_mismatch_is_reported() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let mut platform = HeadlessPlatform::new().with_frames([baseline()]);
    let mut app = Recorder::with_config(headless_config().with_version("0.2.0"));

    let mut session = Session::open(Vec::new()).unwrap();
    session.configure(&mut app);
    session.initialize(&mut platform, &mut app);

    assert_eq!(session.state(), SessionState::ErrorDisplay);
    let message = session.error_message().unwrap_or_default();
    assert!(message.contains("made for version 0.2.0"), "{message}");
    session.shutdown(&mut platform);
}

#[test]
fn window_open_failure_is_raised() {
    let _guard = LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let mut platform = HeadlessPlatform::new().fail_open_window("no display");
    let mut app = Recorder::default();

    let mut session = Session::open(Vec::new()).unwrap();
    session.run(&mut platform, &mut app);

    let message = session.error_message().unwrap_or_default();
    assert!(message.starts_with("Could not open window"), "{message}");
    assert_eq!(app.count("update"), 0);
}
