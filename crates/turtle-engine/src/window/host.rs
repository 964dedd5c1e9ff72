use anyhow::Context as _;
use ouroboros::self_referencing;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{CursorGrabMode, Fullscreen, Window};

use crate::coords::Viewport;
use crate::core::Config;
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::input::platform::winit::{cursor_icon, to_logical_size};
use crate::input::{InputCollector, InputSnapshot, RawEvent};
use crate::platform::{Frame, Icon, Platform, PlatformError, WindowCommand};
use crate::render::{RenderCtx, RenderTarget, Renderer};
use crate::time::FrameClock;

#[self_referencing]
pub(super) struct WindowEntry {
    pub(super) window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Window, GPU and input state owned by the runtime across callbacks.
pub(super) struct Host {
    pub(super) entry: Option<WindowEntry>,
    pub(super) collector: InputCollector,
    clock: FrameClock,
    clipboard: Option<arboard::Clipboard>,
    renderer: Renderer,
    gpu_init: GpuInit,
    /// The surface reported an unrecoverable error.
    pub(super) fatal: bool,
}

impl Host {
    pub(super) fn new() -> Self {
        Self {
            entry: None,
            collector: InputCollector::new(0, 0),
            clock: FrameClock::new(),
            clipboard: None,
            renderer: Renderer::new(),
            gpu_init: GpuInit::default(),
            fatal: false,
        }
    }

    pub(super) fn request_redraw(&self) {
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    /// Resizes the surface to the window's current physical size.
    pub(super) fn sync_surface_size(&mut self) {
        if let Some(entry) = self.entry.as_mut() {
            let size = entry.with_window(|w| w.inner_size());
            entry.with_gpu_mut(|gpu| gpu.resize(size));
        }
    }

    fn clipboard(&mut self) -> Result<&mut arboard::Clipboard, PlatformError> {
        if self.clipboard.is_none() {
            let cb = arboard::Clipboard::new().map_err(|e| PlatformError::Clipboard(e.to_string()))?;
            self.clipboard = Some(cb);
        }
        self.clipboard
            .as_mut()
            .ok_or_else(|| PlatformError::Clipboard("clipboard not initialized".to_string()))
    }

    fn window_attributes(event_loop: &ActiveEventLoop, config: &Config) -> winit::window::WindowAttributes {
        let mut attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width.max(1), config.height.max(1)))
            .with_min_inner_size(LogicalSize::new(config.min_width.max(1), config.min_height.max(1)))
            .with_resizable(config.resizable)
            .with_decorations(!config.borderless);

        if config.fullscreen {
            let monitor = event_loop.available_monitors().nth(config.display);
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(monitor)));
        }
        if let Some((x, y)) = config.position() {
            attrs = attrs.with_position(LogicalPosition::new(x, y));
        }
        attrs
    }
}

/// [`Platform`] backed by winit and wgpu for the duration of one callback.
pub(super) struct WinitPlatform<'a> {
    pub(super) event_loop: &'a ActiveEventLoop,
    pub(super) host: &'a mut Host,
}

impl WinitPlatform<'_> {
    fn with_window(&self, f: impl FnOnce(&Window)) {
        if let Some(entry) = &self.host.entry {
            entry.with_window(|w| f(w));
        }
    }

    fn with_gpu_mut(&mut self, f: impl FnOnce(&mut Gpu<'_>)) {
        if let Some(entry) = self.host.entry.as_mut() {
            entry.with_gpu_mut(|gpu| f(gpu));
        }
    }
}

impl Platform for WinitPlatform<'_> {
    fn open_window(&mut self, config: &Config) -> Result<(u32, u32), PlatformError> {
        let attrs = Host::window_attributes(self.event_loop, config);
        let window = self
            .event_loop
            .create_window(attrs)
            .map_err(|e| PlatformError::Window(e.to_string()))?;

        let mut gpu_init = self.host.gpu_init.clone();
        gpu_init.vsync = config.vsync;
        gpu_init.msaa = config.msaa;

        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init.clone()))
                    .context("GPU initialization failed for window")
            },
        }
        .try_build()
        .map_err(|e| PlatformError::Gpu(format!("{e:#}")))?;

        let (width, height) = entry.with_window(|w| to_logical_size(w, w.inner_size()));
        log::info!("window opened: {width}x{height} logical");

        self.host.gpu_init = gpu_init;
        self.host.entry = Some(entry);
        self.host.collector = InputCollector::new(width, height);
        self.host.clock.reset();
        Ok((width, height))
    }

    fn set_icon(&mut self, icon: Icon) -> Result<(), PlatformError> {
        let icon = winit::window::Icon::from_rgba(icon.rgba, icon.width, icon.height)
            .map_err(|e| PlatformError::Window(e.to_string()))?;
        self.with_window(|w| w.set_window_icon(Some(icon)));
        Ok(())
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.host.gpu_init.vsync = enabled;
        self.with_gpu_mut(|gpu| gpu.set_vsync(enabled));
    }

    fn poll_input(&mut self) -> InputSnapshot {
        self.host.collector.take_snapshot()
    }

    fn frame_time(&mut self) -> f32 {
        self.host.clock.tick()
    }

    fn present(&mut self, frame: Frame<'_>) -> Result<(), PlatformError> {
        let Host { entry, renderer, fatal, .. } = &mut *self.host;
        let Some(entry) = entry.as_mut() else {
            return Err(PlatformError::Window("no window to present to".to_string()));
        };

        entry.with_mut(|fields| {
            let window: &Window = fields.window;
            let gpu = fields.gpu;

            let size = window.inner_size();
            if size.width == 0 || size.height == 0 {
                // Minimized; nothing to draw into.
                return Ok(());
            }

            let mut gpu_frame = match gpu.begin_frame() {
                Ok(f) => f,
                Err(err) => {
                    let message = err.to_string();
                    return match gpu.handle_surface_error(err) {
                        SurfaceErrorAction::Fatal => {
                            *fatal = true;
                            Err(PlatformError::Gpu(format!("surface lost: {message}")))
                        }
                        action => {
                            log::debug!("frame skipped: {message} ({action:?})");
                            Ok(())
                        }
                    };
                }
            };

            let logical = size.to_logical::<f32>(window.scale_factor());
            let ctx = RenderCtx::new(
                gpu.device(),
                gpu.queue(),
                gpu.surface_format(),
                gpu.sample_count(),
                Viewport::new(logical.width, logical.height),
            );

            {
                let mut target = match gpu_frame.msaa_view.as_ref() {
                    Some(msaa) => {
                        RenderTarget::multisampled(&mut gpu_frame.encoder, msaa, &gpu_frame.view)
                    }
                    None => RenderTarget::new(&mut gpu_frame.encoder, &gpu_frame.view),
                };
                renderer.render(&ctx, &mut target, &frame);
            }

            window.pre_present_notify();
            gpu.submit(gpu_frame);
            Ok(())
        })
    }

    fn set_clipboard_text(&mut self, text: &str) -> Result<(), PlatformError> {
        self.host
            .clipboard()?
            .set_text(text.to_owned())
            .map_err(|e| PlatformError::Clipboard(e.to_string()))
    }

    fn clipboard_text(&mut self) -> Result<String, PlatformError> {
        self.host
            .clipboard()?
            .get_text()
            .map_err(|e| PlatformError::Clipboard(e.to_string()))
    }

    fn apply(&mut self, command: WindowCommand) {
        let Some(entry) = self.host.entry.as_mut() else {
            log::debug!("{command:?} ignored: no window");
            return;
        };

        match command {
            WindowCommand::SetTitle(title) => entry.with_window(|w| w.set_title(&title)),
            WindowCommand::SetSize { width, height } => {
                let applied =
                    entry.with_window(|w| w.request_inner_size(LogicalSize::new(width, height)));
                if let Some(size) = applied {
                    entry.with_gpu_mut(|gpu| gpu.resize(size));
                    let (width, height) = entry.with_window(|w| to_logical_size(w, size));
                    self.host.collector.push(RawEvent::Resized { width, height });
                }
            }
            WindowCommand::SetFullscreen(on) => entry.with_window(|w| {
                w.set_fullscreen(on.then(|| Fullscreen::Borderless(w.current_monitor())));
            }),
            WindowCommand::SetVsync(on) => {
                self.host.gpu_init.vsync = on;
                entry.with_gpu_mut(|gpu| gpu.set_vsync(on));
            }
            WindowCommand::SetPosition { x, y } => {
                entry.with_window(|w| w.set_outer_position(LogicalPosition::new(x, y)));
            }
            WindowCommand::Minimize => entry.with_window(|w| w.set_minimized(true)),
            WindowCommand::Maximize => entry.with_window(|w| w.set_maximized(true)),
            WindowCommand::SetCursorVisible(visible) => {
                entry.with_window(|w| w.set_cursor_visible(visible));
            }
            WindowCommand::SetCursorGrabbed(grabbed) => entry.with_window(|w| {
                let result = if grabbed {
                    w.set_cursor_grab(CursorGrabMode::Confined)
                        .or_else(|_| w.set_cursor_grab(CursorGrabMode::Locked))
                } else {
                    w.set_cursor_grab(CursorGrabMode::None)
                };
                if let Err(e) = result {
                    log::warn!("cursor grab failed: {e}");
                }
            }),
            WindowCommand::SetCursorPosition(p) => entry.with_window(|w| {
                if let Err(e) = w.set_cursor_position(LogicalPosition::new(p.x, p.y)) {
                    log::warn!("cursor warp failed: {e}");
                }
            }),
            WindowCommand::SetCursor(kind) => entry.with_window(|w| w.set_cursor(cursor_icon(kind))),
        }
    }

    fn desktop_dimensions(&self, display: usize) -> Option<(u32, u32)> {
        let monitor = self.event_loop.available_monitors().nth(display)?;
        let size = monitor.size().to_logical::<f64>(monitor.scale_factor());
        Some((size.width as u32, size.height as u32))
    }

    fn close_window(&mut self) {
        if self.host.entry.take().is_some() {
            log::info!("window closed");
        }
        self.host.clipboard = None;
    }
}
