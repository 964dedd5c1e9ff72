use anyhow::{Context as _, Result};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::core::App;
use crate::input::platform::winit::translate_window_event;
use crate::session::{Session, SessionState, ShutdownReport};

use super::host::{Host, WinitPlatform};

/// Entry point for desktop games.
///
/// Opens the session with the process arguments, asks the app for its
/// configuration and drives frames from the winit event loop until the
/// session closes.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(app: A) -> Result<ShutdownReport>
    where
        A: App + 'static,
    {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut session = Session::open(args).context("failed to open session")?;

        let mut app = app;
        session.configure(&mut app);

        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut handler = RuntimeHandler {
            session,
            app,
            host: Host::new(),
            report: None,
        };

        event_loop
            .run_app(&mut handler)
            .context("winit event loop terminated with error")?;

        Ok(handler.report.unwrap_or_default())
    }
}

struct RuntimeHandler<A>
where
    A: App + 'static,
{
    session: Session,
    app: A,
    host: Host,
    report: Option<ShutdownReport>,
}

impl<A> RuntimeHandler<A>
where
    A: App + 'static,
{
    /// Shuts the session down once and stops the loop.
    fn finish(&mut self, event_loop: &ActiveEventLoop) {
        if self.report.is_none() {
            let mut platform = WinitPlatform { event_loop, host: &mut self.host };
            self.report = self.session.shutdown(&mut platform);
        }
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for RuntimeHandler<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.state() != SessionState::Initializing {
            return;
        }

        let mut platform = WinitPlatform { event_loop, host: &mut self.host };
        self.session.initialize(&mut platform, &mut self.app);

        if self.host.entry.is_none() {
            // Nowhere to show the error screen.
            if let Some(message) = self.session.error_message() {
                log::error!("{message}");
            }
            self.finish(event_loop);
            return;
        }

        self.host.request_redraw();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        self.host.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.host.entry.as_ref() else {
            return;
        };

        if let Some(raw) = entry.with_window(|w| translate_window_event(w, &event)) {
            self.host.collector.push(raw);
        }

        match event {
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.host.sync_surface_size();
                self.host.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let mut platform = WinitPlatform { event_loop, host: &mut self.host };
                self.session.frame(&mut platform, &mut self.app);

                if self.host.fatal {
                    log::error!("GPU surface is unusable; closing");
                    self.finish(event_loop);
                } else if !self.session.state().is_live() {
                    self.finish(event_loop);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        self.finish(event_loop);
    }
}
