use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use webpane_browser::{AppSettings, Browser, BrowserEngine, BrowserSettings, WindowInfo};
use webpane_engine::canvas::Surface;
use webpane_engine::core::{App, AppControl, FrameCtx};
use webpane_engine::input::{InputEvent, InputState};
use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::bindings::host_bindings;
use crate::client::ConsoleLogger;
use crate::compositor::Compositor;
use crate::config::DemoConfig;
use crate::frame::FrameMailbox;
use crate::input_relay::InputRelay;
use crate::paint_relay::PaintRelay;
use crate::shape::{ShapeCommand, ShapeState};

/// Owns the browser, the shape and the composited surface for the lifetime of
/// the window.
pub struct DemoApp {
    engine: Box<dyn BrowserEngine>,
    browser: Box<dyn Browser>,

    shape: ShapeState,
    commands: Receiver<ShapeCommand>,

    surface: Arc<Mutex<Surface>>,
    frames: Arc<FrameMailbox>,
    compositor: Compositor,
    input_relay: InputRelay,

    shut_down: bool,
}

impl DemoApp {
    /// Brings up the engine and the browser, then installs the host bindings.
    pub fn start(config: &DemoConfig, mut engine: Box<dyn BrowserEngine>) -> Result<Self> {
        let url = config.page_url()?;

        engine
            .initialize(&AppSettings::default())
            .context("failed to initialize browser engine")?;

        let mut surface = Surface::new(config.width, config.height)?;
        surface.fill(webpane_engine::canvas::Rgba8::WHITE);
        let surface = Arc::new(Mutex::new(surface));
        let frames = Arc::new(FrameMailbox::new());

        let relay = Arc::new(PaintRelay::new(surface.clone(), frames.clone()));
        let browser = engine
            .create_browser_sync(
                WindowInfo::offscreen().with_transparent_painting(true),
                &BrowserSettings::default(),
                url.as_str(),
                relay,
                Arc::new(ConsoleLogger),
            )
            .with_context(|| format!("failed to create browser for {url}"))?;

        browser.send_focus(true);
        browser.was_resized();

        let (tx, commands) = mpsc::channel();
        browser.set_javascript_bindings(host_bindings(tx));

        log::info!("browser ready at {}", browser.url());

        Ok(Self {
            engine,
            browser,
            shape: ShapeState::default(),
            commands,
            surface,
            frames,
            compositor: Compositor::default(),
            input_relay: InputRelay::new(config.width, config.height, config.scroll_delta),
            shut_down: false,
        })
    }

    pub fn shape(&self) -> &ShapeState {
        &self.shape
    }

    /// One loop iteration short of presenting: pump the engine, apply page
    /// commands, forward input, composite.
    ///
    /// Returns the surface still locked, so a paint from the render thread
    /// cannot land between composite and present.
    pub fn tick(&mut self, input: &InputState, events: &[InputEvent]) -> MutexGuard<'_, Surface> {
        self.engine.message_loop_work();

        while let Ok(cmd) = self.commands.try_recv() {
            log::debug!("applying {cmd:?}");
            self.shape.apply(cmd);
        }

        self.input_relay.relay_all(self.browser.as_ref(), input, events);

        let mut surface = self.surface.lock().unwrap_or_else(PoisonError::into_inner);
        self.compositor
            .composite(&mut surface, &self.frames, &mut self.shape);
        surface
    }

    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.engine.shutdown();
    }
}

impl App for DemoApp {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::CloseRequested => AppControl::Exit,
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let surface = self.tick(ctx.input, &ctx.input_frame.events);
        ctx.present(&surface)
    }

    fn on_exit(&mut self) {
        self.shutdown();
    }
}

impl Drop for DemoApp {
    fn drop(&mut self) {
        self.shutdown();
    }
}
