use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use url::Url;

use crate::engine::{Browser, BrowserEngine};
use crate::errors::BrowserError;
use crate::handler::{ClientHandler, RenderHandler};
use crate::settings::{AppSettings, BrowserSettings, WindowInfo};

use super::browser::{PageInput, SharedBindings, SoftBrowser, spawn_render_thread};
use super::page::{JsCall, Page};

/// Software [`BrowserEngine`].
#[derive(Default)]
pub struct SoftEngine {
    settings: Option<AppSettings>,
    browsers: Vec<BrowserSlot>,
    created: usize,
}

struct BrowserSlot {
    url: String,
    input: Sender<PageInput>,
    calls: Receiver<JsCall>,
    bindings: SharedBindings,
    client: Arc<dyn ClientHandler>,
    thread: Option<JoinHandle<()>>,
}

impl BrowserSlot {
    fn run_js(&self, call: JsCall) {
        let result = {
            let bindings = self.bindings.lock().unwrap_or_else(PoisonError::into_inner);
            match bindings.as_ref() {
                Some(b) => b.call(call.function, &call.args),
                None => Err(BrowserError::UnknownBinding(call.function.to_string())),
            }
        };

        let message = match result {
            Ok(()) => format!("called {}", call.display()),
            Err(BrowserError::UnknownBinding(name)) => {
                format!("Uncaught ReferenceError: {name} is not defined")
            }
            Err(err) => format!("Uncaught Error: {err}"),
        };
        self.client.on_console_message(&message, &self.url, 1);
    }

    fn close(&mut self) {
        let _ = self.input.send(PageInput::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("soft browser thread for {} panicked", self.url);
            }
        }
    }
}

impl SoftEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.settings.is_some()
    }

    pub fn browser_count(&self) -> usize {
        self.browsers.len()
    }
}

impl BrowserEngine for SoftEngine {
    fn initialize(&mut self, settings: &AppSettings) -> Result<(), BrowserError> {
        if self.settings.is_some() {
            return Err(BrowserError::AlreadyInitialized);
        }
        if !settings.windowless_rendering_enabled {
            log::warn!("soft engine always renders off-screen");
        }
        if settings.remote_debugging_port != 0 {
            log::warn!(
                "remote debugging on port {} is not available in the soft engine",
                settings.remote_debugging_port
            );
        }

        self.settings = Some(settings.clone());
        log::info!("soft browser engine initialized");
        Ok(())
    }

    fn create_browser_sync(
        &mut self,
        window_info: WindowInfo,
        settings: &BrowserSettings,
        url: &str,
        render_handler: Arc<dyn RenderHandler>,
        client_handler: Arc<dyn ClientHandler>,
    ) -> Result<Box<dyn Browser>, BrowserError> {
        if self.settings.is_none() {
            return Err(BrowserError::NotInitialized);
        }

        let parsed = Url::parse(url).map_err(|source| BrowserError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        if !window_info.offscreen {
            log::warn!("soft engine has no native windows; rendering {parsed} off-screen");
        }

        let (input_tx, input_rx) = mpsc::channel();
        let (calls_tx, calls_rx) = mpsc::channel();
        let bindings: SharedBindings = Arc::new(Mutex::new(None));

        let page = Page::new(settings.background_color, window_info.transparent_painting);
        let thread = spawn_render_thread(
            format!("soft-browser-{}", self.created),
            page,
            settings.windowless_frame_rate,
            render_handler,
            input_rx,
            calls_tx,
        )?;
        self.created += 1;

        log::info!(
            "created soft browser for {parsed} at {} fps",
            settings.windowless_frame_rate
        );

        self.browsers.push(BrowserSlot {
            url: parsed.to_string(),
            input: input_tx.clone(),
            calls: calls_rx,
            bindings: bindings.clone(),
            client: client_handler,
            thread: Some(thread),
        });

        Ok(Box::new(SoftBrowser::new(parsed.to_string(), input_tx, bindings)))
    }

    fn message_loop_work(&mut self) {
        for slot in &self.browsers {
            while let Ok(call) = slot.calls.try_recv() {
                slot.run_js(call);
            }
        }
    }

    fn shutdown(&mut self) {
        if self.settings.is_none() && self.browsers.is_empty() {
            return;
        }
        for slot in &mut self.browsers {
            slot.close();
        }
        self.browsers.clear();
        self.settings = None;
        log::info!("soft browser engine shut down");
    }
}

impl Drop for SoftEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
