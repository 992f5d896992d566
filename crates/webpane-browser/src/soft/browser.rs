use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::bindings::JsBindings;
use crate::engine::Browser;
use crate::event::{EventFlags, MouseButtonType, PaintElementType, ViewRect};
use crate::handler::RenderHandler;

use super::page::{JsCall, Page};

/// Messages from a [`SoftBrowser`] handle to its render thread.
#[derive(Debug)]
pub(crate) enum PageInput {
    MouseMove { x: i32, y: i32, leave: bool },
    MouseClick { x: i32, y: i32, button: MouseButtonType, up: bool },
    Wheel { delta_y: i32 },
    Focus(bool),
    Resized,
    Shutdown,
}

pub(crate) type SharedBindings = Arc<Mutex<Option<JsBindings>>>;

/// Handle to a browser created by [`super::SoftEngine`].
pub struct SoftBrowser {
    url: String,
    input: Sender<PageInput>,
    bindings: SharedBindings,
}

impl SoftBrowser {
    pub(crate) fn new(url: String, input: Sender<PageInput>, bindings: SharedBindings) -> Self {
        Self { url, input, bindings }
    }

    fn post(&self, msg: PageInput) {
        if self.input.send(msg).is_err() {
            log::debug!("soft browser for {} is closed; dropping input", self.url);
        }
    }
}

impl Browser for SoftBrowser {
    fn send_mouse_move(&self, x: i32, y: i32, mouse_leave: bool, _modifiers: EventFlags) {
        self.post(PageInput::MouseMove { x, y, leave: mouse_leave });
    }

    fn send_mouse_click(
        &self,
        x: i32,
        y: i32,
        button: MouseButtonType,
        mouse_up: bool,
        _click_count: u32,
        _modifiers: EventFlags,
    ) {
        self.post(PageInput::MouseClick { x, y, button, up: mouse_up });
    }

    fn send_mouse_wheel(&self, _x: i32, _y: i32, _delta_x: i32, delta_y: i32, _modifiers: EventFlags) {
        self.post(PageInput::Wheel { delta_y });
    }

    fn send_focus(&self, focused: bool) {
        self.post(PageInput::Focus(focused));
    }

    fn was_resized(&self) {
        self.post(PageInput::Resized);
    }

    fn set_javascript_bindings(&self, bindings: JsBindings) {
        let mut slot = self.bindings.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(bindings);
    }

    fn url(&self) -> &str {
        &self.url
    }
}

/// Starts the render thread for one browser.
pub(crate) fn spawn_render_thread(
    name: String,
    page: Page,
    frame_rate: u32,
    render: Arc<dyn RenderHandler>,
    input: Receiver<PageInput>,
    calls: Sender<JsCall>,
) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name(name)
        .spawn(move || {
            let view = ViewRect::default();
            RenderLoop { page, render, calls, view }.run(input, frame_rate)
        })
}

struct RenderLoop {
    page: Page,
    render: Arc<dyn RenderHandler>,
    calls: Sender<JsCall>,
    view: ViewRect,
}

impl RenderLoop {
    fn run(mut self, input: Receiver<PageInput>, frame_rate: u32) {
        let interval = Duration::from_secs_f64(1.0 / frame_rate.max(1) as f64);
        let mut next_frame = Instant::now();
        let mut dirty = true;

        self.sync_view_rect();

        loop {
            let now = Instant::now();
            if now >= next_frame {
                if dirty {
                    self.paint();
                    dirty = false;
                }
                next_frame = now + interval;
            }

            let wait = next_frame.saturating_duration_since(Instant::now());
            match input.recv_timeout(wait) {
                Ok(PageInput::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Ok(msg) => {
                    self.apply(msg);
                    dirty = true;
                }
                Err(RecvTimeoutError::Timeout) => {}
            }
        }

        log::debug!("soft browser render thread stopped");
    }

    fn apply(&mut self, msg: PageInput) {
        match msg {
            PageInput::MouseMove { x, y, leave } => self.page.mouse_move(x, y, leave),
            PageInput::MouseClick { x, y, button, up } => {
                if let Some(call) = self.page.mouse_click(x, y, button, up) {
                    // The engine side is gone during shutdown.
                    let _ = self.calls.send(call);
                }
            }
            PageInput::Wheel { delta_y } => self.page.wheel(delta_y),
            PageInput::Focus(focused) => self.page.focus(focused),
            PageInput::Resized => self.sync_view_rect(),
            PageInput::Shutdown => {}
        }
    }

    fn sync_view_rect(&mut self) {
        let rect = self.render.view_rect();
        self.view = rect;
        let (w, h) = (rect.width.max(0) as u32, rect.height.max(0) as u32);
        if self.page.size() != (w, h) {
            log::debug!("soft browser view is now {w}x{h}");
        }
        self.page.resize(w, h);
    }

    fn paint(&self) {
        let Some(buffer) = self.page.render_bgra() else { return };
        let (w, h) = self.page.size();
        let dirty = [self.view.full_dirty()];
        self.render
            .on_paint(PaintElementType::View, &dirty, &buffer, w, h);
    }
}
