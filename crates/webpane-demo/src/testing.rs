//! Recording fakes of the browser boundary.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use webpane_browser::{
    AppSettings, Browser, BrowserEngine, BrowserError, BrowserSettings, ClientHandler,
    EventFlags, JsBindings, MouseButtonType, RenderHandler, WindowInfo,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Move { x: i32, y: i32, leave: bool, flags: EventFlags },
    Click { x: i32, y: i32, button: MouseButtonType, up: bool, count: u32, flags: EventFlags },
    Wheel { x: i32, y: i32, dx: i32, dy: i32, flags: EventFlags },
    Focus(bool),
    Resized,
    Bindings,
}

/// Browser that records every call. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingBrowser {
    pub calls: Rc<RefCell<Vec<Call>>>,
    pub bindings: Rc<RefCell<Option<JsBindings>>>,
}

impl RecordingBrowser {
    pub fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }
}

impl Browser for RecordingBrowser {
    fn send_mouse_move(&self, x: i32, y: i32, mouse_leave: bool, modifiers: EventFlags) {
        self.calls.borrow_mut().push(Call::Move { x, y, leave: mouse_leave, flags: modifiers });
    }

    fn send_mouse_click(
        &self,
        x: i32,
        y: i32,
        button: MouseButtonType,
        mouse_up: bool,
        click_count: u32,
        modifiers: EventFlags,
    ) {
        self.calls.borrow_mut().push(Call::Click {
            x,
            y,
            button,
            up: mouse_up,
            count: click_count,
            flags: modifiers,
        });
    }

    fn send_mouse_wheel(&self, x: i32, y: i32, delta_x: i32, delta_y: i32, modifiers: EventFlags) {
        self.calls.borrow_mut().push(Call::Wheel { x, y, dx: delta_x, dy: delta_y, flags: modifiers });
    }

    fn send_focus(&self, focused: bool) {
        self.calls.borrow_mut().push(Call::Focus(focused));
    }

    fn was_resized(&self) {
        self.calls.borrow_mut().push(Call::Resized);
    }

    fn set_javascript_bindings(&self, bindings: JsBindings) {
        self.calls.borrow_mut().push(Call::Bindings);
        *self.bindings.borrow_mut() = Some(bindings);
    }

    fn url(&self) -> &str {
        "file:///fake.html"
    }
}

#[derive(Debug, Default)]
pub struct EngineLog {
    pub initialized: bool,
    pub created_url: Option<String>,
    pub pumps: usize,
    pub shutdowns: usize,
}

/// Engine handing out one [`RecordingBrowser`].
#[derive(Clone, Default)]
pub struct FakeEngine {
    pub browser: RecordingBrowser,
    pub log: Rc<RefCell<EngineLog>>,
}

impl BrowserEngine for FakeEngine {
    fn initialize(&mut self, _settings: &AppSettings) -> Result<(), BrowserError> {
        self.log.borrow_mut().initialized = true;
        Ok(())
    }

    fn create_browser_sync(
        &mut self,
        _window_info: WindowInfo,
        _settings: &BrowserSettings,
        url: &str,
        _render_handler: Arc<dyn RenderHandler>,
        _client_handler: Arc<dyn ClientHandler>,
    ) -> Result<Box<dyn Browser>, BrowserError> {
        self.log.borrow_mut().created_url = Some(url.to_string());
        Ok(Box::new(self.browser.clone()))
    }

    fn message_loop_work(&mut self) {
        self.log.borrow_mut().pumps += 1;
    }

    fn shutdown(&mut self) {
        self.log.borrow_mut().shutdowns += 1;
    }
}
