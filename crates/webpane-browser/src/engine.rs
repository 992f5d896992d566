use std::sync::Arc;

use crate::bindings::JsBindings;
use crate::errors::BrowserError;
use crate::event::{EventFlags, MouseButtonType};
use crate::handler::{ClientHandler, RenderHandler};
use crate::settings::{AppSettings, BrowserSettings, WindowInfo};

/// Process-wide browser engine.
///
/// `message_loop_work` must be called regularly from the thread that created
/// the engine; it is where queued page work (such as JavaScript calls into
/// host bindings) runs.
pub trait BrowserEngine {
    fn initialize(&mut self, settings: &AppSettings) -> Result<(), BrowserError>;

    /// Creates a browser and returns once it is ready to receive events.
    fn create_browser_sync(
        &mut self,
        window_info: WindowInfo,
        settings: &BrowserSettings,
        url: &str,
        render_handler: Arc<dyn RenderHandler>,
        client_handler: Arc<dyn ClientHandler>,
    ) -> Result<Box<dyn Browser>, BrowserError>;

    /// Performs one non-blocking slice of engine work.
    fn message_loop_work(&mut self);

    /// Closes every browser. Safe to call more than once.
    fn shutdown(&mut self);
}

/// Handle to one browser. Event methods never block on page work.
pub trait Browser {
    fn send_mouse_move(&self, x: i32, y: i32, mouse_leave: bool, modifiers: EventFlags);

    fn send_mouse_click(
        &self,
        x: i32,
        y: i32,
        button: MouseButtonType,
        mouse_up: bool,
        click_count: u32,
        modifiers: EventFlags,
    );

    fn send_mouse_wheel(&self, x: i32, y: i32, delta_x: i32, delta_y: i32, modifiers: EventFlags);

    fn send_focus(&self, focused: bool);

    /// The view rect may have changed; the browser re-queries it.
    fn was_resized(&self);

    /// Replaces the host bindings visible to the page.
    fn set_javascript_bindings(&self, bindings: JsBindings);

    fn url(&self) -> &str;
}
