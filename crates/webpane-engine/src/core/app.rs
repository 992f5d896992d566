use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

impl AppControl {
    #[inline]
    pub fn is_exit(self) -> bool {
        self == AppControl::Exit
    }
}

/// Application driven by [`crate::window::Runtime`].
pub trait App {
    /// Raw window events, before the runtime's own handling.
    ///
    /// `CloseRequested` ends the loop regardless of the returned value; this
    /// callback still sees it first.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per paced tick.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called exactly once when the loop is about to stop, for any reason.
    fn on_exit(&mut self) {}
}
