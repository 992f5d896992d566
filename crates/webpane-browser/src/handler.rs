use crate::event::{DirtyRect, PaintElementType, ViewRect};

/// Receives pixels from an off-screen browser.
///
/// Called from the engine's render thread.
pub trait RenderHandler: Send + Sync {
    /// Size of the view the browser should lay out and paint.
    fn view_rect(&self) -> ViewRect;

    /// New pixels are available.
    ///
    /// `buffer` holds `width * height` BGRA pixels, row-major, covering the
    /// whole view; `dirty_rects` lists what changed since the last paint.
    fn on_paint(
        &self,
        element_type: PaintElementType,
        dirty_rects: &[DirtyRect],
        buffer: &[u8],
        width: u32,
        height: u32,
    );
}

/// Non-rendering callbacks of a browser.
pub trait ClientHandler: Send + Sync {
    /// A page wrote to its console.
    fn on_console_message(&self, message: &str, source: &str, line: u32);

    fn on_popup_show(&self, show: bool) {
        let _ = show;
    }
}
