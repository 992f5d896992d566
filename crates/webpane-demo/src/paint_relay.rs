use std::sync::{Arc, Mutex, PoisonError};

use webpane_browser::{DirtyRect, PaintElementType, RenderHandler, ViewRect};
use webpane_engine::canvas::{Rgba8, Surface};
use webpane_engine::coords::Rect;

use crate::frame::{FrameMailbox, frame_from_bgra};

/// Browser render handler: turns paint notifications into frames for the
/// compositor.
///
/// The view is always the size of the shared surface.
pub struct PaintRelay {
    surface: Arc<Mutex<Surface>>,
    frames: Arc<FrameMailbox>,
}

impl PaintRelay {
    pub fn new(surface: Arc<Mutex<Surface>>, frames: Arc<FrameMailbox>) -> Self {
        Self { surface, frames }
    }

    fn surface_size(&self) -> (u32, u32) {
        let s = self.surface.lock().unwrap_or_else(PoisonError::into_inner);
        (s.width(), s.height())
    }
}

impl RenderHandler for PaintRelay {
    fn view_rect(&self) -> ViewRect {
        let (w, h) = self.surface_size();
        ViewRect::new(0, 0, w as i32, h as i32)
    }

    fn on_paint(
        &self,
        element_type: PaintElementType,
        dirty_rects: &[DirtyRect],
        buffer: &[u8],
        width: u32,
        height: u32,
    ) {
        if element_type != PaintElementType::View {
            log::debug!("ignoring {element_type:?} paint ({width}x{height})");
            return;
        }
        if dirty_rects.is_empty() {
            return;
        }

        let (w, h) = self.surface_size();
        match frame_from_bgra(w, h, buffer) {
            Ok(frame) => self.frames.publish(frame),
            Err(e) => {
                log::warn!("dropping browser paint: {e}");
                return;
            }
        }

        let mut surface = self.surface.lock().unwrap_or_else(PoisonError::into_inner);
        for r in dirty_rects {
            surface.clear_rect(Rect::new(r.x as f32, r.y as f32, r.width as f32, r.height as f32));
        }
        // Leaves the surface opaque white, dirty regions included.
        surface.fill(Rgba8::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relay(w: u32, h: u32) -> (PaintRelay, Arc<Mutex<Surface>>, Arc<FrameMailbox>) {
        let mut surface = Surface::new(w, h).unwrap();
        surface.fill(Rgba8::rgb(0, 0, 255));
        let surface = Arc::new(Mutex::new(surface));
        let frames = Arc::new(FrameMailbox::new());
        (PaintRelay::new(surface.clone(), frames.clone()), surface, frames)
    }

    fn bgra(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
        px.repeat((w * h) as usize)
    }

    #[test]
    fn view_rect_is_surface_bounds() {
        let (relay, _, _) = relay(800, 600);
        assert_eq!(relay.view_rect(), ViewRect::new(0, 0, 800, 600));
    }

    #[test]
    fn empty_dirty_list_changes_nothing() {
        let (relay, surface, frames) = relay(4, 4);
        relay.on_paint(PaintElementType::View, &[], &bgra(4, 4, [1, 2, 3, 255]), 4, 4);

        assert!(frames.latest().is_none());
        let s = surface.lock().unwrap();
        assert_eq!(s.pixel(0, 0), Some(Rgba8::rgb(0, 0, 255)));
    }

    #[test]
    fn empty_dirty_list_keeps_previous_frame() {
        let (relay, _, frames) = relay(2, 2);
        let dirty = [DirtyRect::new(0, 0, 2, 2)];
        relay.on_paint(PaintElementType::View, &dirty, &bgra(2, 2, [9, 8, 7, 255]), 2, 2);
        let before = frames.latest().unwrap();

        relay.on_paint(PaintElementType::View, &[], &bgra(2, 2, [1, 1, 1, 255]), 2, 2);
        assert!(Arc::ptr_eq(&before, &frames.latest().unwrap()));
    }

    #[test]
    fn paint_replaces_whole_frame() {
        let (relay, _, frames) = relay(3, 2);
        let small_dirty = [DirtyRect::new(0, 0, 1, 1)];

        relay.on_paint(PaintElementType::View, &small_dirty, &bgra(3, 2, [10, 20, 30, 255]), 3, 2);
        relay.on_paint(PaintElementType::View, &small_dirty, &bgra(3, 2, [40, 50, 60, 255]), 3, 2);

        let frame = frames.latest().unwrap();
        // Pixels outside the dirty rect come from the newest buffer too.
        assert_eq!(frame.pixel(2, 1), Some(Rgba8::rgb(60, 50, 40)));
        assert_eq!(frame.pixel(0, 0), Some(Rgba8::rgb(60, 50, 40)));
    }

    #[test]
    fn shared_surface_ends_opaque_white() {
        let (relay, surface, _) = relay(8, 8);
        let dirty = [DirtyRect::new(1, 1, 3, 3), DirtyRect::new(5, 5, 2, 2)];
        relay.on_paint(PaintElementType::View, &dirty, &bgra(8, 8, [0, 0, 0, 255]), 8, 8);

        let s = surface.lock().unwrap();
        assert!(s.data().chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn mismatched_buffer_is_dropped() {
        let (relay, surface, frames) = relay(4, 4);
        let dirty = [DirtyRect::new(0, 0, 4, 4)];
        relay.on_paint(PaintElementType::View, &dirty, &bgra(3, 4, [0, 0, 0, 255]), 3, 4);

        assert!(frames.latest().is_none());
        let s = surface.lock().unwrap();
        assert_eq!(s.pixel(0, 0), Some(Rgba8::rgb(0, 0, 255)));
    }

    #[test]
    fn popup_paints_are_ignored() {
        let (relay, _, frames) = relay(2, 2);
        let dirty = [DirtyRect::new(0, 0, 2, 2)];
        relay.on_paint(PaintElementType::Popup, &dirty, &bgra(2, 2, [0, 0, 0, 255]), 2, 2);
        assert!(frames.latest().is_none());
    }
}
