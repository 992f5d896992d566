use std::sync::{Arc, Mutex, PoisonError};

use webpane_engine::canvas::Surface;

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("Expected {expected} bytes for a {width}x{height} frame, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Cannot build a {width}x{height} frame: {reason}")]
    InvalidSize { width: u32, height: u32, reason: String },
}

/// Converts BGRA pixels to RGBA in a new buffer. Alpha is untouched.
pub fn bgra_to_rgba(bgra: &[u8]) -> Vec<u8> {
    let mut out = bgra.to_vec();
    for px in out.chunks_exact_mut(4) {
        px.swap(0, 2);
    }
    out
}

/// Builds an immutable frame from a full-view BGRA buffer.
pub fn frame_from_bgra(width: u32, height: u32, bgra: &[u8]) -> Result<Surface, FrameError> {
    let expected = width as usize * height as usize * 4;
    if bgra.len() != expected {
        return Err(FrameError::SizeMismatch {
            width,
            height,
            expected,
            actual: bgra.len(),
        });
    }

    Surface::from_rgba(width, height, bgra_to_rgba(bgra)).map_err(|e| FrameError::InvalidSize {
        width,
        height,
        reason: format!("{e:#}"),
    })
}

/// Single-slot handoff of the latest browser frame.
///
/// The paint relay publishes from the engine's render thread; the compositor
/// reads on the loop thread. Publishing replaces whatever was there.
#[derive(Debug, Default)]
pub struct FrameMailbox {
    slot: Mutex<Option<Arc<Surface>>>,
}

impl FrameMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, frame: Surface) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::new(frame));
    }

    /// Most recent frame, or `None` before the first paint.
    pub fn latest(&self) -> Option<Arc<Surface>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
