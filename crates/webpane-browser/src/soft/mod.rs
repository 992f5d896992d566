//! Software browser engine.
//!
//! Each browser owns a render thread that paints a fixed control page with
//! `tiny-skia` and hands BGRA frames to the [`crate::RenderHandler`]. Button
//! clicks on that page become host binding calls, run on the thread that
//! pumps [`crate::BrowserEngine::message_loop_work`].

mod browser;
mod engine;
mod page;

pub use browser::SoftBrowser;
pub use engine::SoftEngine;
