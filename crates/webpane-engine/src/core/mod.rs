//! Contracts between the runtime loop and the application.
//!
//! The runtime owns the window, GPU and input plumbing; applications only see
//! the `App` trait and the per-frame `FrameCtx`.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
