//! Off-screen browser boundary.
//!
//! The demo talks to a browser engine only through the traits in this crate:
//! [`BrowserEngine`] creates [`Browser`]s, which paint through a
//! [`RenderHandler`] and report console output through a [`ClientHandler`].
//! Host functions are exposed to pages with [`JsBindings`].
//!
//! [`soft`] contains a software engine that renders a small control page on a
//! background thread, which is enough to drive the demo without a native
//! engine installed.

mod bindings;
mod engine;
mod errors;
mod event;
mod handler;
mod settings;

pub mod soft;

pub use bindings::{JsBindings, JsFunction};
pub use engine::{Browser, BrowserEngine};
pub use errors::BrowserError;
pub use event::{DirtyRect, EventFlags, MouseButtonType, PaintElementType, ViewRect};
pub use handler::{ClientHandler, RenderHandler};
pub use settings::{AppSettings, BrowserSettings, WindowInfo};
