//! GPU presentation.
//!
//! The demo composites on the CPU; this module only moves the finished
//! [`Surface`](crate::canvas::Surface) into the swapchain.

mod ctx;
mod present;

pub use ctx::{RenderCtx, RenderTarget};
pub use present::SurfacePresenter;
