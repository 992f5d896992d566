//! GPU device + surface management.
//!
//! Creates the wgpu Instance/Adapter/Device/Queue for a window, configures the
//! swapchain and hands out per-frame encoders. Nothing draws with the GPU
//! directly; `render::SurfacePresenter` is the only client.

mod context;
mod init;
mod surface;

pub use context::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
