//! Webpane engine crate.
//!
//! This crate owns the platform pieces used by the demo: the winit window and
//! loop, the wgpu presenter for a CPU surface, input tracking and frame pacing.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod canvas;
