//! Window + runtime loop.
//!
//! Owns the `winit` event loop and the single application window, and wires
//! them to the GPU, input and frame pacing layers.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
