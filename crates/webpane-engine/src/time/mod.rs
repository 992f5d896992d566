//! Time subsystem.
//!
//! One `FrameClock` drives the application loop: `tick()` once per presented
//! frame, and `next_deadline()` tells the runtime when the next tick is due.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
