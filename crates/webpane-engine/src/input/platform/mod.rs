//! Toolkit-specific event translation.

mod winit;

pub(crate) use self::winit::{WheelAccumulator, translate_window_event};
