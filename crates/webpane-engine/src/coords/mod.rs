//! Coordinate and geometry types shared by the runtime, canvas and demo.
//!
//! Canonical CPU space:
//! - Logical pixels, 1:1 with surface pixels
//! - Origin top-left
//! - +X right, +Y down

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
