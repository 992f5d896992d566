//! CPU drawing surface.
//!
//! Everything the demo composites (browser frames, the animated shape) is
//! rasterized here with `tiny-skia` and only then uploaded to the GPU by
//! `render::SurfacePresenter`.
//!
//! Pixel layout: tightly packed RGBA8, premultiplied alpha, row-major.

mod color;
mod surface;

pub use color::Rgba8;
pub use surface::Surface;
