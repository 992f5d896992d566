use webpane_engine::canvas::{Rgba8, Surface};
use webpane_engine::coords::Vec2;

use crate::frame::FrameMailbox;
use crate::shape::ShapeState;

/// Per-tick composition: white background, latest browser frame, shape.
#[derive(Debug, Clone)]
pub struct Compositor {
    pub color: Rgba8,
    pub center: Vec2,
    pub base: Vec<Vec2>,
}

impl Default for Compositor {
    fn default() -> Self {
        Self {
            color: Rgba8::rgb(255, 0, 0),
            center: Vec2::new(100.0, 100.0),
            base: vec![Vec2::new(100.0, 100.0), Vec2::new(150.0, 150.0), Vec2::new(100.0, 200.0)],
        }
    }
}

impl Compositor {
    pub fn composite(&self, target: &mut Surface, frames: &FrameMailbox, shape: &mut ShapeState) {
        target.fill(Rgba8::WHITE);

        if let Some(frame) = frames.latest() {
            target.blit(&frame, 0, 0);
        }

        shape.draw(target, self.color, self.center, &self.base);
    }
}
