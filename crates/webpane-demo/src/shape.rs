use webpane_engine::canvas::{Rgba8, Surface};
use webpane_engine::coords::Vec2;

/// Outline width used when the shape is not filled.
pub const OUTLINE_WIDTH: f32 = 2.0;

/// Rotation, scale and fill state of the animated polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeState {
    /// Degrees; grows by `speed` on every draw.
    angle: f64,
    /// Degrees per draw.
    speed: f64,
    scale: f64,
    filled: bool,
}

impl Default for ShapeState {
    fn default() -> Self {
        Self {
            angle: 0.0,
            speed: 0.0,
            scale: 1.0,
            filled: false,
        }
    }
}

/// Shape change requested from the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeCommand {
    SetFilled(bool),
    SetSpeed(f64),
    SetScale(f64),
}

impl ShapeState {
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn filled(&self) -> bool {
        self.filled
    }

    pub fn set_filled(&mut self, filled: bool) {
        self.filled = filled;
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub fn apply(&mut self, command: ShapeCommand) {
        match command {
            ShapeCommand::SetFilled(f) => self.set_filled(f),
            ShapeCommand::SetSpeed(s) => self.set_speed(s),
            ShapeCommand::SetScale(s) => self.set_scale(s),
        }
    }

    /// Advances the rotation by one step and draws the polygon.
    ///
    /// Exactly one `speed` increment per call, independent of frame time.
    pub fn draw(&mut self, surface: &mut Surface, color: Rgba8, center: Vec2, base: &[Vec2]) {
        self.angle += self.speed;

        let points = transform_points(base, self.angle, self.scale, center);
        if self.filled {
            surface.fill_polygon(&points, color);
        } else {
            surface.stroke_polygon(&points, color, OUTLINE_WIDTH);
        }
    }
}

/// Scales each point, rotates it by `angle_deg` around the origin, then moves
/// it to `center`.
pub fn transform_points(base: &[Vec2], angle_deg: f64, scale: f64, center: Vec2) -> Vec<Vec2> {
    let radians = angle_deg.to_radians() as f32;
    let scale = scale as f32;
    base.iter()
        .map(|&p| (p * scale).rotated(radians) + center)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba8 = Rgba8::rgb(255, 0, 0);

    fn close(a: Vec2, b: (f32, f32)) -> bool {
        (a.x - b.0).abs() < 1e-3 && (a.y - b.1).abs() < 1e-3
    }

    fn demo_base() -> Vec<Vec2> {
        vec![Vec2::new(100.0, 100.0), Vec2::new(150.0, 150.0), Vec2::new(100.0, 200.0)]
    }

    #[test]
    fn transform_matches_closed_form() {
        let base = demo_base();
        let center = Vec2::new(100.0, 100.0);

        for &(deg, s) in &[(0.0, 1.0), (30.0, 0.5), (90.0, 2.0), (-135.0, 1.25), (725.0, 0.8)] {
            let out = transform_points(&base, deg, s, center);
            let t = (deg as f32).to_radians();
            let s = s as f32;
            for (p, q) in base.iter().zip(&out) {
                let ex = p.x * s * t.cos() - p.y * s * t.sin() + center.x;
                let ey = p.x * s * t.sin() + p.y * s * t.cos() + center.y;
                assert!(close(*q, (ex, ey)), "{deg}deg x{s}: {q:?} vs ({ex}, {ey})");
            }
        }
    }

    #[test]
    fn quarter_turn() {
        let out = transform_points(&[Vec2::new(10.0, 0.0)], 90.0, 1.0, Vec2::zero());
        assert!(close(out[0], (0.0, 10.0)));
    }

    #[test]
    fn angle_advances_by_speed_per_draw() {
        let mut shape = ShapeState::default();
        shape.set_speed(2.5);
        let mut surface = Surface::new(64, 64).unwrap();

        for _ in 0..10 {
            shape.draw(&mut surface, RED, Vec2::new(32.0, 32.0), &[]);
        }
        assert!((shape.angle() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn default_state() {
        let s = ShapeState::default();
        assert_eq!((s.angle(), s.speed(), s.scale(), s.filled()), (0.0, 0.0, 1.0, false));
    }

    #[test]
    fn fill_flag_controls_later_draws_only() {
        let tri = [Vec2::new(-20.0, -20.0), Vec2::new(20.0, -20.0), Vec2::new(-20.0, 20.0)];
        let center = Vec2::new(32.0, 32.0);
        // (22, 22) lies inside the triangle, away from its edges.
        let mut shape = ShapeState::default();
        let mut surface = Surface::new(64, 64).unwrap();

        surface.fill(Rgba8::WHITE);
        shape.draw(&mut surface, RED, center, &tri);
        assert_eq!(surface.pixel(22, 22), Some(Rgba8::WHITE));
        // Left edge at x = 12.
        assert_eq!(surface.pixel(12, 30), Some(RED));

        let outlined = surface.clone();
        shape.set_filled(true);
        assert_eq!(surface.data(), outlined.data());

        surface.fill(Rgba8::WHITE);
        shape.draw(&mut surface, RED, center, &tri);
        assert_eq!(surface.pixel(22, 22), Some(RED));
    }

    #[test]
    fn commands_map_to_setters() {
        let mut s = ShapeState::default();
        s.apply(ShapeCommand::SetFilled(true));
        s.apply(ShapeCommand::SetSpeed(3.0));
        s.apply(ShapeCommand::SetScale(0.5));
        assert!(s.filled());
        assert_eq!(s.speed(), 3.0);
        assert_eq!(s.scale(), 0.5);
    }

    #[test]
    fn degenerate_polygons_do_not_panic() {
        let mut s = ShapeState::default();
        let mut surface = Surface::new(8, 8).unwrap();
        s.draw(&mut surface, RED, Vec2::zero(), &[]);
        s.draw(&mut surface, RED, Vec2::zero(), &[Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)]);
        s.set_filled(true);
        s.draw(&mut surface, RED, Vec2::zero(), &[Vec2::new(1.0, 1.0)]);
    }
}
