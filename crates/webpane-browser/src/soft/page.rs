use serde_json::{Value, json};
use tiny_skia::{Color, Paint, Pixmap, Rect, Stroke, Transform, PathBuilder};

use crate::event::MouseButtonType;

const BUTTON_W: f32 = 140.0;
const BUTTON_H: f32 = 40.0;
const BUTTON_GAP: f32 = 20.0;
const BUTTON_MARGIN: f32 = 20.0;

const STRIPE_H: i32 = 40;
const MAX_SCROLL: i32 = 2000;

const MAX_SPEED: f64 = 5.0;
const SCALE_STEP: f64 = 0.25;
const MIN_SCALE: f64 = 0.5;
const MAX_SCALE: f64 = 2.0;

/// Clickable controls of the page, left to right along the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Control {
    ToggleColor,
    Rotation,
    Scale,
}

impl Control {
    const ALL: [Control; 3] = [Control::ToggleColor, Control::Rotation, Control::Scale];

    fn rect(self, view_height: u32) -> Option<Rect> {
        let index = match self {
            Control::ToggleColor => 0.0,
            Control::Rotation => 1.0,
            Control::Scale => 2.0,
        };
        let x = BUTTON_MARGIN + index * (BUTTON_W + BUTTON_GAP);
        let y = (view_height as f32 - BUTTON_MARGIN - BUTTON_H).max(0.0);
        Rect::from_xywh(x, y, BUTTON_W, BUTTON_H)
    }
}

/// A host function call issued by the page.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct JsCall {
    pub function: &'static str,
    pub args: Vec<Value>,
}

impl JsCall {
    /// JavaScript source form, as shown in console messages.
    pub fn display(&self) -> String {
        let args: Vec<String> = self.args.iter().map(Value::to_string).collect();
        format!("{}({})", self.function, args.join(", "))
    }
}

/// State of the built-in control page.
#[derive(Debug, Clone)]
pub(crate) struct Page {
    width: u32,
    height: u32,
    background: u32,
    transparent: bool,

    pointer: Option<(i32, i32)>,
    pressed: Option<Control>,
    focused: bool,
    scroll_y: i32,

    filled: bool,
    speed: f64,
    scale: f64,
}

impl Page {
    pub fn new(background: u32, transparent: bool) -> Self {
        Self {
            width: 0,
            height: 0,
            background,
            transparent,
            pointer: None,
            pressed: None,
            focused: false,
            scroll_y: 0,
            filled: false,
            speed: 0.0,
            scale: 1.0,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn mouse_move(&mut self, x: i32, y: i32, leave: bool) {
        self.pointer = if leave { None } else { Some((x, y)) };
    }

    pub fn wheel(&mut self, delta_y: i32) {
        self.scroll_y = self.scroll_y.saturating_add(delta_y).clamp(0, MAX_SCROLL);
    }

    /// Left presses arm a control; the release over the same control
    /// activates it.
    pub fn mouse_click(&mut self, x: i32, y: i32, button: MouseButtonType, up: bool) -> Option<JsCall> {
        if button != MouseButtonType::Left {
            return None;
        }

        let hit = self.hit_test(x, y);
        if !up {
            self.pressed = hit;
            return None;
        }

        let armed = self.pressed.take();
        match (armed, hit) {
            (Some(a), Some(h)) if a == h => Some(self.activate(h)),
            _ => None,
        }
    }

    pub fn hit_test(&self, x: i32, y: i32) -> Option<Control> {
        let (px, py) = (x as f32, y as f32);
        Control::ALL.into_iter().find(|c| {
            c.rect(self.height).is_some_and(|r| {
                px >= r.left() && px < r.right() && py >= r.top() && py < r.bottom()
            })
        })
    }

    fn activate(&mut self, control: Control) -> JsCall {
        match control {
            Control::ToggleColor => {
                self.filled = !self.filled;
                JsCall { function: "toggle_color", args: vec![json!(self.filled)] }
            }
            Control::Rotation => {
                self.speed = if self.speed >= MAX_SPEED { 0.0 } else { self.speed + 1.0 };
                JsCall { function: "update_rotation", args: vec![json!(self.speed)] }
            }
            Control::Scale => {
                let next = self.scale + SCALE_STEP;
                self.scale = if next > MAX_SCALE { MIN_SCALE } else { next };
                JsCall { function: "update_scale", args: vec![json!(self.scale)] }
            }
        }
    }

    /// Paints the page and returns `width * height` BGRA pixels, or `None`
    /// while the view is empty.
    pub fn render_bgra(&self) -> Option<Vec<u8>> {
        let mut pixmap = Pixmap::new(self.width, self.height)?;

        pixmap.fill(self.background_color());
        self.paint_stripes(&mut pixmap);
        self.paint_controls(&mut pixmap);
        self.paint_crosshair(&mut pixmap);
        if self.focused {
            self.paint_focus_ring(&mut pixmap);
        }

        let mut out = pixmap.take();
        for px in out.chunks_exact_mut(4) {
            px.swap(0, 2);
        }
        Some(out)
    }

    fn background_color(&self) -> Color {
        let [a, r, g, b] = self.background.to_be_bytes();
        let a = if self.transparent { a } else { 255 };
        Color::from_rgba8(r, g, b, a)
    }

    fn paint_stripes(&self, pixmap: &mut Pixmap) {
        let color = Color::from_rgba8(0, 0, 0, 16);
        // Bands cover [40, 80), [120, 160), ... of the unscrolled page.
        let offset = self.scroll_y.rem_euclid(STRIPE_H * 2);
        let mut y = STRIPE_H - offset;
        while y < self.height as i32 {
            fill_rect(pixmap, 0.0, y as f32, self.width as f32, STRIPE_H as f32, color);
            y += STRIPE_H * 2;
        }
    }

    fn paint_controls(&self, pixmap: &mut Pixmap) {
        for control in Control::ALL {
            let Some(r) = control.rect(self.height) else { continue };
            let hovered = self
                .pointer
                .is_some_and(|(x, y)| self.hit_test(x, y) == Some(control));

            let (base, level) = match control {
                Control::ToggleColor => {
                    let level = if self.filled { 1.0 } else { 0.0 };
                    (Color::from_rgba8(200, 40, 40, 255), level)
                }
                Control::Rotation => {
                    (Color::from_rgba8(40, 90, 200, 255), (self.speed / MAX_SPEED) as f32)
                }
                Control::Scale => (
                    Color::from_rgba8(40, 160, 70, 255),
                    ((self.scale - MIN_SCALE) / (MAX_SCALE - MIN_SCALE)) as f32,
                ),
            };

            let face = if hovered {
                Color::from_rgba8(235, 235, 235, 255)
            } else {
                Color::from_rgba8(250, 250, 250, 255)
            };
            fill_rect(pixmap, r.left(), r.top(), r.width(), r.height(), face);

            // Level bar along the bottom of the button.
            let bar_w = (r.width() - 8.0) * level.clamp(0.0, 1.0);
            fill_rect(pixmap, r.left() + 4.0, r.bottom() - 10.0, bar_w, 6.0, base);

            stroke_rect(pixmap, r, base, 2.0);
        }
    }

    fn paint_crosshair(&self, pixmap: &mut Pixmap) {
        let Some((x, y)) = self.pointer else { return };
        let color = Color::from_rgba8(120, 120, 120, 255);
        fill_rect(pixmap, x as f32, 0.0, 1.0, self.height as f32, color);
        fill_rect(pixmap, 0.0, y as f32, self.width as f32, 1.0, color);
    }

    fn paint_focus_ring(&self, pixmap: &mut Pixmap) {
        let Some(r) = Rect::from_xywh(1.0, 1.0, self.width as f32 - 2.0, self.height as f32 - 2.0) else {
            return;
        };
        stroke_rect(pixmap, r, Color::from_rgba8(60, 130, 230, 255), 2.0);
    }
}

fn fill_rect(pixmap: &mut Pixmap, x: f32, y: f32, w: f32, h: f32, color: Color) {
    let Some(rect) = Rect::from_xywh(x, y, w, h) else { return };
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = false;
    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
}

fn stroke_rect(pixmap: &mut Pixmap, rect: Rect, color: Color, width: f32) {
    let path = PathBuilder::from_rect(rect);
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = false;
    let stroke = Stroke { width, ..Stroke::default() };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        let mut p = Page::new(0xFFFF_FFFF, false);
        p.resize(800, 600);
        p
    }

    fn center(c: Control, p: &Page) -> (i32, i32) {
        let r = c.rect(p.height).unwrap();
        ((r.left() + r.width() / 2.0) as i32, (r.top() + r.height() / 2.0) as i32)
    }

    fn click(p: &mut Page, (x, y): (i32, i32)) -> Option<JsCall> {
        p.mouse_click(x, y, MouseButtonType::Left, false);
        p.mouse_click(x, y, MouseButtonType::Left, true)
    }

    #[test]
    fn render_produces_full_bgra_view() {
        let p = page();
        let px = p.render_bgra().unwrap();
        assert_eq!(px.len(), 800 * 600 * 4);
        // Top-left is plain opaque background.
        assert_eq!(&px[..4], &[255, 255, 255, 255]);
    }

    #[test]
    fn empty_view_renders_nothing() {
        let p = Page::new(0xFFFF_FFFF, false);
        assert!(p.render_bgra().is_none());
    }

    #[test]
    fn background_is_written_as_bgra() {
        let mut p = Page::new(0xFF10_2030, false);
        p.resize(1, 1);
        assert_eq!(p.render_bgra().unwrap(), vec![0x30, 0x20, 0x10, 0xFF]);
    }

    #[test]
    fn opaque_pages_ignore_background_alpha() {
        let mut p = Page::new(0x0000_00FF, false);
        p.resize(1, 1);
        assert_eq!(p.render_bgra().unwrap()[3], 255);
    }

    #[test]
    fn toggle_control_flips_fill() {
        let mut p = page();
        let at = center(Control::ToggleColor, &p);

        let call = click(&mut p, at).unwrap();
        assert_eq!(call, JsCall { function: "toggle_color", args: vec![json!(true)] });

        let call = click(&mut p, at).unwrap();
        assert_eq!(call.args, vec![json!(false)]);
    }

    #[test]
    fn rotation_control_cycles_speed() {
        let mut p = page();
        let at = center(Control::Rotation, &p);
        let speeds: Vec<Value> = (0..7).map(|_| click(&mut p, at).unwrap().args[0].clone()).collect();
        assert_eq!(
            speeds,
            vec![json!(1.0), json!(2.0), json!(3.0), json!(4.0), json!(5.0), json!(0.0), json!(1.0)]
        );
    }

    #[test]
    fn scale_control_wraps_to_minimum() {
        let mut p = page();
        let at = center(Control::Scale, &p);
        let mut last = 0.0;
        for _ in 0..5 {
            last = click(&mut p, at).unwrap().args[0].as_f64().unwrap();
        }
        // 1.25, 1.5, 1.75, 2.0, then back to 0.5
        assert_eq!(last, 0.5);
    }

    #[test]
    fn release_elsewhere_does_not_activate() {
        let mut p = page();
        let (x, y) = center(Control::ToggleColor, &p);
        let (x2, y2) = center(Control::Scale, &p);
        p.mouse_click(x, y, MouseButtonType::Left, false);
        assert_eq!(p.mouse_click(x2, y2, MouseButtonType::Left, true), None);
    }

    #[test]
    fn right_clicks_are_ignored() {
        let mut p = page();
        let (x, y) = center(Control::ToggleColor, &p);
        p.mouse_click(x, y, MouseButtonType::Right, false);
        assert_eq!(p.mouse_click(x, y, MouseButtonType::Right, true), None);
    }

    #[test]
    fn scroll_is_clamped() {
        let mut p = page();
        p.wheel(-120);
        assert_eq!(p.scroll_y, 0);
        p.wheel(120);
        assert_eq!(p.scroll_y, 120);
        p.wheel(i32::MAX);
        assert_eq!(p.scroll_y, MAX_SCROLL);
    }

    #[test]
    fn focus_ring_changes_edge_pixels() {
        let mut p = page();
        let before = p.render_bgra().unwrap();
        p.focus(true);
        let after = p.render_bgra().unwrap();
        let idx = (1 * 800 + 400) * 4;
        assert_ne!(&before[idx..idx + 4], &after[idx..idx + 4]);
    }

    #[test]
    fn js_call_display() {
        let call = JsCall { function: "update_scale", args: vec![json!(1.5)] };
        assert_eq!(call.display(), "update_scale(1.5)");
    }
}
