use anyhow::{Context, Result};
use tiny_skia::{FillRule, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform};

use crate::coords::{Rect, Vec2};

use super::Rgba8;

/// Owned RGBA8 pixel buffer with the handful of drawing operations the
/// compositor needs.
#[derive(Clone)]
pub struct Surface {
    pixmap: Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Surface {
    /// Allocates a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .with_context(|| format!("invalid surface size {width}x{height}"))?;
        Ok(Self { pixmap })
    }

    /// Wraps premultiplied RGBA8 bytes; `data.len()` must be `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let size = tiny_skia::IntSize::from_wh(width, height)
            .with_context(|| format!("invalid surface size {width}x{height}"))?;
        let len = data.len();
        let pixmap = Pixmap::from_vec(data, size).with_context(|| {
            format!("{len} bytes do not describe a {width}x{height} RGBA surface")
        })?;
        Ok(Self { pixmap })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Full surface bounds in pixels.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width() as f32, self.height() as f32)
    }

    /// Raw premultiplied RGBA8 bytes, row-major, no padding.
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Premultiplied color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        let p = self.pixmap.pixel(x, y)?;
        Some(Rgba8::new(p.red(), p.green(), p.blue(), p.alpha()))
    }

    /// Overwrites every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8) {
        self.pixmap.fill(color.to_skia());
    }

    /// Overwrites the pixels inside `rect` (clipped to the surface) with full
    /// transparency. Empty or non-finite rects are ignored.
    pub fn clear_rect(&mut self, rect: Rect) {
        let r = rect.normalized();
        let Some(r) = tiny_skia::Rect::from_xywh(r.origin.x, r.origin.y, r.size.x, r.size.y) else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(Rgba8::TRANSPARENT.to_skia());
        paint.blend_mode = tiny_skia::BlendMode::Source;
        paint.anti_alias = false;

        self.pixmap.fill_rect(r, &paint, Transform::identity(), None);
    }

    /// Composites `src` over this surface with its top-left corner at `(x, y)`.
    /// No scaling; parts outside the destination are clipped.
    pub fn blit(&mut self, src: &Surface, x: i32, y: i32) {
        self.pixmap.draw_pixmap(
            x,
            y,
            src.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Fills the closed polygon through `points`.
    ///
    /// Fewer than three points produce nothing visible.
    pub fn fill_polygon(&mut self, points: &[Vec2], color: Rgba8) {
        let Some(path) = polygon_path(points) else { return };
        let paint = solid_paint(color);
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    /// Strokes the closed outline through `points` with a `width`-pixel pen.
    pub fn stroke_polygon(&mut self, points: &[Vec2], color: Rgba8, width: f32) {
        let Some(path) = polygon_path(points) else { return };
        let paint = solid_paint(color);
        let stroke = Stroke {
            width,
            line_join: LineJoin::Miter,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

fn solid_paint(color: Rgba8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    // Hard edges, so tests can probe exact pixel values.
    paint.anti_alias = false;
    paint
}

fn polygon_path(points: &[Vec2]) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    if !points.iter().all(|p| p.is_finite()) {
        return None;
    }

    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba8 = Rgba8::rgb(255, 0, 0);

    fn triangle() -> [Vec2; 3] {
        [Vec2::new(10.0, 10.0), Vec2::new(50.0, 10.0), Vec2::new(10.0, 50.0)]
    }

    #[test]
    fn new_rejects_zero_size() {
        assert!(Surface::new(0, 10).is_err());
    }

    #[test]
    fn from_rgba_rejects_wrong_length() {
        assert!(Surface::from_rgba(2, 2, vec![0; 15]).is_err());
        assert!(Surface::from_rgba(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn fill_sets_every_pixel() {
        let mut s = Surface::new(4, 3).unwrap();
        s.fill(Rgba8::WHITE);
        assert!(s.data().chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn clear_rect_only_touches_region() {
        let mut s = Surface::new(8, 8).unwrap();
        s.fill(Rgba8::WHITE);
        s.clear_rect(Rect::new(2.0, 2.0, 3.0, 3.0));

        assert_eq!(s.pixel(3, 3), Some(Rgba8::TRANSPARENT));
        assert_eq!(s.pixel(1, 1), Some(Rgba8::WHITE));
        assert_eq!(s.pixel(5, 5), Some(Rgba8::WHITE));
    }

    #[test]
    fn clear_rect_is_clipped_to_bounds() {
        let mut s = Surface::new(4, 4).unwrap();
        s.fill(Rgba8::WHITE);
        s.clear_rect(Rect::new(-10.0, -10.0, 100.0, 100.0));
        assert!(s.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn blit_places_source_at_offset() {
        let mut dst = Surface::new(6, 6).unwrap();
        dst.fill(Rgba8::WHITE);
        let mut src = Surface::new(2, 2).unwrap();
        src.fill(RED);

        dst.blit(&src, 3, 3);

        assert_eq!(dst.pixel(3, 3), Some(RED));
        assert_eq!(dst.pixel(4, 4), Some(RED));
        assert_eq!(dst.pixel(2, 2), Some(Rgba8::WHITE));
    }

    #[test]
    fn blit_transparent_source_keeps_destination() {
        let mut dst = Surface::new(2, 2).unwrap();
        dst.fill(Rgba8::WHITE);
        let src = Surface::new(2, 2).unwrap();
        dst.blit(&src, 0, 0);
        assert_eq!(dst.pixel(0, 0), Some(Rgba8::WHITE));
    }

    #[test]
    fn fill_polygon_covers_interior() {
        let mut s = Surface::new(64, 64).unwrap();
        s.fill(Rgba8::WHITE);
        s.fill_polygon(&triangle(), RED);
        assert_eq!(s.pixel(20, 20), Some(RED));
        assert_eq!(s.pixel(60, 60), Some(Rgba8::WHITE));
    }

    #[test]
    fn stroke_polygon_leaves_interior() {
        let mut s = Surface::new(64, 64).unwrap();
        s.fill(Rgba8::WHITE);
        s.stroke_polygon(&triangle(), RED, 2.0);
        assert_eq!(s.pixel(20, 20), Some(Rgba8::WHITE));
        // Left edge runs along x = 10.
        assert_eq!(s.pixel(10, 30), Some(RED));
    }

    #[test]
    fn degenerate_polygons_draw_nothing() {
        let mut s = Surface::new(16, 16).unwrap();
        s.fill(Rgba8::WHITE);
        s.fill_polygon(&[], RED);
        s.fill_polygon(&[Vec2::new(1.0, 1.0)], RED);
        s.stroke_polygon(&[Vec2::new(f32::NAN, 1.0), Vec2::new(3.0, 3.0)], RED, 2.0);
        assert!(s.data().chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
    }
}
