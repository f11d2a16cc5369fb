//! Stroke sinks: the [`Canvas`] trait, a stroke recorder, and an RGB raster.

use crate::error::LSystemResult;
use crate::gradient::Rgb;
use glam::DVec2;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A sink for line strokes.
///
/// The interpreter issues `draw_line` calls strictly in command order and
/// performs no clipping; out-of-bounds handling is up to the implementation.
pub trait Canvas {
    fn draw_line(&mut self, from: DVec2, to: DVec2, color: Rgb, width: u32);
}

/// A single stroke as issued by the interpreter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub from: DVec2,
    pub to: DVec2,
    pub color: Rgb,
    pub width: u32,
}

/// Records strokes instead of rasterizing them.
impl Canvas for Vec<LineSegment> {
    fn draw_line(&mut self, from: DVec2, to: DVec2, color: Rgb, width: u32) {
        self.push(LineSegment {
            from,
            to,
            color,
            width,
        });
    }
}

/// An RGB raster image that strokes lines with round pens.
#[derive(Clone, Debug)]
pub struct RasterCanvas {
    image: RgbImage,
}

impl RasterCanvas {
    /// Allocates a `width` x `height` buffer filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background.to_pixel()),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Color at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Rgb::new(p[0], p[1], p[2]))
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Writes the buffer to `path`; the format follows the file extension.
    pub fn save(&self, path: &Path) -> LSystemResult<()> {
        self.image.save(path)?;
        Ok(())
    }

    /// Fills every pixel whose center lies within `radius` of `center`.
    fn stamp(&mut self, center: DVec2, radius: f64, color: image::Rgb<u8>) {
        let (w, h) = (self.image.width() as i64, self.image.height() as i64);
        if radius <= 0.5 {
            let (px, py) = (center.x.floor() as i64, center.y.floor() as i64);
            if px >= 0 && px < w && py >= 0 && py < h {
                self.image.put_pixel(px as u32, py as u32, color);
            }
            return;
        }

        let x0 = ((center.x - radius).floor() as i64).max(0);
        let x1 = ((center.x + radius).ceil() as i64).min(w - 1);
        let y0 = ((center.y - radius).floor() as i64).max(0);
        let y1 = ((center.y + radius).ceil() as i64).min(h - 1);
        let r2 = radius * radius;
        for py in y0..=y1 {
            for px in x0..=x1 {
                let d = DVec2::new(px as f64 + 0.5, py as f64 + 0.5) - center;
                if d.length_squared() <= r2 {
                    self.image.put_pixel(px as u32, py as u32, color);
                }
            }
        }
    }
}

impl Canvas for RasterCanvas {
    fn draw_line(&mut self, from: DVec2, to: DVec2, color: Rgb, width: u32) {
        if !from.is_finite() || !to.is_finite() {
            log::warn!("skipping non-finite stroke {from} -> {to}");
            return;
        }
        let pixel = color.to_pixel();
        let radius = width.max(1) as f64 / 2.0;

        // Only the part of the stroke that can reach a pixel is stepped.
        let bounds_min = DVec2::splat(-radius);
        let bounds_max = DVec2::new(self.width() as f64, self.height() as f64) + radius;
        let Some((from, to)) = clip_segment(from, to, bounds_min, bounds_max) else {
            return;
        };

        // Half-pixel steps so consecutive stamps always touch.
        let steps = ((to - from).length() * 2.0).ceil().max(1.0) as usize;
        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            self.stamp(from.lerp(to, t), radius, pixel);
        }
    }
}

/// Clips the segment `from -> to` to the rectangle `[min, max]` (Liang-Barsky).
///
/// Returns `None` when no part of the segment lies inside.
fn clip_segment(from: DVec2, to: DVec2, min: DVec2, max: DVec2) -> Option<(DVec2, DVec2)> {
    let d = to - from;
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    let edges = [
        (-d.x, from.x - min.x),
        (d.x, max.x - from.x),
        (-d.y, from.y - min.y),
        (d.y, max.y - from.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((from + d * t0, from + d * t1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_canvas_keeps_order() {
        let mut strokes: Vec<LineSegment> = Vec::new();
        strokes.draw_line(DVec2::ZERO, DVec2::X, Rgb::WHITE, 1);
        strokes.draw_line(DVec2::X, DVec2::ONE, Rgb::BLACK, 3);
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[1].from, DVec2::X);
        assert_eq!(strokes[1].width, 3);
    }

    #[test]
    fn horizontal_line_covers_its_pixels() {
        let red = Rgb::new(255, 0, 0);
        let mut canvas = RasterCanvas::new(10, 10, Rgb::BLACK);
        canvas.draw_line(DVec2::new(1.0, 5.0), DVec2::new(8.0, 5.0), red, 1);
        for x in 1..=8 {
            assert_eq!(canvas.pixel(x, 5), Some(red));
        }
        assert_eq!(canvas.pixel(0, 5), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(9, 5), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(4, 4), Some(Rgb::BLACK));
    }

    #[test]
    fn wide_pen_paints_neighbouring_rows() {
        let mut canvas = RasterCanvas::new(20, 20, Rgb::BLACK);
        canvas.draw_line(DVec2::new(5.0, 10.0), DVec2::new(15.0, 10.0), Rgb::WHITE, 5);
        assert_eq!(canvas.pixel(10, 8), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(10, 11), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(10, 2), Some(Rgb::BLACK));
    }

    #[test]
    fn out_of_bounds_strokes_are_ignored() {
        let mut canvas = RasterCanvas::new(4, 4, Rgb::BLACK);
        canvas.draw_line(DVec2::new(-10.0, -10.0), DVec2::new(2.0, 2.0), Rgb::WHITE, 3);
        canvas.draw_line(DVec2::new(100.0, 0.0), DVec2::new(200.0, 0.0), Rgb::WHITE, 1);
        assert_eq!(canvas.pixel(2, 2), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(4, 4), None);
    }

    #[test]
    fn very_long_stroke_only_steps_the_visible_part() {
        let mut canvas = RasterCanvas::new(4, 4, Rgb::BLACK);
        let started = std::time::Instant::now();
        canvas.draw_line(DVec2::new(-1e9, 2.0), DVec2::new(1e9, 2.0), Rgb::WHITE, 1);
        canvas.draw_line(DVec2::new(1e9, 1e9), DVec2::new(2e9, 2e9), Rgb::WHITE, 1);
        assert!(started.elapsed().as_secs_f64() < 1.0);
        for x in 0..4 {
            assert_eq!(canvas.pixel(x, 2), Some(Rgb::WHITE));
        }
        assert_eq!(canvas.pixel(0, 1), Some(Rgb::BLACK));
    }

    #[test]
    fn clipping_keeps_segments_inside_the_box() {
        let (min, max) = (DVec2::ZERO, DVec2::splat(10.0));
        let clipped = clip_segment(DVec2::new(-5.0, 5.0), DVec2::new(15.0, 5.0), min, max);
        assert_eq!(clipped, Some((DVec2::new(0.0, 5.0), DVec2::new(10.0, 5.0))));
        let inside = clip_segment(DVec2::ONE, DVec2::splat(2.0), min, max);
        assert_eq!(inside, Some((DVec2::ONE, DVec2::splat(2.0))));
        assert_eq!(clip_segment(DVec2::new(-5.0, -1.0), DVec2::new(15.0, -1.0), min, max), None);
    }

    #[test]
    fn new_canvas_is_filled_with_background() {
        let bg = Rgb::new(1, 2, 3);
        let canvas = RasterCanvas::new(3, 2, bg);
        assert_eq!((canvas.width(), canvas.height()), (3, 2));
        assert!(canvas.image().pixels().all(|p| *p == bg.to_pixel()));
        assert_eq!(canvas.into_image().dimensions(), (3, 2));
    }
}
