//! Raster painting of scene strokes onto the RGBA canvas.
//!
//! Pixel `(x, y)` is centred on template coordinate `(x, y)`, which is the
//! convention the calibration tables were measured in.

use image::{Rgba, RgbaImage};

use super::constants::MIN_RASTER_HALF_WIDTH;
use super::scene::{Point, SceneElement, Stroke};
use crate::model::Color;

pub(super) fn paint_elements(canvas: &mut RgbaImage, elements: &[SceneElement]) {
    for element in elements {
        let color = rgba(element.color());
        let half = (element.stroke_width() / 2.0).max(MIN_RASTER_HALF_WIDTH);
        for stroke in element.strokes() {
            match stroke {
                Stroke::Circle { center, radius } => draw_ring(canvas, center, radius, half, color),
                Stroke::Path { points, closed } => {
                    for pair in points.windows(2) {
                        draw_segment(canvas, pair[0], pair[1], half, color);
                    }
                    if closed && points.len() > 2 {
                        draw_segment(canvas, points[points.len() - 1], points[0], half, color);
                    }
                }
            }
        }
    }
}

fn rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

/// Paint every pixel whose centre lies within `half` of segment `a`–`b`.
fn draw_segment(canvas: &mut RgbaImage, a: Point, b: Point, half: f64, color: Rgba<u8>) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    let (min_x, min_y) = (a.x.min(b.x) - half, a.y.min(b.y) - half);
    let (max_x, max_y) = (a.x.max(b.x) + half, a.y.max(b.y) + half);

    for_each_pixel_in(canvas, min_x, min_y, max_x, max_y, |canvas, px, py| {
        let (x, y) = (px as f64, py as f64);
        // Nearest point on the segment
        let t = if len_sq > 0.0 {
            (((x - a.x) * dx + (y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let cx = a.x + t * dx;
        let cy = a.y + t * dy;
        if (x - cx).powi(2) + (y - cy).powi(2) <= half * half {
            canvas.put_pixel(px, py, color);
        }
    });
}

fn draw_ring(canvas: &mut RgbaImage, center: Point, radius: f64, half: f64, color: Rgba<u8>) {
    let outer = radius + half;
    let (min_x, min_y) = (center.x - outer, center.y - outer);
    let (max_x, max_y) = (center.x + outer, center.y + outer);

    for_each_pixel_in(canvas, min_x, min_y, max_x, max_y, |canvas, px, py| {
        let d = ((px as f64 - center.x).powi(2) + (py as f64 - center.y).powi(2)).sqrt();
        if (d - radius).abs() <= half {
            canvas.put_pixel(px, py, color);
        }
    });
}

/// Visit the on-canvas pixels of a box; anything outside the canvas is
/// silently clipped.
fn for_each_pixel_in(
    canvas: &mut RgbaImage,
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    mut f: impl FnMut(&mut RgbaImage, u32, u32),
) {
    let (w, h) = canvas.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let x0 = min_x.floor().max(0.0) as u32;
    let y0 = min_y.floor().max(0.0) as u32;
    let x1 = max_x.ceil().min((w - 1) as f64);
    let y1 = max_y.ceil().min((h - 1) as f64);
    if x1 < 0.0 || y1 < 0.0 {
        return;
    }
    for py in y0..=y1 as u32 {
        for px in x0..=x1 as u32 {
            f(canvas, px, py);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_covers_its_endpoints() {
        let mut canvas = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
        draw_segment(&mut canvas, Point::new(2.0, 3.0), Point::new(15.0, 12.0), 0.5, Rgba([0, 0, 255, 255]));
        assert_eq!(canvas.get_pixel(2, 3), &Rgba([0, 0, 255, 255]));
        assert_eq!(canvas.get_pixel(15, 12), &Rgba([0, 0, 255, 255]));
        assert_eq!(canvas.get_pixel(15, 3), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn ring_leaves_centre_open() {
        let mut canvas = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
        draw_ring(&mut canvas, Point::new(10.0, 10.0), 5.0, 0.8, Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(10, 10), &Rgba([255, 255, 255, 255]));
        assert_eq!(canvas.get_pixel(15, 10), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(10, 5), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn strokes_off_canvas_are_clipped() {
        let mut canvas = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        draw_segment(&mut canvas, Point::new(-10.0, -10.0), Point::new(-2.0, -2.0), 0.5, Rgba([0, 0, 0, 255]));
        draw_ring(&mut canvas, Point::new(40.0, 40.0), 3.0, 1.0, Rgba([0, 0, 0, 255]));
        assert!(canvas.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }
}
