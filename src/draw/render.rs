//! Raster rendering for strokes and the live selection overlay.

use image::Pixel;

use super::{Bitmap, color::Color, stroke::Stroke};
use crate::util::Rect;

/// Renders all strokes onto a bitmap in draw order.
pub fn render_strokes(bitmap: &mut Bitmap, strokes: &[Stroke]) {
    let (width, height) = bitmap.dimensions();
    for stroke in strokes {
        // Skip strokes entirely outside the bitmap
        if stroke
            .bounds()
            .is_some_and(|bounds| bounds.clamp_to(width, height).is_empty())
        {
            continue;
        }
        render_stroke(bitmap, stroke);
    }
}

/// Renders one freehand stroke by stamping round dabs along each segment.
fn render_stroke(bitmap: &mut Bitmap, stroke: &Stroke) {
    let radius = stroke.brush.radius.max(0.5);
    let pixel = stroke.brush.color.to_rgba8();
    // Half-radius spacing keeps consecutive dabs overlapping.
    let spacing = (radius * 0.5).max(0.5);

    let mut points = stroke.points.iter();
    let Some(first) = points.next() else {
        return;
    };
    let (mut px, mut py) = (f64::from(first.x), f64::from(first.y));
    stamp_disc(bitmap, px, py, radius, pixel);

    // Dabs centred further out than this cannot touch the bitmap.
    let (width, height) = bitmap.dimensions();
    let min = (-radius, -radius);
    let max = (f64::from(width) + radius, f64::from(height) + radius);

    for point in points {
        let (nx, ny) = (f64::from(point.x), f64::from(point.y));
        let (dx, dy) = (nx - px, ny - py);
        if let Some((t0, t1)) = clip_segment((px, py), (dx, dy), min, max) {
            let visible = (dx * dx + dy * dy).sqrt() * (t1 - t0);
            let steps = (visible / spacing).ceil().max(1.0) as u32;
            // The segment start was already stamped unless it was clipped away.
            let first_step = if t0 > 0.0 { 0 } else { 1 };
            for step in first_step..=steps {
                let t = t0 + (t1 - t0) * f64::from(step) / f64::from(steps);
                stamp_disc(bitmap, px + dx * t, py + dy * t, radius, pixel);
            }
        }
        (px, py) = (nx, ny);
    }
}

/// Liang-Barsky clip of the segment `start + t * delta`, `t` in `0..=1`,
/// against the box `min..=max`. Returns the visible `t` range.
fn clip_segment(
    start: (f64, f64),
    delta: (f64, f64),
    min: (f64, f64),
    max: (f64, f64),
) -> Option<(f64, f64)> {
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-delta.0, start.0 - min.0),
        (delta.0, max.0 - start.0),
        (-delta.1, start.1 - min.1),
        (delta.1, max.1 - start.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((t0, t1))
}

fn stamp_disc(bitmap: &mut Bitmap, cx: f64, cy: f64, radius: f64, pixel: image::Rgba<u8>) {
    let (width, height) = bitmap.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let min_x = (cx - radius).floor().max(0.0) as i64;
    let min_y = (cy - radius).floor().max(0.0) as i64;
    let max_x = ((cx + radius).ceil() as i64).min(i64::from(width) - 1);
    let max_y = ((cy + radius).ceil() as i64).min(i64::from(height) - 1);
    let r2 = radius * radius;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            if dx * dx + dy * dy <= r2 {
                bitmap.get_pixel_mut(x as u32, y as u32).blend(&pixel);
            }
        }
    }
}

/// Styling for the rectangle drawn while a selection is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionOverlay {
    /// Selection in viewport coordinates
    pub rect: Rect,
    /// Dashed border color
    pub border_color: Color,
    /// Border width in pixels
    pub border_width: u32,
    /// Length of each dash (and gap) in pixels
    pub dash_length: u32,
    /// Translucent fill drawn inside the border
    pub fill_color: Color,
}

/// Paints the selection overlay (translucent fill plus dashed border).
///
/// The overlay is clipped to the bitmap; nothing is drawn for an empty rect.
pub fn paint_selection(bitmap: &mut Bitmap, overlay: &SelectionOverlay) {
    let (width, height) = bitmap.dimensions();
    let area = overlay.rect.clamp_to(width, height);
    if area.is_empty() {
        return;
    }

    let fill = overlay.fill_color.to_rgba8();
    let border = overlay.border_color.to_rgba8();
    let dash = overlay.dash_length.max(1);
    let ring = overlay.border_width;

    // Distances are measured from the unclamped rect so dashes stay put when
    // the selection runs off the bitmap edge.
    let origin_x = i64::from(overlay.rect.left);
    let origin_y = i64::from(overlay.rect.top);
    let right = overlay.rect.right();
    let bottom = overlay.rect.bottom();

    for y in area.top as u32..(area.top as u32 + area.height) {
        for x in area.left as u32..(area.left as u32 + area.width) {
            let (xi, yi) = (i64::from(x), i64::from(y));
            let from_left = xi - origin_x;
            let from_top = yi - origin_y;
            let from_right = right - 1 - xi;
            let from_bottom = bottom - 1 - yi;

            let on_horizontal = from_top < i64::from(ring) || from_bottom < i64::from(ring);
            let on_vertical = from_left < i64::from(ring) || from_right < i64::from(ring);

            let pixel = bitmap.get_pixel_mut(x, y);
            if on_horizontal && (from_left / i64::from(dash)) % 2 == 0 {
                pixel.blend(&border);
            } else if on_vertical && (from_top / i64::from(dash)) % 2 == 0 {
                pixel.blend(&border);
            } else if !on_horizontal && !on_vertical {
                pixel.blend(&fill);
            }
        }
    }
}
