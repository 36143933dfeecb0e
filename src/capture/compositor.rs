//! Region cropping onto an opaque background.

use image::{Rgba, imageops};

use crate::draw::Bitmap;
use crate::util::Rect;

/// Crops `rect` out of `source` and flattens it onto `background`.
///
/// The rectangle is clamped to the source bounds first. The result owns its
/// pixels, never borrows from `source`, and is fully opaque: the window is
/// filled with the (forced opaque) background and the source is composited
/// over it. When nothing of the rectangle survives clamping, a 1x1 background
/// placeholder is returned instead.
pub fn crop(source: &Bitmap, rect: Rect, background: Rgba<u8>) -> Bitmap {
    let background = opaque(background);
    let area = rect.clamp_to(source.width(), source.height());
    if area.is_empty() {
        log::debug!("Crop of {:?} is empty after clamping; returning placeholder", rect);
        return Bitmap::from_pixel(1, 1, background);
    }

    let window = imageops::crop_imm(
        source,
        area.left as u32,
        area.top as u32,
        area.width,
        area.height,
    )
    .to_image();

    let mut output = Bitmap::from_pixel(area.width, area.height, background);
    for (out, src) in output.pixels_mut().zip(window.pixels()) {
        *out = composite_over(*src, background);
    }
    output
}

fn opaque(color: Rgba<u8>) -> Rgba<u8> {
    let [r, g, b, _] = color.0;
    Rgba([r, g, b, u8::MAX])
}

/// Source-over onto an opaque background, in integer math so the result
/// alpha is exactly 255.
fn composite_over(src: Rgba<u8>, background: Rgba<u8>) -> Rgba<u8> {
    let alpha = u32::from(src.0[3]);
    let mix = |s: u8, b: u8| -> u8 {
        let value = u32::from(s) * alpha + u32::from(b) * (255 - alpha);
        ((value + 127) / 255) as u8
    };
    Rgba([
        mix(src.0[0], background.0[0]),
        mix(src.0[1], background.0[1]),
        mix(src.0[2], background.0[2]),
        u8::MAX,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    /// Transparent source with a black square at (10..20, 10..20) and a
    /// half-transparent red pixel at (30, 30).
    fn source(width: u32, height: u32) -> Bitmap {
        let mut bitmap = Bitmap::new(width, height);
        for y in 10..20 {
            for x in 10..20 {
                bitmap.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
        bitmap.put_pixel(30, 30, Rgba([255, 0, 0, 128]));
        bitmap
    }

    #[test]
    fn crop_has_rect_dimensions_and_content() {
        let src = source(100, 100);
        let out = crop(&src, Rect::new(5, 5, 20, 10), WHITE);
        assert_eq!(out.dimensions(), (20, 10));
        assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(out.get_pixel(5, 5).0, [0, 0, 0, 255]);
    }

    #[test]
    fn crop_output_is_fully_opaque() {
        let src = source(100, 100);
        for rect in [
            Rect::new(0, 0, 100, 100),
            Rect::new(25, 25, 10, 10),
            Rect::new(-40, 90, 60, 60),
            Rect::new(99, 99, 1, 1),
        ] {
            let out = crop(&src, rect, WHITE);
            assert!(
                out.pixels().all(|p| p.0[3] == 255),
                "transparent pixel in crop of {rect:?}"
            );
        }
    }

    #[test]
    fn translucent_pixels_blend_with_background() {
        let src = source(100, 100);
        let out = crop(&src, Rect::new(30, 30, 1, 1), WHITE);
        assert_eq!(out.get_pixel(0, 0).0, [255, 127, 127, 255]);
    }

    #[test]
    fn background_alpha_is_forced_opaque() {
        let src = Bitmap::new(4, 4);
        let out = crop(&src, Rect::new(0, 0, 4, 4), Rgba([10, 20, 30, 0]));
        assert!(out.pixels().all(|p| p.0 == [10, 20, 30, 255]));
    }

    #[test]
    fn clamps_partially_outside_rect() {
        let clamped = Rect::new(-20, 10, 100, 50).clamp_to(500, 500);
        assert_eq!(clamped, Rect::new(0, 10, 80, 50));

        let src = Bitmap::new(500, 500);
        let out = crop(&src, Rect::new(-20, 10, 100, 50), WHITE);
        assert_eq!(out.dimensions(), (80, 50));
    }

    #[test]
    fn clamping_is_idempotent() {
        let src = source(100, 100);
        let rect = Rect::new(-10, 60, 50, 80);
        let bounds = Rect::new(0, 0, 100, 100);
        assert_eq!(
            crop(&src, rect, WHITE),
            crop(&src, rect.intersect(&bounds), WHITE)
        );
    }

    #[test]
    fn degenerate_rects_return_placeholder() {
        let src = source(100, 100);
        for rect in [
            Rect::new(50, 50, 0, 0),
            Rect::new(50, 50, 10, 0),
            Rect::new(500, 500, 10, 10),
        ] {
            let out = crop(&src, rect, WHITE);
            assert_eq!(out.dimensions(), (1, 1));
            assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255, 255]);
        }
    }

    #[test]
    fn crop_does_not_touch_source() {
        let src = source(40, 40);
        let before = src.clone();
        let _ = crop(&src, Rect::new(0, 0, 40, 40), WHITE);
        assert_eq!(src, before);
    }
}
