use image::{GrayImage, Rgba, RgbaImage};

use crate::errors::{CoinLabelError, Result};
use crate::labeling::LabelCanvas;

/// Hue step between consecutive labels (golden ratio conjugate)
const HUE_STEP: f32 = 0.618_034;

/// Deterministic, well-spread colour for a label; label 0 has none
pub fn label_color(label: u32) -> Option<[u8; 3]> {
    if label == 0 {
        return None;
    }
    let hue = (label as f32 * HUE_STEP).fract();
    Some(hsv_to_rgb(hue, 0.75, 0.95))
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [u8; 3] {
    let sector = h * 6.0;
    let i = sector.floor() as i32 % 6;
    let f = sector - sector.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    [(r * 255.0).round() as u8, (g * 255.0).round() as u8, (b * 255.0).round() as u8]
}

/// Blend label colours over the grayscale image with opacity `alpha`
pub fn render_label_overlay(image: &GrayImage, canvas: &LabelCanvas, alpha: f32) -> Result<RgbaImage> {
    let (width, height) = image.dimensions();
    if canvas.dimensions() != (height, width) {
        return Err(CoinLabelError::DimensionMismatch {
            expected: (height, width),
            actual: canvas.dimensions(),
        });
    }

    let alpha = alpha.clamp(0.0, 1.0);
    let overlay = RgbaImage::from_fn(width, height, |x, y| {
        let gray = image.get_pixel(x, y)[0];
        match label_color(canvas.get(y, x)) {
            Some(color) => {
                let blend = |c: u8| (alpha * c as f32 + (1.0 - alpha) * gray as f32).round() as u8;
                Rgba([blend(color[0]), blend(color[1]), blend(color[2]), 255])
            }
            None => Rgba([gray, gray, gray, 255]),
        }
    });

    Ok(overlay)
}
