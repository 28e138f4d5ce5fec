use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// HSL helpers
// ---------------------------------------------------------------------------

fn hsl_rgb(hue: f32, saturation: f32, lightness: f32) -> [u8; 3] {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    [
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    ]
}

// ---------------------------------------------------------------------------
// Surface colour ramp
// ---------------------------------------------------------------------------

/// Rainbow ramp from violet (`t = 0`) through blue, green and yellow to red
/// (`t = 1`). Out-of-range and NaN inputs are clamped.
pub fn rainbow(t: f64) -> [u8; 3] {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let hue = 270.0 * (1.0 - t as f32);
    hsl_rgb(hue, 0.9, 0.5)
}

// ---------------------------------------------------------------------------
// Line palette for the per-image-size curves
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let [r, g, b] = hsl_rgb((i as f32 / n as f32) * 360.0, 0.75, 0.55);
            Color32::from_rgb(r, g, b)
        })
        .collect()
}
