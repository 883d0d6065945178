//! Small numeric and formatting helpers shared by the renderer and controller.

use eframe::egui::Color32;

/// Clamp `value` into `[min, max]`
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Linear mix between `a` and `b` at proportion `p`
pub fn mix(a: f64, b: f64, p: f64) -> f64 {
    a * (1.0 - p) + b * p
}

/// Map `x` from `[x0, x1]` onto `[y0, y1]`.
///
/// A degenerate source range (`x0 == x1`) maps everything onto `y0`.
pub fn interpolate(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    let span = x1 - x0;
    if span == 0.0 {
        return y0;
    }
    mix(y0, y1, (x - x0) / span)
}

/// Same as [`interpolate`] but the proportion is clamped to `[0, 1]`
pub fn interpolate_clamped(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    let span = x1 - x0;
    if span == 0.0 {
        return y0;
    }
    mix(y0, y1, clamp((x - x0) / span, 0.0, 1.0))
}

/// 31-multiplier string hash over UTF-16 code units, wrapping at 32 bits
pub fn hash_code(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Convert HSL (hue in degrees, saturation and lightness in 0-1) to RGB
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> [u8; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = clamp(saturation, 0.0, 1.0);
    let l = clamp(lightness, 0.0, 1.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    let to_u8 = |c: f64| ((c + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_u8(r), to_u8(g), to_u8(b)]
}

/// Deterministic color for a string: the hash picks the hue
pub fn string_to_hsl(s: &str, saturation: f64, lightness: f64) -> Color32 {
    let hue = hash_code(s).rem_euclid(360) as f64;
    let [r, g, b] = hsl_to_rgb(hue, saturation, lightness);
    Color32::from_rgb(r, g, b)
}

/// Copy of `items` with `index` set to `value`, padding with defaults if needed
pub fn array_replace_index<T: Clone + Default>(items: &[T], index: usize, value: T) -> Vec<T> {
    let mut out = items.to_vec();
    if index >= out.len() {
        out.resize(index + 1, T::default());
    }
    out[index] = value;
    out
}

/// Copy of `items` with `value` inserted at `index` (appended when past the end)
pub fn array_insert_index<T: Clone>(items: &[T], index: usize, value: T) -> Vec<T> {
    let mut out = items.to_vec();
    out.insert(index.min(out.len()), value);
    out
}

/// Copy of `items` without the element at `index` (unchanged when out of range)
pub fn array_remove_index<T: Clone>(items: &[T], index: usize) -> Vec<T> {
    let mut out = items.to_vec();
    if index < out.len() {
        out.remove(index);
    }
    out
}

/// Copy of `items` with the element at `from` moved to `to`
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut out = items.to_vec();
    if from >= out.len() {
        return out;
    }
    let item = out.remove(from);
    out.insert(to.min(out.len()), item);
    out
}

/// Format a number the way a script author typed it: integers without a trailing `.0`
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
