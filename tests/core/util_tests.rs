//! Tests for numeric, color and array helpers

use scriptplot::state::series_color;
use scriptplot::util::{
    array_insert_index, array_move, array_remove_index, array_replace_index, clamp,
    format_number, hash_code, interpolate, interpolate_clamped, string_to_hsl,
};

use crate::common::assert_close;

// ============================================
// Interpolation
// ============================================

#[test]
fn test_interpolate_maps_ranges() {
    assert_close(interpolate(5.0, 0.0, 10.0, 100.0, 200.0), 150.0);
    assert_close(interpolate(15.0, 0.0, 10.0, 100.0, 200.0), 250.0);
    assert_close(interpolate(3.0, 2.0, 2.0, 7.0, 9.0), 7.0);
}

#[test]
fn test_interpolate_clamped_stays_in_range() {
    assert_close(interpolate_clamped(15.0, 0.0, 10.0, 100.0, 200.0), 200.0);
    assert_close(interpolate_clamped(-5.0, 0.0, 10.0, 100.0, 200.0), 100.0);
    assert_close(clamp(2.0, 0.0, 1.0), 1.0);
}

// ============================================
// Colors
// ============================================

#[test]
fn test_hash_code_wraps() {
    assert_eq!(hash_code("a fairly long series label that overflows"), -1_769_937_831);
    assert_eq!(hash_code("é"), 0xE9);
}

#[test]
fn test_series_color_is_deterministic_and_label_sensitive() {
    assert_eq!(series_color("speed"), series_color("speed"));
    assert_ne!(series_color("a"), series_color("b"));
    assert_eq!(series_color("Data"), string_to_hsl("Data", 0.5, 0.5));
}

#[test]
fn test_negative_hash_gives_valid_hue() {
    let label = "pressure";
    assert!(hash_code(label) < 0);
    // Still a usable, opaque color
    assert_eq!(series_color(label).a(), 255);
}

// ============================================
// Arrays
// ============================================

#[test]
fn test_array_helpers_copy() {
    let items = vec![1, 2, 3];
    assert_eq!(array_replace_index(&items, 1, 9), vec![1, 9, 3]);
    assert_eq!(array_replace_index(&items, 4, 9), vec![1, 2, 3, 0, 9]);
    assert_eq!(array_insert_index(&items, 0, 0), vec![0, 1, 2, 3]);
    assert_eq!(array_insert_index(&items, 10, 4), vec![1, 2, 3, 4]);
    assert_eq!(array_remove_index(&items, 1), vec![1, 3]);
    assert_eq!(array_remove_index(&items, 7), vec![1, 2, 3]);
    assert_eq!(array_move(&items, 0, 2), vec![2, 3, 1]);
    assert_eq!(items, vec![1, 2, 3]);
}

// ============================================
// Formatting
// ============================================

#[test]
fn test_format_number() {
    assert_eq!(format_number(3.0), "3");
    assert_eq!(format_number(-2.0), "-2");
    assert_eq!(format_number(1.5), "1.5");
    assert_eq!(format_number(f64::NAN), "NaN");
}
