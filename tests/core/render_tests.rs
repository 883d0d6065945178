//! Tests for chart rendering
//!
//! Tests cover:
//! - Windowing and value ranges
//! - Point placement and degenerate inputs
//! - Data and overlay layers
//! - Legend readouts

use scriptplot::interaction::{HiddenSet, Window};
use scriptplot::render::{
    legend_readout, render_data_layer, render_overlay_layer, series_points, value_range,
    windowed_data, DrawCommand, Layer, RenderStyle,
};
use scriptplot::state::{series_color, CanvasSize, Series};

use crate::common::series;

fn size() -> CanvasSize {
    CanvasSize {
        width: 600.0,
        height: 250.0,
    }
}

fn polyline_points(command: &DrawCommand) -> &[[f64; 2]] {
    match command {
        DrawCommand::Polyline { points, .. } => points,
        other => panic!("expected a polyline, got {:?}", other),
    }
}

fn draw(series: &[Series], hidden: &HiddenSet, window: Option<Window>) -> Layer {
    let mut layer = Layer::new();
    render_data_layer(
        &mut layer,
        series,
        hidden,
        window,
        size(),
        &RenderStyle::default(),
    );
    layer
}

// ============================================
// Windowing and Ranges
// ============================================

#[test]
fn test_zero_width_window_is_empty() {
    let data = [1.0, 2.0, 3.0, 4.0];
    let w = windowed_data(&data, Some(Window::new(0.5, 0.5)));
    assert!(w.data.is_empty());
    assert_eq!((w.start, w.end), (2, 2));
}

#[test]
fn test_window_on_empty_data() {
    let w = windowed_data(&[], Some(Window::new(0.2, 0.8)));
    assert!(w.data.is_empty());
}

#[test]
fn test_value_range_from_data() {
    let s = series("a", &[3.0, 1.0, 2.0]);
    assert_eq!(value_range(&s, &s.data), Some((1.0, 3.0)));
}

#[test]
fn test_value_range_bounds_apply_independently() {
    let mut s = series("a", &[3.0, 1.0, 2.0]);
    s.y_min = Some(0.0);
    assert_eq!(value_range(&s, &s.data), Some((0.0, 3.0)));

    let s = series("b", &[3.0, 1.0]).with_y_range(-1.0, 10.0);
    assert_eq!(value_range(&s, &s.data), Some((-1.0, 10.0)));
}

#[test]
fn test_value_range_ignores_non_finite() {
    let s = series("a", &[f64::NAN, 2.0, f64::INFINITY, 4.0]);
    assert_eq!(value_range(&s, &s.data), Some((2.0, 4.0)));
    let s = series("b", &[f64::NAN]);
    assert_eq!(value_range(&s, &s.data), None);
}

// ============================================
// Point Placement
// ============================================

#[test]
fn test_points_span_width_and_height() {
    let points = series_points(&[3.0, 1.0, 2.0], (1.0, 3.0), size());
    assert_eq!(points, vec![[0.0, 250.0], [300.0, 0.0], [600.0, 125.0]]);
}

#[test]
fn test_single_point_at_origin_mid_height() {
    let points = series_points(&[5.0], (5.0, 5.0), size());
    assert_eq!(points, vec![[0.0, 125.0]]);
}

#[test]
fn test_flat_series_draws_mid_height_line() {
    let points = series_points(&[2.0, 2.0], (2.0, 2.0), size());
    assert_eq!(points, vec![[0.0, 125.0], [600.0, 125.0]]);
}

#[test]
fn test_non_finite_values_leave_gaps() {
    let points = series_points(&[1.0, f64::NAN, 3.0], (1.0, 3.0), size());
    assert_eq!(points, vec![[0.0, 0.0], [600.0, 250.0]]);
}

// ============================================
// Layers
// ============================================

#[test]
fn test_data_layer_draws_each_visible_series() {
    let list = vec![series("a", &[1.0, 2.0]), series("b", &[2.0, 1.0])];
    let layer = draw(&list, &HiddenSet::new(), None);
    assert_eq!(layer.commands().len(), 2);

    match &layer.commands()[1] {
        DrawCommand::Polyline {
            label,
            color,
            width,
            ..
        } => {
            assert_eq!(label, "b");
            assert_eq!(*color, series_color("b"));
            assert_eq!(*width, RenderStyle::default().line_width);
        }
        other => panic!("expected a polyline, got {:?}", other),
    }
}

#[test]
fn test_data_layer_skips_hidden_series() {
    let list = vec![series("a", &[1.0, 2.0]), series("b", &[2.0, 1.0])];
    let mut hidden = HiddenSet::new();
    hidden.toggle(0);
    let layer = draw(&list, &hidden, None);
    assert_eq!(layer.commands().len(), 1);
    assert!(matches!(&layer.commands()[0], DrawCommand::Polyline { label, .. } if label == "b"));
}

#[test]
fn test_data_layer_applies_window() {
    let list = vec![series("a", &[0.0, 10.0, 20.0, 30.0])];
    let layer = draw(&list, &HiddenSet::new(), Some(Window::new(0.5, 1.0)));
    let points = polyline_points(&layer.commands()[0]);
    assert_eq!(points, &[[0.0, 0.0], [600.0, 250.0]]);
}

#[test]
fn test_empty_and_zero_width_inputs_draw_nothing() {
    let list = vec![series("empty", &[]), series("a", &[1.0, 2.0, 3.0, 4.0])];
    let layer = draw(&list, &HiddenSet::new(), Some(Window::new(0.5, 0.5)));
    assert!(layer.is_empty());
}

#[test]
fn test_redraw_replaces_previous_commands() {
    let list = vec![series("a", &[1.0, 2.0])];
    let mut layer = draw(&list, &HiddenSet::new(), None);
    render_data_layer(
        &mut layer,
        &[],
        &HiddenSet::new(),
        None,
        size(),
        &RenderStyle::default(),
    );
    assert!(layer.is_empty());
    assert_eq!(layer.redraws(), 2);
}

#[test]
fn test_overlay_layer_hover_and_preview() {
    let style = RenderStyle::default();
    let mut layer = Layer::new();
    render_overlay_layer(
        &mut layer,
        Some(0.5),
        Some(Window::new(0.25, 0.5)),
        size(),
        &style,
    );
    assert_eq!(
        layer.commands(),
        &[
            DrawCommand::VerticalLine {
                x: 300.0,
                color: style.hover_color
            },
            DrawCommand::FillSpan {
                x_start: 150.0,
                x_end: 300.0,
                color: style.preview_color
            },
        ]
    );

    render_overlay_layer(&mut layer, None, None, size(), &style);
    assert!(layer.is_empty());
}

// ============================================
// Legend Readouts
// ============================================

#[test]
fn test_readout_summary_without_hover() {
    let s = series("a", &[3.0, 1.0, 2.0]);
    assert_eq!(legend_readout(&s, None, None), "[0:3, ..., 2:2]");
}

#[test]
fn test_readout_summary_in_window() {
    let s = series("a", &[10.0, 20.0, 30.0, 40.0]);
    let window = Some(Window::new(0.5, 1.0));
    assert_eq!(legend_readout(&s, window, None), "[2:30, ..., 3:40]");
    assert_eq!(legend_readout(&s, window, Some(0.0)), "0: 30");
}

#[test]
fn test_readout_hover_value() {
    let s = series("a", &[3.0, 1.5, 2.0]);
    assert_eq!(legend_readout(&s, None, Some(0.5)), "2: 2");
    assert_eq!(legend_readout(&s, None, Some(0.3)), "1: 1.5");
    assert_eq!(legend_readout(&s, None, Some(1.0)), "2: 2");
}

#[test]
fn test_readout_empty_series() {
    let s = series("a", &[]);
    assert_eq!(legend_readout(&s, None, None), "[empty]");
    assert_eq!(legend_readout(&s, None, Some(0.5)), "-");
}
