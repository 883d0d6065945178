//! Chart rendering into backend-neutral draw layers.
//!
//! The chart is drawn as two layers: the data layer holds one polyline per
//! visible series, the overlay layer holds the hover guide and the zoom
//! selection. Both are plain command lists in plot units (`0..width` by
//! `0..height`, y pointing up) that the UI replays onto egui_plot every
//! frame; they are only rebuilt when their inputs change.

use eframe::egui::Color32;

use crate::interaction::{HiddenSet, Window};
use crate::state::{CanvasSize, Series, HOVER_LINE_COLOR, LINE_WIDTH, PREVIEW_FILL_COLOR};
use crate::util::format_number;

/// Slice of a series visible through a window
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Windowed<'a> {
    pub data: &'a [f64],
    /// Index of the first visible element in the full series
    pub start: usize,
    /// One past the last visible element
    pub end: usize,
}

/// Cut `data` down to the part visible through `window` (`None` = everything)
pub fn windowed_data(data: &[f64], window: Option<Window>) -> Windowed<'_> {
    let len = data.len();
    let Some(window) = window else {
        return Windowed {
            data,
            start: 0,
            end: len,
        };
    };

    let start = ((window.start * len as f64).floor().max(0.0) as usize).min(len);
    let end = ((window.end * len as f64).ceil().max(0.0) as usize).clamp(start, len);
    Windowed {
        data: &data[start..end],
        start,
        end,
    }
}

/// Value-axis bounds for a slice: explicit bounds win, the rest comes from the data.
///
/// Non-finite values are ignored; `None` means there is nothing to draw.
pub fn value_range(series: &Series, slice: &[f64]) -> Option<(f64, f64)> {
    let mut finite = slice.iter().copied().filter(|v| v.is_finite()).peekable();
    finite.peek()?;

    let (data_min, data_max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    Some((
        series.y_min.unwrap_or(data_min),
        series.y_max.unwrap_or(data_max),
    ))
}

/// Plot-space points for a slice scaled into `range` and `size`.
///
/// A single point sits at `x = 0`; a zero-width range draws a flat line at
/// mid height. Non-finite values leave no point.
pub fn series_points(slice: &[f64], range: (f64, f64), size: CanvasSize) -> Vec<[f64; 2]> {
    let n = slice.len();
    let (min, max) = range;
    let span = max - min;
    let flat = span.abs() < f64::EPSILON || !span.is_finite();

    slice
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| {
            let x = if n > 1 {
                size.width * i as f64 / (n - 1) as f64
            } else {
                0.0
            };
            let y = if flat {
                size.height / 2.0
            } else {
                size.height * (v - min) / span
            };
            [x, y]
        })
        .collect()
}

// ============================================================================
// Draw layers
// ============================================================================

/// A single drawing primitive in plot units
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Connected line through `points`; a single point is drawn as a dot
    Polyline {
        label: String,
        points: Vec<[f64; 2]>,
        color: Color32,
        width: f32,
    },
    /// Full-height vertical line at `x`
    VerticalLine { x: f64, color: Color32 },
    /// Full-height filled band between `x_start` and `x_end`
    FillSpan {
        x_start: f64,
        x_end: f64,
        color: Color32,
    },
}

/// An independently redrawn list of draw commands
#[derive(Clone, Debug, Default)]
pub struct Layer {
    commands: Vec<DrawCommand>,
    redraws: u64,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all commands; every redraw starts here
    pub fn clear(&mut self) {
        self.commands.clear();
        self.redraws += 1;
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// How many times this layer has been cleared and redrawn
    pub fn redraws(&self) -> u64 {
        self.redraws
    }
}

/// Stroke and overlay styling
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderStyle {
    pub line_width: f32,
    pub hover_color: Color32,
    pub preview_color: Color32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            line_width: LINE_WIDTH,
            hover_color: HOVER_LINE_COLOR,
            preview_color: PREVIEW_FILL_COLOR,
        }
    }
}

/// Append the polyline for one series; empty slices draw nothing
pub fn draw_series(
    layer: &mut Layer,
    series: &Series,
    window: Option<Window>,
    size: CanvasSize,
    style: &RenderStyle,
) {
    let visible = windowed_data(&series.data, window);
    let Some(range) = value_range(series, visible.data) else {
        return;
    };

    let points = series_points(visible.data, range, size);
    if points.is_empty() {
        return;
    }
    layer.push(DrawCommand::Polyline {
        label: series.label.clone(),
        points,
        color: series.color(),
        width: style.line_width,
    });
}

/// Clear and redraw the data layer from the visible series
pub fn render_data_layer(
    layer: &mut Layer,
    series: &[Series],
    hidden: &HiddenSet,
    window: Option<Window>,
    size: CanvasSize,
    style: &RenderStyle,
) {
    layer.clear();
    for (index, line) in series.iter().enumerate() {
        if !hidden.is_hidden(index) {
            draw_series(layer, line, window, size, style);
        }
    }
}

/// Clear and redraw the overlay layer (hover guide and zoom selection)
pub fn render_overlay_layer(
    layer: &mut Layer,
    hover: Option<f64>,
    preview: Option<Window>,
    size: CanvasSize,
    style: &RenderStyle,
) {
    layer.clear();
    if let Some(hover) = hover {
        layer.push(DrawCommand::VerticalLine {
            x: hover * size.width,
            color: style.hover_color,
        });
    }
    if let Some(preview) = preview {
        layer.push(DrawCommand::FillSpan {
            x_start: preview.start * size.width,
            x_end: preview.end * size.width,
            color: style.preview_color,
        });
    }
}

// ============================================================================
// Readouts
// ============================================================================

/// Index into a slice of `len` elements under the hover fraction
pub fn hover_index(hover: f64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let index = (hover * len as f64).round().max(0.0) as usize;
    Some(index.min(len - 1))
}

/// Legend text for a series: the hovered value, or the visible range summary
pub fn legend_readout(series: &Series, window: Option<Window>, hover: Option<f64>) -> String {
    let visible = windowed_data(&series.data, window);

    if let Some(hover) = hover {
        return match hover_index(hover, visible.data.len()) {
            Some(index) => format!("{}: {}", index, format_number(visible.data[index])),
            None => "-".to_string(),
        };
    }

    match (visible.data.first(), visible.data.last()) {
        (Some(first), Some(last)) => format!(
            "[{}:{}, ..., {}:{}]",
            visible.start,
            format_number(*first),
            visible.end - 1,
            format_number(*last)
        ),
        _ => "[empty]".to_string(),
    }
}
