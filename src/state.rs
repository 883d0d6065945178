//! Core data types and constants.
//!
//! This module contains the series model shared by the normalizer, the
//! renderer and the host, plus the editor options and example presets.

use eframe::egui::Color32;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

use crate::util::string_to_hsl;

// ============================================================================
// Constants
// ============================================================================

/// Default logical width of the plot surface
pub const CANVAS_WIDTH: f32 = 600.0;

/// Default logical height of the plot surface
pub const CANVAS_HEIGHT: f32 = 250.0;

/// Minimum interval between hover updates (~one frame at 60 Hz)
pub const HOVER_THROTTLE_MS: u64 = 16;

/// Saturation used for label-derived series colors
pub const SERIES_SATURATION: f64 = 0.5;

/// Lightness used for label-derived series colors
pub const SERIES_LIGHTNESS: f64 = 0.5;

/// Stroke width for series polylines
pub const LINE_WIDTH: f32 = 1.5;

/// Label given to a bare top-level array
pub const DEFAULT_SERIES_LABEL: &str = "Data";

/// Script shown when the app starts
pub const DEFAULT_SOURCE: &str = "return [3, 1, 2];";

/// Editor mode label when neither settings nor the evaluator name one
pub const DEFAULT_EDITOR_MODE: &str = "script";

/// Hover guide line (white, 30% alpha)
pub const HOVER_LINE_COLOR: Color32 = Color32::from_rgba_premultiplied(77, 77, 77, 77);

/// Zoom selection fill (white, 10% alpha)
pub const PREVIEW_FILL_COLOR: Color32 = Color32::from_rgba_premultiplied(26, 26, 26, 26);

// ============================================================================
// Core Types
// ============================================================================

/// One labeled numeric sequence drawn as a line
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Values in draw order
    pub data: Vec<f64>,
    /// Display name, also the seed for the derived color
    pub label: String,
    /// Explicit line color, overriding the label-derived one
    pub color: Option<Color32>,
    /// Fixed lower bound of the value axis
    pub y_min: Option<f64>,
    /// Fixed upper bound of the value axis
    pub y_max: Option<f64>,
}

impl Series {
    pub fn new(label: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            data,
            label: label.into(),
            color: None,
            y_min: None,
            y_max: None,
        }
    }

    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_y_range(mut self, y_min: f64, y_max: f64) -> Self {
        self.y_min = Some(y_min);
        self.y_max = Some(y_max);
        self
    }

    /// The color this series is drawn with
    pub fn color(&self) -> Color32 {
        self.color.unwrap_or_else(|| series_color(&self.label))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Deterministic color for a series label
pub fn series_color(label: &str) -> Color32 {
    string_to_hsl(label, SERIES_SATURATION, SERIES_LIGHTNESS)
}

/// Logical size of the drawing surface in plot units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH as f64,
            height: CANVAS_HEIGHT as f64,
        }
    }
}

// ============================================================================
// Editor Types
// ============================================================================

/// Visual theme for the editor and the rest of the window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, AsRefStr, EnumIter, Serialize, Deserialize)]
pub enum EditorTheme {
    #[default]
    #[strum(serialize = "One Dark")]
    OneDark,
    #[strum(serialize = "Light")]
    Light,
}

/// Cosmetic editor configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Language label shown in the editor header
    pub mode: String,
    /// Show a line number gutter
    pub line_numbers: bool,
    pub theme: EditorTheme,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            mode: DEFAULT_EDITOR_MODE.to_string(),
            line_numbers: true,
            theme: EditorTheme::default(),
        }
    }
}

/// Ready-made scripts offered in the Examples menu
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, EnumIter)]
pub enum ExampleScript {
    #[strum(serialize = "Simple array")]
    SimpleArray,
    #[strum(serialize = "Sine and cosine")]
    Trigonometry,
    #[strum(serialize = "Nested groups")]
    NestedGroups,
    #[strum(serialize = "Damped oscillation")]
    DampedOscillation,
}

impl ExampleScript {
    /// Source text of the example
    pub fn source(&self) -> &'static str {
        match self {
            ExampleScript::SimpleArray => DEFAULT_SOURCE,
            ExampleScript::Trigonometry => {
                "let n = 200;\nreturn {\n    sin: [sin(i / 20) for i in 0..n],\n    cos: [cos(i / 20) for i in 0..n],\n};"
            }
            ExampleScript::NestedGroups => {
                "return {\n    raw: [1, 4, 2, 8, 5, 7],\n    derived: {\n        squares: [i ^ 2 for i in 0..6],\n        halves: [i / 2 for i in 0..6],\n    },\n};"
            }
            ExampleScript::DampedOscillation => {
                "// exp(-t) * cos(t), sampled 500 times\nlet n = 500;\nlet k = 0.02;\nreturn [exp(-k * i) * cos(i / 5) for i in 0..n];"
            }
        }
    }
}
