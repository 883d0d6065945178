//! User settings.
//!
//! Settings are read once at startup from a JSON file and never written back.
//! Missing or malformed files fall back to defaults.

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::render::RenderStyle;
use crate::state::{
    CanvasSize, EditorOptions, CANVAS_HEIGHT, CANVAS_WIDTH, HOVER_THROTTLE_MS, LINE_WIDTH,
};

/// Environment variable pointing at an alternative settings file
pub const SETTINGS_ENV_VAR: &str = "SCRIPTPLOT_SETTINGS";

/// Startup configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    /// Settings file version for migration support
    pub version: u32,
    /// Logical width of the plot surface
    pub canvas_width: f32,
    /// Logical height of the plot surface
    pub canvas_height: f32,
    /// Minimum milliseconds between hover updates
    pub hover_throttle_ms: u64,
    /// Stroke width of series lines
    pub line_width: f32,
    /// Ignore click-without-drag selections instead of zooming into them
    pub discard_empty_zoom: bool,
    /// Script to start with instead of the built-in default
    pub initial_source: Option<String>,
    /// Title shown above the chart
    pub title: Option<String>,
    pub editor: EditorOptions,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            version: 1,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            hover_throttle_ms: HOVER_THROTTLE_MS,
            line_width: LINE_WIDTH,
            discard_empty_zoom: false,
            initial_source: None,
            title: None,
            editor: EditorOptions::default(),
        }
    }
}

impl PlotSettings {
    /// Get the config directory path for ScriptPlot
    pub fn get_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("scriptplot"))
    }

    /// Path of the settings file: the environment override, else the config directory
    pub fn get_settings_path() -> Option<PathBuf> {
        std::env::var_os(SETTINGS_ENV_VAR)
            .map(PathBuf::from)
            .or_else(|| Self::get_config_dir().map(|p| p.join("settings.json")))
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load() -> Self {
        let Some(path) = Self::get_settings_path() else {
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("Ignoring settings file: {:#}", e);
                Self::default()
            }
        }
    }

    /// Read and parse a settings file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse settings from JSON text; unknown fields are ignored, missing ones defaulted
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let settings: Self = serde_json::from_str(content)?;
        Ok(settings.sanitized())
    }

    /// Replace unusable values with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.canvas_width.is_finite() && self.canvas_width > 0.0) {
            self.canvas_width = defaults.canvas_width;
        }
        if !(self.canvas_height.is_finite() && self.canvas_height > 0.0) {
            self.canvas_height = defaults.canvas_height;
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            self.line_width = defaults.line_width;
        }
        self
    }

    pub fn canvas_size(&self) -> CanvasSize {
        CanvasSize {
            width: self.canvas_width as f64,
            height: self.canvas_height as f64,
        }
    }

    pub fn hover_interval(&self) -> Duration {
        Duration::from_millis(self.hover_throttle_ms)
    }

    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            line_width: self.line_width,
            ..RenderStyle::default()
        }
    }
}
