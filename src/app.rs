//! Main application state and eframe::App implementation.
//!
//! This module contains the core ScriptPlotApp struct and the evaluation
//! cycle: editor text goes through the evaluator and the normalizer, and the
//! resulting series replace the chart contents. UI rendering methods live
//! in the `ui` submodules.

use eframe::egui;
use std::time::Instant;
use thiserror::Error;

use crate::interaction::{ChartState, HoverThrottle};
use crate::normalize::{normalize_strict, NormalizeError};
use crate::render::{render_data_layer, render_overlay_layer, Layer, RenderStyle};
use crate::script::{ExpressionScript, ScriptError, ScriptEvaluator};
use crate::settings::PlotSettings;
use crate::state::{
    CanvasSize, EditorTheme, ExampleScript, Series, DEFAULT_EDITOR_MODE, DEFAULT_SOURCE,
};
use crate::ui::editor::ScriptEditor;

/// Anything that can go wrong turning editor text into series
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvaluationError {
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Main application state
pub struct ScriptPlotApp {
    // === Editor ===
    pub(crate) editor: ScriptEditor,
    /// Turns editor text into a value
    pub(crate) evaluator: Box<dyn ScriptEvaluator>,
    // === Chart Data ===
    /// Series from the last successful evaluation
    pub(crate) series: Vec<Series>,
    /// Message of the last failed evaluation, cleared on success
    pub(crate) error: Option<EvaluationError>,
    /// Zoom stack, hover and hidden flags
    pub(crate) chart: ChartState,
    // === Rendering ===
    pub(crate) data_layer: Layer,
    pub(crate) overlay_layer: Layer,
    pub(crate) canvas: CanvasSize,
    pub(crate) style: RenderStyle,
    /// Optional heading above the chart
    pub(crate) title: Option<String>,
    pub(crate) settings: PlotSettings,
}

impl Default for ScriptPlotApp {
    fn default() -> Self {
        Self::with_settings(PlotSettings::default())
    }
}

impl ScriptPlotApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = PlotSettings::load();
        apply_theme(&cc.egui_ctx, settings.editor.theme);
        Self::with_settings(settings)
    }

    /// Build an app from explicit settings and run the first evaluation
    pub fn with_settings(settings: PlotSettings) -> Self {
        Self::with_evaluator(settings, Box::new(ExpressionScript))
    }

    /// Build an app with a custom evaluation capability
    pub fn with_evaluator(settings: PlotSettings, evaluator: Box<dyn ScriptEvaluator>) -> Self {
        let source = settings
            .initial_source
            .clone()
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

        // A configured mode wins over the evaluator's language name
        let mut options = settings.editor.clone();
        if options.mode.is_empty() || options.mode == DEFAULT_EDITOR_MODE {
            options.mode = evaluator.language().to_string();
        }

        let mut app = Self {
            editor: ScriptEditor::new(source.clone(), options),
            evaluator,
            series: Vec::new(),
            error: None,
            chart: ChartState::new(
                HoverThrottle::new(settings.hover_interval()),
                settings.discard_empty_zoom,
            ),
            data_layer: Layer::new(),
            overlay_layer: Layer::new(),
            canvas: settings.canvas_size(),
            style: settings.render_style(),
            title: settings.title.clone(),
            settings,
        };
        app.handle_source_change(&source);
        app
    }

    // === Host operations ===

    /// Evaluate `source` and replace the series on success.
    ///
    /// On failure the error is kept for display and everything else stays as
    /// it was. Zoom and hidden flags survive successful edits too.
    pub fn handle_source_change(&mut self, source: &str) {
        match self.evaluate(source) {
            Ok(series) => {
                tracing::debug!("Evaluated {} series", series.len());
                self.series = series;
                self.error = None;
                self.chart.series_changed();
            }
            Err(e) => {
                tracing::info!("Evaluation failed: {}", e);
                self.error = Some(e);
            }
        }
    }

    fn evaluate(&self, source: &str) -> Result<Vec<Series>, EvaluationError> {
        let value = self.evaluator.evaluate(source)?;
        Ok(normalize_strict(&value)?)
    }

    /// Replace the editor text programmatically and evaluate it once
    pub fn set_source(&mut self, source: &str) {
        self.editor.set_text(source);
        self.handle_source_change(source);
    }

    /// Load one of the bundled example scripts
    pub fn load_example(&mut self, example: ExampleScript) {
        tracing::info!("Loading example: {}", example.as_ref());
        self.set_source(example.source());
    }

    pub fn zoom_out(&mut self) {
        self.chart.zoom_out();
    }

    /// Show or hide a series from the legend
    pub fn toggle_series(&mut self, index: usize) -> bool {
        self.chart.toggle_series(index)
    }

    // === Accessors ===

    pub fn source(&self) -> &str {
        self.editor.text()
    }

    pub fn editor_mode(&self) -> &str {
        self.editor.mode()
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn error(&self) -> Option<&EvaluationError> {
        self.error.as_ref()
    }

    pub fn chart(&self) -> &ChartState {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut ChartState {
        &mut self.chart
    }

    pub fn data_layer(&self) -> &Layer {
        &self.data_layer
    }

    pub fn overlay_layer(&self) -> &Layer {
        &self.overlay_layer
    }

    pub fn settings(&self) -> &PlotSettings {
        &self.settings
    }

    /// Rebuild whichever layers the chart state marked dirty
    pub fn refresh_layers(&mut self) {
        if self.chart.take_data_dirty() {
            render_data_layer(
                &mut self.data_layer,
                &self.series,
                self.chart.hidden(),
                self.chart.active_window(),
                self.canvas,
                &self.style,
            );
        }
        if self.chart.take_overlay_dirty() {
            render_overlay_layer(
                &mut self.overlay_layer,
                self.chart.hover(),
                self.chart.preview(),
                self.canvas,
                &self.style,
            );
        }
    }
}

/// Switch egui visuals to match the editor theme
pub fn apply_theme(ctx: &egui::Context, theme: EditorTheme) {
    match theme {
        EditorTheme::OneDark => ctx.set_visuals(egui::Visuals::dark()),
        EditorTheme::Light => ctx.set_visuals(egui::Visuals::light()),
    }
}

impl eframe::App for ScriptPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply a throttled hover value once its interval has passed
        self.chart.flush_hover(Instant::now());

        // Header with example presets and editor options
        egui::TopBottomPanel::top("header_panel").show(ctx, |ui| {
            self.render_header(ui);
        });

        // Script editor
        egui::SidePanel::left("editor_panel")
            .default_width(420.0)
            .min_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                self.render_editor(ui);
            });

        // Chart, legend and error text
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_chart(ui);
            ui.add_space(8.0);
            self.render_legend(ui);
            if let Some(error) = &self.error {
                ui.add_space(8.0);
                ui.colored_label(egui::Color32::from_rgb(220, 50, 47), error.to_string());
            }
        });

        // Wake up again to release a deferred hover value
        if self.chart.has_pending_hover() {
            ctx.request_repaint_after(self.chart.hover_interval());
        }
    }
}
