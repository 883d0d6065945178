//! Common test utilities shared across all test modules
//!
//! Builders for series, values and apps so individual tests stay short.

#![allow(dead_code)]

use scriptplot::app::ScriptPlotApp;
use scriptplot::script::{ExpressionScript, ScriptEvaluator, ScriptValue};
use scriptplot::settings::PlotSettings;
use scriptplot::state::Series;

/// Evaluate a script with the default evaluator, panicking on errors
pub fn eval(source: &str) -> ScriptValue {
    ExpressionScript
        .evaluate(source)
        .unwrap_or_else(|e| panic!("Failed to evaluate '{}': {}", source, e))
}

/// Object value from `(key, value)` pairs
pub fn object(entries: Vec<(&str, ScriptValue)>) -> ScriptValue {
    ScriptValue::Object(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    )
}

/// Series with a label and data
pub fn series(label: &str, data: &[f64]) -> Series {
    Series::new(label, data.to_vec())
}

/// Labels of a series list, in order
pub fn labels(series: &[Series]) -> Vec<&str> {
    series.iter().map(|s| s.label.as_str()).collect()
}

/// App with default settings and the given starting script
pub fn app_with_source(source: &str) -> ScriptPlotApp {
    let settings = PlotSettings {
        initial_source: Some(source.to_string()),
        ..PlotSettings::default()
    };
    ScriptPlotApp::with_settings(settings)
}

/// Simulate a full drag from `from` to `to` (fractions of the plot width)
pub fn drag(app: &mut ScriptPlotApp, from: f64, to: f64) {
    let chart = app.chart_mut();
    chart.pointer_down(from);
    chart.pointer_up(to);
}

/// Assert two floats are within `1e-9`
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
