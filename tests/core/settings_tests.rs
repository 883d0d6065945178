//! Tests for startup settings
//!
//! Tests cover:
//! - Default settings values
//! - Partial and malformed JSON
//! - Reading settings files
//! - Derived chart configuration

use std::path::PathBuf;
use std::time::Duration;

use scriptplot::settings::PlotSettings;
use scriptplot::state::{CanvasSize, EditorTheme, CANVAS_HEIGHT, CANVAS_WIDTH, LINE_WIDTH};

/// Write `content` to a unique file in the temp directory
fn temp_settings_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "scriptplot-{}-{}.json",
        name,
        std::process::id()
    ));
    std::fs::write(&path, content).unwrap();
    path
}

// ============================================
// Default Settings Tests
// ============================================

#[test]
fn test_settings_defaults() {
    let settings = PlotSettings::default();
    assert_eq!(settings.version, 1);
    assert_eq!(settings.canvas_width, CANVAS_WIDTH);
    assert_eq!(settings.canvas_height, CANVAS_HEIGHT);
    assert_eq!(settings.hover_throttle_ms, 16);
    assert!(!settings.discard_empty_zoom);
    assert_eq!(settings.initial_source, None);
    assert!(settings.editor.line_numbers);
    assert_eq!(settings.editor.theme, EditorTheme::OneDark);
}

#[test]
fn test_settings_derived_values() {
    let settings = PlotSettings::default();
    assert_eq!(settings.canvas_size(), CanvasSize::default());
    assert_eq!(settings.hover_interval(), Duration::from_millis(16));
    assert_eq!(settings.render_style().line_width, LINE_WIDTH);
}

// ============================================
// Parsing Tests
// ============================================

#[test]
fn test_settings_partial_json_keeps_defaults() {
    let settings = PlotSettings::from_json(
        r#"{"canvas_width": 800, "title": "Signals", "editor": {"theme": "Light"}}"#,
    )
    .unwrap();
    assert_eq!(settings.canvas_width, 800.0);
    assert_eq!(settings.canvas_height, CANVAS_HEIGHT);
    assert_eq!(settings.title.as_deref(), Some("Signals"));
    assert_eq!(settings.editor.theme, EditorTheme::Light);
    assert!(settings.editor.line_numbers);
}

#[test]
fn test_settings_unknown_fields_are_ignored() {
    let settings = PlotSettings::from_json(r#"{"language": "de", "discard_empty_zoom": true}"#)
        .unwrap();
    assert!(settings.discard_empty_zoom);
}

#[test]
fn test_settings_malformed_json_is_an_error() {
    assert!(PlotSettings::from_json("{not json").is_err());
    assert!(PlotSettings::from_json(r#"{"hover_throttle_ms": "fast"}"#).is_err());
}

#[test]
fn test_settings_serialize_roundtrip() {
    let settings = PlotSettings {
        hover_throttle_ms: 33,
        initial_source: Some("[1, 2]".to_string()),
        ..PlotSettings::default()
    };
    let json = serde_json::to_string(&settings).unwrap();
    assert_eq!(PlotSettings::from_json(&json).unwrap(), settings);
}

// ============================================
// File Tests
// ============================================

#[test]
fn test_settings_load_from_file() {
    let path = temp_settings_file("valid", r#"{"line_width": 3.0}"#);
    let settings = PlotSettings::load_from(&path).unwrap();
    assert_eq!(settings.line_width, 3.0);
    let _ = std::fs::remove_file(path);
}

#[test]
fn test_settings_missing_file_reports_path() {
    let path = std::env::temp_dir().join("scriptplot-does-not-exist.json");
    let err = PlotSettings::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("scriptplot-does-not-exist.json"));
}

#[test]
fn test_settings_malformed_file_reports_context() {
    let path = temp_settings_file("broken", "[1, 2");
    let err = PlotSettings::load_from(&path).unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse"));
    let _ = std::fs::remove_file(path);
}

#[test]
fn test_settings_config_dir_name() {
    if let Some(dir) = PlotSettings::get_config_dir() {
        assert!(dir.ends_with("scriptplot"));
    }
}
