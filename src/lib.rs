//! ScriptPlot - turn a small data script into interactive line charts
//!
//! The user types a script, it is evaluated into a value, the value is
//! flattened into labeled numeric series and the series are drawn as lines
//! with drag-to-zoom, hover readouts and per-series visibility toggles.
//!
//! ## Module Structure
//!
//! - [`script`] - Restricted script language and the evaluator trait
//! - [`normalize`] - Flattening evaluated values into series
//! - [`render`] - Windowing, scaling and draw layers
//! - [`interaction`] - Zoom stack, hover throttle and hidden series
//! - [`state`] - Core data types and constants
//! - [`settings`] - Read-only startup settings
//! - [`util`] - Numeric, color and array helpers
//! - [`app`] - Main application state and eframe::App implementation
//! - [`ui`] - User interface components

pub mod app;
pub mod interaction;
pub mod normalize;
pub mod render;
pub mod script;
pub mod settings;
pub mod state;
pub mod ui;
pub mod util;
