//! UI rendering modules for the ScriptPlot application.
//!
//! - `header` - Menu bar with example presets and view options
//! - `editor` - Script editor panel
//! - `chart` - Plot surface and pointer handling
//! - `legend` - Series legend with visibility toggles

pub mod chart;
pub mod editor;
pub mod header;
pub mod legend;
