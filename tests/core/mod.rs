//! Core module tests
//!
//! Tests for:
//! - Script evaluation
//! - Result normalization
//! - Windowing, scaling and draw layers
//! - Zoom stack, hover throttle and hidden series
//! - Settings parsing
//! - Numeric and color helpers

pub mod render_tests;
pub mod settings_tests;
pub mod util_tests;
