//! Flattening of evaluated script values into plottable series.
//!
//! Every value is first classified into one of four shapes, then arrays of
//! numbers become series and objects are walked recursively. Nested keys are
//! joined into a dotted path so `{b: {c: [..]}}` yields a series named `b.c`.

use thiserror::Error;

use crate::script::ScriptValue;
use crate::state::{Series, DEFAULT_SERIES_LABEL};

/// Separator placed between object keys when building nested labels
pub const LABEL_SEPARATOR: &str = ".";

/// Shape of an evaluated value, as far as plotting is concerned
#[derive(Clone, Debug, PartialEq)]
pub enum Classified<'a> {
    /// An array whose elements are all numbers
    NumberArray(Vec<f64>),
    /// An object; each entry is normalized under its key
    LabeledGroup(&'a [(String, ScriptValue)]),
    /// Numbers, strings, booleans and null
    Scalar,
    /// An array whose element `index` is the first non-number
    Invalid { index: usize },
}

/// Raised when an array contains something other than numbers
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("Element {index} of {label} is not a number")]
    NotANumber { label: String, index: usize },
}

/// Classify a value before normalization
pub fn classify(value: &ScriptValue) -> Classified<'_> {
    match value {
        ScriptValue::Array(items) => {
            let mut numbers = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match item {
                    ScriptValue::Number(n) => numbers.push(*n),
                    _ => return Classified::Invalid { index },
                }
            }
            Classified::NumberArray(numbers)
        }
        ScriptValue::Object(entries) => Classified::LabeledGroup(entries),
        _ => Classified::Scalar,
    }
}

/// Convert a value into series, silently dropping malformed arrays
pub fn normalize(value: &ScriptValue) -> Vec<Series> {
    let mut out = Vec::new();
    walk(value, None, &mut out, &mut |_| Ok(())).unwrap_or_default();
    out
}

/// Convert a value into series, failing on the first malformed array
pub fn normalize_strict(value: &ScriptValue) -> Result<Vec<Series>, NormalizeError> {
    let mut out = Vec::new();
    walk(value, None, &mut out, &mut |e| Err(e))?;
    Ok(out)
}

/// Label for an entry at `key` below `prefix`
pub fn join_label(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}{}{}", prefix, LABEL_SEPARATOR, key),
        None => key.to_string(),
    }
}

fn walk(
    value: &ScriptValue,
    path: Option<&str>,
    out: &mut Vec<Series>,
    on_invalid: &mut dyn FnMut(NormalizeError) -> Result<(), NormalizeError>,
) -> Result<(), NormalizeError> {
    match classify(value) {
        Classified::NumberArray(data) => {
            out.push(Series::new(path.unwrap_or(DEFAULT_SERIES_LABEL), data));
        }
        Classified::LabeledGroup(entries) => {
            for (key, child) in entries {
                let label = join_label(path, key);
                walk(child, Some(&label), out, on_invalid)?;
            }
        }
        Classified::Invalid { index } => {
            on_invalid(NormalizeError::NotANumber {
                label: path.unwrap_or(DEFAULT_SERIES_LABEL).to_string(),
                index,
            })?;
        }
        Classified::Scalar => {}
    }
    Ok(())
}
