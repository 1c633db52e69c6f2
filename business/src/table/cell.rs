//! Displayable cell content.

use std::fmt;

use serde_json::Value;

/// What a table cell shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    Text(String),
    /// A checkbox glyph, checked or not.
    Check(bool),
}

impl CellContent {
    /// Raw rendering used when a header declares no formatter.
    ///
    /// Strings are shown as-is, `null` as empty text. Everything else,
    /// including nested objects and arrays, uses its JSON text.
    pub fn from_raw(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text.clone()),
            Value::Null => Self::Text(String::new()),
            other => Self::Text(other.to_string()),
        }
    }
}

impl fmt::Display for CellContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Check(true) => f.write_str("☑"),
            Self::Check(false) => f.write_str("☐"),
        }
    }
}

/// Formatter rendering a boolean field as a checkbox.
///
/// Anything that is not `true` renders unchecked.
pub fn checkbox(value: &Value) -> CellContent {
    CellContent::Check(value.as_bool().unwrap_or(false))
}
