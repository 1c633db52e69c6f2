//! Row identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a table row. Institutions use both numeric ids and
/// textual codes such as `LLGGI`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Number(i64),
    Text(String),
}

impl RowId {
    /// Reads an id typed by a user or taken from a path segment.
    ///
    /// Text that parses as an integer becomes [`RowId::Number`].
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        raw.parse::<i64>()
            .map_or_else(|_| Self::Text(raw.to_string()), Self::Number)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RowId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// A record the generic table can show.
///
/// Rows are serialized once when handed to the table; header paths are
/// resolved against the resulting JSON object tree.
pub trait TableRow: Serialize {
    fn id(&self) -> RowId;
}
