//! Single-key column sorting.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde_json::Value;

use super::AccessPath;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "⏶",
            Self::Descending => "⏷",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// The active sort key, if any. At most one column sorts at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<(AccessPath, SortDirection)>,
}

impl SortState {
    /// Flips the direction of the active key, or makes `path` the new
    /// ascending key.
    pub fn toggle(&mut self, path: AccessPath) {
        self.active = match self.active {
            Some((current, direction)) if current == path => Some((current, direction.flip())),
            _ => Some((path, SortDirection::Ascending)),
        };
    }

    pub fn active(&self) -> Option<(AccessPath, SortDirection)> {
        self.active
    }

    /// Direction `path` is sorted in, if it is the active key.
    pub fn direction_of(&self, path: &AccessPath) -> Option<SortDirection> {
        self.active
            .filter(|(current, _)| current == path)
            .map(|(_, direction)| direction)
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

/// Orders two field values.
///
/// Values that both read as numbers compare numerically, two non-numbers
/// compare by their display text. A number always sorts before a
/// non-number so the ordering stays total over mixed columns.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (as_number(a), as_number(b)) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => display_text(a).cmp(&display_text(b)),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn display_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(text) => Cow::Borrowed(text),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}

/// Stable sort of row indices by their key values.
///
/// Rows with equal keys keep their input order in both directions.
pub fn sorted_order(keys: &[&Value], direction: SortDirection) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| direction.apply(compare_values(keys[a], keys[b])));
    order
}
