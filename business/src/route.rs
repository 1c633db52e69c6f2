//! Route state for page navigation.
//!
//! This module defines the route enum that determines which page to display,
//! and the path strings the navigation bar and table rows navigate with.

use serde::{Deserialize, Serialize};

use crate::table::RowId;

const LIST_PATH: &str = "/institutions";
const CREATE_SEGMENT: &str = "new";

/// Represents the current page/route of the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Sortable, paginated list of institutions
    #[default]
    List,
    /// Form for a new institution
    Create,
    /// Detail view of one institution
    Detail(RowId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::List => LIST_PATH.to_string(),
            Route::Create => append_segment(LIST_PATH, CREATE_SEGMENT),
            Route::Detail(id) => append_segment(LIST_PATH, &id.to_string()),
        }
    }

    /// Parses a path produced by [`Route::path`] or [`append_segment`].
    ///
    /// `/` is treated as the list. Anything else outside `/institutions`
    /// is unknown.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() || trimmed == LIST_PATH {
            return Some(Route::List);
        }

        let rest = trimmed.strip_prefix(LIST_PATH)?.strip_prefix('/')?;
        match rest {
            "" => Some(Route::List),
            CREATE_SEGMENT => Some(Route::Create),
            id if !id.contains('/') => Some(Route::Detail(RowId::parse(id))),
            _ => None,
        }
    }

    /// Name shown in the navigation bar.
    pub fn title(&self) -> String {
        match self {
            Route::List => "Institutionen".to_string(),
            Route::Create => "Neue Institution".to_string(),
            Route::Detail(id) => format!("Institution {id}"),
        }
    }
}

/// Joins `segment` onto `current` with exactly one `/`.
pub fn append_segment(current: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        current.trim_end_matches('/'),
        segment.trim_start_matches('/')
    )
}
