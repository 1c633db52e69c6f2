use thiserror::Error;

/// Errors raised while building or querying a [`TableModel`](super::TableModel).
///
/// All of these describe a mismatch between the header tree and the data,
/// so they are surfaced to the caller instead of being rendered around.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("header `{key}` has no label")]
    MissingLabel { key: String },

    #[error("header group `{key}` has no children")]
    EmptyGroup { key: String },

    #[error("header key `{key}` must be non-empty and must not contain '.'")]
    InvalidKey { key: String },

    #[error("header key `{key}` is declared twice")]
    DuplicateKey { key: String },

    #[error("no header or field at path `{path}`")]
    UnknownPath { path: String },

    #[error("row `{row}` has no value at path `{path}`")]
    PathMismatch { row: String, path: String },

    #[error("row could not be serialized: {reason}")]
    Serialize { reason: String },

    #[error("header `{label}` is not sortable")]
    NotSortable { label: String },

    #[error("unsupported page size {size}")]
    UnsupportedPageSize { size: usize },
}
