//! Generic, header-driven table.
//!
//! The model is split into small pieces:
//! - `header`: nested header tree and leaf column derivation
//! - `path`: dotted access paths and lookup in serialized rows
//! - `sort`: single-key sort state and value comparison
//! - `pagination`: page size options and page slicing
//! - `cell`: displayable cell content and stock formatters
//! - `model`: [`TableModel`], tying it all together

mod cell;
mod error;
mod header;
mod model;
mod pagination;
mod path;
mod row;
mod sort;

pub use cell::{CellContent, checkbox};
pub use error::TableError;
pub use header::{Align, Formatter, Header, HeaderNode, HeaderSpec};
pub use model::{Cell, HeaderCell, PageRow, TableModel};
pub use pagination::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, Pagination};
pub use path::AccessPath;
pub use row::{RowId, TableRow};
pub use sort::{SortDirection, SortState, compare_values};
