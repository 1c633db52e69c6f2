//! Pages module for the application.
//!
//! One page per route:
//! - `list_page`: searchable, sortable table of all institutions
//! - `create_page`: form for a new institution
//! - `detail_page`: every field of a single institution

mod create_page;
mod detail_page;
mod list_page;

pub use create_page::create_page;
pub use detail_page::detail_page;
pub use list_page::list_page;
