mod error_banner;
mod form_field;
mod nav_bar;
pub mod table;

pub use error_banner::error_banner;
pub use form_field::form_field;
pub use nav_bar::nav_bar;
pub use table::data_table;
