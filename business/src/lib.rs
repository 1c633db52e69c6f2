//! Business logic for the institutions admin front-end.
//!
//! Everything here is free of egui: the generic [`table`] model, the
//! institution record, the create form, routing, configuration and the REST
//! client. The `institutions-ui` crate renders it.

mod api;
mod config;
mod institution;
mod institution_form;
mod institutions_state;
mod route;
pub mod table;

#[cfg(any(test, feature = "test-utils"))]
pub use api::MockFetcher;
pub use api::{ApiClient, ApiError, ApiEvent, EhttpFetcher, FetchCallback, FetchService};
pub use config::BusinessConfig;
pub use institution::{
    Address, Institution, SORTABLE_LABELS, fixtures, institution_headers, institutions_table,
    search_fixtures,
};
pub use institution_form::{CreateInstitutionState, FieldError, FormField, InstitutionForm};
pub use institutions_state::InstitutionsState;
pub use route::{Route, append_segment};
