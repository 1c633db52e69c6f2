#![warn(clippy::all, rust_2018_idioms)]

//! egui front-end for administering institutions.

pub mod app;
pub mod pages;
pub mod state;
pub mod utils;
pub mod widgets;

pub use app::InstitutionsApp;
