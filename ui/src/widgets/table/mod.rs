//! Generic table widget over a [`TableModel`].
//!
//! The rendering is split into small pieces:
//! - `columns`: column widths derived from the headers
//! - `header`: sortable header buttons
//! - `row`: page rows, clickable for navigation
//! - `cells`: rendering of one [`CellContent`]
//! - `pagination`: page buttons and rows-per-page selector

mod cells;
pub mod columns;
pub mod header;
pub mod pagination;
pub mod row;

use egui::{Response, Ui};
use egui_extras::TableBuilder;
use institutions_business::append_segment;
use institutions_business::table::{AccessPath, TableModel, TableRow};
use log::error;

use columns::{HEADER_HEIGHT, ROW_HEIGHT, table_columns};

/// Shows `table` with its pagination controls.
///
/// Clicking a row calls `navigate` with the row id appended to
/// `current_path`. Header clicks toggle the sort.
pub fn data_table<R: TableRow>(
    ui: &mut Ui,
    id_salt: &str,
    table: &mut TableModel<R>,
    current_path: &str,
    mut navigate: impl FnMut(String),
) -> Response {
    let mut toggled: Option<AccessPath> = None;
    let mut clicked = None;

    let response = ui
        .vertical(|ui| {
            let headers = table.headers();
            let rows = table.page_rows();

            let mut builder = TableBuilder::new(ui)
                .id_salt(id_salt)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .sense(egui::Sense::click());
            for column in table_columns(&headers) {
                builder = builder.column(column);
            }

            builder
                .header(HEADER_HEIGHT, |mut header_row| {
                    toggled = header::render_table_header(&mut header_row, &headers);
                })
                .body(|mut body| {
                    for page_row in &rows {
                        body.row(ROW_HEIGHT, |mut table_row| {
                            if row::render_row(&mut table_row, page_row) {
                                clicked = Some(page_row.id.clone());
                            }
                        });
                    }
                });

            if rows.is_empty() {
                ui.weak("Keine Einträge");
            }
        })
        .response;

    if let Some(path) = toggled {
        if let Err(err) = table.toggle_sort(path) {
            error!("Cannot sort table: {err}");
        }
    }

    pagination::render_pagination(ui, table);

    if let Some(id) = clicked {
        navigate(append_segment(current_path, &id.to_string()));
    }

    response
}
