//! Row rendering for the generic table.

use egui_extras::TableRow;
use institutions_business::table::PageRow;

use super::cells::{draw_cell_bottom_border, render_cell};

/// Renders every cell of `page_row`. Returns true when the row was clicked.
pub fn render_row<R>(table_row: &mut TableRow<'_, '_>, page_row: &PageRow<'_, R>) -> bool {
    for cell in &page_row.cells {
        table_row.col(|ui| {
            render_cell(ui, cell);
            draw_cell_bottom_border(ui);
        });
    }
    table_row.response().clicked()
}
