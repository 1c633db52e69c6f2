//! Table header rendering: plain labels or sort toggles.

use egui::{Align, Layout, RichText, Ui};
use egui_extras::TableRow;
use institutions_business::table::{self, AccessPath, HeaderCell};

/// Renders one header cell per column. Returns the column whose sort toggle
/// was clicked.
pub fn render_table_header(
    header_row: &mut TableRow<'_, '_>,
    headers: &[HeaderCell<'_>],
) -> Option<AccessPath> {
    let mut toggled = None;
    for cell in headers {
        header_row.col(|ui| {
            with_alignment(ui, cell.header.alignment(), |ui| {
                if render_header_cell(ui, cell) {
                    toggled = Some(cell.path);
                }
            });
        });
    }
    toggled
}

/// Text of a header, with the direction arrow on the active sort column.
pub fn header_text(cell: &HeaderCell<'_>) -> String {
    match cell.direction {
        Some(direction) => format!("{} {}", cell.header.label(), direction.arrow()),
        None => cell.header.label().to_owned(),
    }
}

fn render_header_cell(ui: &mut Ui, cell: &HeaderCell<'_>) -> bool {
    let text = RichText::new(header_text(cell)).strong();
    if cell.sortable {
        ui.button(text)
            .on_hover_text("Sortieren")
            .clicked()
    } else {
        ui.label(text);
        false
    }
}

pub(super) fn with_alignment(ui: &mut Ui, align: table::Align, add: impl FnOnce(&mut Ui)) {
    match align {
        table::Align::Left => {
            ui.with_layout(Layout::left_to_right(Align::Center), add);
        }
        table::Align::Right => {
            ui.with_layout(Layout::right_to_left(Align::Center), add);
        }
    }
}
