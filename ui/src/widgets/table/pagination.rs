//! Pagination controls below the table.

use egui::{ComboBox, Ui};
use institutions_business::table::{PAGE_SIZE_OPTIONS, TableModel, TableRow};
use log::error;

/// "first–last von total" for the current page.
pub fn range_label(start: usize, end: usize, total: usize) -> String {
    if total == 0 {
        "0 von 0".to_owned()
    } else {
        format!("{}–{} von {total}", start + 1, end)
    }
}

/// Renders the rows-per-page selector and the page buttons.
pub fn render_pagination<R: TableRow>(ui: &mut Ui, table: &mut TableModel<R>) {
    let total = table.len();
    let pagination = table.pagination();
    let range = pagination.range(total);

    let mut new_size = None;
    let mut new_page = None;

    ui.horizontal(|ui| {
        ui.label("Zeilen pro Seite:");
        ComboBox::from_id_salt("rows_per_page")
            .selected_text(pagination.rows_per_page().to_string())
            .show_ui(ui, |ui| {
                for size in PAGE_SIZE_OPTIONS {
                    if ui
                        .selectable_label(size == pagination.rows_per_page(), size.to_string())
                        .clicked()
                    {
                        new_size = Some(size);
                    }
                }
            });

        ui.separator();
        ui.label(range_label(range.start, range.end, total));
        ui.label(format!(
            "Seite {} von {}",
            pagination.page() + 1,
            table.page_count()
        ));

        if ui
            .add_enabled(pagination.has_previous(), egui::Button::new("Vorherige Seite"))
            .clicked()
        {
            new_page = Some(pagination.page().saturating_sub(1));
        }
        if ui
            .add_enabled(pagination.has_next(total), egui::Button::new("Nächste Seite"))
            .clicked()
        {
            new_page = Some(pagination.page() + 1);
        }
    });

    if let Some(size) = new_size {
        if let Err(err) = table.set_rows_per_page(size) {
            error!("Cannot change page size: {err}");
        }
    }
    if let Some(page) = new_page {
        table.set_page(page);
    }
}
