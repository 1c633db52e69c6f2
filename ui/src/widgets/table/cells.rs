//! Cell rendering for the generic table.

use egui::{Stroke, Ui};
use institutions_business::table::{Cell, CellContent};

use super::header::with_alignment;

/// Renders a cell's content with its column alignment.
pub fn render_cell(ui: &mut Ui, cell: &Cell) {
    with_alignment(ui, cell.align, |ui| match &cell.content {
        CellContent::Text(text) => {
            ui.add(egui::Label::new(text).truncate());
        }
        CellContent::Check(checked) => {
            let mut checked = *checked;
            ui.add_enabled(false, egui::Checkbox::without_text(&mut checked));
        }
    });
}

/// Draws a bottom border line for a cell.
pub fn draw_cell_bottom_border(ui: &mut Ui) {
    let rect = ui.available_rect_before_wrap();
    let border_color = ui.visuals().widgets.noninteractive.bg_stroke.color;
    ui.painter().hline(
        rect.left()..=rect.right(),
        rect.bottom(),
        Stroke::new(1.0, border_color),
    );
}
