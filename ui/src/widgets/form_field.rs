//! Labelled single-line input with its validation message below.

use egui::{Response, RichText, Ui};
use institutions_business::{FormField, InstitutionForm};

use crate::utils::colors::COLOR_RED;

pub const FIELD_WIDTH: f32 = 260.0;

/// Renders `field` of `form`. The returned response reports edits.
pub fn form_field(
    ui: &mut Ui,
    form: &mut InstitutionForm,
    field: FormField,
    error: Option<&str>,
) -> Response {
    let response = ui
        .vertical(|ui| {
            ui.label(field.placeholder());
            ui.add(
                egui::TextEdit::singleline(form.value_mut(field))
                    .id_salt(field.path())
                    .desired_width(FIELD_WIDTH)
                    .hint_text(field.placeholder()),
            )
        })
        .inner;

    if let Some(message) = error {
        ui.label(RichText::new(message).color(COLOR_RED).small());
    }
    ui.add_space(4.0);
    response
}
