//! Create-institution form page.

use egui::{Response, Ui};
use institutions_business::FormField;

use crate::state::State;
use crate::widgets;

/// Renders the create form. Fields are validated as they change and the
/// whole form on "Weiter".
pub fn create_page(state: &mut State, ui: &mut Ui) -> Response {
    ui.vertical(|ui| {
        ui.heading("Neue Institution");
        ui.add_space(8.0);

        if let Some(error) = state.create.submit_error() {
            widgets::error_banner(ui, &format!("Speichern fehlgeschlagen: {error}"));
            ui.add_space(8.0);
        }

        let mut changed = Vec::new();
        for field in FormField::ALL {
            let error = state.create.error_for(field);
            if widgets::form_field(ui, &mut state.create.form, field, error).changed() {
                changed.push(field);
            }
        }
        for field in changed {
            state.create.field_changed(field);
        }

        ui.checkbox(
            &mut state.create.form.school_administrative_district,
            "Liegt im Schulverwaltungsbezirk?",
        );
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            let submitting = state.create.is_submitting();
            if ui
                .add_enabled(!submitting, egui::Button::new("Weiter"))
                .clicked()
            {
                state.submit_create();
            }
            if submitting {
                ui.spinner();
            }
        });
    })
    .response
}
