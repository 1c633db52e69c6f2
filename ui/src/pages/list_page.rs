//! Institutions list: search, reload and the generic table.

use egui::{Key, Response, Ui};

use crate::state::State;
use crate::widgets;

pub const SEARCH_WIDTH: f32 = 180.0;

/// Renders the list page. Loads the institutions the first time it is shown.
pub fn list_page(state: &mut State, ui: &mut Ui) -> Response {
    state.ensure_loaded();

    ui.vertical(|ui| {
        ui.heading("Institutionen");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            let search = ui.add(
                egui::TextEdit::singleline(&mut state.institutions.search_input)
                    .desired_width(SEARCH_WIDTH)
                    .hint_text("INST-Code"),
            );
            let submitted = search.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            if ui.button("Suchen").clicked() || submitted {
                state.reload();
            }
            if ui.button("Neu laden").clicked() {
                state.institutions.search_input.clear();
                state.reload();
            }
            if state.institutions.is_fetching {
                ui.spinner();
                ui.label("Lädt...");
            } else if !state.institutions.shown_query.is_empty() {
                ui.weak(format!("Suche: {}", state.institutions.shown_query));
            }
        });

        if let Some(error) = &state.institutions.error {
            ui.add_space(4.0);
            widgets::error_banner(ui, &format!("Fehler: {error}"));
        }
        ui.add_space(8.0);

        let current_path = state.route.path();
        let mut target = None;
        widgets::data_table(
            ui,
            "institutions_table",
            &mut state.institutions.table,
            &current_path,
            |path| target = Some(path),
        );
        if let Some(path) = target {
            state.navigate(&path);
        }
    })
    .response
}
