//! Detail view of one institution.

use egui::{Grid, Response, Ui};
use institutions_business::table::RowId;
use institutions_business::{Institution, Route};

use crate::state::State;
use crate::widgets;

/// Renders the institution with code `id`, searching for it once when it is
/// not among the loaded rows.
pub fn detail_page(state: &mut State, ui: &mut Ui, id: &RowId) -> Response {
    state.look_up(id);

    ui.vertical(|ui| {
        if ui.button("Zurück").clicked() {
            state.navigate(&Route::List.path());
            return;
        }
        ui.add_space(8.0);

        match state.institutions.detail(id) {
            Some(institution) => institution_details(ui, institution),
            None if state.institutions.is_looking_up(id) => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Lädt...");
                });
            }
            None => {
                if let Some(error) = state.institutions.lookup_error(id) {
                    widgets::error_banner(ui, &format!("Fehler: {error}"));
                    ui.add_space(8.0);
                }
                ui.heading("Institution nicht gefunden");
                ui.label(format!("Kein Eintrag mit INST-Code {id}."));
            }
        }
    })
    .response
}

fn institution_details(ui: &mut Ui, institution: &Institution) {
    ui.heading(&institution.name);
    ui.add_space(8.0);

    let address = &institution.address;
    let district = if institution.school_administrative_district {
        "Ja"
    } else {
        "Nein"
    };
    let rows = [
        ("INST-Code", institution.id.to_string()),
        ("Straße", address.street.clone()),
        ("Hausnummer", address.street_number.to_string()),
        ("PLZ", address.zip_code.to_string()),
        ("Ort", address.town.clone()),
        ("Telefonnummer", institution.phone_number.to_string()),
        ("Schulverwaltungsbezirk", district.to_owned()),
    ];

    Grid::new("institution_details")
        .num_columns(2)
        .spacing([16.0, 6.0])
        .striped(true)
        .show(ui, |ui| {
            for (label, value) in rows {
                ui.strong(label);
                ui.label(value);
                ui.end_row();
            }
        });
}

#[cfg(test)]
mod detail_page_test {
    use std::sync::Arc;

    use egui_kittest::Harness;
    use institutions_business::table::RowId;
    use institutions_business::{BusinessConfig, MockFetcher, Route};
    use kittest::Queryable;

    use crate::state::State;

    fn detail_harness(id: RowId) -> Harness<'static, State> {
        let mut state =
            State::new(BusinessConfig::default(), Arc::new(MockFetcher::default())).unwrap();
        state.navigate(&Route::Detail(id.clone()).path());
        Harness::new_ui_state(
            move |ui, state| {
                state.poll_events();
                super::detail_page(state, ui, &id);
            },
            state,
        )
    }

    #[test]
    fn test_detail_shows_fields() {
        let mut harness = detail_harness(RowId::from("LLGGI"));
        harness.step();
        harness.step();

        assert!(
            harness
                .query_by_label_contains("Landgraf Ludwigs Gymnasium Gießen")
                .is_some()
        );
        assert!(harness.query_by_label("Reichenberger Straße").is_some());
        assert!(harness.query_by_label("35396").is_some());
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut harness = detail_harness(RowId::from("XYZ"));
        harness.step();
        harness.step();

        assert!(harness.query_by_label("Institution nicht gefunden").is_some());
    }

    #[test]
    fn test_back_button_returns_to_list() {
        let mut harness = detail_harness(RowId::Number(3));
        harness.step();

        harness.get_by_label("Zurück").click();
        harness.step();

        assert_eq!(harness.state().route, Route::List);
    }
}
