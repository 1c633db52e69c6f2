use egui::Ui;
use institutions_business::Route;

/// Links to the list and create pages. Returns the path of a clicked link.
pub fn nav_bar(ui: &mut Ui, current: &Route) -> Option<String> {
    let mut target = None;
    ui.horizontal(|ui| {
        ui.strong("Institutionsverwaltung");
        ui.separator();
        for route in [Route::List, Route::Create] {
            if ui
                .selectable_label(current == &route, route.title())
                .clicked()
            {
                target = Some(route.path());
            }
        }
    });
    target
}
