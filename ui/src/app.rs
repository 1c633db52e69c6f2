use institutions_business::Route;

use crate::{pages, state::State, widgets};

pub struct InstitutionsApp {
    state: State,
}

impl InstitutionsApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

impl eframe::App for InstitutionsApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.attach_repaint(ctx);
        self.state.poll_events();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if let Some(path) = widgets::nav_bar(ui, &self.state.route) {
                    self.state.navigate(&path);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.state.route.clone() {
                Route::List => {
                    pages::list_page(&mut self.state, ui);
                }
                Route::Create => {
                    pages::create_page(&mut self.state, ui);
                }
                Route::Detail(id) => {
                    pages::detail_page(&mut self.state, ui, &id);
                }
            });
        });
    }
}
