use egui::{Color32, Frame, Margin, RichText, Ui};

use crate::utils::colors::COLOR_RED;

/// Red banner with white text, used for request failures.
pub fn error_banner(ui: &mut Ui, message: &str) {
    Frame::NONE
        .fill(COLOR_RED)
        .inner_margin(Margin::symmetric(8, 4))
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.label(RichText::new(message).color(Color32::WHITE));
        });
}
