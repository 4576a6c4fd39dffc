use eframe::egui;

use crate::share::{ShareSession, ShareState};

/// Render the bottom status bar panel
pub fn render_status_bar(ctx: &egui::Context, session: &ShareSession, endpoint: &str) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            // left: session state
            let state = session.state();
            let color = match state {
                ShareState::NoFile => ui.visuals().weak_text_color(),
                ShareState::FileSelected => ui.visuals().text_color(),
                ShareState::Uploading => egui::Color32::from_rgb(100, 150, 255),
                ShareState::Shared => egui::Color32::from_rgb(100, 200, 100),
            };
            ui.label(egui::RichText::new(state.label()).color(color));

            if let Some(link) = session.link().filter(|_| state == ShareState::Shared) {
                ui.separator();
                ui.hyperlink_to(link.as_str(), link.as_str());
            }

            // right-aligned: upload target
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(endpoint);
            });
        });
    });
}
