use eframe::egui;

use super::Requests;
use crate::share::ShareSession;

/// Render the top toolbar panel
pub fn render_toolbar(
    ctx: &egui::Context,
    session: &ShareSession,
    show_qr: &mut bool,
    show_settings: &mut bool,
    requests: &mut Requests,
) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui
                .add_enabled(session.can_select(), egui::Button::new("📁 Select File…"))
                .on_hover_text("Choose the file to share (Ctrl+O)")
                .clicked()
            {
                requests.select_file = true;
            }

            if ui
                .add_enabled(session.can_share(), egui::Button::new("⬆ Share File"))
                .on_hover_text("Upload the selected file (Ctrl+Enter)")
                .clicked()
            {
                requests.share = true;
            }

            ui.separator();

            // link controls only light up once a link and QR exist
            if ui
                .add_enabled(session.can_copy(), egui::Button::new("📋 Copy Link"))
                .on_hover_text("Copy the share link to the clipboard (Ctrl+C)")
                .clicked()
            {
                requests.copy_link = true;
            }

            if ui
                .add_enabled(session.can_show_qr(), egui::Button::new("▦ Show QR Code"))
                .on_hover_text("Open the QR code window (Q)")
                .clicked()
            {
                *show_qr = !*show_qr;
            }

            if ui
                .add_enabled(session.can_show_qr(), egui::Button::new("💾 Save QR…"))
                .on_hover_text("Save the QR code as a PNG image")
                .clicked()
            {
                requests.save_qr = true;
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⚙ Settings").clicked() {
                    *show_settings = !*show_settings;
                }
            });
        });
    });
}
