use eframe::egui;

use crate::settings::{AppSettings, DEFAULT_ENDPOINT};

/// what the settings window asked the app to do this frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsAction {
    None,
    Apply,
    Save,
    Reset,
}

/// Show the settings window with configurable parameters
pub fn show_settings_window(
    ctx: &egui::Context,
    open: &mut bool,
    settings: &mut AppSettings,
) -> SettingsAction {
    let mut action = SettingsAction::None;

    egui::Window::new("⚙ Settings")
        .open(open)
        .resizable(true)
        .default_width(420.0)
        .show(ctx, |ui| {
            egui::CollapsingHeader::new(egui::RichText::new("⬆ Upload").heading())
                .default_open(true)
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("⟳ Applies to the next upload")
                        .color(egui::Color32::from_rgb(200, 150, 100))
                        .small());
                    ui.add_space(5.0);

                    ui.horizontal(|ui| {
                        ui.label("Endpoint:");
                        ui.add(egui::TextEdit::singleline(&mut settings.endpoint)
                            .desired_width(280.0)
                            .hint_text(DEFAULT_ENDPOINT));
                    });
                    ui.label("  Receives the file as multipart field \"file\" and answers with JSON {\"link\": …}");

                    if let Err(e) = settings.validate_endpoint() {
                        ui.colored_label(egui::Color32::from_rgb(220, 70, 70), e.to_string());
                    }
                });

            ui.add_space(10.0);

            egui::CollapsingHeader::new(egui::RichText::new("📋 Clipboard").heading())
                .default_open(true)
                .show(ui, |ui| {
                    ui.checkbox(&mut settings.confirm_copy, "Confirm when the link is copied");
                });

            ui.add_space(15.0);
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Apply Settings").on_hover_text("Apply changes to the current session").clicked() {
                    action = SettingsAction::Apply;
                }
                if ui.button("Save to Disk").on_hover_text("Save settings permanently (Ctrl+S)").clicked() {
                    action = SettingsAction::Save;
                }
                if ui.button("Reset to Defaults").on_hover_text("Restore default settings").clicked() {
                    action = SettingsAction::Reset;
                }
            });

            ui.add_space(15.0);
            ui.separator();
            ui.label(egui::RichText::new("⌨ Keyboard Shortcuts").size(14.0).strong());
            ui.add_space(5.0);

            ui.group(|ui| {
                egui::Grid::new("shortcuts").num_columns(2).show(ui, |ui| {
                    for (key, what) in [
                        ("Ctrl+O", "Select file"),
                        ("Ctrl+Enter", "Share file"),
                        ("Ctrl+C", "Copy link"),
                        ("Q", "Toggle QR window"),
                        ("S", "Toggle Settings window"),
                        ("Ctrl+S", "Save settings"),
                    ] {
                        ui.monospace(key);
                        ui.label(format!("→ {what}"));
                        ui.end_row();
                    }
                });
            });
        });

    action
}
