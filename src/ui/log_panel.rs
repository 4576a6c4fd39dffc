use eframe::egui;

use super::Requests;
use crate::share::{ShareSession, ShareState};

/// Render the central panel: selected file, drop zone hint and the activity log
pub fn render_central_panel(ctx: &egui::Context, session: &ShareSession, requests: &mut Requests) {
    let hovering_file = ctx.input(|i| !i.raw.hovered_files.is_empty());

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(10.0);
            let name = session.selected_name().unwrap_or_else(|| "None".to_owned());
            let label = ui.label(egui::RichText::new(format!("Selected File: {name}")).size(16.0));
            if let Some(path) = session.selected_file() {
                label.on_hover_text(path.display().to_string());
            }
            ui.add_space(5.0);

            if session.state() == ShareState::NoFile {
                render_drop_zone(ui, hovering_file, requests);
            } else if session.state() == ShareState::Uploading {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.label("Uploading…");
                });
            }
        });

        ui.add_space(10.0);
        ui.label(egui::RichText::new("Log").strong());
        render_log(ui, session.log());
    });
}

/// Placeholder shown until the first file is picked
fn render_drop_zone(ui: &mut egui::Ui, hovering_file: bool, requests: &mut Requests) {
    let accent = egui::Color32::from_rgb(100, 150, 255);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(400.0, 120.0), egui::Sense::hover());
    let stroke_color = if hovering_file { accent } else { accent.linear_multiply(0.5) };
    ui.painter().rect_stroke(
        rect,
        8.0,
        egui::Stroke::new(2.0, stroke_color),
        egui::epaint::StrokeKind::Outside,
    );

    let mut child_ui = ui.new_child(egui::UiBuilder::new().max_rect(rect));
    child_ui.vertical_centered(|ui| {
        ui.add_space(20.0);
        ui.label(egui::RichText::new("Drag & Drop a file here").size(18.0));
        ui.label("or");
        if ui.button("Select File… (Ctrl+O)").clicked() {
            requests.select_file = true;
        }
    });
}

fn render_log(ui: &mut egui::Ui, lines: &[String]) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if lines.is_empty() {
                    ui.weak("Nothing yet.");
                }
                for line in lines {
                    ui.add(egui::Label::new(egui::RichText::new(line).monospace()).wrap());
                }
            });
    });
}
