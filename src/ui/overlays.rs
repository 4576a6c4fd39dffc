use eframe::egui;

use crate::app_types::{Notice, NoticeKind};

/// Dim the main window and show the pending notice centred on top of it.
/// Clears `notice` once the user dismisses it.
pub fn show_notice(ctx: &egui::Context, notice: &mut Option<Notice>) {
    let Some(current) = notice.as_ref() else {
        return;
    };

    // shade everything behind the dialog
    let screen = ctx.screen_rect();
    ctx.layer_painter(egui::LayerId::new(egui::Order::Middle, egui::Id::new("notice_shade")))
        .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(120));

    let (icon, color) = match current.kind {
        NoticeKind::Info => ("ℹ", egui::Color32::from_rgb(100, 150, 255)),
        NoticeKind::Warning => ("⚠", egui::Color32::from_rgb(230, 170, 60)),
        NoticeKind::Error => ("✖", egui::Color32::from_rgb(220, 70, 70)),
    };

    let mut dismissed = false;
    egui::Window::new(current.title.as_str())
        .id(egui::Id::new("notice"))
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .collapsible(false)
        .resizable(false)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(icon).size(24.0).color(color));
                ui.label(current.message.as_str());
            });
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("  OK  ").clicked() {
                    dismissed = true;
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape)) {
        dismissed = true;
    }
    if dismissed {
        *notice = None;
    }
}
