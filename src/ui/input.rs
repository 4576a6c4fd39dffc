use eframe::egui;

use super::Requests;
use crate::share::ShareSession;

/// Handle keyboard shortcuts and files dropped onto the window
pub fn handle_keyboard_input(
    ctx: &egui::Context,
    session: &ShareSession,
    show_qr: &mut bool,
    show_settings: &mut bool,
    requests: &mut Requests,
) {
    // don't steal keys while the endpoint field is being edited
    let typing = ctx.wants_keyboard_input();

    ctx.input(|i| {
        // ctrl+O: select file
        if i.key_pressed(egui::Key::O) && i.modifiers.command && session.can_select() {
            requests.select_file = true;
        }

        // ctrl+enter: share
        if i.key_pressed(egui::Key::Enter) && i.modifiers.command && session.can_share() {
            requests.share = true;
        }

        // ctrl+C arrives as a copy event on most backends
        if !typing && session.can_copy() && i.events.iter().any(|e| matches!(e, egui::Event::Copy)) {
            requests.copy_link = true;
        }

        // q: toggle QR window
        if !typing && i.key_pressed(egui::Key::Q) && session.can_show_qr() {
            *show_qr = !*show_qr;
        }

        // s: toggle settings window
        if !typing && i.key_pressed(egui::Key::S) && !i.modifiers.command {
            *show_settings = !*show_settings;
        }

        // ctrl+S: save settings
        if i.key_pressed(egui::Key::S) && i.modifiers.command {
            requests.save_settings = true;
        }

        // drag & drop: first dropped file with a real path wins
        if session.can_select() {
            if let Some(path) = i.raw.dropped_files.iter().find_map(|f| f.path.clone()) {
                requests.dropped_file = Some(path);
            }
        }
    });
}
