use eframe::egui::{self, Image, TextureHandle, TextureOptions};

use crate::qr::QrBitmap;

/// Show the QR code window. The texture is uploaded on first display and
/// dropped by the caller whenever the bitmap changes.
pub fn show_qr_window(
    ctx: &egui::Context,
    open: &mut bool,
    qr: Option<&QrBitmap>,
    texture: &mut Option<TextureHandle>,
) {
    let Some(qr) = qr else {
        *open = false;
        return;
    };

    let tex = texture.get_or_insert_with(|| {
        // nearest keeps module edges crisp when scaled down
        ctx.load_texture("qr", qr.to_color_image(), TextureOptions::NEAREST)
    });

    egui::Window::new("QR Code")
        .open(open)
        .resizable(true)
        .collapsible(false)
        .default_size(tex.size_vec2() + egui::vec2(40.0, 80.0))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                aspect_fit(ui, tex);
                ui.add_space(5.0);
                ui.weak(qr.data());
                let (w, h) = qr.image().dimensions();
                ui.weak(format!("{w}×{h} px, {m}×{m} modules", m = qr.modules()));
            });
        });
}

/// Draw a texture no larger than its native size, shrunk to fit the space left
fn aspect_fit(ui: &mut egui::Ui, tex: &TextureHandle) {
    // leave room for the caption underneath
    let avail = ui.available_size() - egui::vec2(0.0, 40.0);
    let tex_size = tex.size_vec2();
    let scale = (avail.x / tex_size.x).min(avail.y / tex_size.y).clamp(0.1, 1.0);
    ui.add(Image::new(tex).fit_to_exact_size(tex_size * scale));
}
