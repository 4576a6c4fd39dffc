mod app;
mod app_types;
mod clipboard;
mod qr;
mod settings;
mod share;
mod ui;
mod upload_thread;
mod uploader;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Window dimensions
const WINDOW_SIZE: [f32; 2] = [600.0, 600.0];

fn main() -> eframe::Result<()> {
    init_logging();

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size([480.0, 400.0])
            .with_title("Filebin - Easy Cloud File Sharing"),
        ..Default::default()
    };
    eframe::run_native(
        "Filebin",
        native_options,
        Box::new(|cc| {
            let app = crate::app::FilebinApp::new(cc)?;
            Ok::<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>>(Box::new(app))
        }),
    )
}

/// Initialize logging with tracing; RUST_LOG overrides the default filter
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("filebin=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
