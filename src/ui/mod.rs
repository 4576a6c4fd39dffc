// UI module organization
// Each submodule draws one part of the window and reports clicks back as requests

pub mod input;
pub mod log_panel;
pub mod overlays;
pub mod qr_window;
pub mod settings_window;
pub mod status_bar;
pub mod toolbar;

use std::path::PathBuf;

pub use input::handle_keyboard_input;
pub use log_panel::render_central_panel;
pub use overlays::show_notice;
pub use qr_window::show_qr_window;
pub use settings_window::{show_settings_window, SettingsAction};
pub use status_bar::render_status_bar;
pub use toolbar::render_toolbar;

/// what the user asked for during this frame; acted on once drawing is done
#[derive(Debug, Default)]
pub struct Requests {
    pub select_file: bool,
    pub share: bool,
    pub copy_link: bool,
    pub save_qr: bool,
    pub save_settings: bool,
    pub dropped_file: Option<PathBuf>,
}
