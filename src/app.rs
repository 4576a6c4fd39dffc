use eframe::egui::{self, TextureHandle};
use std::path::PathBuf;
use std::sync::{mpsc::{self, Receiver, Sender}, Arc};
use std::thread;

use tracing::{debug, error, info, warn};

use crate::app_types::{Notice, UploadUpdate};
use crate::clipboard::SystemClipboard;
use crate::settings::AppSettings;
use crate::qr::QrBitmap;
use crate::share::{ShareError, ShareSession};
use crate::ui::{self, Requests, SettingsAction};
use crate::upload_thread::{reap_upload, spawn_upload};
use crate::uploader::{HttpUploader, Upload, UploadError};

pub struct FilebinApp {
    session: ShareSession,

    // Upload target and the channel results come back on
    http: HttpUploader,
    uploader: Arc<dyn Upload>,
    update_tx: Sender<UploadUpdate>,
    update_rx: Receiver<UploadUpdate>,
    upload_thread: Option<(u64, thread::JoinHandle<()>)>,

    clipboard: SystemClipboard,

    // QR texture, rebuilt whenever the session gets a new bitmap
    qr_tex: Option<TextureHandle>,

    // Window state
    show_qr: bool,
    show_settings: bool,
    notice: Option<Notice>,
    settings: AppSettings,
}

impl FilebinApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        // Load settings from disk (or use defaults if file doesn't exist)
        let settings = AppSettings::load();
        let http = HttpUploader::new(settings.endpoint.trim())?;
        info!(endpoint = %http.endpoint(), "ready");

        let (update_tx, update_rx) = mpsc::channel();
        Ok(Self {
            session: ShareSession::new(),
            uploader: Arc::new(http.clone()),
            http,
            update_tx,
            update_rx,
            upload_thread: None,
            clipboard: SystemClipboard::default(),
            qr_tex: None,
            show_qr: false,
            show_settings: false,
            notice: None,
            settings,
        })
    }

    /// Open the native file dialog and make the pick the selected file
    fn pick_file(&mut self) {
        let mut dialog = rfd::FileDialog::new().set_title("Select a file to share");
        if let Some(dir) = self.settings.last_directory.as_deref().filter(|d| d.is_dir()) {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.select_file(path);
        }
    }

    fn select_file(&mut self, path: PathBuf) {
        if let Some(parent) = path.parent() {
            self.settings.last_directory = Some(parent.to_path_buf());
        }
        self.session.select_file(path);
        self.reset_qr_view();
    }

    /// Start the upload of the selected file on a background thread
    fn share(&mut self, ctx: &egui::Context) {
        profiling::scope!("share");
        let job = match self.session.begin_share() {
            Ok(job) => job,
            Err(ShareError::FileNotSelected) => {
                self.notice = Some(Notice::warning("Warning", ShareError::FileNotSelected.to_string()));
                return;
            }
            Err(e) => {
                debug!(error = %e, "share ignored");
                return;
            }
        };
        self.reset_qr_view();

        let id = job.id;
        let ctx_clone = ctx.clone();
        match spawn_upload(self.uploader.clone(), job, self.update_tx.clone(), move || {
            ctx_clone.request_repaint();
        }) {
            Ok(handle) => self.upload_thread = Some((id, handle)),
            Err(e) => {
                error!(error = %e, "could not spawn upload thread");
                self.apply_update(UploadUpdate { id, result: Err(UploadError::Spawn(e)) });
            }
        }
    }

    fn copy_link(&mut self) {
        match self.session.copy_link(&mut self.clipboard) {
            Ok(()) if self.settings.confirm_copy => {
                self.notice = Some(Notice::info("Link Copied", "Share link copied to clipboard!"));
            }
            Ok(()) => {}
            Err(e) => self.notice = Some(Notice::warning("Warning", e.to_string())),
        }
    }

    fn save_qr(&mut self) {
        let Some(qr) = self.session.qr() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .set_title("Save QR code")
            .add_filter("PNG image", &["png"])
            .set_file_name("qr.png")
            .save_file()
        else {
            return;
        };
        match qr.save_png(&path) {
            Ok(()) => info!(path = %path.display(), "QR code saved"),
            Err(e) => {
                warn!(error = %e, "saving QR code failed");
                self.notice = Some(Notice::error("Save Failed", e.to_string()));
            }
        }
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.settings.save() {
            error!(error = %e, "failed to save settings");
            self.notice = Some(Notice::error("Settings", format!("Failed to save settings: {e:#}")));
        }
    }

    fn apply_and_save_settings(&mut self) {
        if self.apply_settings() {
            self.save_settings();
        }
    }

    /// Point future uploads at the endpoint currently in the settings
    fn apply_settings(&mut self) -> bool {
        match self.settings.validate_endpoint() {
            Ok(url) => {
                if url.as_str() != self.http.endpoint() {
                    info!(endpoint = %url, "upload endpoint changed");
                    self.http = self.http.with_endpoint(url.as_str());
                    self.uploader = Arc::new(self.http.clone());
                }
                true
            }
            Err(e) => {
                self.notice = Some(Notice::warning("Settings", format!("{e:#}")));
                false
            }
        }
    }

    fn reset_qr_view(&mut self) {
        self.qr_tex = None;
        self.show_qr = false;
    }

    fn apply_update(&mut self, update: UploadUpdate) {
        settle(&mut self.session, &mut self.qr_tex, &mut self.notice, |session| {
            session.complete_upload(update)
        });
    }

    /// Process results from the background upload thread
    fn poll_upload_updates(&mut self) {
        profiling::scope!("poll_upload_updates");
        while let Ok(update) = self.update_rx.try_recv() {
            self.apply_update(update);
        }

        let finished = self
            .upload_thread
            .as_ref()
            .is_some_and(|(_, handle)| handle.is_finished());
        if finished {
            if let Some(thread) = self.upload_thread.take() {
                settle(&mut self.session, &mut self.qr_tex, &mut self.notice, |session| {
                    reap_upload(session, thread, &self.update_rx)
                });
            }
        }
    }

    fn handle_requests(&mut self, ctx: &egui::Context, requests: Requests) {
        if let Some(path) = requests.dropped_file {
            self.select_file(path);
        } else if requests.select_file {
            self.pick_file();
        }
        if requests.share {
            self.share(ctx);
        }
        if requests.copy_link {
            self.copy_link();
        }
        if requests.save_qr {
            self.save_qr();
        }
        if requests.save_settings {
            self.apply_and_save_settings();
        }
    }
}

impl eframe::App for FilebinApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        profiling::scope!("update");

        // Poll for results from the upload thread
        self.poll_upload_updates();

        let mut requests = Requests::default();

        // Shortcuts are ignored while a notice is waiting to be dismissed
        if self.notice.is_none() {
            ui::handle_keyboard_input(ctx, &self.session, &mut self.show_qr, &mut self.show_settings, &mut requests);
        }

        ui::render_toolbar(ctx, &self.session, &mut self.show_qr, &mut self.show_settings, &mut requests);
        ui::render_status_bar(ctx, &self.session, self.http.endpoint());
        ui::render_central_panel(ctx, &self.session, &mut requests);

        if self.show_qr {
            ui::show_qr_window(ctx, &mut self.show_qr, self.session.qr(), &mut self.qr_tex);
        }

        if self.show_settings {
            match ui::show_settings_window(ctx, &mut self.show_settings, &mut self.settings) {
                SettingsAction::None => {}
                SettingsAction::Apply => {
                    self.apply_settings();
                }
                SettingsAction::Save => self.apply_and_save_settings(),
                SettingsAction::Reset => {
                    self.settings = AppSettings::default();
                    self.apply_settings();
                }
            }
        }

        ui::show_notice(ctx, &mut self.notice);

        if self.notice.is_none() {
            self.handle_requests(ctx, requests);
        }
    }
}

/// Run a session change, report a QR failure and drop the texture once the
/// bitmap it was made from is replaced or gone
fn settle(
    session: &mut ShareSession,
    qr_tex: &mut Option<TextureHandle>,
    notice: &mut Option<Notice>,
    change: impl FnOnce(&mut ShareSession) -> Result<(), ShareError>,
) {
    let before = session.qr().map(|qr| qr.data().to_owned());
    if let Err(e) = change(session) {
        *notice = Some(Notice::error("QR Code Error", e.to_string()));
    }
    if session.qr().map(QrBitmap::data) != before.as_deref() {
        *qr_tex = None;
    }
}
