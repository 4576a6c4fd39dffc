//! State of one sharing session: which file is picked, whether an upload is
//! in flight, the resulting link and QR bitmap, and the visible log.
//!
//! Lives on the UI thread. The only thing shared with the upload thread is the
//! outcome message; the busy flag is an atomic so re-entry is closed even if a
//! click slips through before the button greys out.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::app_types::{UploadJob, UploadUpdate};
use crate::clipboard::Clipboard;
use crate::qr::{self, QrBitmap, QrError};
use crate::uploader::{ShareLink, UploadError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareState {
    NoFile,
    FileSelected,
    Uploading,
    Shared,
}

impl ShareState {
    pub fn label(self) -> &'static str {
        match self {
            ShareState::NoFile => "No file selected",
            ShareState::FileSelected => "Ready to share",
            ShareState::Uploading => "Uploading…",
            ShareState::Shared => "Shared",
        }
    }
}

#[derive(Error, Debug)]
pub enum ShareError {
    #[error("Please select a file first")]
    FileNotSelected,

    #[error("an upload is already in progress")]
    Busy,

    #[error("No share link available")]
    NoLink,

    #[error(transparent)]
    Qr(#[from] QrError),
}

pub struct ShareSession {
    state: ShareState,
    selected: Option<PathBuf>,
    link: Option<ShareLink>,
    qr: Option<QrBitmap>,
    log: Vec<String>,
    busy: AtomicBool,
    // id of the upload whose result we are waiting for
    in_flight: Option<u64>,
    next_id: u64,
}

impl Default for ShareSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ShareSession {
    pub fn new() -> Self {
        Self {
            state: ShareState::NoFile,
            selected: None,
            link: None,
            qr: None,
            log: Vec::new(),
            busy: AtomicBool::new(false),
            in_flight: None,
            next_id: 1,
        }
    }

    pub fn state(&self) -> ShareState {
        self.state
    }

    pub fn selected_file(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    /// base name of the selected file, for labels and log lines
    pub fn selected_name(&self) -> Option<String> {
        self.selected.as_deref().map(display_name)
    }

    pub fn link(&self) -> Option<&ShareLink> {
        self.link.as_ref()
    }

    pub fn qr(&self) -> Option<&QrBitmap> {
        self.qr.as_ref()
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// id of the upload still owed a result, if any
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    pub fn can_select(&self) -> bool {
        self.state != ShareState::Uploading
    }

    pub fn can_share(&self) -> bool {
        self.selected.is_some()
            && matches!(self.state, ShareState::FileSelected | ShareState::Shared)
            && !self.is_busy()
    }

    pub fn can_copy(&self) -> bool {
        self.state == ShareState::Shared && self.link.is_some()
    }

    pub fn can_show_qr(&self) -> bool {
        self.state == ShareState::Shared && self.qr.is_some()
    }

    fn push_log(&mut self, line: impl Into<String>) {
        let line = line.into();
        info!(target: "filebin::log", "{line}");
        self.log.push(line);
    }

    /// Pick the file to share; always lands in `FileSelected`.
    pub fn select_file(&mut self, path: PathBuf) {
        let name = display_name(&path);
        debug!(path = %path.display(), from = ?self.state, "file selected");
        self.selected = Some(path);
        self.link = None;
        self.qr = None;
        self.state = ShareState::FileSelected;
        self.push_log(format!("File selected: {name}"));
    }

    /// Claim the busy flag and hand out the job for the upload thread.
    pub fn begin_share(&mut self) -> Result<UploadJob, ShareError> {
        let path = self.selected.clone().ok_or(ShareError::FileNotSelected)?;
        if self.state == ShareState::Uploading
            || self
                .busy
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
        {
            debug!("share requested while an upload is running");
            return Err(ShareError::Busy);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.in_flight = Some(id);
        self.link = None;
        self.qr = None;
        self.state = ShareState::Uploading;
        self.push_log(format!("Uploading {}…", display_name(&path)));
        Ok(UploadJob { id, path })
    }

    /// Consume an upload outcome on the UI thread. QR generation happens here.
    ///
    /// Only a QR failure is returned, because the caller owes the user a dialog
    /// for it; everything else is reported through the log.
    pub fn complete_upload(&mut self, update: UploadUpdate) -> Result<(), ShareError> {
        if self.in_flight != Some(update.id) {
            warn!(id = update.id, expected = ?self.in_flight, "ignoring result of an unknown upload");
            return Ok(());
        }
        self.in_flight = None;
        self.busy.store(false, Ordering::Release);

        // a new file was picked while this one was still uploading
        if self.state != ShareState::Uploading {
            self.push_log("Discarded upload result for a previously selected file");
            return Ok(());
        }

        match update.result {
            Ok(link) => {
                self.push_log("File uploaded successfully!");
                self.attach_link(link)
            }
            Err(e) => {
                self.push_log(upload_failure_line(&e));
                self.state = ShareState::FileSelected;
                Ok(())
            }
        }
    }

    fn attach_link(&mut self, link: ShareLink) -> Result<(), ShareError> {
        let generated = qr::generate(link.as_str());
        self.link = Some(link);
        match generated {
            Ok(bitmap) => {
                self.qr = Some(bitmap);
                self.state = ShareState::Shared;
                self.push_log("QR Code generated");
                Ok(())
            }
            Err(e) => {
                self.push_log(format!("QR Code error: {e}"));
                self.state = ShareState::FileSelected;
                Err(e.into())
            }
        }
    }

    /// Put the link on the clipboard. Clipboard trouble is not the user's
    /// problem and only shows up in diagnostics.
    pub fn copy_link(&self, clipboard: &mut dyn Clipboard) -> Result<(), ShareError> {
        let link = match self.link.as_ref() {
            Some(link) if self.state == ShareState::Shared => link,
            _ => return Err(ShareError::NoLink),
        };
        match clipboard.copy(link.as_str()) {
            Ok(()) => debug!(link = %link, "link copied"),
            Err(e) => warn!(error = %e, "could not copy link"),
        }
        Ok(())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn upload_failure_line(error: &UploadError) -> String {
    match error {
        UploadError::Server { body, .. } => format!("Upload failed: {body}"),
        UploadError::MissingLink => "Failed to get upload link".to_owned(),
        other => format!("Upload error: {other}"),
    }
}
