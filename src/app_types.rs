use std::path::PathBuf;

use crate::uploader::{ShareLink, UploadError};

// work handed from UI to upload thread
#[derive(Clone, Debug)]
pub struct UploadJob {
    pub id: u64,
    pub path: PathBuf,
}

// result handed from upload thread back to UI
#[derive(Debug)]
pub struct UploadUpdate {
    pub id: u64,
    pub result: Result<ShareLink, UploadError>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// modal message shown over the main window until dismissed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, title: title.into(), message: message.into() }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Warning, title: title.into(), message: message.into() }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, title: title.into(), message: message.into() }
    }
}
