//! Single-shot multipart upload to a temporary file host.
//!
//! The host answers a `POST` carrying one multipart field named `file` with a
//! JSON body like `{"success": true, "link": "https://file.io/abc123"}`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::{multipart, Client};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Multipart field the host reads the file from.
pub const FILE_FIELD: &str = "file";

/// Download URL handed out by the host. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareLink(String);

impl ShareLink {
    /// Returns `None` for blank input.
    pub fn new(link: impl Into<String>) -> Option<Self> {
        let link = link.into();
        if link.trim().is_empty() {
            None
        } else {
            Some(Self(link))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-200 answer; `body` is the raw response text.
    #[error("{body}")]
    Server { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no link returned")]
    MissingLink,

    #[error("could not start upload thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("upload thread stopped before reporting a result")]
    Interrupted,
}

/// Anything that can turn a local file into a share link.
pub trait Upload: Send + Sync {
    fn upload(&self, path: &Path) -> Result<ShareLink, UploadError>;
}

#[derive(Deserialize)]
struct UploadResponse {
    link: Option<String>,
}

/// Blocking HTTP uploader. Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct HttpUploader {
    client: Client,
    endpoint: String,
}

impl HttpUploader {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, UploadError> {
        let client = Client::builder()
            .user_agent(concat!("filebin/", env!("CARGO_PKG_VERSION")))
            // uploads may be large; wait as long as the host needs
            .timeout(None::<Duration>)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Same connection pool, different target.
    pub fn with_endpoint(&self, endpoint: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Upload for HttpUploader {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    fn upload(&self, path: &Path) -> Result<ShareLink, UploadError> {
        let form = multipart::Form::new()
            .file(FILE_FIELD, path)
            .map_err(|source| UploadError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        debug!("sending multipart request");
        let response = self.client.post(&self.endpoint).multipart(form).send()?;
        let status = response.status();
        let body = response.text()?;

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "upload rejected");
            return Err(UploadError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: UploadResponse = serde_json::from_str(&body)?;
        let link = parsed
            .link
            .and_then(ShareLink::new)
            .ok_or(UploadError::MissingLink)?;
        info!(link = %link, "upload finished");
        Ok(link)
    }
}
