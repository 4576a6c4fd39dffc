/// application settings for Filebin
/// these can be modified at runtime through the settings UI
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// settings file, relative to the working directory
pub const SETTINGS_FILE: &str = "settings.json";

/// upload service used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "https://file.io/";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// multipart POST target; must answer with `{"link": "..."}`
    pub endpoint: String,
    /// show a confirmation dialog after the link lands on the clipboard
    pub confirm_copy: bool,
    /// directory the file dialog opens in
    pub last_directory: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            confirm_copy: true,
            last_directory: None,
        }
    }
}

impl AppSettings {
    /// save settings to the JSON file in the working directory
    pub fn save(&self) -> Result<()> {
        self.save_to(Path::new(SETTINGS_FILE))
    }

    /// refuses to write an endpoint that would not load back
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate_endpoint()?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// load settings from the JSON file, or return defaults if it doesn't exist
    pub fn load() -> Self {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Self>(&json) {
                Ok(mut settings) => {
                    if let Err(e) = settings.validate_endpoint() {
                        warn!(path = %path.display(), error = %e, "bad endpoint in settings, using default");
                        settings.endpoint = DEFAULT_ENDPOINT.to_owned();
                    }
                    settings
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to parse settings, using defaults");
                    Self::default()
                }
            },
            // file doesn't exist or can't be read
            Err(_) => Self::default(),
        }
    }

    /// check that the endpoint is an absolute http(s) URL
    pub fn validate_endpoint(&self) -> Result<reqwest::Url> {
        let url = reqwest::Url::parse(self.endpoint.trim())
            .with_context(|| format!("invalid endpoint URL: {}", self.endpoint))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => anyhow::bail!("unsupported endpoint scheme: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings::load_from(&dir.path().join("nope.json"));
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = AppSettings {
            endpoint: "http://localhost:8080/upload".into(),
            confirm_copy: false,
            last_directory: Some(dir.path().to_path_buf()),
        };
        settings.save_to(&path).unwrap();
        assert_eq!(AppSettings::load_from(&path), settings);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"confirm_copy": false}"#).unwrap();
        let settings = AppSettings::load_from(&path);
        assert!(!settings.confirm_copy);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_invalid_endpoint_on_disk_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"endpoint": "not a url", "confirm_copy": false}"#).unwrap();
        let settings = AppSettings::load_from(&path);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        // the rest of the file still applies
        assert!(!settings.confirm_copy);

        std::fs::write(&path, r#"{"endpoint": "ftp://example.com/"}"#).unwrap();
        assert_eq!(AppSettings::load_from(&path).endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_invalid_endpoint_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = AppSettings { endpoint: "not a url".into(), ..Default::default() };
        assert!(settings.save_to(&path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_endpoint_validation() {
        let mut settings = AppSettings::default();
        assert!(settings.validate_endpoint().is_ok());

        settings.endpoint = "ftp://example.com/".into();
        assert!(settings.validate_endpoint().is_err());

        settings.endpoint = "not a url".into();
        assert!(settings.validate_endpoint().is_err());
    }
}
