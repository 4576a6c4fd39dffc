use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(String);

/// Write-only view of a clipboard.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// OS clipboard. The handle is opened on first use and kept for the lifetime
/// of the app: on X11 the contents vanish when the owning handle is dropped.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.handle.is_none() {
            let handle = arboard::Clipboard::new().map_err(|err| ClipboardError(err.to_string()))?;
            self.handle = Some(handle);
        }
        if let Some(handle) = self.handle.as_mut() {
            handle
                .set_text(text.to_owned())
                .map_err(|err| ClipboardError(err.to_string()))?;
        }
        debug!(len = text.len(), "text placed on clipboard");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// records every copy; optionally refuses like a locked-down desktop
    #[derive(Default)]
    pub struct RecordingClipboard {
        pub copied: Vec<String>,
        pub deny: bool,
    }

    impl Clipboard for RecordingClipboard {
        fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.deny {
                return Err(ClipboardError("access denied".into()));
            }
            self.copied.push(text.to_owned());
            Ok(())
        }
    }
}
