//! Platform capabilities the widget calls out to: the clipboard and speech
//! output. Both sit behind traits so front-ends and tests can swap them.

pub mod clipboard;
pub mod speech;

use thiserror::Error;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use speech::{CommandSpeaker, RecordingSpeaker, SpeechSynthesizer, Utterance};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform refused access (clipboard permission, audio device, ...)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    /// The capability does not exist here (no display, no TTS program, ...)
    #[error("Unavailable: {0}")]
    Unavailable(String),
    #[error("I/O error: {0}")]
    Io(String),
}

impl PlatformError {
    /// Classify a free-form platform error message
    pub fn from_message(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        let lower = msg.to_lowercase();
        if lower.contains("permission") || lower.contains("denied") || lower.contains("not allowed")
        {
            PlatformError::PermissionDenied(msg)
        } else {
            PlatformError::Unavailable(msg)
        }
    }
}

impl From<std::io::Error> for PlatformError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                PlatformError::PermissionDenied(err.to_string())
            }
            std::io::ErrorKind::NotFound => PlatformError::Unavailable(err.to_string()),
            _ => PlatformError::Io(err.to_string()),
        }
    }
}

pub type PlatformResult<T> = Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_message() {
        assert!(matches!(
            PlatformError::from_message("Permission denied by user"),
            PlatformError::PermissionDenied(_)
        ));
        assert!(matches!(
            PlatformError::from_message("no display"),
            PlatformError::Unavailable(_)
        ));
    }

    #[test]
    fn test_from_io_error() {
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(PlatformError::from(denied), PlatformError::PermissionDenied(_)));

        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "espeak-ng");
        assert!(matches!(PlatformError::from(missing), PlatformError::Unavailable(_)));

        let other = std::io::Error::other("broken pipe");
        assert!(matches!(PlatformError::from(other), PlatformError::Io(_)));
    }
}
