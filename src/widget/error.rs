use crate::mt::MtError;
use crate::platform::PlatformError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),
    #[error("No icon bound at index {0}")]
    UnboundIcon(usize),
    #[error("Translation superseded by a newer request")]
    Superseded,
    #[error(transparent)]
    Translation(#[from] MtError),
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

pub type WidgetResult<T> = Result<T, WidgetError>;
