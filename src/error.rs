use thiserror::Error;

/// Errors raised by the gallery's platform and settings layers.
///
/// None of these are fatal: callers log them and leave the session unchanged.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    Config(#[from] serde_json::Error),

    #[error("no camera capture command is configured")]
    CaptureUnavailable,

    #[error("capture command `{program}` failed: {reason}")]
    CaptureFailed { program: String, reason: String },
}

pub type Result<T> = std::result::Result<T, GalleryError>;
