use thiserror::Error;

/// Errors from everything around the alignment engine. [`crate::align`]
/// itself cannot fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("word list not found: {0}")]
    UnknownWordList(String),

    #[error("word list {0} has no words")]
    EmptyWordList(String),

    /// The recognizer backend failed for a reason other than silence.
    #[error("speech recognition failed: {0}")]
    Recognizer(String),

    /// The recorder could not capture audio (no device, permission denied).
    #[error("audio recording failed: {0}")]
    Recorder(String),
}

pub type Result<T> = std::result::Result<T, Error>;
