//! Error types for video probing.

use std::path::PathBuf;
use thiserror::Error;

pub type MediaResult<T> = Result<T, MediaError>;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("FFprobe command failed: {message}")]
    FfprobeFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid video file: {0}")]
    InvalidVideo(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl MediaError {
    pub fn ffprobe_failed(message: impl Into<String>, stderr: Option<String>) -> Self {
        Self::FfprobeFailed {
            message: message.into(),
            stderr,
        }
    }

    pub fn invalid_video(message: impl Into<String>) -> Self {
        Self::InvalidVideo(message.into())
    }

    /// True when the probe tool itself is unavailable, as opposed to a bad input file.
    pub fn is_tooling_error(&self) -> bool {
        matches!(self, Self::FfprobeNotFound)
    }
}
