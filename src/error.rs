//! Error handling for the lip-sync client.

use crate::media::MediaKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LipSyncError {
    /// Selected file is bigger than its kind allows.
    #[error("{kind} file must not exceed {limit}")]
    FileTooLarge { kind: MediaKind, limit: String },

    #[error("Please select both a video and an audio file")]
    MissingFiles,

    #[error("Cannot use {}: {reason}", path.display())]
    InvalidFile { path: PathBuf, reason: String },

    #[error("A task is already in progress")]
    TaskInProgress,

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    /// The API answered with a non-zero application code.
    #[error("{0}")]
    Application(String),

    #[error("No result video URL returned")]
    MissingResultUrl,

    #[error("Response carried no data")]
    MissingData,

    #[error("Failed to start processing: {0}")]
    Submission(Box<LipSyncError>),

    #[error("Failed to check task status: {0}")]
    StatusCheck(Box<LipSyncError>),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LipSyncError {
    pub fn submission(self) -> Self {
        Self::Submission(Box::new(self))
    }

    pub fn status_check(self) -> Self {
        Self::StatusCheck(Box::new(self))
    }

    /// True for errors raised before anything touched the network.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::FileTooLarge { .. }
                | Self::MissingFiles
                | Self::InvalidFile { .. }
                | Self::TaskInProgress
        )
    }
}
