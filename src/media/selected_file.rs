use crate::error::LipSyncError;
use crate::utils::file_size::{FileSizeUtils, MIB};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const MAX_VIDEO_SIZE: u64 = 50 * MIB;
pub const MAX_AUDIO_SIZE: u64 = 10 * MIB;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    pub fn max_size(self) -> u64 {
        match self {
            MediaKind::Video => MAX_VIDEO_SIZE,
            MediaKind::Audio => MAX_AUDIO_SIZE,
        }
    }

    /// Extensions offered by the file dialog for this kind.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            MediaKind::Video => &["mp4", "mov", "m4v", "webm", "mkv", "avi"],
            MediaKind::Audio => &["mp3", "wav", "m4a", "aac", "ogg", "flac"],
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            MediaKind::Video => "MP4, MOV files up to 50MB",
            MediaKind::Audio => "MP3, WAV files up to 10MB",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Video => write!(f, "Video"),
            MediaKind::Audio => write!(f, "Audio"),
        }
    }
}

/// A local file the user picked for one of the two inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub kind: MediaKind,
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl SelectedFile {
    /// Stat the file at `path` and check it against the limit for `kind`.
    pub fn from_path(kind: MediaKind, path: &Path) -> Result<Self, LipSyncError> {
        let metadata = fs::metadata(path).map_err(|e| LipSyncError::InvalidFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if !metadata.is_file() {
            return Err(LipSyncError::InvalidFile {
                path: path.to_path_buf(),
                reason: "not a regular file".to_string(),
            });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let file = Self {
            kind,
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
        };
        file.validate()?;
        Ok(file)
    }

    pub fn validate(&self) -> Result<(), LipSyncError> {
        let max_size = self.kind.max_size();
        if self.size > max_size {
            return Err(LipSyncError::FileTooLarge {
                kind: self.kind,
                limit: FileSizeUtils::format_limit(max_size),
            });
        }
        Ok(())
    }

    pub fn display_size(&self) -> String {
        FileSizeUtils::format_size(self.size)
    }
}
