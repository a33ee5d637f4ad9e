use crate::error::LipSyncError;
use crate::media::SelectedFile;
use url::Url;

/// Turns a selected file into a URL string the remote API is asked to fetch.
#[cfg_attr(test, mockall::automock)]
pub trait ObjectUrlProvider: Send + Sync {
    fn object_url(&self, file: &SelectedFile) -> Result<String, LipSyncError>;
}

/// Hands out `file://` URLs for the canonical path of the file.
///
/// The remote service cannot reach these; the API only succeeds for inputs it
/// can fetch itself. No upload step happens here.
#[derive(Debug, Default, Clone)]
pub struct LocalFileUrlProvider;

impl ObjectUrlProvider for LocalFileUrlProvider {
    fn object_url(&self, file: &SelectedFile) -> Result<String, LipSyncError> {
        let canonical = file
            .path
            .canonicalize()
            .map_err(|e| LipSyncError::InvalidFile {
                path: file.path.clone(),
                reason: e.to_string(),
            })?;

        Url::from_file_path(&canonical)
            .map(String::from)
            .map_err(|_| LipSyncError::InvalidFile {
                path: file.path.clone(),
                reason: "path cannot be expressed as a URL".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn yields_file_url_for_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("face.mp4");
        fs::write(&path, b"data").unwrap();
        let file = SelectedFile::from_path(MediaKind::Video, &path).unwrap();

        let url = LocalFileUrlProvider.object_url(&file).unwrap();
        assert!(url.starts_with("file://"));
        assert!(url.ends_with("/face.mp4"));
    }

    #[test]
    fn fails_once_file_is_gone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("voice.mp3");
        fs::write(&path, b"data").unwrap();
        let file = SelectedFile::from_path(MediaKind::Audio, &path).unwrap();
        fs::remove_file(&path).unwrap();

        let err = LocalFileUrlProvider.object_url(&file).unwrap_err();
        assert!(matches!(err, LipSyncError::InvalidFile { .. }));
    }
}
