use crate::media::{MediaKind, SelectedFile};
use crate::task::{TaskLifecycle, TaskPhase};
use std::path::Path;
use tracing::{info, warn};

/// Everything the form owns outside of the task itself.
#[derive(Default)]
pub struct FormState {
    pub api_key: String,
    pub video: Option<SelectedFile>,
    pub audio: Option<SelectedFile>,
    /// Validation message from the last pick; replaces the task error in the banner.
    pub notice: Option<String>,
    pub show_task_error: bool,
}

impl FormState {
    pub fn with_api_key(api_key: String) -> Self {
        Self {
            api_key,
            ..Default::default()
        }
    }

    pub fn slot(&self, kind: MediaKind) -> Option<&SelectedFile> {
        match kind {
            MediaKind::Video => self.video.as_ref(),
            MediaKind::Audio => self.audio.as_ref(),
        }
    }

    /// Replace the file for `kind`. An invalid pick keeps the previous file
    /// and leaves its reason in `notice`.
    pub fn select(&mut self, kind: MediaKind, path: &Path) {
        match SelectedFile::from_path(kind, path) {
            Ok(file) => {
                info!("Selected {} file {} ({})", kind, file.name, file.display_size());
                let slot = match kind {
                    MediaKind::Video => &mut self.video,
                    MediaKind::Audio => &mut self.audio,
                };
                *slot = Some(file);
                self.notice = None;
                self.show_task_error = false;
            }
            Err(e) => {
                warn!("Rejected {} file {}: {}", kind, path.display(), e);
                self.notice = Some(e.to_string());
            }
        }
    }

    pub fn can_submit(&self, lifecycle: &TaskLifecycle) -> bool {
        !self.api_key.trim().is_empty()
            && self.video.is_some()
            && self.audio.is_some()
            && !lifecycle.is_active()
    }

    pub fn banner<'a>(&'a self, lifecycle: &'a TaskLifecycle) -> Option<&'a str> {
        if let Some(notice) = self.notice.as_deref() {
            return Some(notice);
        }
        if self.show_task_error {
            return lifecycle.error();
        }
        None
    }

    /// Drop both selections; the API key stays.
    pub fn clear(&mut self) {
        let api_key = std::mem::take(&mut self.api_key);
        *self = Self::with_api_key(api_key);
    }
}

pub fn progress_fraction(lifecycle: &TaskLifecycle) -> f32 {
    f32::from(lifecycle.progress()) / 100.0
}

pub fn status_text(lifecycle: &TaskLifecycle) -> String {
    match lifecycle.phase() {
        TaskPhase::Idle => String::new(),
        TaskPhase::Submitting => "Submitting task...".to_string(),
        TaskPhase::Pending { task_id } => format!("Processing task {}", task_id),
        TaskPhase::Succeeded { .. } => "Lip-sync video ready".to_string(),
        TaskPhase::Failed { .. } => "Processing failed".to_string(),
    }
}
