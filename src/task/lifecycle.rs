use crate::error::LipSyncError;
use crate::task::{PollOutcome, TaskId};
use tracing::{error, info, warn};

pub const PROGRESS_SUBMITTING: u8 = 20;
pub const PROGRESS_ACCEPTED: u8 = 30;
pub const PROGRESS_STEP: u8 = 10;
pub const PROGRESS_RUNNING_CAP: u8 = 90;
pub const PROGRESS_DONE: u8 = 100;

pub const DEFAULT_FAILURE_REASON: &str = "Processing failed";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskPhase {
    #[default]
    Idle,
    /// Create-task request in flight; no identifier yet.
    Submitting,
    Pending {
        task_id: TaskId,
    },
    Succeeded {
        video_url: String,
    },
    Failed {
        reason: String,
    },
}

/// What applying a poll response did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollEffect {
    /// Response belongs to a task that is no longer active.
    Ignored,
    Continue,
    Resolved,
}

/// Observable task state: phase, synthetic progress and the message to show.
#[derive(Debug, Clone, Default)]
pub struct TaskLifecycle {
    phase: TaskPhase,
    progress: u8,
    error: Option<String>,
}

impl TaskLifecycle {
    pub fn phase(&self) -> &TaskPhase {
        &self.phase
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, TaskPhase::Submitting | TaskPhase::Pending { .. })
    }

    pub fn active_task_id(&self) -> Option<&TaskId> {
        match &self.phase {
            TaskPhase::Pending { task_id } => Some(task_id),
            _ => None,
        }
    }

    pub fn result_url(&self) -> Option<&str> {
        match &self.phase {
            TaskPhase::Succeeded { video_url } => Some(video_url),
            _ => None,
        }
    }

    pub fn begin_submission(&mut self) -> Result<(), LipSyncError> {
        if self.is_active() {
            return Err(LipSyncError::TaskInProgress);
        }

        self.error = None;
        self.phase = TaskPhase::Submitting;
        self.progress = PROGRESS_SUBMITTING;
        Ok(())
    }

    /// Submission never produced a task: back to idle with the message shown.
    pub fn reject(&mut self, err: &LipSyncError) {
        error!("Submission rejected: {}", err);
        self.phase = TaskPhase::Idle;
        self.error = Some(err.to_string());
    }

    pub fn accept(&mut self, task_id: TaskId) {
        if self.phase != TaskPhase::Submitting {
            warn!("Ignoring task id {} outside of a submission", task_id);
            return;
        }

        info!("Task {} accepted", task_id);
        self.phase = TaskPhase::Pending { task_id };
        self.progress = PROGRESS_ACCEPTED;
    }

    pub fn apply_poll(
        &mut self,
        task_id: &TaskId,
        result: Result<PollOutcome, LipSyncError>,
    ) -> PollEffect {
        if self.active_task_id() != Some(task_id) {
            warn!("Discarding poll response for inactive task {}", task_id);
            return PollEffect::Ignored;
        }

        match result {
            Ok(PollOutcome::Running) => {
                let next = self
                    .progress
                    .saturating_add(PROGRESS_STEP)
                    .min(PROGRESS_RUNNING_CAP);
                self.progress = self.progress.max(next);
                info!("Task {} running ({}%)", task_id, self.progress);
                PollEffect::Continue
            }
            Ok(PollOutcome::Succeeded { video_url }) => {
                info!("Task {} succeeded: {}", task_id, video_url);
                self.phase = TaskPhase::Succeeded { video_url };
                self.progress = PROGRESS_DONE;
                PollEffect::Resolved
            }
            Ok(PollOutcome::Failed { reason }) => {
                let reason = reason
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| DEFAULT_FAILURE_REASON.to_string());
                self.fail(task_id, reason);
                PollEffect::Resolved
            }
            Ok(PollOutcome::Unrecognized(status)) => {
                warn!("Task {} reported unknown status {}", task_id, status);
                PollEffect::Continue
            }
            Err(err) => {
                self.fail(task_id, err.to_string());
                PollEffect::Resolved
            }
        }
    }

    fn fail(&mut self, task_id: &TaskId, reason: String) {
        error!("Task {} failed: {}", task_id, reason);
        self.error = Some(reason.clone());
        self.phase = TaskPhase::Failed { reason };
    }
}
