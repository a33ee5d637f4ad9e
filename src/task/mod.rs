//! Remote task lifecycle: submission, periodic polling and resolution.

mod controller;
mod lifecycle;
mod poller;
mod remote;

pub use controller::{ControllerEvent, DownloadState, TaskController};
pub use lifecycle::{TaskLifecycle, TaskPhase};
pub use remote::{poll_task, submit_task};

use std::fmt;

/// Opaque identifier handed out by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Running,
    Succeeded { video_url: String },
    Failed { reason: Option<String> },
    /// Any status value without a known meaning; polling carries on.
    Unrecognized(i64),
}
