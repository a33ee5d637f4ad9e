use crate::api::TalkingFaceApi;
use crate::error::LipSyncError;
use crate::media::{MediaKind, ObjectUrlProvider, SelectedFile};
use crate::task::lifecycle::PollEffect;
use crate::task::poller::PollHandle;
use crate::task::{submit_task, PollOutcome, TaskId, TaskLifecycle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, info, warn};

/// Results of background work, applied on the thread that owns the controller.
#[derive(Debug)]
pub enum ControllerEvent {
    Submitted(Result<TaskId, LipSyncError>),
    Polled {
        task_id: TaskId,
        result: Result<PollOutcome, LipSyncError>,
    },
    Downloaded(Result<PathBuf, LipSyncError>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DownloadState {
    #[default]
    Idle,
    InProgress,
    Saved(PathBuf),
    Failed(String),
}

/// Owns the one in-flight task and everything that mutates its state.
///
/// Network calls run on `runtime`; their outcomes come back as
/// [`ControllerEvent`]s and only take effect in [`TaskController::process_events`].
pub struct TaskController {
    api: Arc<dyn TalkingFaceApi>,
    urls: Arc<dyn ObjectUrlProvider>,
    runtime: Handle,
    poll_interval: Duration,
    lifecycle: TaskLifecycle,
    poller: Option<PollHandle>,
    download: DownloadState,
    events_tx: UnboundedSender<ControllerEvent>,
    events_rx: UnboundedReceiver<ControllerEvent>,
}

impl TaskController {
    pub fn new(
        api: Arc<dyn TalkingFaceApi>,
        urls: Arc<dyn ObjectUrlProvider>,
        runtime: Handle,
        poll_interval: Duration,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            api,
            urls,
            runtime,
            poll_interval,
            lifecycle: TaskLifecycle::default(),
            poller: None,
            download: DownloadState::default(),
            events_tx,
            events_rx,
        }
    }

    pub fn lifecycle(&self) -> &TaskLifecycle {
        &self.lifecycle
    }

    pub fn download_state(&self) -> &DownloadState {
        &self.download
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_some()
    }

    /// Swap the API client, e.g. after the credential changed. Polls already
    /// scheduled keep the client they started with.
    pub fn set_api(&mut self, api: Arc<dyn TalkingFaceApi>) {
        self.api = api;
    }

    /// Validate the inputs and start a task in the background.
    ///
    /// Returns once the create request is dispatched; the task id arrives
    /// later through [`TaskController::process_events`].
    pub fn submit(
        &mut self,
        video: Option<&SelectedFile>,
        audio: Option<&SelectedFile>,
    ) -> Result<(), LipSyncError> {
        if self.lifecycle.is_active() {
            warn!("Submit ignored: a task is already in progress");
            return Err(LipSyncError::TaskInProgress);
        }

        let (video_url, audio_url) = match self.resolve_urls(video, audio) {
            Ok(urls) => urls,
            Err(e) => {
                self.lifecycle.reject(&e);
                return Err(e);
            }
        };

        self.lifecycle.begin_submission()?;
        self.download = DownloadState::Idle;
        info!("Starting task with uploaded files");

        let api = Arc::clone(&self.api);
        let events = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = submit_task(api.as_ref(), video_url, audio_url).await;
            let _ = events.send(ControllerEvent::Submitted(result));
        });
        Ok(())
    }

    fn resolve_urls(
        &self,
        video: Option<&SelectedFile>,
        audio: Option<&SelectedFile>,
    ) -> Result<(String, String), LipSyncError> {
        let (video, audio) = match (video, audio) {
            (Some(video), Some(audio)) => (video, audio),
            _ => return Err(LipSyncError::MissingFiles),
        };

        for (file, expected) in [(video, MediaKind::Video), (audio, MediaKind::Audio)] {
            if file.kind != expected {
                return Err(LipSyncError::InvalidFile {
                    path: file.path.clone(),
                    reason: format!("expected a {} file", expected.to_string().to_lowercase()),
                });
            }
            file.validate()?;
        }

        Ok((self.urls.object_url(video)?, self.urls.object_url(audio)?))
    }

    /// Start saving the finished video to `dest`.
    pub fn download_result(&mut self, dest: PathBuf) -> Result<(), LipSyncError> {
        let url = self
            .lifecycle
            .result_url()
            .ok_or(LipSyncError::MissingResultUrl)?
            .to_string();

        self.download = DownloadState::InProgress;
        let api = Arc::clone(&self.api);
        let events = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = api.download_video(&url, &dest).await.map(|bytes| {
                info!("Saved {} bytes to {}", bytes, dest.display());
                dest
            });
            let _ = events.send(ControllerEvent::Downloaded(result));
        });
        Ok(())
    }

    /// Apply every event that has arrived so far. Returns true if any did.
    pub fn process_events(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
            changed = true;
        }
        changed
    }

    /// Wait for the next event and apply it.
    #[cfg(test)]
    pub async fn process_next_event(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::Submitted(Ok(task_id)) => {
                self.lifecycle.accept(task_id.clone());
                if self.lifecycle.active_task_id() == Some(&task_id) {
                    self.poller = Some(PollHandle::spawn(
                        &self.runtime,
                        Arc::clone(&self.api),
                        task_id,
                        self.poll_interval,
                        self.events_tx.clone(),
                    ));
                }
            }
            ControllerEvent::Submitted(Err(e)) => {
                self.lifecycle.reject(&e);
            }
            ControllerEvent::Polled { task_id, result } => {
                if self.lifecycle.apply_poll(&task_id, result) == PollEffect::Resolved {
                    if let Some(poller) = self.poller.take() {
                        info!("Polling stopped for task {}", poller.task_id());
                    }
                }
            }
            ControllerEvent::Downloaded(Ok(path)) => {
                self.download = DownloadState::Saved(path);
            }
            ControllerEvent::Downloaded(Err(e)) => {
                error!("Download failed: {}", e);
                self.download = DownloadState::Failed(e.to_string());
            }
        }
    }
}
