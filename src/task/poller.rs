use crate::api::TalkingFaceApi;
use crate::task::{poll_task, ControllerEvent, TaskId};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// Recurring status check for one task. Dropping the handle stops the timer.
///
/// Each tick issues its request on a task of its own, so a slow response does
/// not hold back the next one. Requests already in flight when the handle is
/// dropped still complete and report back.
pub struct PollHandle {
    task_id: TaskId,
    timer: JoinHandle<()>,
}

impl PollHandle {
    pub fn spawn(
        runtime: &Handle,
        api: Arc<dyn TalkingFaceApi>,
        task_id: TaskId,
        period: Duration,
        events: UnboundedSender<ControllerEvent>,
    ) -> Self {
        let id = task_id.clone();
        let timer = runtime.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if events.is_closed() {
                    break;
                }

                debug!("Polling task {}", id);
                let api = Arc::clone(&api);
                let events = events.clone();
                let task_id = id.clone();
                tokio::spawn(async move {
                    let result = poll_task(api.as_ref(), &task_id).await;
                    let _ = events.send(ControllerEvent::Polled { task_id, result });
                });
            }
        });

        Self { task_id, timer }
    }

    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        debug!("Stopping poll timer for task {}", self.task_id);
        self.timer.abort();
    }
}
