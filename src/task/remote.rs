use crate::api::types::{
    PollData, TalkingFaceRequest, VideoParams, STATUS_FAILED, STATUS_RUNNING, STATUS_SUCCEEDED,
};
use crate::api::TalkingFaceApi;
use crate::error::LipSyncError;
use crate::task::{PollOutcome, TaskId};
use tracing::{debug, info};

fn application_error(message: Option<String>, fallback: &str) -> LipSyncError {
    let message = message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    LipSyncError::Application(message)
}

/// Create a talking-face task for the two media URLs.
pub async fn submit_task(
    api: &dyn TalkingFaceApi,
    video_url: String,
    audio_url: String,
) -> Result<TaskId, LipSyncError> {
    let request = TalkingFaceRequest {
        src_video_url: video_url,
        audio_url,
        video_params: VideoParams::default(),
    };

    let response = api
        .create_task(&request)
        .await
        .map_err(LipSyncError::submission)?;

    if response.code != 0 {
        return Err(
            application_error(response.message, "Request processing failed").submission(),
        );
    }

    let task_id = response
        .data
        .map(|data| data.task_id)
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| LipSyncError::MissingData.submission())?;

    info!("Task started: {}", task_id);
    Ok(TaskId::from(task_id))
}

/// Check a task once and translate the remote status.
pub async fn poll_task(
    api: &dyn TalkingFaceApi,
    task_id: &TaskId,
) -> Result<PollOutcome, LipSyncError> {
    let response = api
        .fetch_result(task_id.as_str())
        .await
        .map_err(LipSyncError::status_check)?;

    if response.code != 0 {
        return Err(application_error(
            response.message,
            "Failed to get task status",
        ));
    }

    let data = response.data.ok_or(LipSyncError::MissingData)?;
    debug!(
        "Task {} status {} (type {:?}, execution time {:?}s, expires {:?})",
        data.task.task_id, data.task.status, data.task.task_type, data.task.execution_time, data.task.expire
    );
    interpret(data)
}

fn interpret(data: PollData) -> Result<PollOutcome, LipSyncError> {
    match data.task.status {
        STATUS_RUNNING => Ok(PollOutcome::Running),
        STATUS_SUCCEEDED => {
            let video_url = data
                .videos
                .and_then(|videos| videos.into_iter().next())
                .and_then(|video| {
                    debug!("Result video type {:?}", video.video_type);
                    video.video_url
                })
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty())
                .ok_or(LipSyncError::MissingResultUrl)?;
            Ok(PollOutcome::Succeeded { video_url })
        }
        STATUS_FAILED => Ok(PollOutcome::Failed {
            reason: data.task.reason,
        }),
        other => Ok(PollOutcome::Unrecognized(other)),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::api::types::{ApiResponse, CreateTaskData, PollData, RemoteTask, ResultVideo};

    pub fn created(task_id: &str) -> ApiResponse<CreateTaskData> {
        ApiResponse {
            code: 0,
            message: Some("success".to_string()),
            data: Some(CreateTaskData {
                task_id: task_id.to_string(),
            }),
        }
    }

    pub fn status(task_id: &str, status: i64) -> ApiResponse<PollData> {
        ApiResponse {
            code: 0,
            message: Some("success".to_string()),
            data: Some(PollData {
                task: RemoteTask {
                    task_id: task_id.to_string(),
                    status,
                    reason: None,
                    execution_time: None,
                    expire: None,
                    task_type: Some("talking_face".to_string()),
                },
                videos: None,
            }),
        }
    }

    pub fn finished(task_id: &str, video_url: &str) -> ApiResponse<PollData> {
        let mut response = status(task_id, 3);
        if let Some(data) = response.data.as_mut() {
            data.videos = Some(vec![ResultVideo {
                video_url: Some(video_url.to_string()),
                video_type: Some("mp4".to_string()),
            }]);
        }
        response
    }

    pub fn failed(task_id: &str, reason: Option<&str>) -> ApiResponse<PollData> {
        let mut response = status(task_id, 4);
        if let Some(data) = response.data.as_mut() {
            data.task.reason = reason.map(str::to_string);
        }
        response
    }

    pub fn app_error<T>(code: i64, message: &str) -> ApiResponse<T> {
        ApiResponse {
            code,
            message: Some(message.to_string()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::api::types::ApiResponse;
    use crate::api::MockTalkingFaceApi;

    #[tokio::test]
    async fn submit_sends_fixed_video_params() {
        let mut api = MockTalkingFaceApi::new();
        api.expect_create_task()
            .withf(|request| {
                request.src_video_url == "file:///v.mp4"
                    && request.audio_url == "file:///a.mp3"
                    && request.video_params == VideoParams::default()
            })
            .times(1)
            .returning(|_| Ok(created("T1")));

        let task_id = submit_task(&api, "file:///v.mp4".into(), "file:///a.mp3".into())
            .await
            .unwrap();
        assert_eq!(task_id, TaskId::from("T1"));
    }

    #[tokio::test]
    async fn submit_surfaces_application_message() {
        let mut api = MockTalkingFaceApi::new();
        api.expect_create_task()
            .times(1)
            .returning(|_| Ok(app_error(1001, "invalid api key")));

        let err = submit_task(&api, "v".into(), "a".into()).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to start processing: invalid api key");
    }

    #[tokio::test]
    async fn submit_wraps_http_failures() {
        let mut api = MockTalkingFaceApi::new();
        api.expect_create_task()
            .times(1)
            .returning(|_| Err(LipSyncError::HttpStatus(502)));

        let err = submit_task(&api, "v".into(), "a".into()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to start processing: HTTP error! status: 502"
        );
    }

    #[tokio::test]
    async fn submit_without_task_id_is_a_data_error() {
        let mut api = MockTalkingFaceApi::new();
        api.expect_create_task()
            .times(1)
            .returning(|_| Ok(created("  ")));

        let err = submit_task(&api, "v".into(), "a".into()).await.unwrap_err();
        assert!(matches!(err, LipSyncError::Submission(inner) if matches!(*inner, LipSyncError::MissingData)));
    }

    #[tokio::test]
    async fn poll_maps_known_statuses() {
        let mut api = MockTalkingFaceApi::new();
        let mut responses = vec![
            status("T1", 2),
            finished("T1", "  https://x/out.mp4\n"),
            failed("T1", Some("face not detected")),
            status("T1", 7),
        ]
        .into_iter();
        api.expect_fetch_result()
            .withf(|id| id == "T1")
            .times(4)
            .returning(move |_| Ok(responses.next().unwrap()));

        let id = TaskId::from("T1");
        assert_eq!(poll_task(&api, &id).await.unwrap(), PollOutcome::Running);
        assert_eq!(
            poll_task(&api, &id).await.unwrap(),
            PollOutcome::Succeeded {
                video_url: "https://x/out.mp4".to_string()
            }
        );
        assert_eq!(
            poll_task(&api, &id).await.unwrap(),
            PollOutcome::Failed {
                reason: Some("face not detected".to_string())
            }
        );
        assert_eq!(
            poll_task(&api, &id).await.unwrap(),
            PollOutcome::Unrecognized(7)
        );
    }

    #[tokio::test]
    async fn blank_result_url_is_not_success() {
        let mut api = MockTalkingFaceApi::new();
        let mut responses = vec![finished("T1", "   "), status("T1", 3)].into_iter();
        api.expect_fetch_result()
            .times(2)
            .returning(move |_| Ok(responses.next().unwrap()));

        let id = TaskId::from("T1");
        for _ in 0..2 {
            let err = poll_task(&api, &id).await.unwrap_err();
            assert!(matches!(err, LipSyncError::MissingResultUrl));
        }
    }

    #[tokio::test]
    async fn finished_payload_without_video_url_is_a_data_error() {
        let decode = |raw: &str| serde_json::from_str::<ApiResponse<PollData>>(raw).unwrap();
        let mut responses = vec![
            decode(r#"{"code":0,"data":{"task":{"taskId":"T1","status":3},"videos":[{"videoType":"mp4"}]}}"#),
            decode(r#"{"code":0,"data":{"task":{"taskId":"T1","status":3},"videos":[{"videoUrl":null}]}}"#),
            decode(r#"{"code":0,"data":{"task":{"taskId":"T1","status":2},"videos":[{"videoType":"mp4"}]}}"#),
        ]
        .into_iter();
        let mut api = MockTalkingFaceApi::new();
        api.expect_fetch_result()
            .times(3)
            .returning(move |_| Ok(responses.next().unwrap()));

        let id = TaskId::from("T1");
        for _ in 0..2 {
            let err = poll_task(&api, &id).await.unwrap_err();
            assert!(matches!(err, LipSyncError::MissingResultUrl));
        }
        assert_eq!(poll_task(&api, &id).await.unwrap(), PollOutcome::Running);
    }

    #[tokio::test]
    async fn poll_errors_carry_readable_messages() {
        let mut api = MockTalkingFaceApi::new();
        let mut responses = vec![
            Err(LipSyncError::HttpStatus(500)),
            Ok(app_error::<PollData>(2, "")),
            Ok(app_error(3, "task not found")),
        ]
        .into_iter();
        api.expect_fetch_result()
            .times(3)
            .returning(move |_| responses.next().unwrap());

        let id = TaskId::from("T1");
        assert_eq!(
            poll_task(&api, &id).await.unwrap_err().to_string(),
            "Failed to check task status: HTTP error! status: 500"
        );
        assert_eq!(
            poll_task(&api, &id).await.unwrap_err().to_string(),
            "Failed to get task status"
        );
        assert_eq!(
            poll_task(&api, &id).await.unwrap_err().to_string(),
            "task not found"
        );
    }
}
