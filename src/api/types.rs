use serde::{Deserialize, Serialize};

/// Remote task status values the client knows about.
pub const STATUS_RUNNING: i64 = 2;
pub const STATUS_SUCCEEDED: i64 = 3;
pub const STATUS_FAILED: i64 = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TalkingFaceRequest {
    pub src_video_url: String,
    pub audio_url: String,
    pub video_params: VideoParams,
}

/// Zero width and height keep the source dimensions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoParams {
    pub video_width: u32,
    pub video_height: u32,
    pub video_enhance: u8,
}

impl Default for VideoParams {
    fn default() -> Self {
        Self {
            video_width: 0,
            video_height: 0,
            video_enhance: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollRequest {
    pub task_id: String,
}

/// Envelope shared by every API response; `code` 0 means success.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskData {
    pub task_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PollData {
    pub task: RemoteTask,
    #[serde(default)]
    pub videos: Option<Vec<ResultVideo>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTask {
    pub task_id: String,
    pub status: i64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub execution_time: Option<f64>,
    #[serde(default)]
    pub expire: Option<i64>,
    #[serde(default)]
    pub task_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultVideo {
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub video_type: Option<String>,
}
