use crate::api::headers::auth_headers;
use crate::api::types::{ApiResponse, CreateTaskData, PollData, PollRequest, TalkingFaceRequest};
use crate::error::LipSyncError;
use async_trait::async_trait;
use reqwest::Client;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// The remote lip-sync service.
///
/// Implementations only move bytes: they report transport failures and
/// non-success HTTP statuses, and hand back the decoded envelope untouched so
/// the caller decides what an application code means.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TalkingFaceApi: Send + Sync {
    /// `POST {base}/async/talking_face`
    async fn create_task(
        &self,
        request: &TalkingFaceRequest,
    ) -> Result<ApiResponse<CreateTaskData>, LipSyncError>;

    /// `POST {base}/getAsyncResult`
    async fn fetch_result(&self, task_id: &str) -> Result<ApiResponse<PollData>, LipSyncError>;

    /// Plain GET of a finished video, written to `dest`. Returns the byte count.
    async fn download_video(&self, url: &str, dest: &Path) -> Result<u64, LipSyncError>;
}

#[derive(Clone)]
pub struct HttpTalkingFaceClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpTalkingFaceClient {
    /// The key is checked when a request is built, so an empty one surfaces
    /// as a request error instead of preventing construction.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl TalkingFaceApi for HttpTalkingFaceClient {
    async fn create_task(
        &self,
        request: &TalkingFaceRequest,
    ) -> Result<ApiResponse<CreateTaskData>, LipSyncError> {
        let url = self.endpoint("async/talking_face");
        info!(
            "Creating talking-face task (video: {}, audio: {})",
            request.src_video_url, request.audio_url
        );

        let response = self
            .client
            .post(&url)
            .headers(auth_headers(&self.api_key)?)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LipSyncError::HttpStatus(status.as_u16()));
        }

        let body = response.json::<ApiResponse<CreateTaskData>>().await?;
        debug!("Create task response: {:?}", body);
        Ok(body)
    }

    async fn fetch_result(&self, task_id: &str) -> Result<ApiResponse<PollData>, LipSyncError> {
        let url = self.endpoint("getAsyncResult");
        let payload = PollRequest {
            task_id: task_id.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .headers(auth_headers(&self.api_key)?)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LipSyncError::HttpStatus(status.as_u16()));
        }

        let body = response.json::<ApiResponse<PollData>>().await?;
        debug!("Poll response for {}: {:?}", task_id, body);
        Ok(body)
    }

    async fn download_video(&self, url: &str, dest: &Path) -> Result<u64, LipSyncError> {
        info!("Downloading result video to {}", dest.display());

        // Result URLs are pre-signed; the API credential stays off this request.
        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LipSyncError::HttpStatus(status.as_u16()));
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!("Wrote {} bytes to {}", written, dest.display());
        Ok(written)
    }
}
