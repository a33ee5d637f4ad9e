use crate::error::LipSyncError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

/// Headers sent with every API call: bearer credential plus JSON content type.
pub fn auth_headers(api_key: &str) -> Result<HeaderMap, LipSyncError> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(LipSyncError::Config("API key is empty".to_string()));
    }

    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .map_err(|_| LipSyncError::Config("API key contains invalid characters".to_string()))?;
    bearer.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}
