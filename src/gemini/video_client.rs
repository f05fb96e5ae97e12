use std::future::Future;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;

use crate::config::Credentials;
use crate::error::{GeminiError, Result};
use crate::generator::GenerateOptions;
use crate::models::wire::{
    GenerateVideosRequest, VideoImageInput, VideoInstance, VideoOperation, VideoParameters,
};
use crate::models::{GeneratedItem, MediaType, VideoResolution};

use super::retry::retry_with_backoff;
use super::{error_from_response, strip_data_uri_prefix, transport_error};

const VIDEO_MODEL: &str = "veo-3.1-fast-generate-preview";

/// Interval between completion checks on a pending operation.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Polling ceiling: 60 polls at 5s is a five minute wait.
pub const MAX_POLLS: u32 = 60;

#[derive(Clone)]
pub struct VideoClient {
    http: reqwest::Client,
    credentials: Credentials,
    base_url: String,
}

impl VideoClient {
    pub fn new(http: reqwest::Client, credentials: Credentials, base_url: String) -> Self {
        Self {
            http,
            credentials,
            base_url,
        }
    }

    /// Two-phase video generation: submit a long-running job, poll it to
    /// completion, then download the result into a local data URI.
    pub async fn generate(
        &self,
        prompt: &str,
        id: &str,
        options: &GenerateOptions,
    ) -> Result<GeneratedItem> {
        let api_key = self.credentials.resolve(options.api_key.as_deref())?;
        let resolution = options.video_resolution.unwrap_or(VideoResolution::P720);

        let image = options.reference_image.as_ref().map(|reference| VideoImageInput {
            bytes_base64_encoded: strip_data_uri_prefix(reference).to_string(),
            mime_type: "image/png".to_string(),
        });

        let request = GenerateVideosRequest {
            instances: vec![VideoInstance {
                prompt: prompt.to_string(),
                image,
            }],
            parameters: Some(VideoParameters {
                number_of_videos: 1,
                resolution: resolution.as_str().to_string(),
            }),
        };

        log::info!("🎬 Submitting video generation {} ({})", id, resolution.as_str());

        let submit_url = format!(
            "{}/models/{}:predictLongRunning",
            self.base_url, VIDEO_MODEL
        );
        let operation = retry_with_backoff("video submission", || {
            let http = self.http.clone();
            let url = submit_url.clone();
            let api_key = api_key.clone();
            let request = request.clone();
            async move {
                let http_response = http
                    .post(&url)
                    .header("x-goog-api-key", &api_key)
                    .json(&request)
                    .send()
                    .await
                    .map_err(transport_error)?;
                if !http_response.status().is_success() {
                    return Err(error_from_response(http_response).await);
                }
                http_response
                    .json::<VideoOperation>()
                    .await
                    .map_err(|e| GeminiError::Serialization(e.to_string()))
            }
        })
        .await?;

        log::info!("🎬 Video operation started: {}", operation.name);

        let operation = poll_until_done(operation, |name| {
            let http = self.http.clone();
            let url = format!("{}/{}", self.base_url, name);
            let api_key = api_key.clone();
            async move {
                let http_response = http
                    .get(&url)
                    .header("x-goog-api-key", &api_key)
                    .send()
                    .await
                    .map_err(transport_error)?;
                if !http_response.status().is_success() {
                    return Err(error_from_response(http_response).await);
                }
                http_response
                    .json::<VideoOperation>()
                    .await
                    .map_err(|e| GeminiError::Serialization(e.to_string()))
            }
        })
        .await?;

        if let Some(error) = &operation.error {
            return Err(GeminiError::Remote(format!(
                "video operation failed: {} ({})",
                error.message, error.code
            )));
        }

        let uri = operation.first_video_uri().ok_or_else(|| {
            GeminiError::EmptyResult("no video URI returned".to_string())
        })?;

        // The content locator requires the credential appended as a query
        // parameter.
        let download_url = format!("{}&key={}", uri, api_key);
        let download = self
            .http
            .get(&download_url)
            .send()
            .await
            .map_err(transport_error)?;
        if !download.status().is_success() {
            return Err(error_from_response(download).await);
        }
        let bytes = download.bytes().await.map_err(transport_error)?;

        log::info!("🎬 Video {} downloaded ({} bytes)", id, bytes.len());

        Ok(GeneratedItem {
            id: id.to_string(),
            url: format!("data:video/mp4;base64,{}", BASE64.encode(&bytes)),
            prompt: prompt.to_string(),
            created_at: Utc::now(),
            media_type: MediaType::Video,
            aspect_ratio: None,
            resolution: None,
            video_resolution: Some(resolution),
            seed: options.seed,
        })
    }
}

/// Poll a pending operation at a fixed interval until it completes or the
/// poll ceiling is reached.
pub(crate) async fn poll_until_done<F, Fut>(
    initial: VideoOperation,
    mut poll: F,
) -> Result<VideoOperation>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<VideoOperation>>,
{
    let mut operation = initial;
    let mut polls = 0u32;

    while !operation.done && polls < MAX_POLLS {
        tokio::time::sleep(POLL_INTERVAL).await;
        operation = poll(operation.name.clone()).await?;
        polls += 1;
        log::debug!("🎬 Polling video status: {} of {}", polls, MAX_POLLS);
    }

    if !operation.done {
        return Err(GeminiError::Timeout(
            "video generation timed out".to_string(),
        ));
    }
    Ok(operation)
}
