pub mod image_client;
pub mod retry;
pub mod script_client;
pub mod video_client;

use async_trait::async_trait;

use crate::config::{Credentials, GeminiConfig};
use crate::error::{GeminiError, Result};
use crate::generator::{GenerateOptions, MediaGenerator};
use crate::models::GeneratedItem;

pub use image_client::ImageClient;
pub use script_client::ScriptClient;
pub use video_client::VideoClient;

/// Client for the Gemini generative media API. Holds one sub-client per
/// capability, all sharing a single HTTP transport and credential resolver.
#[derive(Clone)]
pub struct GeminiClient {
    image_client: ImageClient,
    video_client: VideoClient,
    script_client: ScriptClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let http = reqwest::Client::new();
        let credentials = Credentials::new(config.api_key.clone());

        Self {
            image_client: ImageClient::new(
                http.clone(),
                credentials.clone(),
                config.base_url.clone(),
            ),
            video_client: VideoClient::new(
                http.clone(),
                credentials.clone(),
                config.base_url.clone(),
            ),
            script_client: ScriptClient::new(http, credentials, config.base_url),
        }
    }

    pub fn from_env() -> Self {
        Self::new(GeminiConfig::from_env())
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    pub fn video(&self) -> &VideoClient {
        &self.video_client
    }

    pub fn script(&self) -> &ScriptClient {
        &self.script_client
    }
}

#[async_trait]
impl MediaGenerator for GeminiClient {
    async fn generate_image(
        &self,
        prompt: &str,
        id: &str,
        options: &GenerateOptions,
    ) -> Result<GeneratedItem> {
        self.image_client.generate(prompt, id, options).await
    }

    async fn generate_video(
        &self,
        prompt: &str,
        id: &str,
        options: &GenerateOptions,
    ) -> Result<GeneratedItem> {
        self.video_client.generate(prompt, id, options).await
    }

    async fn analyze_script(&self, script: &str, api_key: Option<&str>) -> Result<Vec<String>> {
        self.script_client.analyze(script, api_key).await
    }
}

/// Map a non-success HTTP response onto the error taxonomy. Quota and 429
/// signals become rate-limit errors so the retry policy can replay them.
pub(crate) async fn error_from_response(response: reqwest::Response) -> GeminiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if status.as_u16() == 429 || body.contains("429") || body.to_lowercase().contains("quota") {
        GeminiError::RateLimit(format!("{}: {}", status, body))
    } else {
        GeminiError::Remote(format!("{}: {}", status, body))
    }
}

pub(crate) fn transport_error(error: reqwest::Error) -> GeminiError {
    GeminiError::Remote(error.to_string())
}

/// Reference images may arrive as full `data:image/...;base64,` URIs; the
/// API wants the raw base64 payload.
pub(crate) fn strip_data_uri_prefix(data: &str) -> &str {
    if data.starts_with("data:") {
        if let Some(idx) = data.find(";base64,") {
            return &data[idx + ";base64,".len()..];
        }
    }
    data
}
