use chrono::Utc;

use crate::config::Credentials;
use crate::error::{GeminiError, Result};
use crate::generator::GenerateOptions;
use crate::models::wire::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationParams, ImageParams, Part,
};
use crate::models::{AspectRatio, GeneratedItem, MediaType};

use super::retry::retry_with_backoff;
use super::{error_from_response, strip_data_uri_prefix, transport_error};

const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
const PRO_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";

#[derive(Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    credentials: Credentials,
    base_url: String,
}

impl ImageClient {
    pub fn new(http: reqwest::Client, credentials: Credentials, base_url: String) -> Self {
        Self {
            http,
            credentials,
            base_url,
        }
    }

    pub async fn generate(
        &self,
        prompt: &str,
        id: &str,
        options: &GenerateOptions,
    ) -> Result<GeneratedItem> {
        let api_key = self.credentials.resolve(options.api_key.as_deref())?;

        let mut parts = Vec::new();
        if let Some(reference) = &options.reference_image {
            parts.push(Part::inline_data("image/png", strip_data_uri_prefix(reference)));
        }
        parts.push(Part::text(prompt));

        let (model, image_size) = match options.resolution {
            Some(res) if res.needs_pro_model() => (PRO_IMAGE_MODEL, Some(res.as_str().to_string())),
            _ => (DEFAULT_IMAGE_MODEL, None),
        };
        let aspect_ratio = options.aspect_ratio.unwrap_or(AspectRatio::Square);

        let request = GenerateContentRequest {
            contents: vec![Content { parts, role: None }],
            generation_config: Some(GenerationParams {
                seed: options.seed,
                image_config: Some(ImageParams {
                    aspect_ratio: aspect_ratio.as_str().to_string(),
                    image_size,
                }),
            }),
        };

        log::info!("🎨 Generating image {} with model {}", id, model);

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let response = retry_with_backoff("image generation", || {
            let http = self.http.clone();
            let url = url.clone();
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
                    .json::<GenerateContentResponse>()
                    .await
                    .map_err(|e| GeminiError::Serialization(e.to_string()))
            }
        })
        .await?;

        let inline = response.first_inline_data().ok_or_else(|| {
            GeminiError::EmptyResult("no image data found in response".to_string())
        })?;
        let mime = if inline.mime_type.is_empty() {
            "image/png"
        } else {
            inline.mime_type.as_str()
        };

        Ok(GeneratedItem {
            id: id.to_string(),
            url: format!("data:{};base64,{}", mime, inline.data),
            prompt: prompt.to_string(),
            created_at: Utc::now(),
            media_type: MediaType::Image,
            aspect_ratio: Some(aspect_ratio),
            resolution: options.resolution,
            video_resolution: None,
            seed: options.seed,
        })
    }
}
