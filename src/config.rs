use std::env;

use crate::error::{GeminiError, Result};
use crate::models::{AspectRatio, ImageResolution, MediaType, VideoResolution};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_IMAGE_BATCH_SIZE: usize = 2;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok();

        GeminiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Credential resolution with an explicitly ordered precedence: a key
/// supplied by the caller wins over the configured default; neither
/// resolvable is an authentication error.
#[derive(Debug, Clone)]
pub struct Credentials {
    default_key: Option<String>,
}

impl Credentials {
    pub fn new(default_key: Option<String>) -> Self {
        Credentials { default_key }
    }

    pub fn from_env() -> Self {
        Self::new(
            env::var("GEMINI_API_KEY")
                .or_else(|_| env::var("API_KEY"))
                .ok(),
        )
    }

    pub fn resolve(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(key) = explicit {
            if !key.trim().is_empty() {
                return Ok(key.to_string());
            }
        }
        match &self.default_key {
            Some(key) if !key.trim().is_empty() => Ok(key.clone()),
            _ => Err(GeminiError::Auth),
        }
    }
}

/// Immutable per-run configuration. Owned by the caller and never mutated
/// by the orchestrator.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub media_type: MediaType,
    pub aspect_ratio: AspectRatio,
    pub resolution: ImageResolution,
    pub video_resolution: VideoResolution,
    pub seed: u64,
    pub seed_locked: bool,
    pub batch_size: usize,
    /// Base64 reference image, used for remix input or image-to-video.
    pub reference_image: Option<String>,
    /// Explicit API key; when absent the client's default credential is used.
    pub token: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            media_type: MediaType::Image,
            aspect_ratio: AspectRatio::Wide,
            resolution: ImageResolution::OneK,
            video_resolution: VideoResolution::P720,
            seed: 0,
            seed_locked: false,
            batch_size: DEFAULT_IMAGE_BATCH_SIZE,
            reference_image: None,
            token: None,
        }
    }
}

impl GenerationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = media_type;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn with_resolution(mut self, resolution: ImageResolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_video_resolution(mut self, video_resolution: VideoResolution) -> Self {
        self.video_resolution = video_resolution;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_seed_locked(mut self, locked: bool) -> Self {
        self.seed_locked = locked;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_reference_image(mut self, reference_image: impl Into<String>) -> Self {
        self.reference_image = Some(reference_image.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Storyboard runs use the original defaults: wide 1K images, one per
    /// scene, with the integrated credential.
    pub fn storyboard(seed: u64) -> Self {
        GenerationConfig {
            media_type: MediaType::Image,
            aspect_ratio: AspectRatio::Wide,
            resolution: ImageResolution::OneK,
            seed,
            batch_size: 1,
            ..Default::default()
        }
    }

    /// The video model accepts single-item requests only, so video runs
    /// clamp the batch to 1 regardless of the configured size.
    pub fn effective_batch_size(&self) -> usize {
        match self.media_type {
            MediaType::Video => 1,
            MediaType::Image => self.batch_size.max(1),
        }
    }
}
