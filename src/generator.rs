use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AspectRatio, GeneratedItem, ImageResolution, VideoResolution};

/// Per-call options shared by every task in a batch, apart from the seed.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub aspect_ratio: Option<AspectRatio>,
    pub seed: Option<u64>,
    pub resolution: Option<ImageResolution>,
    pub video_resolution: Option<VideoResolution>,
    /// Base64 raster (optionally a full data URI) used as reference input.
    pub reference_image: Option<String>,
    /// Explicit API key overriding the client's default credential.
    pub api_key: Option<String>,
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = Some(aspect_ratio);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_resolution(mut self, resolution: ImageResolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn with_video_resolution(mut self, video_resolution: VideoResolution) -> Self {
        self.video_resolution = Some(video_resolution);
        self
    }

    pub fn with_reference_image(mut self, reference_image: impl Into<String>) -> Self {
        self.reference_image = Some(reference_image.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

/// The remote generation capability the orchestrator fans out against.
/// Implemented by [`crate::GeminiClient`]; tests substitute their own.
#[async_trait]
pub trait MediaGenerator: Send + Sync {
    /// Generate a single image. The id becomes the item's identity.
    async fn generate_image(
        &self,
        prompt: &str,
        id: &str,
        options: &GenerateOptions,
    ) -> Result<GeneratedItem>;

    /// Generate a single video, waiting for the long-running remote
    /// operation to complete.
    async fn generate_video(
        &self,
        prompt: &str,
        id: &str,
        options: &GenerateOptions,
    ) -> Result<GeneratedItem>;

    /// Break a raw script into per-scene visual prompts. Malformed model
    /// output degrades to an empty list rather than an error.
    async fn analyze_script(&self, script: &str, api_key: Option<&str>) -> Result<Vec<String>>;
}
