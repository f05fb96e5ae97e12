#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use mediagen::{
    GenerateOptions, GeneratedItem, GeminiError, MediaGenerator, MediaType, Result,
};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub kind: MediaType,
    pub prompt: String,
    pub id: String,
    pub seed: Option<u64>,
    pub reference_image: Option<String>,
    pub api_key: Option<String>,
}

/// Test double for the remote generation capability. Records every call and
/// fails selectively by derived seed, or wholesale.
#[derive(Default)]
pub struct MockGenerator {
    pub fail_seeds: HashSet<u64>,
    pub fail_all: bool,
    pub script_prompts: Vec<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_seeds(seeds: &[u64]) -> Self {
        MockGenerator {
            fail_seeds: seeds.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn failing_all() -> Self {
        MockGenerator {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn with_script_prompts(prompts: &[&str]) -> Self {
        MockGenerator {
            script_prompts: prompts.iter().map(|p| p.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, kind: MediaType, prompt: &str, id: &str, options: &GenerateOptions) {
        self.calls.lock().unwrap().push(RecordedCall {
            kind,
            prompt: prompt.to_string(),
            id: id.to_string(),
            seed: options.seed,
            reference_image: options.reference_image.clone(),
            api_key: options.api_key.clone(),
        });
    }

    fn should_fail(&self, options: &GenerateOptions) -> bool {
        self.fail_all || options.seed.map_or(false, |s| self.fail_seeds.contains(&s))
    }

    fn item(&self, kind: MediaType, prompt: &str, id: &str, options: &GenerateOptions) -> GeneratedItem {
        GeneratedItem {
            id: id.to_string(),
            url: match kind {
                MediaType::Image => "data:image/png;base64,aW1n".to_string(),
                MediaType::Video => "data:video/mp4;base64,dmlk".to_string(),
            },
            prompt: prompt.to_string(),
            created_at: Utc::now(),
            media_type: kind,
            aspect_ratio: options.aspect_ratio,
            resolution: options.resolution,
            video_resolution: options.video_resolution,
            seed: options.seed,
        }
    }
}

#[async_trait]
impl MediaGenerator for MockGenerator {
    async fn generate_image(
        &self,
        prompt: &str,
        id: &str,
        options: &GenerateOptions,
    ) -> Result<GeneratedItem> {
        self.record(MediaType::Image, prompt, id, options);
        if self.should_fail(options) {
            return Err(GeminiError::Remote("mock image failure".into()));
        }
        Ok(self.item(MediaType::Image, prompt, id, options))
    }

    async fn generate_video(
        &self,
        prompt: &str,
        id: &str,
        options: &GenerateOptions,
    ) -> Result<GeneratedItem> {
        self.record(MediaType::Video, prompt, id, options);
        if self.should_fail(options) {
            return Err(GeminiError::Timeout("mock video timeout".into()));
        }
        Ok(self.item(MediaType::Video, prompt, id, options))
    }

    async fn analyze_script(&self, _script: &str, _api_key: Option<&str>) -> Result<Vec<String>> {
        if self.fail_all {
            return Err(GeminiError::Remote("mock analysis failure".into()));
        }
        Ok(self.script_prompts.clone())
    }
}
