//! Remix: re-generate variations of a prior result, reusing its parameters
//! and feeding its content back as a reference image.

use std::sync::Arc;

use chrono::Utc;

use crate::generator::{GenerateOptions, MediaGenerator};
use crate::models::{
    AspectRatio, GeneratedItem, GenerationRunState, ImageResolution, MediaType, PromptGroup,
};
use crate::orchestrator::{GenerationSession, STAGGER_STEP};

pub const REMIX_BATCH_SIZE: usize = 2;

pub const REMIX_FAILED: &str = "Remix failed. Please try again.";

pub const REMIX_STYLE_TITLE: &str = "REMIXED RESULT";

pub struct RemixController<G: MediaGenerator> {
    generator: Arc<G>,
}

impl<G: MediaGenerator> RemixController<G> {
    pub fn new(generator: Arc<G>) -> Self {
        Self { generator }
    }

    /// Generate a fixed small batch of variations seeded from a source
    /// item. Must not overlap a main run; a remix requested while a run is
    /// in progress is refused.
    pub async fn remix(
        &self,
        source: &GeneratedItem,
        new_prompt: &str,
        seed: u64,
        seed_locked: bool,
        session: &mut GenerationSession,
    ) {
        if session.state().is_generating {
            log::warn!("⚠️  Remix refused: a generation run is in progress");
            return;
        }
        if source.media_type == MediaType::Video {
            log::warn!("⚠️  Remix refused: video items cannot be remixed");
            return;
        }

        session.clear_error();
        session.set_finished(false);
        session.set_state(GenerationRunState {
            is_generating: true,
            current_prompt_index: 0,
            total_prompts: 1,
            status_message: "Remixing...".to_string(),
        });

        let start_ms = Utc::now().timestamp_millis();
        let aspect_ratio = source.aspect_ratio.unwrap_or(AspectRatio::Square);
        let resolution = source.resolution.unwrap_or(ImageResolution::OneK);

        let mut tasks = Vec::with_capacity(REMIX_BATCH_SIZE);
        for j in 0..REMIX_BATCH_SIZE {
            let generator = Arc::clone(&self.generator);
            let prompt = new_prompt.to_string();
            let reference = source.url.clone();
            let id = format!("remix-{}-{}", Utc::now().timestamp_millis(), j);
            let instance_seed = if seed_locked { seed } else { seed + j as u64 * 100 };

            tasks.push(async move {
                tokio::time::sleep(STAGGER_STEP * j as u32).await;

                // The default credential is used; remix never carries an
                // explicit token.
                let options = GenerateOptions {
                    aspect_ratio: Some(aspect_ratio),
                    seed: Some(instance_seed),
                    resolution: Some(resolution),
                    video_resolution: None,
                    reference_image: Some(reference),
                    api_key: None,
                };
                let result = generator.generate_image(&prompt, &id, &options).await;
                if let Err(error) = &result {
                    log::error!("❌ Remix item {} failed: {}", j, error);
                }
                result
            });
        }

        let items: Vec<GeneratedItem> = futures::future::join_all(tasks)
            .await
            .into_iter()
            .filter_map(|outcome| outcome.ok())
            .collect();

        if !items.is_empty() {
            let group = PromptGroup {
                id: format!("remix-group-{}", start_ms),
                original_prompt: new_prompt.to_string(),
                style_title: Some(REMIX_STYLE_TITLE.to_string()),
                items,
                timestamp: Utc::now(),
                media_type: MediaType::Image,
            };
            log::info!("✅ Remix produced {} item(s)", group.items.len());
            session.push_group(group);
        } else {
            log::error!("❌ All remix tasks failed");
            session.set_error(REMIX_FAILED);
        }

        session.set_state(GenerationRunState::idle());
        session.set_finished(true);
    }
}
