//! The generation orchestration core: turns an ordered prompt list plus a
//! configuration into a bounded set of concurrent, staggered generation
//! calls, and assembles the successes into ordered result groups.
//!
//! Prompts are strictly sequential: prompt i+1's batch never starts until
//! prompt i's batch has fully settled and been grouped. Within a batch,
//! tasks start in index order (staggered) and are joined as a barrier, so
//! group membership follows task index order regardless of completion
//! order. Batch tasks only return values; all shared state is written from
//! the sequential outer loop.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::config::GenerationConfig;
use crate::generator::{GenerateOptions, MediaGenerator};
use crate::models::{GeneratedItem, GenerationRunState, MediaType, PromptGroup};

/// Inter-prompt cooldown, throttling call rate against remote burst limits.
pub const VIDEO_COOLDOWN: Duration = Duration::from_millis(5000);
pub const IMAGE_COOLDOWN: Duration = Duration::from_millis(2000);

/// Per-task start delay within a batch, spreading the call burst.
pub const STAGGER_STEP: Duration = Duration::from_millis(500);

pub const VIDEO_BATCH_FAILED: &str =
    "Video creation timed out or failed. Please check quota or try again.";

/// Run-lifecycle notifications, invoked only from the sequential outer
/// loop. All methods default to no-ops.
pub trait RunObserver: Send {
    fn on_state_change(&mut self, _state: &GenerationRunState) {}
    fn on_group(&mut self, _group: &PromptGroup) {}
    fn on_run_error(&mut self, _message: &str) {}
    fn on_finished(&mut self) {}
}

pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// In-memory result collection for one session: the produced groups
/// (newest first), the transient run state, and the last user-visible
/// error. Held only in memory; nothing persists.
#[derive(Debug, Default)]
pub struct GenerationSession {
    groups: Vec<PromptGroup>,
    state: GenerationRunState,
    last_error: Option<String>,
    finished: bool,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result groups, newest first.
    pub fn groups(&self) -> &[PromptGroup] {
        &self.groups
    }

    pub fn state(&self) -> &GenerationRunState {
        &self.state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// True once a run (or remix) has completed since the last start.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn push_group(&mut self, group: PromptGroup) {
        self.groups.insert(0, group);
    }

    pub(crate) fn set_error(&mut self, message: &str) {
        self.last_error = Some(message.to_string());
    }

    pub(crate) fn set_state(&mut self, state: GenerationRunState) {
        self.state = state;
    }

    pub(crate) fn set_finished(&mut self, finished: bool) {
        self.finished = finished;
    }
}

/// Sequences per-prompt batches against a [`MediaGenerator`], collecting
/// successes and ignoring individual failures.
pub struct GenerationOrchestrator<G: MediaGenerator> {
    generator: Arc<G>,
}

impl<G: MediaGenerator> GenerationOrchestrator<G> {
    pub fn new(generator: Arc<G>) -> Self {
        Self { generator }
    }

    pub async fn run(
        &self,
        prompts: &[String],
        config: &GenerationConfig,
        session: &mut GenerationSession,
    ) {
        self.run_with_observer(prompts, config, session, &mut NoopObserver)
            .await
    }

    pub async fn run_with_observer<O: RunObserver>(
        &self,
        prompts: &[String],
        config: &GenerationConfig,
        session: &mut GenerationSession,
        observer: &mut O,
    ) {
        let _timer = crate::logger::timer("generation run");
        let run_start_ms = Utc::now().timestamp_millis();
        let batch_size = config.effective_batch_size();

        session.clear_error();
        session.set_finished(false);
        session.set_state(GenerationRunState {
            is_generating: true,
            current_prompt_index: 0,
            total_prompts: prompts.len(),
            status_message: "Starting...".to_string(),
        });
        observer.on_state_change(session.state());

        log::info!(
            "🚀 Starting {} run: {} prompt(s), batch size {}",
            config.media_type.as_str(),
            prompts.len(),
            batch_size
        );

        for (i, prompt) in prompts.iter().enumerate() {
            let status_message = match config.media_type {
                MediaType::Video => format!(
                    "Generating video {}/{} (this can take a few minutes)...",
                    i + 1,
                    prompts.len()
                ),
                MediaType::Image => {
                    format!("Generating image {}/{}...", i + 1, prompts.len())
                }
            };
            session.set_state(GenerationRunState {
                is_generating: true,
                current_prompt_index: i + 1,
                total_prompts: prompts.len(),
                status_message,
            });
            observer.on_state_change(session.state());

            if i > 0 {
                let cooldown = match config.media_type {
                    MediaType::Video => VIDEO_COOLDOWN,
                    MediaType::Image => IMAGE_COOLDOWN,
                };
                tokio::time::sleep(cooldown).await;
            }

            let items = self.run_batch(prompt, i, batch_size, config).await;

            if !items.is_empty() {
                let group = PromptGroup {
                    id: format!("group-{}-{}", run_start_ms, i),
                    original_prompt: prompt.clone(),
                    style_title: None,
                    items,
                    timestamp: Utc::now(),
                    media_type: config.media_type,
                };
                log::info!(
                    "✅ Prompt {}/{} produced {} item(s)",
                    i + 1,
                    prompts.len(),
                    group.items.len()
                );
                observer.on_group(&group);
                session.push_group(group);
            } else if config.media_type == MediaType::Video {
                log::error!("❌ All video tasks failed for prompt {}/{}", i + 1, prompts.len());
                session.set_error(VIDEO_BATCH_FAILED);
                observer.on_run_error(VIDEO_BATCH_FAILED);
            } else {
                log::warn!("⚠️  All image tasks failed for prompt {}/{}", i + 1, prompts.len());
            }
        }

        session.set_state(GenerationRunState::idle());
        session.set_finished(true);
        observer.on_state_change(session.state());
        observer.on_finished();
    }

    /// Fan out one prompt's batch, join all tasks, and keep the successes
    /// in task-index order. Every failure is contained here.
    async fn run_batch(
        &self,
        prompt: &str,
        prompt_index: usize,
        batch_size: usize,
        config: &GenerationConfig,
    ) -> Vec<GeneratedItem> {
        let mut tasks = Vec::with_capacity(batch_size);
        for j in 0..batch_size {
            let generator = Arc::clone(&self.generator);
            let prompt = prompt.to_string();
            let config = config.clone();
            let id = format!("{}-{}-{}", Utc::now().timestamp_millis(), prompt_index, j);
            // Distinct but reproducible across both the batch and prompt
            // dimensions for a fixed base seed.
            let seed = config.seed + j as u64 + prompt_index as u64 * 100;

            tasks.push(async move {
                tokio::time::sleep(STAGGER_STEP * j as u32).await;

                let result = match config.media_type {
                    MediaType::Video => {
                        let options = GenerateOptions {
                            aspect_ratio: Some(config.aspect_ratio),
                            seed: Some(seed),
                            resolution: None,
                            video_resolution: Some(config.video_resolution),
                            reference_image: config.reference_image.clone(),
                            api_key: config.token.clone(),
                        };
                        generator.generate_video(&prompt, &id, &options).await
                    }
                    MediaType::Image => {
                        let options = GenerateOptions {
                            aspect_ratio: Some(config.aspect_ratio),
                            seed: Some(seed),
                            resolution: Some(config.resolution),
                            video_resolution: None,
                            reference_image: None,
                            api_key: config.token.clone(),
                        };
                        generator.generate_image(&prompt, &id, &options).await
                    }
                };

                if let Err(error) = &result {
                    log::error!(
                        "❌ Batch item {} for prompt {} failed: {}",
                        j,
                        prompt_index + 1,
                        error
                    );
                }
                result
            });
        }

        futures::future::join_all(tasks)
            .await
            .into_iter()
            .filter_map(|outcome| outcome.ok())
            .collect()
    }

    /// Storyboard flow: decompose a script into scene prompts and run them
    /// with the storyboard defaults. `Ok(0)` means the analysis call
    /// worked but produced nothing usable; an `Err` means the call itself
    /// failed.
    pub async fn run_storyboard(
        &self,
        script: &str,
        seed: u64,
        session: &mut GenerationSession,
    ) -> crate::error::Result<usize> {
        let prompts = self.generator.analyze_script(script, None).await?;
        if prompts.is_empty() {
            log::warn!("⚠️  Script analysis returned no usable prompts");
            return Ok(0);
        }
        let config = GenerationConfig::storyboard(seed);
        self.run(&prompts, &config, session).await;
        Ok(prompts.len())
    }
}
