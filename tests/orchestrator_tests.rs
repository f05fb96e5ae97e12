mod common;

use std::sync::Arc;
use std::time::Duration;

use common::MockGenerator;
use mediagen::orchestrator::VIDEO_BATCH_FAILED;
use mediagen::{
    GenerationConfig, GenerationOrchestrator, GenerationRunState, GenerationSession, MediaType,
    PromptGroup, RunObserver,
};
use tokio::time::Instant;

fn prompts(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[derive(Default)]
struct RecordingObserver {
    states: Vec<GenerationRunState>,
    groups: Vec<String>,
    errors: Vec<String>,
    finished: bool,
}

impl RunObserver for RecordingObserver {
    fn on_state_change(&mut self, state: &GenerationRunState) {
        self.states.push(state.clone());
    }

    fn on_group(&mut self, group: &PromptGroup) {
        self.groups.push(group.original_prompt.clone());
    }

    fn on_run_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn on_finished(&mut self) {
        self.finished = true;
    }
}

#[tokio::test(start_paused = true)]
async fn two_prompt_image_run_derives_seeds_and_orders_groups() {
    let generator = Arc::new(MockGenerator::new());
    let orchestrator = GenerationOrchestrator::new(Arc::clone(&generator));
    let mut session = GenerationSession::new();

    let config = GenerationConfig::new().with_seed(100).with_batch_size(2);
    let started = Instant::now();
    orchestrator
        .run(&prompts(&["cat", "dog"]), &config, &mut session)
        .await;

    // Two groups, prepended newest-first: dog completed after cat.
    assert_eq!(session.groups().len(), 2);
    assert_eq!(session.groups()[0].original_prompt, "dog");
    assert_eq!(session.groups()[1].original_prompt, "cat");

    // Derived seeds follow base + j + i*100, in ascending task-index order.
    let cat_seeds: Vec<_> = session.groups()[1].items.iter().map(|i| i.seed).collect();
    let dog_seeds: Vec<_> = session.groups()[0].items.iter().map(|i| i.seed).collect();
    assert_eq!(cat_seeds, vec![Some(100), Some(101)]);
    assert_eq!(dog_seeds, vec![Some(200), Some(201)]);

    // Strict prompt sequencing: every cat call starts before any dog call.
    let calls = generator.calls();
    assert_eq!(calls.len(), 4);
    assert!(calls[..2].iter().all(|c| c.prompt == "cat"));
    assert!(calls[2..].iter().all(|c| c.prompt == "dog"));

    // One 2s image cooldown plus a 500ms stagger per batch.
    assert_eq!(started.elapsed(), Duration::from_millis(500 + 2000 + 500));

    assert!(session.is_finished());
    assert!(session.last_error().is_none());
    assert_eq!(session.state(), &GenerationRunState::idle());
}

#[tokio::test(start_paused = true)]
async fn partial_failure_keeps_remaining_items() {
    // Seed 100 is cat's first task; seed 201 is dog's second.
    let generator = Arc::new(MockGenerator::failing_seeds(&[100, 201]));
    let orchestrator = GenerationOrchestrator::new(Arc::clone(&generator));
    let mut session = GenerationSession::new();

    let config = GenerationConfig::new().with_seed(100).with_batch_size(2);
    orchestrator
        .run(&prompts(&["cat", "dog"]), &config, &mut session)
        .await;

    assert_eq!(session.groups().len(), 2);
    let cat = &session.groups()[1];
    let dog = &session.groups()[0];
    assert_eq!(cat.items.len(), 1);
    assert_eq!(cat.items[0].seed, Some(101));
    assert_eq!(dog.items.len(), 1);
    assert_eq!(dog.items[0].seed, Some(200));
    assert!(session.last_error().is_none());
}

#[tokio::test(start_paused = true)]
async fn all_failed_image_batch_is_silently_skipped() {
    let generator = Arc::new(MockGenerator::failing_all());
    let orchestrator = GenerationOrchestrator::new(Arc::clone(&generator));
    let mut session = GenerationSession::new();

    let config = GenerationConfig::new().with_seed(1);
    orchestrator.run(&prompts(&["cat"]), &config, &mut session).await;

    assert!(session.groups().is_empty());
    assert!(session.last_error().is_none());
    assert!(session.is_finished());
}

#[tokio::test(start_paused = true)]
async fn all_failed_video_batch_surfaces_an_error() {
    let generator = Arc::new(MockGenerator::failing_all());
    let orchestrator = GenerationOrchestrator::new(Arc::clone(&generator));
    let mut session = GenerationSession::new();

    let config = GenerationConfig::new()
        .with_media_type(MediaType::Video)
        .with_seed(1);
    orchestrator.run(&prompts(&["cat"]), &config, &mut session).await;

    assert!(session.groups().is_empty());
    assert_eq!(session.last_error(), Some(VIDEO_BATCH_FAILED));
    assert!(session.is_finished());
}

#[tokio::test(start_paused = true)]
async fn video_runs_clamp_the_batch_to_one() {
    let generator = Arc::new(MockGenerator::new());
    let orchestrator = GenerationOrchestrator::new(Arc::clone(&generator));
    let mut session = GenerationSession::new();

    let config = GenerationConfig::new()
        .with_media_type(MediaType::Video)
        .with_batch_size(4)
        .with_seed(7)
        .with_reference_image("data:image/png;base64,cmVm");
    orchestrator.run(&prompts(&["waves"]), &config, &mut session).await;

    let calls = generator.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].kind, MediaType::Video);
    // Video runs forward the configured reference image; image runs do not.
    assert_eq!(
        calls[0].reference_image.as_deref(),
        Some("data:image/png;base64,cmVm")
    );
    assert_eq!(session.groups().len(), 1);
    assert_eq!(session.groups()[0].items.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn observer_sees_state_progression_and_reset() {
    let generator = Arc::new(MockGenerator::new());
    let orchestrator = GenerationOrchestrator::new(Arc::clone(&generator));
    let mut session = GenerationSession::new();
    let mut observer = RecordingObserver::default();

    let config = GenerationConfig::new().with_seed(5).with_batch_size(1);
    orchestrator
        .run_with_observer(&prompts(&["a", "b"]), &config, &mut session, &mut observer)
        .await;

    // Starting, prompt 1, prompt 2, idle reset.
    assert_eq!(observer.states.len(), 4);
    assert_eq!(observer.states[0].current_prompt_index, 0);
    assert_eq!(observer.states[0].total_prompts, 2);
    assert!(observer.states[0].is_generating);
    assert_eq!(observer.states[1].current_prompt_index, 1);
    assert_eq!(observer.states[2].current_prompt_index, 2);
    assert_eq!(observer.states[3], GenerationRunState::idle());

    assert_eq!(observer.groups, vec!["a", "b"]);
    assert!(observer.errors.is_empty());
    assert!(observer.finished);
}

#[tokio::test(start_paused = true)]
async fn empty_prompt_list_finishes_immediately() {
    let generator = Arc::new(MockGenerator::new());
    let orchestrator = GenerationOrchestrator::new(Arc::clone(&generator));
    let mut session = GenerationSession::new();

    orchestrator
        .run(&[], &GenerationConfig::new(), &mut session)
        .await;

    assert!(generator.calls().is_empty());
    assert!(session.groups().is_empty());
    assert!(session.is_finished());
    assert_eq!(session.state(), &GenerationRunState::idle());
}

#[tokio::test(start_paused = true)]
async fn storyboard_run_feeds_analyzed_prompts_into_a_run() {
    let generator = Arc::new(MockGenerator::with_script_prompts(&["scene 1", "scene 2"]));
    let orchestrator = GenerationOrchestrator::new(Arc::clone(&generator));
    let mut session = GenerationSession::new();

    let count = orchestrator
        .run_storyboard("a story", 9, &mut session)
        .await
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(session.groups().len(), 2);
    // Storyboard runs generate one image per scene.
    assert_eq!(session.groups()[0].items.len(), 1);
    assert_eq!(session.groups()[1].items.len(), 1);
    assert_eq!(session.groups()[1].original_prompt, "scene 1");
}

#[tokio::test(start_paused = true)]
async fn storyboard_with_unusable_analysis_runs_nothing() {
    let generator = Arc::new(MockGenerator::new());
    let orchestrator = GenerationOrchestrator::new(Arc::clone(&generator));
    let mut session = GenerationSession::new();

    let count = orchestrator
        .run_storyboard("a story", 9, &mut session)
        .await
        .unwrap();

    assert_eq!(count, 0);
    assert!(session.groups().is_empty());
}

#[tokio::test(start_paused = true)]
async fn storyboard_analysis_failure_propagates() {
    let generator = Arc::new(MockGenerator::failing_all());
    let orchestrator = GenerationOrchestrator::new(Arc::clone(&generator));
    let mut session = GenerationSession::new();

    let result = orchestrator.run_storyboard("a story", 9, &mut session).await;
    assert!(result.is_err());
    assert!(session.groups().is_empty());
}
