pub mod config;
pub mod error;
pub mod export;
pub mod gemini;
pub mod generator;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod remix;

pub use config::{Credentials, GeminiConfig, GenerationConfig};
pub use error::{GeminiError, Result};
pub use gemini::{GeminiClient, ImageClient, ScriptClient, VideoClient};
pub use generator::{GenerateOptions, MediaGenerator};
pub use models::{
    AspectRatio, GeneratedItem, GenerationRunState, ImageResolution, MediaType, PromptGroup,
    VideoResolution,
};
pub use orchestrator::{GenerationOrchestrator, GenerationSession, NoopObserver, RunObserver};
pub use prompts::extract_prompts;
pub use remix::RemixController;
