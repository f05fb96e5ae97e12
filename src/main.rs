use std::env;
use std::path::Path;
use std::sync::Arc;

use mediagen::{
    extract_prompts, export, logger, GeminiClient, GenerationConfig, GenerationOrchestrator,
    GenerationRunState, GenerationSession, PromptGroup, RunObserver,
};

struct ProgressLogger;

impl RunObserver for ProgressLogger {
    fn on_state_change(&mut self, state: &GenerationRunState) {
        if state.is_generating {
            log::info!(
                "📊 {} ({}/{})",
                state.status_message,
                state.current_prompt_index,
                state.total_prompts
            );
        }
    }

    fn on_group(&mut self, group: &PromptGroup) {
        log::info!(
            "🖼️  Group {} ready with {} item(s)",
            group.id,
            group.items.len()
        );
    }

    fn on_run_error(&mut self, message: &str) {
        log::error!("❌ {}", message);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_with_config(
        logger::LoggerConfig::development().with_level(logger::LogLevel::Debug),
    )?;

    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    log::info!("🔍 Checking Gemini environment...");
    match env::var("GEMINI_API_KEY").or_else(|_| env::var("API_KEY")) {
        Ok(key) => {
            log::info!("✅ API key found in environment");
            let prefix: String = key.chars().take(6).collect();
            log::debug!("API key starts with: {}...", prefix);
        }
        Err(_) => {
            log::warn!("⚠️  No GEMINI_API_KEY or API_KEY in environment");
            log::error!("❌ Generation calls will fail with an authentication error");
        }
    }

    let raw_input = env::args().skip(1).collect::<Vec<_>>().join(" ");
    let raw_input = if raw_input.trim().is_empty() {
        "A serene landscape with mountains and a lake at sunset, digital art style".to_string()
    } else {
        raw_input
    };

    let prompts = extract_prompts(&raw_input);
    log::info!("📝 Extracted {} prompt(s)", prompts.len());

    let client = Arc::new(GeminiClient::from_env());
    let orchestrator = GenerationOrchestrator::new(client);
    let mut session = GenerationSession::new();

    let config = GenerationConfig::new().with_seed(rand_seed());
    orchestrator
        .run_with_observer(&prompts, &config, &mut session, &mut ProgressLogger)
        .await;

    if let Some(error) = session.last_error() {
        log::error!("❌ Run finished with error: {}", error);
    }

    let total_items: usize = session.groups().iter().map(|g| g.items.len()).sum();
    log::info!(
        "🎉 Run complete: {} group(s), {} item(s)",
        session.groups().len(),
        total_items
    );

    if total_items > 0 {
        let saved = export::export_all(session.groups(), Path::new("output"))?;
        log::info!("💾 Saved {} file(s) to ./output", saved);
    }

    Ok(())
}

fn rand_seed() -> u64 {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64)
        .unwrap_or(0);
    nanos % 1_000_000
}
