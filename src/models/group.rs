use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::{GeneratedItem, MediaType};

/// The successful-output bundle for one prompt within a run. Only created
/// when at least one item in the batch succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptGroup {
    pub id: String,
    pub original_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_title: Option<String>,
    pub items: Vec<GeneratedItem>,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

/// Transient progress record for an in-flight run. Written only from the
/// sequential outer loop, never from inside a batch task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationRunState {
    pub is_generating: bool,
    /// 1-based index of the prompt currently in flight.
    pub current_prompt_index: usize,
    pub total_prompts: usize,
    pub status_message: String,
}

impl Default for GenerationRunState {
    fn default() -> Self {
        GenerationRunState {
            is_generating: false,
            current_prompt_index: 0,
            total_prompts: 0,
            status_message: String::new(),
        }
    }
}

impl GenerationRunState {
    pub fn idle() -> Self {
        Self::default()
    }
}
