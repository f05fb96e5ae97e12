use crate::config::Credentials;
use crate::error::{GeminiError, Result};
use crate::models::wire::{Content, GenerateContentRequest, GenerateContentResponse, Part};

use super::retry::retry_with_backoff;
use super::{error_from_response, transport_error};

const SCRIPT_MODEL: &str = "gemini-2.5-flash";

#[derive(Clone)]
pub struct ScriptClient {
    http: reqwest::Client,
    credentials: Credentials,
    base_url: String,
}

impl ScriptClient {
    pub fn new(http: reqwest::Client, credentials: Credentials, base_url: String) -> Self {
        Self {
            http,
            credentials,
            base_url,
        }
    }

    /// Break a script into per-scene image prompts. The model is asked for
    /// a raw JSON array of strings; anything else degrades to an empty list.
    pub async fn analyze(&self, script: &str, api_key: Option<&str>) -> Result<Vec<String>> {
        let api_key = self.credentials.resolve(api_key)?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text(build_instruction(script))],
                role: None,
            }],
            generation_config: None,
        };

        log::info!("📖 Analyzing script ({} characters)", script.len());

        let url = format!("{}/models/{}:generateContent", self.base_url, SCRIPT_MODEL);
        let response = retry_with_backoff("script analysis", || {
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

        let prompts = parse_prompt_array(&response.text());
        log::info!("📖 Script analysis produced {} scene prompts", prompts.len());
        Ok(prompts)
    }
}

fn build_instruction(script: &str) -> String {
    format!(
        "You are an expert visual director and storyboard artist.\n\
         Your task is to analyze the provided video script/story and break it down into distinct visual scenes.\n\
         \n\
         For each scene:\n\
         1. Visualize what is happening.\n\
         2. Write a highly detailed, high-quality image generation prompt (suitable for models like Midjourney or Gemini Image).\n\
         3. Describe the subject, action, lighting, camera angle, style, and mood.\n\
         \n\
         SCRIPT:\n\
         \"{}\"\n\
         \n\
         OUTPUT REQUIREMENT:\n\
         - Return ONLY a raw JSON array of strings.\n\
         - Do not include markdown formatting (like ```json).\n\
         - Example format: [\"Prompt for scene 1...\", \"Prompt for scene 2...\"]",
        script
    )
}

/// Strip any code-fence markup and parse the remainder as a JSON array of
/// strings. Malformed output yields an empty list, never an error.
pub(crate) fn parse_prompt_array(raw: &str) -> Vec<String> {
    let clean = raw.replace("```json", "").replace("```", "");
    match serde_json::from_str::<serde_json::Value>(clean.trim()) {
        Ok(serde_json::Value::Array(values)) => values
            .into_iter()
            .map(|value| match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plain_array() {
        let prompts = parse_prompt_array(r#"["scene one", "scene two"]"#);
        assert_eq!(prompts, vec!["scene one", "scene two"]);
    }

    #[test]
    fn test_strips_code_fences() {
        let prompts = parse_prompt_array("```json\n[\"scene one\"]\n```");
        assert_eq!(prompts, vec!["scene one"]);
    }

    #[test]
    fn test_malformed_output_degrades_to_empty() {
        assert!(parse_prompt_array("no json here").is_empty());
        assert!(parse_prompt_array("{\"not\": \"an array\"}").is_empty());
        assert!(parse_prompt_array("").is_empty());
    }

    #[test]
    fn test_non_string_entries_are_stringified() {
        let prompts = parse_prompt_array("[1, \"two\"]");
        assert_eq!(prompts, vec!["1", "two"]);
    }
}
