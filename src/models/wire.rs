//! Request and response shapes for the Gemini generateContent and Veo
//! long-running video endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "generationConfig")]
    pub generation_config: Option<GenerationParams>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "inlineData")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GenerationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "imageConfig")]
    pub image_config: Option<ImageParams>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageParams {
    #[serde(rename = "aspectRatio")]
    pub aspect_ratio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "imageSize")]
    pub image_size: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    pub fn text(&self) -> String {
        let mut out = String::new();
        if let Some(candidates) = &self.candidates {
            if let Some(content) = candidates.first().and_then(|c| c.content.as_ref()) {
                for part in &content.parts {
                    if let Some(text) = &part.text {
                        out.push_str(text);
                    }
                }
            }
        }
        out
    }

    /// First inline-data payload of the first candidate, if any.
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
    }
}

// ---- Veo long-running video operation ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateVideosRequest {
    pub instances: Vec<VideoInstance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<VideoParameters>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInstance {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<VideoImageInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoImageInput {
    #[serde(rename = "bytesBase64Encoded")]
    pub bytes_base64_encoded: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoParameters {
    #[serde(rename = "numberOfVideos")]
    pub number_of_videos: u32,
    pub resolution: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoOperation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<VideoOperationResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
}

impl VideoOperation {
    /// Content locator of the first generated video in a completed
    /// operation, if the remote returned one.
    pub fn first_video_uri(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .generated_videos
            .as_ref()?
            .first()?
            .video
            .as_ref()
            .map(|v| v.uri.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoOperationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "generatedVideos")]
    pub generated_videos: Option<Vec<GeneratedVideo>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedVideo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRef {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_concatenates_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"[\"a\","},{"text":"\"b\"]"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.text(), "[\"a\",\"b\"]");
    }

    #[test]
    fn test_first_inline_data() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"here you go"},
                {"inlineData":{"mimeType":"image/png","data":"aGk="}}
            ]}}]}"#,
        )
        .unwrap();
        let inline = response.first_inline_data().unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, "aGk=");
    }

    #[test]
    fn test_operation_video_uri() {
        let op: VideoOperation = serde_json::from_str(
            r#"{"name":"operations/abc","done":true,
                "response":{"generatedVideos":[{"video":{"uri":"https://dl/video?x=1"}}]}}"#,
        )
        .unwrap();
        assert!(op.done);
        assert_eq!(op.first_video_uri(), Some("https://dl/video?x=1"));
    }

    #[test]
    fn test_pending_operation_defaults() {
        let op: VideoOperation = serde_json::from_str(r#"{"name":"operations/abc"}"#).unwrap();
        assert!(!op.done);
        assert!(op.first_video_uri().is_none());
    }
}
