use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "4:3")]
    Landscape,
    #[serde(rename = "9:16")]
    Tall,
    #[serde(rename = "16:9")]
    Wide,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Landscape => "4:3",
            AspectRatio::Tall => "9:16",
            AspectRatio::Wide => "16:9",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ImageResolution {
    #[serde(rename = "1K")]
    OneK,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

impl ImageResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageResolution::OneK => "1K",
            ImageResolution::TwoK => "2K",
            ImageResolution::FourK => "4K",
        }
    }

    /// 2K and 4K are only served by the pro image model.
    pub fn needs_pro_model(&self) -> bool {
        !matches!(self, ImageResolution::OneK)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VideoResolution {
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
}

impl VideoResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoResolution::P720 => "720p",
            VideoResolution::P1080 => "1080p",
        }
    }
}

/// One unit of produced media. Only ever constructed for a successful
/// generation call; failed attempts produce nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedItem {
    pub id: String,
    /// Local content reference, a `data:` URI holding the media bytes.
    pub url: String,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<ImageResolution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_resolution: Option<VideoResolution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_strings() {
        assert_eq!(AspectRatio::Wide.as_str(), "16:9");
        assert_eq!(ImageResolution::FourK.as_str(), "4K");
        assert_eq!(VideoResolution::P720.as_str(), "720p");
        assert_eq!(MediaType::Video.as_str(), "video");
    }

    #[test]
    fn test_pro_model_selection() {
        assert!(!ImageResolution::OneK.needs_pro_model());
        assert!(ImageResolution::TwoK.needs_pro_model());
        assert!(ImageResolution::FourK.needs_pro_model());
    }

    #[test]
    fn test_serde_renames() {
        let json = serde_json::to_string(&AspectRatio::Tall).unwrap();
        assert_eq!(json, "\"9:16\"");
        let back: AspectRatio = serde_json::from_str("\"3:4\"").unwrap();
        assert_eq!(back, AspectRatio::Portrait);
    }
}
