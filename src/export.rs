//! Bulk export of in-memory result groups to disk. Every item's data-URI
//! payload is decoded and written as an individual file; a failed item is
//! logged and skipped rather than aborting the export.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::{GeminiError, Result};
use crate::models::{MediaType, PromptGroup};

/// Write every item of every group into `dir` as
/// `google-gen-{id}.{png|mp4}`. Returns the number of files written.
pub fn export_all(groups: &[PromptGroup], dir: &Path) -> Result<usize> {
    fs::create_dir_all(dir)?;

    let mut count = 0;
    for group in groups {
        for item in &group.items {
            let ext = match item.media_type {
                MediaType::Video => "mp4",
                MediaType::Image => "png",
            };
            match decode_data_uri(&item.url) {
                Ok(bytes) => {
                    let path = dir.join(format!("google-gen-{}.{}", item.id, ext));
                    fs::write(&path, bytes)?;
                    log::info!("💾 Saved {}", path.display());
                    count += 1;
                }
                Err(error) => {
                    log::error!("❌ Skipping item {}: {}", item.id, error);
                }
            }
        }
    }

    log::info!("💾 Exported {} file(s) to {}", count, dir.display());
    Ok(count)
}

/// Decode the base64 payload of a `data:` URI.
pub(crate) fn decode_data_uri(url: &str) -> Result<Vec<u8>> {
    if !url.starts_with("data:") {
        let preview: String = url.chars().take(32).collect();
        return Err(GeminiError::Parse(format!("not a data URI: {}", preview)));
    }
    let payload = url
        .find(";base64,")
        .map(|idx| &url[idx + ";base64,".len()..])
        .ok_or_else(|| GeminiError::Parse("data URI is not base64 encoded".to_string()))?;
    BASE64
        .decode(payload)
        .map_err(|e| GeminiError::Parse(e.to_string()))
}
