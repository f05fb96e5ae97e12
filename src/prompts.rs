//! Prompt extraction for multi-scene prompt exports.
//!
//! External tools export scene lists where every scene is introduced by a
//! "Google Whisk prompt:" marker, followed by the prompt body, an optional
//! all-caps style suffix line, and sometimes a stray closing brace. Text
//! without the marker is treated as a single prompt.

const MARKER: &str = "Google Whisk prompt:";

/// Parse a raw text block into an ordered list of individual prompts.
/// Pure and deterministic; whitespace-only input yields an empty list.
pub fn extract_prompts(input: &str) -> Vec<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut starts = Vec::new();
    let mut from = 0;
    while let Some(pos) = find_marker(input, from) {
        starts.push(pos);
        from = pos + MARKER.len();
    }

    if starts.is_empty() {
        return vec![trimmed.to_string()];
    }

    // The segment preceding the first marker is preamble and dropped.
    let mut prompts = Vec::with_capacity(starts.len());
    for (n, &start) in starts.iter().enumerate() {
        let body_start = start + MARKER.len();
        let body_end = starts.get(n + 1).copied().unwrap_or(input.len());
        let prompt = clean_segment(&input[body_start..body_end]);
        if !prompt.is_empty() {
            prompts.push(prompt);
        }
    }
    prompts
}

/// Case-insensitive marker search. The marker is pure ASCII, so byte-wise
/// comparison is safe in arbitrary UTF-8 input.
fn find_marker(haystack: &str, from: usize) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let marker = MARKER.as_bytes();
    if bytes.len() < marker.len() || from > bytes.len() - marker.len() {
        return None;
    }
    (from..=bytes.len() - marker.len())
        .find(|&i| bytes[i..i + marker.len()].eq_ignore_ascii_case(marker))
}

fn clean_segment(segment: &str) -> String {
    let clean = strip_style_suffix(segment.trim());
    let clean = clean.trim_end();
    let clean = clean.strip_suffix('}').unwrap_or(clean);
    clean.trim().to_string()
}

/// Drop a trailing all-caps style line ("CINEMATIC STYLE"). The suffix must
/// be preceded by a newline; a single-line prompt is never stripped.
fn strip_style_suffix(text: &str) -> &str {
    let trimmed = text.trim_end();
    if !trimmed.ends_with("STYLE") {
        return trimmed;
    }

    let bytes = trimmed.as_bytes();
    let mut start = trimmed.len();
    while start > 0 {
        let b = bytes[start - 1];
        if b.is_ascii_uppercase() || b.is_ascii_whitespace() {
            start -= 1;
        } else {
            break;
        }
    }

    match trimmed[start..].find('\n') {
        Some(pos) => trimmed[..start + pos].trim_end(),
        None => trimmed,
    }
}
