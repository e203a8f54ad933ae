use lazy_static::lazy_static;
use regex::Regex;

use super::StructuredResponse;
use crate::shared::constants::LOG_PREVIEW_CHARS;

lazy_static! {
    /// Fenced block with an optional language tag: ```json ... ```
    static ref FENCED_BLOCK_RE: Regex = Regex::new(r"(?s)```[A-Za-z]*[ \t]*\r?\n?(.*?)```").unwrap();
}

/// First `LOG_PREVIEW_CHARS` characters of a model response, for logging
pub fn preview(text: &str) -> String {
    text.chars().take(LOG_PREVIEW_CHARS).collect()
}

/// Extract JSON string from text (handles multiple formats)
///
/// Tries in order:
/// 1. JSON in a markdown code block, with or without a language tag
/// 2. Plain JSON starting with {
/// 3. JSON embedded anywhere in text (first { to last })
///
/// Only surrounding text is stripped; the JSON itself is never rewritten.
pub fn extract_json_string(text: &str) -> Result<String, String> {
    if let Some(block) = FENCED_BLOCK_RE.captures(text).and_then(|c| c.get(1)) {
        return Ok(block.as_str().trim().to_string());
    }

    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return Ok(trimmed.to_string());
    }

    let start = text
        .find('{')
        .ok_or_else(|| "No JSON object found in response".to_string())?;

    let end = text
        .rfind('}')
        .ok_or_else(|| "Incomplete JSON object in response".to_string())?;

    if start < end {
        Ok(text[start..=end].to_string())
    } else {
        Err("Invalid JSON boundaries in response".to_string())
    }
}

/// Parse model output into `T`, then run `T::validate`.
///
/// The extracted JSON must parse as-is. Truncated objects, trailing commas and
/// missing fields are errors, so the caller can move on to another model
/// instead of accepting a guessed repair.
pub fn parse_structured<T>(text: &str) -> Result<T, String>
where
    T: StructuredResponse,
{
    let json_str = extract_json_string(text)?;

    tracing::debug!("Extracted JSON (preview): {}", preview(&json_str));

    let parsed: T = serde_json::from_str(&json_str).map_err(|e| {
        format!(
            "Response does not match the expected schema ({}). Original: {}",
            e,
            preview(&json_str)
        )
    })?;
    parsed.validate()?;
    Ok(parsed)
}
