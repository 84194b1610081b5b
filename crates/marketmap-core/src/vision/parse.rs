//! Turning the model's completion into candidate startup names.
//!
//! The model is asked for "Category,Name" lines. Anything that doesn't look
//! like exactly one such pair is dropped, including multi-comma lines.

use serde_json::Value;

/// Lowercased substrings that mark preamble or header lines.
const SKIP_MARKERS: &[&str] = &["here is", "startup", "categorized"];

/// The completion text at `choices[0].message.content`, if present.
pub fn completion_text(response: &Value) -> Option<&str> {
    response
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
}

/// Extract candidate names from a completion, in the order they appear.
pub fn parse_candidates(text: &str) -> Vec<String> {
    text.trim()
        .split('\n')
        .filter_map(candidate_from_line)
        .collect()
}

fn candidate_from_line(line: &str) -> Option<String> {
    let (_category, name) = line.split_once(',')?;
    if name.contains(',') {
        return None;
    }
    let lower = line.to_lowercase();
    if SKIP_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return None;
    }
    Some(name.trim().to_string())
}
