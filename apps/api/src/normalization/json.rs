//! JSON Repair Layer: makes model output parseable as strict JSON where the only defect is
//! Python/Java-style literal casing. Structure is never touched: unbalanced braces or trailing
//! commas still fail at parse time, and that failure propagates.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::normalization::text::normalize_text;
use crate::normalization::ParseError;

// Value position only: a colon, optional whitespace, then the bare word.
static TRUE_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i):\s*true\b").expect("valid regex"));
static FALSE_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i):\s*false\b").expect("valid regex"));
static NULL_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i):\s*(?:null|none)\b").expect("valid regex"));

/// Normalizes `text` and lowercases boolean/null literals that sit in value position.
///
/// Quoted strings such as `"None of the above"` are left alone because the quote sits between
/// the colon and the word.
pub fn repair_json(text: &str) -> String {
    let normalized = normalize_text(text);
    let repaired = TRUE_LITERAL.replace_all(&normalized, ": true");
    let repaired = FALSE_LITERAL.replace_all(&repaired, ": false");
    let repaired = NULL_LITERAL.replace_all(&repaired, ": null");
    repaired.into_owned()
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Fence-strip, repair, and parse raw model output into a JSON value.
pub fn parse_model_json(raw: &str) -> Result<Value, ParseError> {
    let repaired = repair_json(strip_json_fences(raw));
    debug!("Parsing repaired model JSON ({} bytes)", repaired.len());

    serde_json::from_str(&repaired).map_err(|source| ParseError::InvalidJson {
        text: repaired,
        source,
    })
}
