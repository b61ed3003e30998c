// Shared prompt fragments. Each service that needs model calls keeps its own prompts.rs
// alongside it; this file holds the cross-cutting pieces.

/// Instruction appended to every prompt whose answer is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Return ONLY valid JSON with double quotes. \
    Do NOT add text before or after the JSON. \
    Do NOT use markdown code fences. \
    Use standard ASCII punctuation only: no typographic quotes, dashes or invisible characters.";
