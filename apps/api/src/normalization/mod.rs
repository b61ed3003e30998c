// Model-output cleanup shared by every AI-facing service.
// Text normalization first, then JSON literal repair, then typed parsing in the domain modules.

pub mod fields;
pub mod json;
pub mod text;

use thiserror::Error;

pub use json::parse_model_json;
pub use text::normalize_text;

/// Failure to turn model output into a domain object.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The repaired text still is not valid JSON. Carries the text that failed.
    #[error("model output is not valid JSON ({source}): {text}")]
    InvalidJson {
        text: String,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON, but a structure is not the object/array the parser expects.
    #[error("unexpected model output shape: {reason}")]
    Shape { reason: String },
}

impl ParseError {
    pub fn shape(reason: impl Into<String>) -> Self {
        ParseError::Shape {
            reason: reason.into(),
        }
    }
}
