//! Gemini vision client: sends a prompt plus an inline document (PDF, image, text) and returns
//! the model's text answer.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::llm_client::{build_http_client, LlmError};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const VISION_MODEL: &str = "gemini-2.5-flash";
const EXTRACTION_TEMPERATURE: f32 = 0.1;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

#[derive(Clone)]
pub struct VisionClient {
    client: Client,
    api_key: String,
}

impl VisionClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: build_http_client()?,
            api_key,
        })
    }

    /// Sends `prompt` with a base64-encoded document and returns the raw model text.
    pub async fn generate_from_document(
        &self,
        prompt: &str,
        base64_document: &str,
        mime_type: &str,
    ) -> Result<String, LlmError> {
        let request_body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: prompt },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type,
                            data: base64_document,
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: EXTRACTION_TEMPERATURE,
            },
        };

        let url = format!("{GEMINI_API_BASE}/{VISION_MODEL}:generateContent");
        info!("Sending document to Gemini ({mime_type})");

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let generated: GenerateResponse = response.json().await?;
        let text = generated.text().ok_or(LlmError::EmptyContent)?;
        debug!("Gemini returned {} bytes", text.len());

        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape_matches_generate_content() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: "extract" },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: "application/pdf",
                            data: "JVBERi0=",
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig { temperature: 0.1 },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "extract");
        assert_eq!(
            value["contents"][0]["parts"][1]["inline_data"]["mime_type"],
            "application/pdf"
        );
        assert!(value["generationConfig"]["temperature"].is_number());
    }

    #[test]
    fn test_response_text_first_candidate_part() {
        let json = r#"{"candidates": [{"content": {"parts": [{"text": "{}"}]}}]}"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("{}"));

        let empty: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.text().is_none());
    }
}
