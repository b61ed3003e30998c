/// LLM Client: the single point of entry for all language-model calls in cvmatch.
///
/// ARCHITECTURAL RULE: No other module may call the OpenAI or Gemini APIs directly.
/// All model interactions MUST go through this module.
///
/// Calls are single-shot: a failed request surfaces immediately as an `LlmError`.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod gemini;
pub mod prompts;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The chat model used for skill analysis and query generation.
pub const MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Per-call sampling options.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Chat-completions client used by the analysis and job-search services.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: build_http_client()?,
            api_key,
        })
    }

    /// Makes one call to the chat-completions API and returns the full response object.
    pub async fn call(
        &self,
        prompt: &str,
        system: Option<&str>,
        options: CallOptions,
    ) -> Result<ChatResponse, LlmError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let request_body = ChatRequest {
            model: MODEL,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }

    /// Calls the model and returns its raw text. Cleanup is the caller's job.
    pub async fn call_text(
        &self,
        prompt: &str,
        system: Option<&str>,
        options: CallOptions,
    ) -> Result<String, LlmError> {
        let response = self.call(prompt, system, options).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

pub(crate) fn build_http_client() -> Result<Client, LlmError> {
    Ok(Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_response_text_first_choice() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "{\"ok\": true}"}},
                {"message": {"role": "assistant", "content": "second"}}
            ],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4}
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("{\"ok\": true}"));
        assert_eq!(response.usage.unwrap().completion_tokens, 4);
    }

    #[test]
    fn test_chat_response_without_choices_has_no_text() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_request_omits_unset_options() {
        let request = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: None,
            max_tokens: Some(200),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("temperature").is_none());
        assert_eq!(value["max_tokens"], 200);
        assert_eq!(value["model"], "gpt-4o-mini");
    }
}
