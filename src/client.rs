use crate::error::{PipelineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Environment variable holding the Groq API key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Base URL for the Groq API (OpenAI-compatible).
const API_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Generation temperature used for every stage. Lower favors factual output.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Output-token ceiling used for every stage.
pub const DEFAULT_MAX_TOKENS: u32 = 5000;

/// One completion call: a rendered prompt plus the model and generation
/// parameters serving it.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Boundary to the remote completion service.
///
/// Implementations are stateless and thread-safe. Given a rendered prompt
/// they return the generated text, or fail with
/// [`PipelineError::Upstream`]. Failures are not retried here.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

// --- Wire types (OpenAI-compatible chat completions) ---

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Completion client for Groq's LPU-accelerated inference.
pub struct GroqClient {
    client: Client,
    api_key: String,
}

impl GroqClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    /// Create a client from the `GROQ_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            PipelineError::Config(format!(
                "missing {API_KEY_ENV} environment variable; get an API key from \
                 https://console.groq.com/keys"
            ))
        })?;
        Ok(Self::new(api_key))
    }

    fn api_url(endpoint: &str) -> String {
        format!("{API_BASE_URL}/{endpoint}")
    }

    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> PipelineError {
        let message = match serde_json::from_str::<ApiErrorResponse>(body) {
            Ok(resp) => resp.error.message,
            Err(_) => body.chars().take(200).collect(),
        };

        let message = match status.as_u16() {
            401 => format!("authentication failed: {message}"),
            429 => format!("rate limit exceeded: {message}"),
            _ => format!("API error ({status}): {message}"),
        };

        PipelineError::Upstream(message)
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        debug!(model = %request.model, "sending chat completion request");

        let body = ChatCompletionRequest {
            model: &request.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(Self::api_url("chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("failed to send request to completion service: {e}");
                PipelineError::Upstream(format!("failed to connect: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            PipelineError::Upstream(format!("failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| PipelineError::Upstream(format!("failed to parse response: {e}")))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| PipelineError::Upstream("API returned no choices".to_string()))?;

        debug!(chars = content.len(), "received completion");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = CompletionRequest::new("llama-3.3-70b-versatile", "prompt");
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.max_tokens, 5000);
    }

    #[test]
    fn test_request_builder() {
        let request = CompletionRequest::new("m", "p")
            .with_temperature(0.2)
            .with_max_tokens(256);
        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.max_tokens, 256);
    }

    #[test]
    fn test_wire_request_shape() {
        let body = ChatCompletionRequest {
            model: "mixtral-8x7b-32768",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            temperature: 0.7,
            max_tokens: 5000,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "mixtral-8x7b-32768");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
        assert_eq!(value["max_tokens"], 5000);
    }

    #[test]
    fn test_parse_error_response_structured() {
        let body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error"}}"#;
        let err = GroqClient::parse_error_response(reqwest::StatusCode::UNAUTHORIZED, body);
        let text = err.to_string();
        assert!(text.contains("authentication failed"));
        assert!(text.contains("Invalid API Key"));
    }

    #[test]
    fn test_parse_error_response_rate_limit() {
        let body = r#"{"error": {"message": "Rate limit reached"}}"#;
        let err = GroqClient::parse_error_response(reqwest::StatusCode::TOO_MANY_REQUESTS, body);
        assert!(err.to_string().contains("rate limit exceeded"));
    }

    #[test]
    fn test_parse_error_response_unstructured() {
        let err =
            GroqClient::parse_error_response(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert!(err.to_string().contains("upstream down"));
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "a recipe"}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("a recipe")
        );
    }
}
