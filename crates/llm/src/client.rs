use pitchmatch_common::{PitchMatchError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::llm_trait::TextGenerator;
use crate::types::{ChatRequest, ChatResponse};

/// DeepSeek chat-completions client
#[derive(Debug, Clone)]
pub struct DeepSeekClient {
    api_url: String,
    api_key: String,
    max_retries: u32,
    client: Client,
}

impl DeepSeekClient {
    /// Create new DeepSeek client
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_url = api_url.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!("DeepSeek client initialized: {} (timeout {:?})", api_url, timeout);
        Ok(Self {
            api_url,
            api_key: api_key.into(),
            max_retries: 1,
            client,
        })
    }

    /// Set the number of attempts per request (at least one)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Send a chat request (with retry logic)
    pub async fn chat(&self, request: ChatRequest) -> Result<String> {
        debug!(
            "Sending chat request to DeepSeek - Model: {}, Messages: {}",
            request.model,
            request.messages.len()
        );

        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.try_chat(&request).await {
                Ok(text) => {
                    debug!("Received response from DeepSeek - Length: {}", text.len());
                    return Ok(text);
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        let delay = Duration::from_secs(2u64.pow(attempt - 1));
                        warn!(
                            "DeepSeek request failed (attempt {}/{}): {}. Retrying in {:?}...",
                            attempt, self.max_retries, e, delay
                        );
                        tokio::time::sleep(delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| PitchMatchError::generation("All retries failed")))
    }

    /// Single attempt
    async fn try_chat(&self, request: &ChatRequest) -> Result<String> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| PitchMatchError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PitchMatchError::upstream(status.as_u16(), compact_body(&body)));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| PitchMatchError::generation(format!("Failed to parse response: {}", e)))?;

        Ok(result.text())
    }
}

#[async_trait]
impl TextGenerator for DeepSeekClient {
    async fn generate(&self, request: ChatRequest) -> Result<String> {
        self.chat(request).await
    }

    fn provider(&self) -> &str {
        "deepseek"
    }
}

/// Re-serialize a JSON error body without whitespace; other bodies pass through
fn compact_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .map(|value| value.to_string())
        .unwrap_or_else(|_| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = DeepSeekClient::new(
            "https://api.deepseek.com/chat/completions",
            "sk-test",
            Duration::from_secs(60),
        )
        .unwrap();
        assert_eq!(client.provider(), "deepseek");
        assert_eq!(client.max_retries, 1);
        assert_eq!(client.with_max_retries(0).max_retries, 1);
    }

    #[test]
    fn test_compact_body() {
        assert_eq!(
            compact_body("{\n  \"error\": {\n    \"message\": \"bad key\"\n  }\n}"),
            r#"{"error":{"message":"bad key"}}"#
        );
        assert_eq!(compact_body(" Bad Gateway \n"), "Bad Gateway");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client = DeepSeekClient::new(
            "http://127.0.0.1:9/chat/completions",
            "sk-test",
            Duration::from_secs(2),
        )
        .unwrap();
        let request = ChatRequest {
            model: "deepseek-chat".to_string(),
            messages: Vec::new(),
            max_tokens: None,
            temperature: None,
            stream: None,
        };
        let err = client.chat(request).await.unwrap_err();
        assert!(matches!(err, PitchMatchError::Network(_)));
    }
}
