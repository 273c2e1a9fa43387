//! Anthropic Messages API client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tariffy_core::config::ArbitratorConfig;
use tracing::{debug, warn};

use crate::auth::{StaticKey, TokenCache};
use crate::llm::{CompletionRequest, LlmClient, LlmError};

pub const ANTHROPIC_VERSION: &str = "2023-06-01";
const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug)]
pub struct AnthropicClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    timeout: Duration,
    tokens: TokenCache,
}

impl AnthropicClient {
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        timeout: Duration,
        tokens: TokenCache,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/v1/messages", base_url.trim_end_matches('/')),
            model: model.into(),
            timeout,
            tokens,
        }
    }

    pub fn from_config(config: &ArbitratorConfig) -> Result<Self, LlmError> {
        let key = config.api_key().ok_or_else(|| {
            LlmError::MissingCredentials("arbitrator.api_key is not configured".to_string())
        })?;
        let source = StaticKey::new(key.expose_secret().to_owned().into());
        Ok(Self::new(
            &config.base_url,
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
            TokenCache::new(Arc::new(source)),
        ))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let token = self.tokens.token().await?;
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            system: &request.system,
            messages: [Message { role: "user", content: &request.user }],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", token.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|error| LlmError::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if status == reqwest::StatusCode::UNAUTHORIZED {
                self.tokens.invalidate().await;
            }
            let body = response.text().await.unwrap_or_default();
            warn!(
                event_name = "agent.anthropic.status",
                status = status.as_u16(),
                "provider returned an error status"
            );
            return Err(LlmError::Status {
                code: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|error| LlmError::InvalidResponse(error.to_string()))?;
        first_text(parsed)
    }
}

fn first_text(response: MessagesResponse) -> Result<String, LlmError> {
    response
        .content
        .into_iter()
        .find(|block| block.kind == "text" && !block.text.trim().is_empty())
        .map(|block| block.text)
        .ok_or_else(|| LlmError::InvalidResponse("response has no text content".to_string()))
}

#[async_trait]
impl LlmClient for AnthropicClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        debug!(event_name = "agent.anthropic.request", model = %self.model, "calling provider");
        tokio::time::timeout(self.timeout, self.send(request))
            .await
            .map_err(|_| LlmError::Timeout { seconds: self.timeout.as_secs() })?
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;
    use tariffy_core::config::AppConfig;

    use super::{first_text, AnthropicClient, MessagesResponse};
    use crate::llm::LlmError;

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        let mut config = AppConfig::default().arbitrator;
        config.base_url = "https://proxy.internal/".to_string();
        config.api_key = Some(SecretString::from("sk-test".to_string()));

        let client = AnthropicClient::from_config(&config).expect("client builds");
        assert_eq!(client.endpoint(), "https://proxy.internal/v1/messages");
    }

    #[test]
    fn missing_key_is_reported_before_any_request() {
        let config = AppConfig::default().arbitrator;
        let outcome = AnthropicClient::from_config(&config);
        assert!(matches!(outcome, Err(LlmError::MissingCredentials(_))));
    }

    #[test]
    fn first_text_block_is_returned() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{"content": [{"type": "text", "text": "{\"candidates\": []}"}]}"#,
        )
        .expect("response parses");
        assert_eq!(first_text(response), Ok("{\"candidates\": []}".to_string()));

        let empty: MessagesResponse = serde_json::from_str(r#"{"content": []}"#).expect("parses");
        assert!(matches!(first_text(empty), Err(LlmError::InvalidResponse(_))));
    }
}
