use async_trait::async_trait;
use thiserror::Error;

/// One single-turn completion: a system prompt and one user message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("no credentials available: {0}")]
    MissingCredentials(String),
    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("provider returned HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("provider response could not be read: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    fn model(&self) -> &str;

    /// Returns the text of the first content block.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

/// Client for a provider whose credentials were never supplied. Every call
/// fails with [`LlmError::MissingCredentials`], so callers fall back instead
/// of refusing to start.
#[derive(Clone, Debug)]
pub struct UnconfiguredClient {
    model: String,
    reason: String,
}

impl UnconfiguredClient {
    pub fn new(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { model: model.into(), reason: reason.into() }
    }
}

#[async_trait]
impl LlmClient for UnconfiguredClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
        Err(LlmError::MissingCredentials(self.reason.clone()))
    }
}
