//! Per-process credential cache for the LLM provider.
//!
//! Entries carry their own expiry and are checked with a pure predicate. When
//! two callers refresh at the same time both fetch a token and the last write
//! to the slot wins; any token is usable until its own expiry.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;
use tracing::info;

use crate::llm::LlmError;

/// Tokens this close to expiry are treated as already expired.
pub const REFRESH_MARGIN_SECS: i64 = 30;

pub struct CachedToken {
    value: SecretString,
    /// `None` never expires (static API keys).
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    pub fn new(value: SecretString, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { value, expires_at }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        is_expired(self.expires_at, now)
    }

    pub fn secret(&self) -> SecretString {
        SecretString::from(self.value.expose_secret().to_owned())
    }
}

impl std::fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedToken")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

pub fn is_expired(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    expires_at.is_some_and(|at| now + Duration::seconds(REFRESH_MARGIN_SECS) >= at)
}

#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn issue(&self) -> Result<CachedToken, LlmError>;
}

/// A fixed API key from configuration.
pub struct StaticKey {
    key: SecretString,
}

impl StaticKey {
    pub fn new(key: SecretString) -> Self {
        Self { key }
    }
}

#[async_trait]
impl TokenSource for StaticKey {
    async fn issue(&self) -> Result<CachedToken, LlmError> {
        let value = self.key.expose_secret();
        if value.trim().is_empty() {
            return Err(LlmError::MissingCredentials("API key is blank".to_string()));
        }
        Ok(CachedToken::new(SecretString::from(value.to_owned()), None))
    }
}

pub struct TokenCache {
    source: Arc<dyn TokenSource>,
    slot: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self { source, slot: RwLock::new(None) }
    }

    pub async fn token(&self) -> Result<SecretString, LlmError> {
        self.token_at(Utc::now()).await
    }

    pub async fn token_at(&self, now: DateTime<Utc>) -> Result<SecretString, LlmError> {
        if let Some(cached) = self.slot.read().await.as_ref() {
            if !cached.is_expired(now) {
                return Ok(cached.secret());
            }
        }

        let fresh = self.source.issue().await?;
        let secret = fresh.secret();
        info!(
            event_name = "agent.token.refreshed",
            expires_at = ?fresh.expires_at,
            "provider credential refreshed"
        );
        *self.slot.write().await = Some(fresh);
        Ok(secret)
    }

    /// Drops the cached entry, e.g. after the provider rejected it.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }
}

impl std::fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCache").finish_non_exhaustive()
    }
}
