//! Tariff arbitrator backed by a hosted LLM.
//!
//! The model only picks among reference codes the core hands it; the core
//! validates the answer and falls back to its rule pipeline on any failure.
//!
//! - `llm` - the client seam and its error type
//! - `anthropic` - Messages API client with a bounded call time
//! - `auth` - credential cache with explicit expiry
//! - `prompt` - system prompt and user message construction
//! - `arbitrator` - [`LlmArbitrator`], the core `Arbitrator` implementation

pub mod anthropic;
pub mod arbitrator;
pub mod auth;
pub mod llm;
pub mod prompt;

pub use anthropic::AnthropicClient;
pub use arbitrator::LlmArbitrator;
pub use auth::{CachedToken, StaticKey, TokenCache, TokenSource};
pub use llm::{CompletionRequest, LlmClient, LlmError, UnconfiguredClient};
