//! LLM-backed [`Arbitrator`]: builds the prompt, calls the client and turns the
//! reply into candidates. The core applies the reference-code guardrail.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use tariffy_core::domain::candidate::{Candidate, ConfidenceLevel};
use tariffy_core::config::ArbitratorConfig;
use tariffy_core::{ArbitrationError, ArbitrationRequest, Arbitrator};
use tracing::{debug, warn};

use crate::anthropic::AnthropicClient;
use crate::llm::{CompletionRequest, LlmClient, LlmError, UnconfiguredClient};
use crate::prompt;

pub const AI_REASON_PREFIX: &str = "[AI] ";
const MAX_ANSWERS: usize = 3;

static JSON_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("json span pattern is valid"));

#[derive(Debug, Deserialize)]
struct Answer {
    #[serde(default)]
    candidates: Vec<AnswerCandidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AnswerCandidate {
    hs6: String,
    hts: String,
    jp_hs: String,
    category: String,
    material: String,
    usage: String,
    chapter: String,
    reason: String,
    confidence: Option<String>,
}

impl From<AnswerCandidate> for Candidate {
    fn from(answer: AnswerCandidate) -> Self {
        Self {
            hs6: answer.hs6.trim().to_string(),
            hts10: answer.hts,
            jp_hs9: answer.jp_hs,
            category: answer.category,
            material: answer.material,
            usage: answer.usage,
            chapter: answer.chapter,
            reason: format!("{AI_REASON_PREFIX}{}", answer.reason),
            confidence: answer
                .confidence
                .as_deref()
                .map(ConfidenceLevel::parse_lenient)
                .unwrap_or(ConfidenceLevel::Medium),
        }
    }
}

/// Reads the first `{ ... }` span of a reply that may be wrapped in prose or
/// code fences.
pub fn parse_candidates(reply: &str) -> Result<Vec<Candidate>, ArbitrationError> {
    let span = JSON_SPAN
        .find(reply)
        .ok_or_else(|| ArbitrationError::Malformed("reply contains no JSON object".to_string()))?;
    let answer: Answer = serde_json::from_str(span.as_str())
        .map_err(|error| ArbitrationError::Malformed(error.to_string()))?;

    let candidates: Vec<Candidate> =
        answer.candidates.into_iter().take(MAX_ANSWERS).map(Candidate::from).collect();
    if candidates.is_empty() {
        return Err(ArbitrationError::Empty);
    }
    Ok(candidates)
}

impl From<LlmError> for ArbitrationError {
    fn from(error: LlmError) -> Self {
        match error {
            LlmError::MissingCredentials(detail) => Self::Unavailable(detail),
            LlmError::Timeout { seconds } => Self::Timeout { seconds },
            LlmError::Transport(detail) => Self::Transport(detail),
            LlmError::Status { code, .. } => Self::Status { code },
            LlmError::InvalidResponse(detail) => Self::Malformed(detail),
        }
    }
}

pub struct LlmArbitrator {
    client: Arc<dyn LlmClient>,
    max_tokens: u32,
}

impl LlmArbitrator {
    pub fn new(client: Arc<dyn LlmClient>, max_tokens: u32) -> Self {
        Self { client, max_tokens }
    }

    /// Anthropic-backed arbitrator. A missing API key is not fatal: the
    /// arbitrator is still installed but reports itself unavailable on every
    /// call, which sends classification down the rule pipeline.
    pub fn from_config(config: &ArbitratorConfig) -> Self {
        let client: Arc<dyn LlmClient> = match AnthropicClient::from_config(config) {
            Ok(client) => Arc::new(client),
            Err(error) => {
                warn!(
                    event_name = "agent.arbitrator.unconfigured",
                    model = %config.model,
                    error = %error,
                    "arbitrator enabled without credentials; rules will be used"
                );
                let reason = match error {
                    LlmError::MissingCredentials(reason) => reason,
                    other => other.to_string(),
                };
                Arc::new(UnconfiguredClient::new(config.model.clone(), reason))
            }
        };
        Self::new(client, config.max_tokens)
    }
}

impl std::fmt::Debug for LlmArbitrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmArbitrator")
            .field("model", &self.client.model())
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[async_trait]
impl Arbitrator for LlmArbitrator {
    fn name(&self) -> &str {
        self.client.model()
    }

    async fn arbitrate(
        &self,
        request: &ArbitrationRequest,
    ) -> Result<Vec<Candidate>, ArbitrationError> {
        let completion = CompletionRequest {
            system: prompt::system_prompt(request),
            user: prompt::user_message(request),
            max_tokens: self.max_tokens,
        };
        debug!(
            event_name = "agent.arbitrate.request",
            chapters = request.chapters.len(),
            reference_codes = request.reference_codes.len(),
            "asking arbitrator"
        );
        let reply = self.client.complete(&completion).await?;
        parse_candidates(&reply)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tariffy_core::config::AppConfig;
    use tariffy_core::domain::candidate::ConfidenceLevel;
    use tariffy_core::{
        ArbitrationError, ArbitrationRequest, Arbitrator, Chapter, ClassificationEngine,
        ClassificationSource, Classifier, ProductInput, ReferenceCode,
    };

    use super::{parse_candidates, LlmArbitrator};
    use crate::llm::{CompletionRequest, LlmClient, LlmError};

    struct Scripted {
        reply: Result<String, LlmError>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl Scripted {
        fn new(reply: Result<String, LlmError>) -> Arc<Self> {
            Arc::new(Self { reply, seen: Mutex::new(Vec::new()) })
        }
    }

    #[async_trait]
    impl LlmClient for Scripted {
        fn model(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
            self.seen.lock().expect("lock").push(request.clone());
            self.reply.clone()
        }
    }

    fn request() -> ArbitrationRequest {
        ArbitrationRequest {
            name: "Seiko Presage".to_string(),
            description: String::new(),
            attributes: BTreeMap::new(),
            category_path: String::new(),
            chapters: vec![Chapter::WATCHES],
            reference_codes: vec![ReferenceCode {
                chapter: Chapter::WATCHES,
                code: "9102.12".to_string(),
                description: "Watches".to_string(),
            }],
        }
    }

    #[test]
    fn reply_wrapped_in_prose_and_fences_is_parsed() {
        let reply = "Sure, here you go:\n```json\n{\"candidates\": [{\"hs6\": \"9102.12\", \
                     \"chapter\": \"Chapter 91\", \"reason\": \"wrist watch\"}]}\n```";
        let candidates = parse_candidates(reply).expect("parsed");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].hs6, "9102.12");
        assert_eq!(candidates[0].reason, "[AI] wrist watch");
        assert_eq!(candidates[0].confidence, ConfidenceLevel::Medium);
    }

    #[test]
    fn extra_answers_are_dropped() {
        let reply = r#"{"candidates": [
            {"hs6": "9102.12", "confidence": "high"},
            {"hs6": "9102.11", "confidence": "low"},
            {"hs6": "9101.11", "confidence": "manual"},
            {"hs6": "9103.10"}
        ]}"#;
        let candidates = parse_candidates(reply).expect("parsed");
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].confidence, ConfidenceLevel::High);
        assert_eq!(candidates[1].confidence, ConfidenceLevel::Low);
        assert_eq!(candidates[2].confidence, ConfidenceLevel::Medium);
    }

    #[test]
    fn unusable_replies_are_classified() {
        assert!(matches!(parse_candidates("I cannot help"), Err(ArbitrationError::Malformed(_))));
        assert!(matches!(parse_candidates("{not json}"), Err(ArbitrationError::Malformed(_))));
        assert_eq!(parse_candidates(r#"{"candidates": []}"#), Err(ArbitrationError::Empty));
    }

    #[tokio::test]
    async fn client_failures_map_to_arbitration_errors() {
        let cases = [
            (LlmError::Timeout { seconds: 30 }, ArbitrationError::Timeout { seconds: 30 }),
            (
                LlmError::Status { code: 529, body: "overloaded".to_string() },
                ArbitrationError::Status { code: 529 },
            ),
            (
                LlmError::MissingCredentials("no key".to_string()),
                ArbitrationError::Unavailable("no key".to_string()),
            ),
        ];
        for (llm_error, expected) in cases {
            let arbitrator = LlmArbitrator::new(Scripted::new(Err(llm_error)), 1024);
            assert_eq!(arbitrator.arbitrate(&request()).await, Err(expected));
        }
    }

    #[tokio::test]
    async fn missing_key_installs_an_arbitrator_that_reports_unavailable() {
        let config = AppConfig::default().arbitrator;
        let arbitrator = LlmArbitrator::from_config(&config);
        assert_eq!(arbitrator.name(), config.model);
        assert!(matches!(
            arbitrator.arbitrate(&request()).await,
            Err(ArbitrationError::Unavailable(reason)) if reason.contains("api_key")
        ));

        let classifier = Classifier::new(ClassificationEngine::standard())
            .with_arbitrator(Arc::new(arbitrator));
        let outcome = classifier
            .classify(&ProductInput::new("Men's Cotton T-Shirt"))
            .await
            .expect("classified");
        assert_eq!(outcome.source, ClassificationSource::Rules);
        assert_eq!(outcome.candidates[0].hs6, "6109.10");
        assert!(outcome.notes[0].contains("api_key"));
    }

    #[tokio::test]
    async fn prompt_carries_request_and_token_budget() {
        let client = Scripted::new(Ok(r#"{"candidates": [{"hs6": "9102.12"}]}"#.to_string()));
        let arbitrator = LlmArbitrator::new(client.clone(), 512);
        arbitrator.arbitrate(&request()).await.expect("answer");

        let seen = client.seen.lock().expect("lock");
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].max_tokens, 512);
        assert!(seen[0].system.contains("9102.12"));
        assert!(seen[0].user.starts_with("Product: Seiko Presage"));
    }

    #[tokio::test]
    async fn classifier_uses_arbitrator_answer_inside_the_reference_set() {
        let client = Scripted::new(Ok(
            r#"{"candidates": [{"hs6": "6109.10", "chapter": "Chapter 61", "reason": "knit tee", "confidence": "high"}]}"#
                .to_string(),
        ));
        let classifier = Classifier::new(ClassificationEngine::standard())
            .with_arbitrator(Arc::new(LlmArbitrator::new(client, 1024)));

        let outcome = classifier
            .classify(&ProductInput::new("Men's Cotton T-Shirt"))
            .await
            .expect("classified");
        assert_eq!(outcome.source, ClassificationSource::Arbitrator);
        assert_eq!(outcome.candidates[0].reason, "[AI] knit tee");
    }

    #[tokio::test]
    async fn classifier_falls_back_when_arbitrator_invents_a_code() {
        let client = Scripted::new(Ok(r#"{"candidates": [{"hs6": "0101.21"}]}"#.to_string()));
        let classifier = Classifier::new(ClassificationEngine::standard())
            .with_arbitrator(Arc::new(LlmArbitrator::new(client, 1024)));

        let outcome = classifier
            .classify(&ProductInput::new("Men's Cotton T-Shirt"))
            .await
            .expect("classified");
        assert_eq!(outcome.source, ClassificationSource::Rules);
        assert_eq!(outcome.candidates[0].hs6, "6109.10");
        assert_eq!(outcome.notes.len(), 1);
    }
}
