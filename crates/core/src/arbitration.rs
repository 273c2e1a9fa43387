//! Optional external arbitration and the first-available-wins orchestration
//! around the rule pipeline.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::classify::fusion::MAX_CANDIDATES;
use crate::classify::ClassificationEngine;
use crate::domain::candidate::Candidate;
use crate::domain::chapter::Chapter;
use crate::domain::product::{ProductInput, ProductText};
use crate::domain::rule::is_hs6_code;
use crate::errors::DomainError;

/// Chapters whose codes are spelled out in an arbitration request.
pub const REFERENCE_CHAPTERS: usize = 3;
const RULE_KEYWORDS_SHOWN: usize = 6;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ArbitrationError {
    #[error("arbitrator unavailable: {0}")]
    Unavailable(String),
    #[error("arbitrator timed out after {seconds}s")]
    Timeout { seconds: u64 },
    #[error("arbitrator transport error: {0}")]
    Transport(String),
    #[error("arbitrator returned HTTP {code}")]
    Status { code: u16 },
    #[error("arbitrator response malformed: {0}")]
    Malformed(String),
    #[error("arbitrator returned no candidates")]
    Empty,
    #[error("arbitrator answer rejected: {0}")]
    Rejected(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReferenceCode {
    pub chapter: Chapter,
    pub code: String,
    pub description: String,
}

/// Everything an arbitrator may look at. `reference_codes` is the closed set
/// it must choose from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArbitrationRequest {
    pub name: String,
    pub description: String,
    pub attributes: BTreeMap<String, String>,
    pub category_path: String,
    pub chapters: Vec<Chapter>,
    pub reference_codes: Vec<ReferenceCode>,
}

impl ArbitrationRequest {
    pub fn allows(&self, hs6: &str) -> bool {
        let wanted = digits(hs6);
        !wanted.is_empty()
            && self.reference_codes.iter().any(|reference| digits(&reference.code).starts_with(&wanted))
    }
}

fn digits(code: &str) -> String {
    code.chars().filter(char::is_ascii_digit).collect()
}

#[async_trait]
pub trait Arbitrator: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    async fn arbitrate(
        &self,
        request: &ArbitrationRequest,
    ) -> Result<Vec<Candidate>, ArbitrationError>;
}

/// Guardrail applied to every arbitrator answer before it may replace the
/// rule pipeline.
pub fn validate_candidates(
    request: &ArbitrationRequest,
    mut candidates: Vec<Candidate>,
) -> Result<Vec<Candidate>, ArbitrationError> {
    if candidates.is_empty() {
        return Err(ArbitrationError::Empty);
    }
    candidates.truncate(MAX_CANDIDATES);
    for candidate in &candidates {
        if !is_hs6_code(&candidate.hs6) {
            return Err(ArbitrationError::Rejected(format!(
                "`{}` is not a 6-digit code",
                candidate.hs6
            )));
        }
        if !request.allows(&candidate.hs6) {
            return Err(ArbitrationError::Rejected(format!(
                "`{}` is outside the reference codes",
                candidate.hs6
            )));
        }
    }
    Ok(candidates)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    Arbitrator,
    Rules,
}

impl fmt::Display for ClassificationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Arbitrator => "arbitrator",
            Self::Rules => "rules",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Classification {
    pub candidates: Vec<Candidate>,
    pub source: ClassificationSource,
    /// Upstream signals that were unavailable for this request.
    pub notes: Vec<String>,
}

/// Entry point: tries the arbitrator when one is configured and falls back to
/// the rule pipeline on any failure. Results are never blended.
#[derive(Clone)]
pub struct Classifier {
    engine: ClassificationEngine,
    arbitrator: Option<Arc<dyn Arbitrator>>,
}

impl Classifier {
    pub fn new(engine: ClassificationEngine) -> Self {
        Self { engine, arbitrator: None }
    }

    pub fn with_arbitrator(mut self, arbitrator: Arc<dyn Arbitrator>) -> Self {
        self.arbitrator = Some(arbitrator);
        self
    }

    pub fn engine(&self) -> &ClassificationEngine {
        &self.engine
    }

    pub fn has_arbitrator(&self) -> bool {
        self.arbitrator.is_some()
    }

    pub fn arbitration_request(&self, product: &ProductInput) -> ArbitrationRequest {
        let corpus = self.engine.corpus();
        let chapters = self.engine.shortlist(product).chapters;
        let mut reference_codes = Vec::new();

        for chapter in chapters.iter().take(REFERENCE_CHAPTERS) {
            if let Some(schedule) = &corpus.schedule {
                reference_codes.extend(schedule.entries(*chapter).iter().map(|entry| ReferenceCode {
                    chapter: *chapter,
                    code: entry.code.clone(),
                    description: entry.description.clone(),
                }));
            }
            reference_codes.extend(corpus.rules_in(*chapter).map(|rule| {
                let keywords: Vec<&str> =
                    rule.keywords.iter().take(RULE_KEYWORDS_SHOWN).map(String::as_str).collect();
                ReferenceCode {
                    chapter: *chapter,
                    code: rule.hs6.clone(),
                    description: format!(
                        "{} ({}); HTS {}; JP {}; keywords: {}",
                        rule.category,
                        rule.material,
                        rule.hts10,
                        rule.jp_hs9,
                        keywords.join(", ")
                    ),
                }
            }));
        }

        ArbitrationRequest {
            name: product.name.clone(),
            description: product.description.clone(),
            attributes: product.attributes.clone(),
            category_path: product.category_path.clone(),
            chapters,
            reference_codes,
        }
    }

    pub async fn classify(&self, product: &ProductInput) -> Result<Classification, DomainError> {
        product.ensure_classifiable()?;
        let mut notes = Vec::new();

        if let Some(arbitrator) = &self.arbitrator {
            let request = self.arbitration_request(product);
            let outcome = arbitrator
                .arbitrate(&request)
                .await
                .and_then(|candidates| validate_candidates(&request, candidates));
            match outcome {
                Ok(candidates) => {
                    info!(
                        event_name = "classify.arbitration.accepted",
                        arbitrator = arbitrator.name(),
                        candidates = candidates.len(),
                        "arbitrator answer accepted"
                    );
                    return Ok(Classification {
                        candidates,
                        source: ClassificationSource::Arbitrator,
                        notes,
                    });
                }
                Err(error) => {
                    warn!(
                        event_name = "classify.arbitration.fallback",
                        arbitrator = arbitrator.name(),
                        error = %error,
                        "arbitrator failed; using rule pipeline"
                    );
                    notes.push(error.to_string());
                }
            }
        }

        let candidates = self.engine.classify(product)?;
        Ok(Classification { candidates, source: ClassificationSource::Rules, notes })
    }

    /// Classifies provider output. A provider error is recorded as a note and
    /// only the free text is used.
    pub async fn classify_text(&self, text: ProductText) -> Result<Classification, DomainError> {
        let provider_error = text.error.clone().filter(|error| !error.trim().is_empty());
        let product = text.into_input()?;
        let mut classification = self.classify(&product).await?;
        if let Some(error) = provider_error {
            warn!(event_name = "classify.text.degraded", error = %error, "text provider failed");
            classification.notes.insert(0, format!("text provider: {error}"));
        }
        Ok(classification)
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("engine", &self.engine)
            .field("arbitrator", &self.arbitrator.as_ref().map(|arbitrator| arbitrator.name()))
            .finish()
    }
}
