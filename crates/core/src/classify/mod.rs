//! Rule-based classification pipeline: context detection, enrichment, rule
//! scoring, the marketplace resolver and fusion.

pub mod context;
pub mod disambiguate;
pub mod enrich;
pub mod fusion;
pub mod marketplace;
pub mod matching;
pub mod scoring;
pub mod shortlist;

use std::sync::Arc;

use tracing::debug;

use crate::corpus::Corpus;
use crate::domain::candidate::Candidate;
use crate::domain::product::ProductInput;
use crate::errors::DomainError;

pub use context::{ClassificationContext, ContextDetector};
pub use fusion::ScoredRule;
pub use marketplace::{MarketplaceResolver, MarketplaceVerdict, ResolverTier};
pub use scoring::{RuleScorer, ScoringWeights};
pub use shortlist::{ChapterScore, RelevantChapterSelector, Shortlist};

/// Empirically tuned magnitudes; heuristic, not normative.
pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    keyword_hit: 1.0,
    contextual_mismatch: 0.05,
    automotive_ambiguous: 0.1,
    automotive_brand: 5.0,
    automotive_part_number: 4.0,
    automotive_word: 1.5,
    automotive_threshold: 3.0,
    watch_brand: 5.0,
    brand_chapter: 3.0,
    footwear_brand: 3.0,
    apparel_brand: 2.0,
    part_number: 3.0,
    max_cooccurrence: 3,
};

/// Stateless engine over an immutable corpus; cheap to clone and safe to share
/// across threads.
#[derive(Clone, Debug)]
pub struct ClassificationEngine {
    corpus: Arc<Corpus>,
    weights: ScoringWeights,
}

impl ClassificationEngine {
    pub fn new(corpus: Arc<Corpus>) -> Self {
        Self { corpus, weights: DEFAULT_WEIGHTS }
    }

    pub fn standard() -> Self {
        Self::new(Corpus::shared())
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Ranked candidates, one to three of them. `Err(EmptyProduct)` means there
    /// was no text at all; a product that matched nothing yields the
    /// unclassifiable sentinel instead.
    pub fn classify(&self, product: &ProductInput) -> Result<Vec<Candidate>, DomainError> {
        product.ensure_classifiable()?;
        let corpus = self.corpus.as_ref();

        let verdict = MarketplaceResolver::new(corpus).resolve(product);
        if let Some(verdict) = &verdict {
            debug!(
                event_name = "classify.rules.resolver",
                chapter = %verdict.chapter,
                confidence = verdict.confidence,
                tier = ?verdict.tier,
                "marketplace data resolved a chapter"
            );
        }

        let detector = ContextDetector::new(corpus, &self.weights);
        let first_pass = detector.detect(&product.combined_text(&product.name));
        let enriched_name = enrich::enrich_name(&product.name, &first_pass);
        let text = product.combined_text(&enriched_name);
        let ctx = detector.detect(&text);
        debug!(
            event_name = "classify.rules.context",
            brand = ctx.brand.as_deref().unwrap_or("-"),
            automotive_score = ctx.automotive_score,
            has_part_number = ctx.has_part_number,
            "product context detected"
        );

        let scorer = RuleScorer::new(corpus, &self.weights);
        let mut scored: Vec<ScoredRule<'_>> = corpus
            .rules
            .iter()
            .map(|rule| ScoredRule { rule, score: scorer.score(rule, &text, &ctx) })
            .filter(|entry| fusion::admits(entry.score, entry.rule, verdict.as_ref()))
            .collect();

        if let Some(verdict) = &verdict {
            fusion::fuse(&mut scored, verdict);
        }

        let candidates = fusion::rank(scored, verdict.as_ref(), &ctx);
        debug!(
            event_name = "classify.rules.ranked",
            top_hs6 = %candidates.first().map(|candidate| candidate.hs6.as_str()).unwrap_or("-"),
            candidates = candidates.len(),
            "rule pipeline ranked candidates"
        );
        Ok(candidates)
    }

    pub fn shortlist(&self, product: &ProductInput) -> Shortlist {
        RelevantChapterSelector::new(&self.corpus).select(product)
    }
}

impl Default for ClassificationEngine {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::{ClassificationEngine, DEFAULT_WEIGHTS};
    use crate::domain::candidate::ConfidenceLevel;
    use crate::domain::product::ProductInput;
    use crate::errors::DomainError;

    #[test]
    fn default_weights_match_scoring_default() {
        assert_eq!(super::ScoringWeights::default(), DEFAULT_WEIGHTS);
    }

    #[test]
    fn empty_product_is_not_the_same_as_unclassifiable() {
        let engine = ClassificationEngine::standard();
        assert_eq!(engine.classify(&ProductInput::new(" ")), Err(DomainError::EmptyProduct));

        let ranked = engine.classify(&ProductInput::new("xyz123 unknown widget")).expect("ranked");
        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].is_unclassifiable());
    }

    #[test]
    fn description_alone_is_enough() {
        let engine = ClassificationEngine::standard();
        let ranked = engine
            .classify(&ProductInput::new("").with_description("ceramic coffee mug"))
            .expect("ranked");
        assert_eq!(ranked[0].hs6, "6912.00");
    }

    #[test]
    fn engine_oil_cap_is_automotive_and_baseball_cap_is_headwear() {
        let engine = ClassificationEngine::standard();
        let auto = engine.classify(&ProductInput::new("engine oil cap replacement")).expect("ranked");
        assert_eq!(auto[0].chapter, "Chapter 87");

        let hat = engine.classify(&ProductInput::new("baseball cap with logo")).expect("ranked");
        assert_eq!(hat[0].chapter, "Chapter 65");
        assert_eq!(hat[0].confidence, ConfidenceLevel::Low);
    }
}
