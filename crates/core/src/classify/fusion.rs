//! Fusion of keyword scores with the marketplace verdict, then ranking and
//! confidence labelling.

use std::collections::BTreeSet;

use crate::classify::context::ClassificationContext;
use crate::classify::marketplace::MarketplaceVerdict;
use crate::domain::candidate::{Candidate, ConfidenceLevel};
use crate::domain::chapter::Chapter;
use crate::domain::rule::ClassificationRule;

pub const MAX_CANDIDATES: usize = 3;

/// Resolver confidence from which disagreeing rules are nearly eliminated.
pub const SUPPRESS_STRONG_FROM: u8 = 80;
pub const SUPPRESS_STRONG: f64 = 0.05;
pub const SUPPRESS_MEDIUM_FROM: u8 = 60;
pub const SUPPRESS_MEDIUM: f64 = 0.2;
pub const SUPPRESS_WEAK: f64 = 0.5;

const RESOLVER_HIGH_FROM: u8 = 70;
const RESOLVER_MEDIUM_FROM: u8 = 40;
/// A candidate contradicted by a resolver at least this sure is always low.
const RESOLVER_VETO_FROM: u8 = 60;

#[derive(Clone, Copy, Debug, PartialEq)]
struct ScoreBands {
    high: f64,
    medium: f64,
}

const AUTOMOTIVE_BRAND_BANDS: ScoreBands = ScoreBands { high: 5.0, medium: 3.0 };
const BRAND_BANDS: ScoreBands = ScoreBands { high: 4.0, medium: 2.0 };
const PLAIN_BANDS: ScoreBands = ScoreBands { high: 3.0, medium: 2.0 };

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredRule<'a> {
    pub rule: &'a ClassificationRule,
    pub score: f64,
}

/// Whether a rule takes part in ranking: any positive score, or a rule of the
/// resolver's chapter that the text never mentioned.
pub fn admits(score: f64, rule: &ClassificationRule, verdict: Option<&MarketplaceVerdict>) -> bool {
    score > 0.0 || verdict.is_some_and(|verdict| verdict.chapter == rule.chapter)
}

pub fn suppression_factor(resolver_confidence: u8) -> f64 {
    if resolver_confidence >= SUPPRESS_STRONG_FROM {
        SUPPRESS_STRONG
    } else if resolver_confidence >= SUPPRESS_MEDIUM_FROM {
        SUPPRESS_MEDIUM
    } else {
        SUPPRESS_WEAK
    }
}

/// Reinforces rules of the resolver's chapter and suppresses the rest.
pub fn fuse(scored: &mut [ScoredRule<'_>], verdict: &MarketplaceVerdict) {
    let factor = suppression_factor(verdict.confidence);
    for entry in scored.iter_mut() {
        if entry.rule.chapter == verdict.chapter {
            entry.score += f64::from(verdict.confidence);
        } else {
            entry.score *= factor;
        }
    }
}

/// Sorts by fused score, keeps the first rule per 6-digit code and labels up
/// to [`MAX_CANDIDATES`]. Never returns an empty list.
pub fn rank(
    mut scored: Vec<ScoredRule<'_>>,
    verdict: Option<&MarketplaceVerdict>,
    ctx: &ClassificationContext,
) -> Vec<Candidate> {
    scored.sort_by(|left, right| right.score.total_cmp(&left.score));

    let mut seen = BTreeSet::new();
    let candidates: Vec<Candidate> = scored
        .into_iter()
        .filter(|entry| seen.insert(entry.rule.hs6.as_str()))
        .take(MAX_CANDIDATES)
        .map(|entry| {
            let agrees = verdict.filter(|verdict| verdict.chapter == entry.rule.chapter);
            let confidence = confidence_for(entry, verdict, ctx);
            let reason = match agrees {
                Some(verdict) => format!("[{}] | {}", verdict.justification, entry.rule.reason),
                None => entry.rule.reason.clone(),
            };
            Candidate::from_rule(entry.rule, confidence, reason)
        })
        .collect();

    if candidates.is_empty() {
        return vec![Candidate::unclassifiable(None)];
    }
    candidates
}

fn confidence_for(
    entry: ScoredRule<'_>,
    verdict: Option<&MarketplaceVerdict>,
    ctx: &ClassificationContext,
) -> ConfidenceLevel {
    if let Some(verdict) = verdict {
        if verdict.chapter == entry.rule.chapter {
            return if verdict.confidence >= RESOLVER_HIGH_FROM {
                ConfidenceLevel::High
            } else if verdict.confidence >= RESOLVER_MEDIUM_FROM {
                ConfidenceLevel::Medium
            } else {
                ConfidenceLevel::Low
            };
        }
        if verdict.confidence >= RESOLVER_VETO_FROM {
            return ConfidenceLevel::Low;
        }
    }

    let rule_chapter = entry.rule.chapter;
    let bands = match ctx.brand_chapter {
        Some(Chapter::AUTOMOTIVE) if rule_chapter == Chapter::AUTOMOTIVE => AUTOMOTIVE_BRAND_BANDS,
        Some(brand) if brand == rule_chapter => BRAND_BANDS,
        _ => PLAIN_BANDS,
    };
    if entry.score >= bands.high {
        ConfidenceLevel::High
    } else if entry.score >= bands.medium {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}
