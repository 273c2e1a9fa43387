//! Keyword scoring of one rule against the product text and its context.

use crate::classify::context::ClassificationContext;
use crate::classify::disambiguate::PhraseDisambiguator;
use crate::classify::matching::contains_term;
use crate::corpus::Corpus;
use crate::domain::chapter::Chapter;
use crate::domain::rule::ClassificationRule;

/// Tuned heuristic magnitudes. They carry no derivation; keep them together so
/// they can be adjusted as a set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Plain keyword hit (default: 1.0)
    pub keyword_hit: f64,
    /// Polysemous keyword whose context points at another chapter (default: 0.05)
    pub contextual_mismatch: f64,
    /// Polysemous keyword with no co-words, seen in automotive text, for a
    /// non-automotive rule (default: 0.1)
    pub automotive_ambiguous: f64,
    /// Automotive support contributed by an automotive brand (default: 5.0)
    pub automotive_brand: f64,
    /// Automotive support contributed by a part number (default: 4.0)
    pub automotive_part_number: f64,
    /// Automotive support per vocabulary word, uncapped (default: 1.5)
    pub automotive_word: f64,
    /// Support from which text counts as automotive (default: 3.0)
    pub automotive_threshold: f64,
    /// Watch brand on a watch rule (default: 5.0)
    pub watch_brand: f64,
    /// Brand chapter equals rule chapter and a keyword hit (default: 3.0)
    pub brand_chapter: f64,
    /// Footwear-primary apparel brand on a footwear rule (default: 3.0)
    pub footwear_brand: f64,
    /// Apparel brand on a related soft-goods rule with a keyword hit (default: 2.0)
    pub apparel_brand: f64,
    /// Part number on an automotive, machinery or electronics rule (default: 3.0)
    pub part_number: f64,
    /// Co-occurring words counted per polysemous reading (default: 3)
    pub max_cooccurrence: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        super::DEFAULT_WEIGHTS
    }
}

/// Chapters an apparel brand plausibly sells into.
const APPAREL_FAMILY: [Chapter; 5] = [
    Chapter::APPAREL_KNIT,
    Chapter::APPAREL_WOVEN,
    Chapter::FOOTWEAR,
    Chapter::MADE_UP_TEXTILES,
    Chapter::LEATHER_GOODS,
];

const PART_NUMBER_CHAPTERS: [Chapter; 3] =
    [Chapter::AUTOMOTIVE, Chapter::MACHINERY, Chapter::ELECTRONICS];

#[derive(Debug, Clone, Copy)]
pub struct RuleScorer<'a> {
    corpus: &'a Corpus,
    weights: &'a ScoringWeights,
}

impl<'a> RuleScorer<'a> {
    pub fn new(corpus: &'a Corpus, weights: &'a ScoringWeights) -> Self {
        Self { corpus, weights }
    }

    /// Non-negative score; zero means the rule does not apply.
    pub fn score(&self, rule: &ClassificationRule, text: &str, ctx: &ClassificationContext) -> f64 {
        let text_lower = text.to_lowercase();
        let keyword_score = self.keyword_score(rule, &text_lower, ctx);
        keyword_score + self.context_boost(rule, keyword_score, ctx)
    }

    fn keyword_score(
        &self,
        rule: &ClassificationRule,
        text_lower: &str,
        ctx: &ClassificationContext,
    ) -> f64 {
        let disambiguator =
            PhraseDisambiguator::new(&self.corpus.phrases, self.weights.max_cooccurrence);

        rule.keywords
            .iter()
            .filter(|keyword| contains_term(text_lower, keyword))
            .map(|keyword| match disambiguator.strongest(keyword, text_lower) {
                Some(verdict) if verdict.chapter == rule.chapter => {
                    self.weights.keyword_hit + verdict.boost
                }
                Some(_) => self.weights.contextual_mismatch,
                None if ctx.is_automotive
                    && rule.chapter != Chapter::AUTOMOTIVE
                    && self.corpus.phrases.is_polysemous(keyword) =>
                {
                    self.weights.automotive_ambiguous
                }
                None => self.weights.keyword_hit,
            })
            .sum()
    }

    fn context_boost(
        &self,
        rule: &ClassificationRule,
        keyword_score: f64,
        ctx: &ClassificationContext,
    ) -> f64 {
        let matched = keyword_score > 0.0;
        let mut boost = 0.0;

        if let Some(brand_chapter) = ctx.brand_chapter {
            if brand_chapter == Chapter::AUTOMOTIVE && rule.chapter == Chapter::AUTOMOTIVE {
                boost += ctx.automotive_score;
            } else if brand_chapter == Chapter::WATCHES && rule.chapter == Chapter::WATCHES {
                boost += self.weights.watch_brand;
            } else if brand_chapter == rule.chapter && matched {
                boost += self.weights.brand_chapter;
            } else if brand_chapter == Chapter::APPAREL_KNIT && APPAREL_FAMILY.contains(&rule.chapter)
            {
                let footwear_brand = ctx
                    .brand
                    .as_deref()
                    .is_some_and(|token| self.corpus.brands.is_footwear_primary(token));
                if footwear_brand && rule.chapter == Chapter::FOOTWEAR {
                    boost += self.weights.footwear_brand;
                } else if matched {
                    boost += self.weights.apparel_brand;
                }
            }
        }

        if ctx.has_part_number && PART_NUMBER_CHAPTERS.contains(&rule.chapter) {
            boost += self.weights.part_number;
        }
        boost
    }
}

#[cfg(test)]
mod tests {
    use super::RuleScorer;
    use crate::classify::context::{ClassificationContext, ContextDetector};
    use crate::classify::DEFAULT_WEIGHTS;
    use crate::corpus::Corpus;
    use crate::domain::chapter::Chapter;
    use crate::domain::rule::ClassificationRule;

    fn rule_with_hs6<'a>(corpus: &'a Corpus, hs6: &str) -> &'a ClassificationRule {
        corpus.rules.iter().find(|rule| rule.hs6 == hs6).expect("rule present in corpus")
    }

    fn score(corpus: &Corpus, hs6: &str, text: &str) -> f64 {
        let ctx = ContextDetector::new(corpus, &DEFAULT_WEIGHTS).detect(text);
        RuleScorer::new(corpus, &DEFAULT_WEIGHTS).score(rule_with_hs6(corpus, hs6), text, &ctx)
    }

    #[test]
    fn scores_are_never_negative_and_zero_without_keywords() {
        let corpus = Corpus::standard();
        for rule in &corpus.rules {
            let text = "zzz qqq";
            let ctx = ClassificationContext::default();
            let value = RuleScorer::new(&corpus, &DEFAULT_WEIGHTS).score(rule, text, &ctx);
            assert!(value >= 0.0);
            assert_eq!(value, 0.0, "rule {} scored without keywords", rule.hs6);
        }
    }

    #[test]
    fn plain_hits_add_one_each() {
        let corpus = Corpus::standard();
        assert!((score(&corpus, "6109.10", "Men's Cotton T-Shirt") - 3.0).abs() < 1e-9);
    }

    #[test]
    fn short_keywords_do_not_fire_inside_words() {
        let corpus = Corpus::standard();
        assert_eq!(score(&corpus, "6505.00", "captivating design"), 0.0);
        assert!(score(&corpus, "6505.00", "baseball cap with logo") >= 1.0);
    }

    #[test]
    fn contextual_mismatch_discounts_headwear_cap() {
        let corpus = Corpus::standard();
        let hat = score(&corpus, "6505.00", "engine oil cap replacement");
        let auto = score(&corpus, "8708.99", "engine oil cap replacement");
        assert!((hat - 0.05).abs() < 1e-9);
        assert!(auto > hat);
    }

    #[test]
    fn watch_brand_boosts_watch_rule() {
        let corpus = Corpus::standard();
        assert!((score(&corpus, "9102.12", "Seiko Presage") - 5.0).abs() < 1e-9);
    }

    #[test]
    fn footwear_brand_boosts_shoes_without_a_keyword() {
        let corpus = Corpus::standard();
        assert!((score(&corpus, "6404.11", "Birkenstock Arizona") - 4.0).abs() < 1e-9);
        let leather = corpus
            .rules
            .iter()
            .find(|rule| rule.hs6 == "6403.59")
            .expect("leather shoes rule");
        assert_eq!(leather.chapter, Chapter::FOOTWEAR);
    }

    #[test]
    fn part_numbers_boost_industrial_chapters() {
        let corpus = Corpus::standard();
        assert!(score(&corpus, "8708.99", "63217161955") >= 3.0);
        assert_eq!(score(&corpus, "6505.00", "63217161955"), 0.0);
    }
}
