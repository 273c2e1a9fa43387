use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::classify::matching::count_present;
use crate::classify::ScoringWeights;
use crate::corpus::Corpus;
use crate::domain::chapter::Chapter;

/// Dash-grouped numbers such as `82871-671-000`.
static GROUPED_PART_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{3,6}-\d{2,4}-\d{2,4}\b").expect("grouped part number pattern is valid")
});

/// Catalogue numbers such as `63217161955` or `AB12345678`.
static LONG_PART_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z]{0,3}\d{8,15}\b").expect("long part number pattern is valid")
});

/// Per-request signals derived from the combined product text.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ClassificationContext {
    pub brand_chapter: Option<Chapter>,
    pub brand: Option<String>,
    pub is_automotive: bool,
    pub automotive_score: f64,
    pub is_electronics: bool,
    pub is_apparel: bool,
    pub is_cosmetics: bool,
    pub is_watch: bool,
    pub has_part_number: bool,
}

impl ClassificationContext {
    pub fn brand_is(&self, chapter: Chapter) -> bool {
        self.brand_chapter == Some(chapter)
    }
}

pub fn has_part_number(text: &str) -> bool {
    GROUPED_PART_NUMBER.is_match(text) || LONG_PART_NUMBER.is_match(text)
}

#[derive(Clone, Copy, Debug)]
pub struct ContextDetector<'a> {
    corpus: &'a Corpus,
    weights: &'a ScoringWeights,
}

impl<'a> ContextDetector<'a> {
    pub fn new(corpus: &'a Corpus, weights: &'a ScoringWeights) -> Self {
        Self { corpus, weights }
    }

    pub fn detect(&self, text: &str) -> ClassificationContext {
        let text_lower = text.to_lowercase();
        let brand = self.corpus.brands.detect(&text_lower);
        let brand_chapter = brand.map(|found| found.chapter);
        let has_part_number = has_part_number(text);

        let mut automotive_score = 0.0;
        if brand_chapter == Some(Chapter::AUTOMOTIVE) {
            automotive_score += self.weights.automotive_brand;
        }
        if has_part_number {
            automotive_score += self.weights.automotive_part_number;
        }
        let vocabulary_hits = count_present(&text_lower, &self.corpus.automotive_vocabulary);
        automotive_score += self.weights.automotive_word * vocabulary_hits as f64;

        ClassificationContext {
            brand_chapter,
            brand: brand.map(|found| found.token.to_owned()),
            is_automotive: automotive_score >= self.weights.automotive_threshold,
            automotive_score,
            is_electronics: brand_chapter == Some(Chapter::ELECTRONICS),
            is_apparel: brand_chapter == Some(Chapter::APPAREL_KNIT),
            is_cosmetics: brand_chapter == Some(Chapter::COSMETICS),
            is_watch: brand_chapter == Some(Chapter::WATCHES),
            has_part_number,
        }
    }
}
