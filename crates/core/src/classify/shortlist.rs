//! Coarse chapter shortlist that bounds the reference codes handed to an
//! external arbitrator.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classify::matching::contains_term;
use crate::corpus::Corpus;
use crate::domain::chapter::Chapter;
use crate::domain::product::ProductInput;

pub const SHORTLIST_LEN: usize = 5;

/// Used when no signal at all is found.
pub const DEFAULT_SHORTLIST: [Chapter; 5] = [
    Chapter::ELECTRONICS,
    Chapter::APPAREL_KNIT,
    Chapter::MACHINERY,
    Chapter::LEATHER_GOODS,
    Chapter::AUTOMOTIVE,
];

const KEYWORD_WEIGHT: f64 = 1.0;
const BRAND_WEIGHT: f64 = 3.0;
const CATEGORY_HINT_WEIGHT: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ChapterScore {
    pub chapter: Chapter,
    pub score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Shortlist {
    pub chapters: Vec<Chapter>,
    /// Scored chapters, best first; empty when the default list was used.
    pub scores: Vec<ChapterScore>,
    pub is_default: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct RelevantChapterSelector<'a> {
    corpus: &'a Corpus,
}

impl<'a> RelevantChapterSelector<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        Self { corpus }
    }

    /// Never empty.
    pub fn select(&self, product: &ProductInput) -> Shortlist {
        let scores = self.score_chapters(product);
        if scores.is_empty() {
            return Shortlist { chapters: DEFAULT_SHORTLIST.to_vec(), scores, is_default: true };
        }
        let chapters = scores.iter().take(SHORTLIST_LEN).map(|entry| entry.chapter).collect();
        Shortlist { chapters, scores, is_default: false }
    }

    /// Every chapter with a positive score, best first; ties by chapter number.
    pub fn score_chapters(&self, product: &ProductInput) -> Vec<ChapterScore> {
        let text_lower = product.combined_text(&product.name).to_lowercase();
        let mut totals: BTreeMap<Chapter, f64> = BTreeMap::new();

        for rule in &self.corpus.rules {
            let hits = rule.keywords.iter().filter(|keyword| contains_term(&text_lower, keyword)).count();
            if hits > 0 {
                *totals.entry(rule.chapter).or_default() += KEYWORD_WEIGHT * hits as f64;
            }
        }

        for mention in self.corpus.brands.mentions(&text_lower) {
            *totals.entry(mention.chapter).or_default() += BRAND_WEIGHT;
        }

        let category_lower = product.category_path.to_lowercase();
        for (fragment, chapters) in self.corpus.taxonomy.category_hints() {
            if category_lower.contains(fragment) {
                for chapter in chapters {
                    *totals.entry(*chapter).or_default() += CATEGORY_HINT_WEIGHT;
                }
            }
        }

        let mut scores: Vec<ChapterScore> =
            totals.into_iter().map(|(chapter, score)| ChapterScore { chapter, score }).collect();
        // BTreeMap order is ascending by chapter, and the sort is stable.
        scores.sort_by(|left, right| right.score.total_cmp(&left.score));
        scores
    }
}
