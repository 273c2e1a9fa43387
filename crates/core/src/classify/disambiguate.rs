use crate::classify::matching::count_present;
use crate::corpus::PhraseTable;
use crate::domain::chapter::Chapter;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhraseVerdict {
    pub chapter: Chapter,
    pub boost: f64,
}

/// Resolves a polysemous keyword by counting the co-occurring words of each of
/// its readings.
#[derive(Clone, Copy, Debug)]
pub struct PhraseDisambiguator<'a> {
    table: &'a PhraseTable,
    max_cooccurrence: usize,
}

impl<'a> PhraseDisambiguator<'a> {
    pub fn new(table: &'a PhraseTable, max_cooccurrence: usize) -> Self {
        Self { table, max_cooccurrence }
    }

    /// One verdict per reading with at least one co-word present, in table order.
    pub fn evaluate(&self, keyword: &str, text_lower: &str) -> Vec<PhraseVerdict> {
        let Some(readings) = self.table.readings(keyword) else {
            return Vec::new();
        };
        readings
            .iter()
            .filter_map(|reading| {
                let hits = count_present(text_lower, &reading.co_words);
                (hits > 0).then(|| PhraseVerdict {
                    chapter: reading.target,
                    boost: reading.base_boost * hits.min(self.max_cooccurrence) as f64,
                })
            })
            .collect()
    }

    /// Highest boost wins; on a tie the earlier reading is kept.
    pub fn strongest(&self, keyword: &str, text_lower: &str) -> Option<PhraseVerdict> {
        self.evaluate(keyword, text_lower).into_iter().fold(None, |best, verdict| match best {
            Some(current) if current.boost >= verdict.boost => Some(current),
            _ => Some(verdict),
        })
    }
}
