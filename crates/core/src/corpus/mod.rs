//! Read-only reference tables the classifier runs against. Built once and
//! shared behind an `Arc`; alternate corpora can be injected for tests.

pub mod brands;
pub mod phrases;
pub mod rules;
pub mod schedule;
pub mod taxonomy;

use std::sync::{Arc, LazyLock};

use crate::domain::chapter::Chapter;
use crate::domain::rule::ClassificationRule;
use crate::errors::DomainError;

pub use brands::{BrandDirectory, BrandMatch};
pub use phrases::{PhraseContextRule, PhraseTable};
pub use schedule::{ScheduleEntry, ScheduleError, TariffSchedule};
pub use taxonomy::MarketplaceTaxonomy;

const AUTOMOTIVE_CONTEXT_WORDS: &[&str] = &[
    "oem", "genuine", "jdm", "aftermarket", "replacement", "assembly", "automotive", "vehicle",
    "car", "truck", "sedan", "suv", "engine", "motor", "transmission", "exhaust", "intake",
    "radiator", "bumper", "fender", "grille", "hood", "trunk", "tailgate", "headlight",
    "taillight", "brake", "caliper", "rotor", "strut", "shock", "suspension", "steering", "axle",
    "differential", "gasket", "bearing", "sensor", "relay", "harness", "wiring", "manifold",
    "carburetor", "alternator", "starter", "compressor", "antenna", "block off", "delete",
    "plug cap", "hose", "clamp", "mount", "bracket", "seal", "o-ring", "valve", "piston",
    "crankshaft", "camshaft", "timing", "turbo", "intercooler", "muffler", "catalytic",
    "converter", "fuel pump", "injector", "ignition", "coil", "distributor", "flywheel", "clutch",
    "speedometer", "odometer", "tachometer", "gauge", "windshield", "wiper", "mirror", "visor",
    "door handle", "window regulator", "latch", "hinge", "weatherstrip",
];

static SHARED: LazyLock<Arc<Corpus>> = LazyLock::new(|| Arc::new(Corpus::standard()));

#[derive(Clone, Debug)]
pub struct Corpus {
    pub rules: Vec<ClassificationRule>,
    pub brands: BrandDirectory,
    pub phrases: PhraseTable,
    pub taxonomy: MarketplaceTaxonomy,
    /// Words that, counted in the product text, suggest a vehicle part.
    pub automotive_vocabulary: Vec<String>,
    pub schedule: Option<TariffSchedule>,
}

impl Corpus {
    pub fn standard() -> Self {
        Self {
            rules: rules::standard_rules(),
            brands: BrandDirectory::standard(),
            phrases: PhraseTable::standard(),
            taxonomy: MarketplaceTaxonomy::standard(),
            automotive_vocabulary: AUTOMOTIVE_CONTEXT_WORDS
                .iter()
                .map(|word| (*word).to_owned())
                .collect(),
            schedule: None,
        }
    }

    /// Process-wide built-in corpus.
    pub fn shared() -> Arc<Corpus> {
        Arc::clone(&SHARED)
    }

    pub fn with_schedule(mut self, schedule: TariffSchedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn rules_in(&self, chapter: Chapter) -> impl Iterator<Item = &ClassificationRule> {
        self.rules.iter().filter(move |rule| rule.chapter == chapter)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.rules.is_empty() {
            return Err(DomainError::InvariantViolation("rule corpus is empty".to_owned()));
        }
        for rule in &self.rules {
            rule.validate()?;
        }
        self.brands.validate()?;
        self.phrases.validate()?;
        self.taxonomy.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::Corpus;
    use crate::domain::chapter::Chapter;

    #[test]
    fn standard_corpus_satisfies_table_invariants() {
        let corpus = Corpus::standard();
        assert_eq!(corpus.validate(), Ok(()));
        assert!(corpus.rules.len() >= 60);
    }

    #[test]
    fn vitamin_ambiguity_is_left_to_the_score() {
        let corpus = Corpus::standard();
        let holders: Vec<Chapter> = corpus
            .rules
            .iter()
            .filter(|rule| rule.keywords.iter().any(|keyword| keyword == "vitamin"))
            .map(|rule| rule.chapter)
            .collect();
        assert_eq!(holders, vec![Chapter::of(21), Chapter::of(30)]);
    }

    #[test]
    fn shared_corpus_is_built_once() {
        let first = Corpus::shared();
        let second = Corpus::shared();
        assert!(std::sync::Arc::ptr_eq(&first, &second));
        assert_eq!(first.rules_in(Chapter::HEADGEAR).count(), 1);
    }
}
