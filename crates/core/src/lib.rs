pub mod arbitration;
pub mod classify;
pub mod config;
pub mod corpus;
pub mod domain;
pub mod errors;
pub mod history;
pub mod text;

pub use arbitration::{
    ArbitrationError, ArbitrationRequest, Arbitrator, Classification, ClassificationSource,
    Classifier, ReferenceCode,
};
pub use classify::{ClassificationEngine, MarketplaceVerdict, RelevantChapterSelector, Shortlist};
pub use corpus::{Corpus, TariffSchedule};
pub use domain::candidate::{Candidate, ConfidenceLevel};
pub use domain::chapter::Chapter;
pub use domain::product::{ProductInput, ProductText};
pub use domain::rule::ClassificationRule;
pub use errors::{ApplicationError, DomainError, InterfaceError, InterfaceErrorKind};
pub use history::{HistoryId, HistoryRecord, HistorySink};
pub use text::{StaticTextProvider, TextProvider};
