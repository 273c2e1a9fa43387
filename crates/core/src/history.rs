use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::candidate::Candidate;
use crate::errors::ApplicationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryId(pub Uuid);

impl HistoryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HistoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One saved classification. Candidate codes, confidence and reason text are
/// stored verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: HistoryId,
    /// URL or identifier the product text came from; may be empty.
    pub product_ref: String,
    pub product_name: String,
    pub candidates: Vec<Candidate>,
    pub created_at: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(
        product_ref: impl Into<String>,
        product_name: impl Into<String>,
        candidates: Vec<Candidate>,
    ) -> Self {
        Self {
            id: HistoryId::new(),
            product_ref: product_ref.into(),
            product_name: product_name.into(),
            candidates,
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive substring match on the product name or reference.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.product_name.to_lowercase().contains(&query)
            || self.product_ref.to_lowercase().contains(&query)
    }
}

/// Persistence for classification results. Failures surface as
/// `ApplicationError::Persistence` and never alter a classification.
#[async_trait]
pub trait HistorySink: Send + Sync {
    async fn save(&self, record: HistoryRecord) -> Result<(), ApplicationError>;

    /// Newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, ApplicationError>;

    /// Newest first; see [`HistoryRecord::matches`].
    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<HistoryRecord>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::HistoryRecord;
    use crate::domain::candidate::Candidate;

    #[test]
    fn search_matches_name_or_reference_ignoring_case() {
        let record = HistoryRecord::new(
            "https://www.ebay.com/itm/1234567890",
            "Seiko Presage Cocktail Time",
            vec![Candidate::unclassifiable(None)],
        );
        assert!(record.matches("presage"));
        assert!(record.matches("EBAY.COM"));
        assert!(record.matches("  "));
        assert!(!record.matches("casio"));
    }

    #[test]
    fn records_get_distinct_ids() {
        let first = HistoryRecord::new("", "a", Vec::new());
        let second = HistoryRecord::new("", "a", Vec::new());
        assert_ne!(first.id, second.id);
    }
}
