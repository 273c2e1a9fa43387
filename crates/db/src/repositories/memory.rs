use tokio::sync::RwLock;
use tracing::info;

use tariffy_core::errors::ApplicationError;
use tariffy_core::history::{HistoryRecord, HistorySink};

/// History kept in process memory; insertion order stands in for time order.
#[derive(Default)]
pub struct InMemoryHistoryRepository {
    records: RwLock<Vec<HistoryRecord>>,
}

impl InMemoryHistoryRepository {
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl HistorySink for InMemoryHistoryRepository {
    async fn save(&self, record: HistoryRecord) -> Result<(), ApplicationError> {
        info!(
            event_name = "history.record.saved",
            history_id = %record.id,
            candidates = record.candidates.len(),
            "classification saved to history"
        );
        self.records.write().await.push(record);
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, ApplicationError> {
        let records = self.records.read().await;
        Ok(records.iter().rev().take(limit).cloned().collect())
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<HistoryRecord>, ApplicationError> {
        let records = self.records.read().await;
        Ok(records.iter().rev().filter(|record| record.matches(query)).take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use tariffy_core::domain::candidate::Candidate;
    use tariffy_core::history::{HistoryRecord, HistorySink};

    use super::InMemoryHistoryRepository;

    #[tokio::test]
    async fn newest_records_come_first() {
        let repo = InMemoryHistoryRepository::default();
        for name in ["first", "second", "third"] {
            repo.save(HistoryRecord::new("", name, vec![Candidate::unclassifiable(None)]))
                .await
                .expect("save");
        }

        let recent = repo.recent(2).await.expect("recent");
        let names: Vec<&str> = recent.iter().map(|record| record.product_name.as_str()).collect();
        assert_eq!(names, vec!["third", "second"]);
        assert_eq!(repo.len().await, 3);
    }

    #[tokio::test]
    async fn search_filters_by_name_or_reference() {
        let repo = InMemoryHistoryRepository::default();
        repo.save(HistoryRecord::new("https://example.com/a", "Leather wallet", Vec::new()))
            .await
            .expect("save");
        repo.save(HistoryRecord::new("", "Seiko watch", Vec::new())).await.expect("save");

        assert_eq!(repo.search("WALLET", 10).await.expect("search").len(), 1);
        assert_eq!(repo.search("example.com", 10).await.expect("search").len(), 1);
        assert_eq!(repo.search("casio", 10).await.expect("search").len(), 0);
    }
}
