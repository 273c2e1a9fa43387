use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::Row;
use tracing::info;
use uuid::Uuid;

use tariffy_core::domain::candidate::{Candidate, ConfidenceLevel};
use tariffy_core::errors::ApplicationError;
use tariffy_core::history::{HistoryId, HistoryRecord, HistorySink};

use super::{clamp_limit, RepositoryError};
use crate::DbPool;

pub struct SqlHistoryRepository {
    pool: DbPool,
}

impl SqlHistoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, record: &HistoryRecord) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO classification_history (id, product_ref, product_name, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(record.id.0.to_string())
        .bind(&record.product_ref)
        .bind(&record.product_name)
        .bind(timestamp(&record.created_at))
        .execute(&mut *tx)
        .await?;

        for (position, candidate) in record.candidates.iter().enumerate() {
            let position = i64::try_from(position)
                .map_err(|_| RepositoryError::OutOfRange(format!("candidate position {position}")))?;
            sqlx::query(
                "INSERT INTO history_candidate (history_id, position, hs6, hts10, jp_hs9,
                                                category, material, usage, chapter, reason,
                                                confidence)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(record.id.0.to_string())
            .bind(position)
            .bind(&candidate.hs6)
            .bind(&candidate.hts10)
            .bind(&candidate.jp_hs9)
            .bind(&candidate.category)
            .bind(&candidate.material)
            .bind(&candidate.usage)
            .bind(&candidate.chapter)
            .bind(&candidate.reason)
            .bind(candidate.confidence.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn load(
        &self,
        headers: Vec<HistoryRecord>,
    ) -> Result<Vec<HistoryRecord>, RepositoryError> {
        let mut records = Vec::with_capacity(headers.len());
        for mut record in headers {
            let candidate_rows = sqlx::query(
                "SELECT hs6, hts10, jp_hs9, category, material, usage, chapter, reason, confidence
                 FROM history_candidate WHERE history_id = ? ORDER BY position ASC",
            )
            .bind(record.id.0.to_string())
            .fetch_all(&self.pool)
            .await?;
            record.candidates =
                candidate_rows.iter().map(row_to_candidate).collect::<Result<Vec<_>, _>>()?;
            records.push(record);
        }
        Ok(records)
    }

    async fn fetch_recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, product_ref, product_name, created_at
             FROM classification_history
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?",
        )
        .bind(clamp_limit(limit))
        .fetch_all(&self.pool)
        .await?;
        let headers = rows.iter().map(row_to_record).collect::<Result<Vec<_>, _>>()?;
        self.load(headers).await
    }

    /// SQLite's `lower()` only folds ASCII, so matching runs over the headers
    /// in Rust with the same folding the in-memory store uses.
    async fn fetch_matching(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<HistoryRecord>, RepositoryError> {
        if query.trim().is_empty() {
            return self.fetch_recent(limit).await;
        }
        let rows = sqlx::query(
            "SELECT id, product_ref, product_name, created_at
             FROM classification_history
             ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        let mut headers = Vec::new();
        for row in &rows {
            if headers.len() == limit {
                break;
            }
            let record = row_to_record(row)?;
            if record.matches(query) {
                headers.push(record);
            }
        }
        self.load(headers).await
    }
}

/// Fixed-width UTC timestamps so text ordering matches time ordering.
fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode<T>(row: &sqlx::sqlite::SqliteRow, column: &str) -> Result<T, RepositoryError>
where
    T: for<'r> sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column).map_err(|e| RepositoryError::Decode(e.to_string()))
}

fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<HistoryRecord, RepositoryError> {
    let id: String = decode(row, "id")?;
    let created_at: String = decode(row, "created_at")?;

    let id = Uuid::parse_str(&id)
        .map_err(|e| RepositoryError::Decode(format!("history id `{id}`: {e}")))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Decode(format!("created_at `{created_at}`: {e}")))?;

    Ok(HistoryRecord {
        id: HistoryId(id),
        product_ref: decode(row, "product_ref")?,
        product_name: decode(row, "product_name")?,
        candidates: Vec::new(),
        created_at,
    })
}

fn row_to_candidate(row: &sqlx::sqlite::SqliteRow) -> Result<Candidate, RepositoryError> {
    let confidence: String = decode(row, "confidence")?;
    let confidence = ConfidenceLevel::from_label(&confidence)
        .ok_or_else(|| RepositoryError::Decode(format!("confidence `{confidence}`")))?;
    Ok(Candidate {
        hs6: decode(row, "hs6")?,
        hts10: decode(row, "hts10")?,
        jp_hs9: decode(row, "jp_hs9")?,
        category: decode(row, "category")?,
        material: decode(row, "material")?,
        usage: decode(row, "usage")?,
        chapter: decode(row, "chapter")?,
        reason: decode(row, "reason")?,
        confidence,
    })
}

#[async_trait::async_trait]
impl HistorySink for SqlHistoryRepository {
    async fn save(&self, record: HistoryRecord) -> Result<(), ApplicationError> {
        self.insert(&record).await?;
        info!(
            event_name = "history.record.saved",
            history_id = %record.id,
            candidates = record.candidates.len(),
            "classification saved to history"
        );
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, ApplicationError> {
        Ok(self.fetch_recent(limit).await?)
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<HistoryRecord>, ApplicationError> {
        Ok(self.fetch_matching(query, limit).await?)
    }
}
