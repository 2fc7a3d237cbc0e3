use std::sync::Arc;

use academy_core::model::AttemptId;
use academy_core::model::quiz::QuizKind;
use chrono::{DateTime, Utc};
use storage::repository::{AttemptRepository, StorageError};

/// Row shown in the attempt history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptListItem {
    pub id: AttemptId,
    pub kind: QuizKind,
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
    pub points: u64,
    pub passed: Option<bool>,
    pub expired: bool,
    pub completed_at: DateTime<Utc>,
}

/// Read side of finished quizzes.
#[derive(Clone)]
pub struct AttemptHistoryService {
    attempts: Arc<dyn AttemptRepository>,
}

impl AttemptHistoryService {
    #[must_use]
    pub fn new(attempts: Arc<dyn AttemptRepository>) -> Self {
        Self { attempts }
    }

    /// Newest attempts first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the history cannot be read.
    pub async fn recent(&self, limit: u32) -> Result<Vec<AttemptListItem>, StorageError> {
        let rows = self.attempts.list_recent(limit).await?;
        Ok(rows
            .into_iter()
            .map(|row| AttemptListItem {
                id: row.id,
                kind: row.attempt.kind(),
                score: row.attempt.score(),
                total: row.attempt.total(),
                percentage: row.attempt.percentage(),
                points: row.attempt.points(),
                passed: row.attempt.passed(),
                expired: row.attempt.expired(),
                completed_at: row.attempt.completed_at(),
            })
            .collect())
    }
}
