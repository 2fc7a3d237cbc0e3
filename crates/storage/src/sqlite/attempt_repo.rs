use academy_core::model::{AttemptId, QuizAttempt};

use super::{
    SqliteRepository,
    mapping::{conn, map_attempt_row, map_attempt_row_with_id, u64_to_i64},
};
use crate::repository::{AttemptRepository, AttemptRow, StorageError};

#[async_trait::async_trait]
impl AttemptRepository for SqliteRepository {
    async fn append_attempt(&self, attempt: &QuizAttempt) -> Result<AttemptId, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO quiz_attempts (
                    kind, score, total, points, passed, expired,
                    started_at, completed_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
        )
        .bind(attempt.kind().to_string())
        .bind(i64::from(attempt.score()))
        .bind(i64::from(attempt.total()))
        .bind(u64_to_i64("points", attempt.points())?)
        .bind(attempt.passed().map(i64::from))
        .bind(i64::from(attempt.expired()))
        .bind(attempt.started_at())
        .bind(attempt.completed_at())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(AttemptId::new(res.last_insert_rowid()))
    }

    async fn get_attempt(&self, id: AttemptId) -> Result<QuizAttempt, StorageError> {
        let row = sqlx::query(
            r"
                SELECT
                    kind, score, total, points, passed, expired,
                    started_at, completed_at
                FROM quiz_attempts
                WHERE id = ?1
            ",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?
        .ok_or(StorageError::NotFound)?;

        map_attempt_row(&row)
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<AttemptRow>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT
                    id, kind, score, total, points, passed, expired,
                    started_at, completed_at
                FROM quiz_attempts
                ORDER BY completed_at DESC, id DESC
                LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_attempt_row_with_id(&row)?);
        }
        Ok(out)
    }
}
