use academy_core::model::UserProgress;
use chrono::Utc;
use sqlx::Row;

use super::{
    SqliteRepository,
    mapping::{conn, ser},
};
use crate::repository::{ProgressKey, ProgressRecord, ProgressRepository, StorageError};

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn get(&self, key: ProgressKey) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM progress_values WHERE key = ?1")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.map(|row| row.try_get::<String, _>("value").map_err(ser))
            .transpose()
    }

    async fn set(&self, key: ProgressKey, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO progress_values (key, value, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
            ",
        )
        .bind(key.as_str())
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn remove(&self, key: ProgressKey) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM progress_values WHERE key = ?1")
            .bind(key.as_str())
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }

    // All keys commit together.
    async fn save_progress(&self, progress: &UserProgress) -> Result<(), StorageError> {
        let record = ProgressRecord::from_progress(progress);
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(conn)?;

        for (key, value) in record.entries() {
            match value {
                Some(value) => {
                    sqlx::query(
                        r"
                            INSERT INTO progress_values (key, value, updated_at)
                            VALUES (?1, ?2, ?3)
                            ON CONFLICT(key) DO UPDATE SET
                                value = excluded.value,
                                updated_at = excluded.updated_at
                        ",
                    )
                    .bind(key.as_str())
                    .bind(value)
                    .bind(now)
                    .execute(&mut *tx)
                    .await
                    .map_err(conn)?;
                }
                None => {
                    sqlx::query("DELETE FROM progress_values WHERE key = ?1")
                        .bind(key.as_str())
                        .execute(&mut *tx)
                        .await
                        .map_err(conn)?;
                }
            }
        }

        tx.commit().await.map_err(conn)?;
        Ok(())
    }
}
