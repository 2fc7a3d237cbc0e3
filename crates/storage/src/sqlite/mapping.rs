use academy_core::model::{AttemptId, QuizAttempt};
use academy_core::model::quiz::QuizKind;
use sqlx::Row;

use crate::repository::{AttemptRow, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn u64_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn map_attempt_row(row: &sqlx::sqlite::SqliteRow) -> Result<QuizAttempt, StorageError> {
    let kind: QuizKind = row
        .try_get::<String, _>("kind")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;
    let score = u32_from_i64("score", row.try_get::<i64, _>("score").map_err(ser)?)?;
    let total = u32_from_i64("total", row.try_get::<i64, _>("total").map_err(ser)?)?;
    let points_i64: i64 = row.try_get("points").map_err(ser)?;
    let points = u64::try_from(points_i64)
        .map_err(|_| StorageError::Serialization(format!("invalid points: {points_i64}")))?;
    let passed: Option<i64> = row.try_get("passed").map_err(ser)?;
    let expired: i64 = row.try_get("expired").map_err(ser)?;

    QuizAttempt::from_persisted(
        kind,
        score,
        total,
        points,
        passed.map(|flag| flag != 0),
        expired != 0,
        row.try_get("started_at").map_err(ser)?,
        row.try_get("completed_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_attempt_row_with_id(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<AttemptRow, StorageError> {
    let id: i64 = row.try_get("id").map_err(ser)?;
    Ok(AttemptRow::new(AttemptId::new(id), map_attempt_row(row)?))
}
