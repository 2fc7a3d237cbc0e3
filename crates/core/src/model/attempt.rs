use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::quiz::{QuizKind, QuizOutcome, percentage};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("score {score} exceeds total {total}")]
    ScoreOutOfRange { score: u32, total: u32 },

    #[error("attempt has no questions")]
    NoQuestions,
}

/// Persisted record of a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizAttempt {
    kind: QuizKind,
    score: u32,
    total: u32,
    points: u64,
    passed: Option<bool>,
    expired: bool,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl QuizAttempt {
    /// Build an attempt from the engine's completion outcome.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError` if the timestamps or counts are inconsistent.
    pub fn from_outcome(
        kind: QuizKind,
        outcome: &QuizOutcome,
        points: u64,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, AttemptError> {
        Self::from_persisted(
            kind,
            outcome.score,
            outcome.total,
            points,
            outcome.passed,
            outcome.expired,
            started_at,
            completed_at,
        )
    }

    /// Rehydrate an attempt from storage.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError` if the timestamps or counts are inconsistent.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        kind: QuizKind,
        score: u32,
        total: u32,
        points: u64,
        passed: Option<bool>,
        expired: bool,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, AttemptError> {
        if completed_at < started_at {
            return Err(AttemptError::InvalidTimeRange);
        }
        if total == 0 {
            return Err(AttemptError::NoQuestions);
        }
        if score > total {
            return Err(AttemptError::ScoreOutOfRange { score, total });
        }
        Ok(Self {
            kind,
            score,
            total,
            points,
            passed,
            expired,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn kind(&self) -> QuizKind {
        self.kind
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn percentage(&self) -> u32 {
        percentage(self.score, self.total)
    }

    #[must_use]
    pub fn points(&self) -> u64 {
        self.points
    }

    #[must_use]
    pub fn passed(&self) -> Option<bool> {
        self.passed
    }

    #[must_use]
    pub fn expired(&self) -> bool {
        self.expired
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.completed_at - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    #[test]
    fn attempt_from_outcome_keeps_counts() {
        let outcome = QuizOutcome {
            score: 2,
            total: 3,
            percentage: 66,
            passed: None,
            time_used: None,
            expired: false,
        };
        let now = fixed_now();
        let attempt = QuizAttempt::from_outcome(
            QuizKind::QuickQuiz,
            &outcome,
            200,
            now,
            now + Duration::seconds(90),
        )
        .unwrap();

        assert_eq!(attempt.percentage(), 66);
        assert_eq!(attempt.points(), 200);
        assert_eq!(attempt.duration(), Duration::seconds(90));
    }

    #[test]
    fn inconsistent_attempts_are_rejected() {
        let now = fixed_now();
        let kind = QuizKind::Exam;
        assert_eq!(
            QuizAttempt::from_persisted(kind, 1, 1, 0, None, false, now, now - Duration::seconds(1))
                .unwrap_err(),
            AttemptError::InvalidTimeRange
        );
        assert_eq!(
            QuizAttempt::from_persisted(kind, 4, 3, 0, None, false, now, now).unwrap_err(),
            AttemptError::ScoreOutOfRange { score: 4, total: 3 }
        );
        assert_eq!(
            QuizAttempt::from_persisted(kind, 0, 0, 0, None, false, now, now).unwrap_err(),
            AttemptError::NoQuestions
        );
    }
}
