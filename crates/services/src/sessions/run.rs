use chrono::{DateTime, Utc};

use academy_core::model::quiz::{QuizKind, QuizOutcome, QuizSession};
use academy_core::model::{AttemptId, LessonCompletion, QuizAttempt, StreakUpdate};

use crate::progress_service::ProgressUpdate;

/// Everything the completion step recorded for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizFinish {
    pub outcome: QuizOutcome,
    pub points: u64,
    pub total_score: u64,
    pub level_up: Option<u32>,
    pub lesson: Option<LessonCompletion>,
    pub streak: StreakUpdate,
    pub attempt_id: AttemptId,
    pub completed_at: DateTime<Utc>,
}

/// Progress already saved for a run whose attempt is not stored yet.
#[derive(Debug, Clone)]
pub(crate) struct AppliedAward {
    pub(crate) update: ProgressUpdate,
    pub(crate) attempt: QuizAttempt,
}

/// One play-through of a quiz: the engine plus its bookkeeping.
#[derive(Debug)]
pub struct QuizRun {
    kind: QuizKind,
    session: QuizSession,
    started_at: DateTime<Utc>,
    applied: Option<AppliedAward>,
    finish: Option<QuizFinish>,
}

impl QuizRun {
    pub(crate) fn new(kind: QuizKind, session: QuizSession, started_at: DateTime<Utc>) -> Self {
        Self {
            kind,
            session,
            started_at,
            applied: None,
            finish: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> QuizKind {
        self.kind
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub(crate) fn session_mut(&mut self) -> &mut QuizSession {
        &mut self.session
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Set once the completion step has persisted the run.
    #[must_use]
    pub fn finish(&self) -> Option<&QuizFinish> {
        self.finish.as_ref()
    }

    pub(crate) fn applied(&self) -> Option<&AppliedAward> {
        self.applied.as_ref()
    }

    pub(crate) fn set_applied(&mut self, applied: AppliedAward) {
        self.applied = Some(applied);
    }

    pub(crate) fn set_finish(&mut self, finish: QuizFinish) {
        self.applied = None;
        self.finish = Some(finish);
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }
}
