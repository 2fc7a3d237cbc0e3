use std::sync::Arc;

use academy_core::model::QuizAttempt;
use academy_core::model::quiz::{Advance, AnswerMode, QuizKind, QuizSession, Tick};
use academy_core::model::Question;
use chrono::Duration;
use storage::repository::{AttemptRepository, ProgressRepository};
use tracing::{debug, info};

use super::run::{AppliedAward, QuizFinish, QuizRun};
use crate::Clock;
use crate::content;
use crate::error::QuizServiceError;
use crate::progress_service::{POINTS_PER_CORRECT, ProgressService};

/// Orchestrates quiz runs and persists their results.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    progress: ProgressService,
    attempts: Arc<dyn AttemptRepository>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        progress: Arc<dyn ProgressRepository>,
        attempts: Arc<dyn AttemptRepository>,
    ) -> Self {
        Self {
            clock,
            progress: ProgressService::new(clock, progress),
            attempts,
        }
    }

    /// Start a run with content from the catalog.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::UnknownLesson` or `LessonLocked` for lesson
    /// quizzes that cannot be played, and engine errors from `start`.
    pub fn start(&self, kind: QuizKind) -> Result<QuizRun, QuizServiceError> {
        if let Some(id) = kind.lesson_id() {
            let lesson = content::lesson(id)?.ok_or(QuizServiceError::UnknownLesson(id))?;
            if lesson.is_locked() {
                return Err(QuizServiceError::LessonLocked(id));
            }
        }
        let questions = content::questions_for(kind, &mut rand::rng())?;
        self.start_with_questions(kind, questions)
    }

    /// Start a run over the given questions with the kind's rules and time
    /// budget.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` if the engine rejects the questions.
    pub fn start_with_questions(
        &self,
        kind: QuizKind,
        questions: Vec<Question>,
    ) -> Result<QuizRun, QuizServiceError> {
        let mut session = QuizSession::new(kind.rules());
        session.start(questions, kind.time_limit())?;
        info!(
            %kind,
            questions = session.total_questions(),
            timed = kind.time_limit().is_some(),
            "quiz started"
        );
        Ok(QuizRun::new(kind, session, self.clock.now()))
    }

    /// Select an option on the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` when the engine rejects the call.
    pub fn answer(&self, run: &mut QuizRun, option: usize) -> Result<(), QuizServiceError> {
        run.session_mut().select_answer(option).map_err(|err| {
            debug!(kind = %run.kind(), option, %err, "answer rejected");
            QuizServiceError::from(err)
        })
    }

    /// Step back to the previous question where the rules allow it.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` when the engine rejects the call.
    pub fn go_back(&self, run: &mut QuizRun) -> Result<AnswerMode, QuizServiceError> {
        run.session_mut().go_back().map_err(|err| {
            debug!(kind = %run.kind(), %err, "go back rejected");
            QuizServiceError::from(err)
        })
    }

    /// Move to the next question, finishing the run after the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` when the engine rejects the call and
    /// storage errors from the completion step.
    pub async fn advance(&self, run: &mut QuizRun) -> Result<Advance, QuizServiceError> {
        let step = run.session_mut().advance().map_err(|err| {
            debug!(kind = %run.kind(), %err, "advance rejected");
            QuizServiceError::from(err)
        })?;
        if matches!(step, Advance::Completed(_)) {
            self.finalize(run).await?;
        }
        Ok(step)
    }

    /// Feed elapsed time to a timed run, finishing it on expiry.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` when the engine rejects the call and
    /// storage errors from the completion step.
    pub async fn tick(&self, run: &mut QuizRun, elapsed: Duration) -> Result<Tick, QuizServiceError> {
        let step = run.session_mut().tick(elapsed)?;
        if let Tick::Expired(outcome) = step {
            info!(kind = %run.kind(), score = outcome.score, "time expired");
            self.finalize(run).await?;
        }
        Ok(step)
    }

    /// Award points, record lesson completion and the streak, and append the
    /// attempt. Runs once per run; later calls return the stored result.
    ///
    /// Call again after a storage failure during `advance` or `tick`. Progress
    /// is saved at most once per run; a retry only stores the attempt.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::NotComplete` if the engine has not finished,
    /// or progress and storage errors.
    pub async fn finalize<'a>(&self, run: &'a mut QuizRun) -> Result<&'a QuizFinish, QuizServiceError> {
        if run.finish().is_none() {
            let finish = self.complete(run).await?;
            run.set_finish(finish);
        }
        run.finish().ok_or(QuizServiceError::NotComplete)
    }

    async fn complete(&self, run: &mut QuizRun) -> Result<QuizFinish, QuizServiceError> {
        let outcome = *run
            .session()
            .outcome()
            .ok_or(QuizServiceError::NotComplete)?;

        let AppliedAward { update, attempt } = match run.applied() {
            Some(applied) => {
                debug!(kind = %run.kind(), "retrying attempt storage");
                applied.clone()
            }
            None => {
                let points = u64::from(outcome.score) * POINTS_PER_CORRECT;
                let attempt = QuizAttempt::from_outcome(
                    run.kind(),
                    &outcome,
                    points,
                    run.started_at(),
                    self.clock.now().max(run.started_at()),
                )?;
                let lesson = run
                    .kind()
                    .lesson_id()
                    .map(|id| (id, outcome.score == outcome.total));
                let update = self.progress.record(points, lesson).await?;
                let applied = AppliedAward { update, attempt };
                run.set_applied(applied.clone());
                applied
            }
        };
        let attempt_id = self.attempts.append_attempt(&attempt).await?;

        info!(
            kind = %run.kind(),
            score = outcome.score,
            total = outcome.total,
            points = attempt.points(),
            attempt_id = %attempt_id,
            "quiz completed"
        );

        Ok(QuizFinish {
            outcome,
            points: attempt.points(),
            total_score: update.progress.total_score(),
            level_up: update.level_up,
            lesson: update.lesson,
            streak: update.streak,
            attempt_id,
            completed_at: attempt.completed_at(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::model::LessonId;
    use academy_core::time::fixed_now;
    use storage::repository::InMemoryRepository;

    fn service() -> (QuizLoopService, InMemoryRepository) {
        let repo = InMemoryRepository::new();
        let svc = QuizLoopService::new(
            Clock::fixed(fixed_now()),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
        );
        (svc, repo)
    }

    #[test]
    fn locked_and_unknown_lessons_cannot_start() {
        let (svc, _repo) = service();
        assert!(matches!(
            svc.start(QuizKind::Lesson(LessonId::new(6))),
            Err(QuizServiceError::LessonLocked(_))
        ));
        assert!(matches!(
            svc.start(QuizKind::Lesson(LessonId::new(40))),
            Err(QuizServiceError::UnknownLesson(_))
        ));
    }

    #[test]
    fn exam_run_is_timed() {
        let (svc, _repo) = service();
        let run = svc.start(QuizKind::Exam).unwrap();
        assert_eq!(run.session().total_questions(), 15);
        assert_eq!(run.session().remaining(), Some(Duration::seconds(600)));
    }

    #[tokio::test]
    async fn finalize_before_completion_is_rejected() {
        let (svc, _repo) = service();
        let mut run = svc.start(QuizKind::TacoTrivia).unwrap();
        assert!(matches!(
            svc.finalize(&mut run).await,
            Err(QuizServiceError::NotComplete)
        ));
    }
}
