use chrono::Duration;
use std::fmt;
use thiserror::Error;

use super::rules::QuizRules;
use crate::model::question::Question;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Rejected quiz operations. A rejected call never changes session state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz already started")]
    AlreadyStarted,

    #[error("quiz has not started")]
    NotStarted,

    #[error("quiz already completed")]
    Completed,

    #[error("no questions to present")]
    Empty,

    #[error("too many questions for a single quiz: {len}")]
    TooManyQuestions { len: usize },

    #[error("time limit must be positive")]
    InvalidTimeLimit,

    #[error("option {index} is out of range for {len} options")]
    InvalidOption { index: usize, len: usize },

    #[error("answer already locked for this question")]
    AnswerLocked,

    #[error("current question has not been answered")]
    NotAnswered,

    #[error("backward navigation is not allowed in this quiz")]
    BackNotAllowed,

    #[error("already at the first question")]
    AtFirstQuestion,

    #[error("quiz is not timed")]
    NotTimed,

    #[error("elapsed time must not be negative")]
    NegativeElapsed,
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Whether the current question's answer has been revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMode {
    AwaitingAnswer,
    AnswerRevealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    NotStarted,
    InProgress(AnswerMode),
    Completed,
}

/// Final result of a session, produced exactly once on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
    /// `Some` only when the rules define a pass mark.
    pub passed: Option<bool>,
    /// Budget consumed, for timed sessions.
    pub time_used: Option<Duration>,
    /// Completion was forced by the time budget running out.
    pub expired: bool,
}

/// Result of a successful `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize, mode: AnswerMode },
    Completed(QuizOutcome),
}

/// Result of a successful `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running { remaining: Duration },
    Expired(QuizOutcome),
}

/// Truncating percentage: 2 of 3 is 66, not 67. Returns 0 for an empty total.
#[must_use]
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let pct = u64::from(score) * 100 / u64::from(total);
    u32::try_from(pct).unwrap_or(u32::MAX)
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Multiple-choice quiz state machine shared by lessons, trivia games, flag
/// match and the exam.
///
/// `NotStarted → InProgress(AwaitingAnswer ⇄ AnswerRevealed) → Completed`.
/// The score is always derived from the answer slots, so it can never drift
/// from what was recorded.
#[derive(Clone)]
pub struct QuizSession {
    rules: QuizRules,
    questions: Vec<Question>,
    answers: Vec<Option<usize>>,
    current: usize,
    state: QuizState,
    time_limit: Option<Duration>,
    remaining: Option<Duration>,
    outcome: Option<QuizOutcome>,
}

impl QuizSession {
    #[must_use]
    pub fn new(rules: QuizRules) -> Self {
        Self {
            rules,
            questions: Vec::new(),
            answers: Vec::new(),
            current: 0,
            state: QuizState::NotStarted,
            time_limit: None,
            remaining: None,
            outcome: None,
        }
    }

    /// Load the questions and begin the session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyStarted` unless the session is `NotStarted`,
    /// `QuizError::Empty` for an empty question list and
    /// `QuizError::InvalidTimeLimit` for a non-positive time limit.
    pub fn start(
        &mut self,
        questions: Vec<Question>,
        time_limit: Option<Duration>,
    ) -> Result<(), QuizError> {
        if self.state != QuizState::NotStarted {
            return Err(QuizError::AlreadyStarted);
        }
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        if u32::try_from(questions.len()).is_err() {
            return Err(QuizError::TooManyQuestions {
                len: questions.len(),
            });
        }
        if time_limit.is_some_and(|limit| limit <= Duration::zero()) {
            return Err(QuizError::InvalidTimeLimit);
        }

        self.answers = vec![None; questions.len()];
        self.questions = questions;
        self.current = 0;
        self.time_limit = time_limit;
        self.remaining = time_limit;
        self.outcome = None;
        self.state = QuizState::InProgress(AnswerMode::AwaitingAnswer);
        Ok(())
    }

    /// Record an answer for the current question and reveal it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOption` for an out-of-range index,
    /// `QuizError::AnswerLocked` when the answer is already revealed under
    /// lock-on-first-answer rules, or a state error outside `InProgress`.
    pub fn select_answer(&mut self, option: usize) -> Result<(), QuizError> {
        let mode = self.in_progress_mode()?;
        if mode == AnswerMode::AnswerRevealed && self.rules.lock_answers {
            return Err(QuizError::AnswerLocked);
        }

        let len = self.questions[self.current].option_count();
        if option >= len {
            return Err(QuizError::InvalidOption { index: option, len });
        }

        self.answers[self.current] = Some(option);
        self.state = QuizState::InProgress(AnswerMode::AnswerRevealed);
        Ok(())
    }

    /// Move past a revealed question, completing the session after the last.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotAnswered` while the current question is still
    /// awaiting an answer, or a state error outside `InProgress`.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        if self.in_progress_mode()? == AnswerMode::AwaitingAnswer {
            return Err(QuizError::NotAnswered);
        }

        if self.current + 1 >= self.questions.len() {
            return Ok(Advance::Completed(self.complete(false)));
        }

        self.current += 1;
        let mode = self.mode_for(self.current);
        self.state = QuizState::InProgress(mode);
        Ok(Advance::Next {
            index: self.current,
            mode,
        })
    }

    /// Step back one question, restoring its revealed answer if it had one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::BackNotAllowed` for forward-only rules,
    /// `QuizError::AtFirstQuestion` at index 0, or a state error outside
    /// `InProgress`.
    pub fn go_back(&mut self) -> Result<AnswerMode, QuizError> {
        self.in_progress_mode()?;
        if !self.rules.allow_back {
            return Err(QuizError::BackNotAllowed);
        }
        if self.current == 0 {
            return Err(QuizError::AtFirstQuestion);
        }

        self.current -= 1;
        let mode = self.mode_for(self.current);
        self.state = QuizState::InProgress(mode);
        Ok(mode)
    }

    /// Consume part of the time budget; completes the session at zero.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotTimed` for sessions without a time limit,
    /// `QuizError::NegativeElapsed` for a negative duration, or a state error
    /// outside `InProgress`.
    pub fn tick(&mut self, elapsed: Duration) -> Result<Tick, QuizError> {
        self.in_progress_mode()?;
        let Some(remaining) = self.remaining else {
            return Err(QuizError::NotTimed);
        };
        if elapsed < Duration::zero() {
            return Err(QuizError::NegativeElapsed);
        }

        let left = remaining - elapsed;
        if left <= Duration::zero() {
            self.remaining = Some(Duration::zero());
            return Ok(Tick::Expired(self.complete(true)));
        }

        self.remaining = Some(left);
        Ok(Tick::Running { remaining: left })
    }

    fn complete(&mut self, expired: bool) -> QuizOutcome {
        let score = self.score();
        let total = self.total_questions();
        let pct = percentage(score, total);
        let outcome = QuizOutcome {
            score,
            total,
            percentage: pct,
            passed: self.rules.pass_mark.map(|mark| pct >= mark),
            time_used: self.time_used(),
            expired,
        };
        self.state = QuizState::Completed;
        self.outcome = Some(outcome);
        outcome
    }

    fn in_progress_mode(&self) -> Result<AnswerMode, QuizError> {
        match self.state {
            QuizState::NotStarted => Err(QuizError::NotStarted),
            QuizState::InProgress(mode) => Ok(mode),
            QuizState::Completed => Err(QuizError::Completed),
        }
    }

    fn mode_for(&self, index: usize) -> AnswerMode {
        if self.answers[index].is_some() {
            AnswerMode::AnswerRevealed
        } else {
            AnswerMode::AwaitingAnswer
        }
    }

    // ─── Queries ──────────────────────────────────────────────────────────────

    #[must_use]
    pub fn rules(&self) -> QuizRules {
        self.rules
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        self.state
    }

    /// Sub-mode of the current question, `None` outside `InProgress`.
    #[must_use]
    pub fn mode(&self) -> Option<AnswerMode> {
        match self.state {
            QuizState::InProgress(mode) => Some(mode),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.state != QuizState::NotStarted
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == QuizState::Completed
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            QuizState::InProgress(_) => self.questions.get(self.current),
            _ => None,
        }
    }

    /// Answer recorded for the current question, if any.
    #[must_use]
    pub fn selected_answer(&self) -> Option<usize> {
        self.answers.get(self.current).copied().flatten()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        u32::try_from(self.questions.len()).unwrap_or(u32::MAX)
    }

    /// Number of answer slots matching their question's correct option.
    #[must_use]
    pub fn score(&self) -> u32 {
        let correct = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, slot)| slot.is_some_and(|option| question.is_correct(option)))
            .count();
        u32::try_from(correct).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn percentage(&self) -> u32 {
        percentage(self.score(), self.total_questions())
    }

    /// Pass/fail against the pass mark; `None` when the rules have none.
    #[must_use]
    pub fn is_passed(&self) -> Option<bool> {
        self.rules
            .pass_mark
            .map(|mark| self.percentage() >= mark)
    }

    #[must_use]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    #[must_use]
    pub fn time_used(&self) -> Option<Duration> {
        match (self.time_limit, self.remaining) {
            (Some(limit), Some(remaining)) => Some(limit - remaining),
            _ => None,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&QuizOutcome> {
        self.outcome.as_ref()
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("rules", &self.rules)
            .field("state", &self.state)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answered", &self.answered_count())
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: usize) -> Question {
        Question::new("Q", ["a", "b", "c", "d"], correct, "because").unwrap()
    }

    fn questions(correct: &[usize]) -> Vec<Question> {
        correct.iter().copied().map(question).collect()
    }

    fn started(rules: QuizRules, correct: &[usize], limit: Option<Duration>) -> QuizSession {
        let mut session = QuizSession::new(rules);
        session.start(questions(correct), limit).unwrap();
        session
    }

    #[test]
    fn start_initialises_every_slot() {
        let session = started(QuizRules::forward_only(), &[1, 0, 2], None);
        assert_eq!(
            session.state(),
            QuizState::InProgress(AnswerMode::AwaitingAnswer)
        );
        assert_eq!(session.answers(), &[None, None, None]);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn second_start_is_rejected() {
        let mut session = started(QuizRules::forward_only(), &[1], None);
        session.select_answer(1).unwrap();
        let err = session.start(questions(&[0, 0]), None).unwrap_err();
        assert_eq!(err, QuizError::AlreadyStarted);
        assert_eq!(session.total_questions(), 1);
        assert_eq!(session.selected_answer(), Some(1));
    }

    #[test]
    fn empty_question_list_is_rejected() {
        let mut session = QuizSession::new(QuizRules::forward_only());
        assert_eq!(session.start(Vec::new(), None), Err(QuizError::Empty));
        assert_eq!(session.state(), QuizState::NotStarted);
    }

    #[test]
    fn non_positive_time_limit_is_rejected() {
        let mut session = QuizSession::new(QuizRules::exam());
        let err = session
            .start(questions(&[0]), Some(Duration::zero()))
            .unwrap_err();
        assert_eq!(err, QuizError::InvalidTimeLimit);
        assert!(!session.is_started());
    }

    #[test]
    fn operations_before_start_are_rejected() {
        let mut session = QuizSession::new(QuizRules::exam());
        assert_eq!(session.select_answer(0), Err(QuizError::NotStarted));
        assert_eq!(session.advance(), Err(QuizError::NotStarted));
        assert_eq!(session.go_back(), Err(QuizError::NotStarted));
        assert_eq!(
            session.tick(Duration::seconds(1)),
            Err(QuizError::NotStarted)
        );
    }

    #[test]
    fn first_answer_sticks() {
        let mut session = started(QuizRules::forward_only(), &[1, 0], None);
        session.select_answer(1).unwrap();
        assert_eq!(session.score(), 1);

        assert_eq!(session.select_answer(3), Err(QuizError::AnswerLocked));
        assert_eq!(session.selected_answer(), Some(1));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn unlocked_rules_let_the_answer_change_before_advancing() {
        let rules = QuizRules::forward_only().with_lock_answers(false);
        let mut session = started(rules, &[1, 0], None);
        session.select_answer(1).unwrap();
        session.select_answer(2).unwrap();
        assert_eq!(session.selected_answer(), Some(2));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn out_of_range_option_leaves_state_untouched() {
        let mut session = started(QuizRules::forward_only(), &[1], None);
        let err = session.select_answer(4).unwrap_err();
        assert_eq!(err, QuizError::InvalidOption { index: 4, len: 4 });
        assert_eq!(session.mode(), Some(AnswerMode::AwaitingAnswer));
        assert_eq!(session.selected_answer(), None);
    }

    #[test]
    fn advance_without_answer_is_rejected() {
        let mut session = started(QuizRules::forward_only(), &[1, 0], None);
        assert_eq!(session.advance(), Err(QuizError::NotAnswered));
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.mode(), Some(AnswerMode::AwaitingAnswer));
    }

    #[test]
    fn all_correct_run_scores_full_marks() {
        let mut session = started(QuizRules::forward_only(), &[1, 0, 2], None);
        let mut last = None;
        for option in [1, 0, 2] {
            session.select_answer(option).unwrap();
            last = Some(session.advance().unwrap());
        }

        let Some(Advance::Completed(outcome)) = last else {
            panic!("expected completion, got {last:?}");
        };
        assert_eq!(outcome.score, 3);
        assert_eq!(outcome.percentage, 100);
        assert_eq!(outcome.passed, None);
        assert!(!outcome.expired);
        assert_eq!(session.state(), QuizState::Completed);
        assert_eq!(session.outcome(), Some(&outcome));
    }

    #[test]
    fn all_wrong_run_scores_zero() {
        let mut session = started(QuizRules::forward_only(), &[0, 0, 0, 0, 0], None);
        for _ in 0..5 {
            session.select_answer(3).unwrap();
            session.advance().unwrap();
        }
        assert!(session.is_complete());
        assert_eq!(session.score(), 0);
        assert_eq!(session.percentage(), 0);
    }

    #[test]
    fn percentage_truncates() {
        assert_eq!(percentage(2, 3), 66);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(14, 15), 93);
        assert_eq!(percentage(0, 0), 0);

        let mut session = started(QuizRules::forward_only(), &[0, 0, 0], None);
        for option in [0, 0, 1] {
            session.select_answer(option).unwrap();
            session.advance().unwrap();
        }
        assert_eq!(session.percentage(), 66);
    }

    #[test]
    fn score_stays_within_bounds_throughout() {
        let mut session = started(QuizRules::exam(), &[0, 1, 2, 3], None);
        for option in [0, 1, 2, 3] {
            assert!(session.score() <= session.total_questions());
            session.select_answer(option).unwrap();
            assert!(session.score() <= session.total_questions());
            let _ = session.select_answer(option);
            session.advance().unwrap();
        }
        assert_eq!(session.score(), 4);
    }

    #[test]
    fn timer_expiry_completes_with_blanks_counted_wrong() {
        let mut session = started(
            QuizRules::exam(),
            &[0, 1, 2],
            Some(Duration::seconds(10)),
        );
        session.select_answer(0).unwrap();

        let mut result = None;
        for _ in 0..10 {
            result = Some(session.tick(Duration::seconds(1)).unwrap());
        }

        let Some(Tick::Expired(outcome)) = result else {
            panic!("expected expiry, got {result:?}");
        };
        assert!(outcome.expired);
        assert_eq!(outcome.score, 1);
        assert_eq!(outcome.total, 3);
        assert_eq!(outcome.percentage, 33);
        assert_eq!(outcome.passed, Some(false));
        assert_eq!(outcome.time_used, Some(Duration::seconds(10)));
        assert_eq!(session.state(), QuizState::Completed);
        assert_eq!(
            session.tick(Duration::seconds(1)),
            Err(QuizError::Completed)
        );
    }

    #[test]
    fn expiry_while_awaiting_answer_still_completes() {
        let mut session = started(QuizRules::exam(), &[0, 1], Some(Duration::seconds(10)));
        assert_eq!(
            session.tick(Duration::seconds(9)).unwrap(),
            Tick::Running {
                remaining: Duration::seconds(1)
            }
        );
        assert!(matches!(
            session.tick(Duration::seconds(5)).unwrap(),
            Tick::Expired(_)
        ));
        assert_eq!(session.remaining(), Some(Duration::zero()));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn tick_requires_a_time_budget() {
        let mut session = started(QuizRules::forward_only(), &[0], None);
        assert_eq!(
            session.tick(Duration::seconds(1)),
            Err(QuizError::NotTimed)
        );
    }

    #[test]
    fn negative_tick_is_rejected() {
        let mut session = started(QuizRules::exam(), &[0], Some(Duration::seconds(5)));
        assert_eq!(
            session.tick(Duration::seconds(-1)),
            Err(QuizError::NegativeElapsed)
        );
        assert_eq!(session.remaining(), Some(Duration::seconds(5)));
    }

    #[test]
    fn finishing_before_expiry_reports_time_used() {
        let mut session = started(QuizRules::exam(), &[2], Some(Duration::seconds(600)));
        session.tick(Duration::seconds(42)).unwrap();
        session.select_answer(2).unwrap();
        let Advance::Completed(outcome) = session.advance().unwrap() else {
            panic!("single question should complete");
        };
        assert_eq!(outcome.time_used, Some(Duration::seconds(42)));
        assert_eq!(outcome.passed, Some(true));
        assert!(!outcome.expired);
    }

    #[test]
    fn going_back_restores_the_revealed_answer() {
        let mut session = started(QuizRules::exam(), &[1, 0, 2], None);
        session.select_answer(3).unwrap();
        session.advance().unwrap();
        assert_eq!(session.mode(), Some(AnswerMode::AwaitingAnswer));

        assert_eq!(session.go_back().unwrap(), AnswerMode::AnswerRevealed);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.selected_answer(), Some(3));
        assert_eq!(session.select_answer(1), Err(QuizError::AnswerLocked));
    }

    #[test]
    fn advancing_onto_an_answered_question_keeps_it_revealed() {
        let mut session = started(QuizRules::exam(), &[1, 0, 2], None);
        session.select_answer(1).unwrap();
        session.advance().unwrap();
        session.select_answer(0).unwrap();
        session.go_back().unwrap();

        let next = session.advance().unwrap();
        assert_eq!(
            next,
            Advance::Next {
                index: 1,
                mode: AnswerMode::AnswerRevealed
            }
        );
        assert_eq!(session.selected_answer(), Some(0));
    }

    #[test]
    fn go_back_leaves_an_unanswered_question_blank() {
        let mut session = started(QuizRules::exam(), &[1, 0, 2], None);
        session.select_answer(1).unwrap();
        session.advance().unwrap();
        session.go_back().unwrap();
        session.advance().unwrap();
        assert_eq!(session.mode(), Some(AnswerMode::AwaitingAnswer));
    }

    #[test]
    fn forward_only_rules_reject_go_back() {
        let mut session = started(QuizRules::forward_only(), &[1, 0], None);
        session.select_answer(1).unwrap();
        session.advance().unwrap();
        assert_eq!(session.go_back(), Err(QuizError::BackNotAllowed));
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn go_back_at_first_question_is_rejected() {
        let mut session = started(QuizRules::exam(), &[1, 0], None);
        assert_eq!(session.go_back(), Err(QuizError::AtFirstQuestion));
    }

    #[test]
    fn exam_pass_mark_is_inclusive() {
        let correct = [0; 10];
        let mut session = started(QuizRules::exam(), &correct, None);
        for i in 0..10 {
            session.select_answer(usize::from(i >= 7)).unwrap();
            session.advance().unwrap();
        }
        assert_eq!(session.percentage(), 70);
        assert_eq!(session.is_passed(), Some(true));
        assert_eq!(session.outcome().unwrap().passed, Some(true));
    }

    #[test]
    fn completed_session_rejects_further_input() {
        let mut session = started(QuizRules::forward_only(), &[0], None);
        session.select_answer(0).unwrap();
        session.advance().unwrap();
        assert_eq!(session.select_answer(0), Err(QuizError::Completed));
        assert_eq!(session.advance(), Err(QuizError::Completed));
        assert!(session.current_question().is_none());
    }
}
