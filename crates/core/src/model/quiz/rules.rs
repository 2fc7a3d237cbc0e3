use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::ids::LessonId;

/// Percentage an exam needs to pass.
pub const EXAM_PASS_MARK: u32 = 70;

/// Exam time budget in seconds (10 minutes).
pub const EXAM_TIME_LIMIT_SECS: i64 = 600;

/// Behaviour switches for a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRules {
    /// The first selected option for a question becomes permanent.
    pub lock_answers: bool,
    /// `go_back` is permitted.
    pub allow_back: bool,
    /// Percentage needed to pass, if the quiz is graded pass/fail.
    pub pass_mark: Option<u32>,
}

impl QuizRules {
    /// Forward-only quiz with locked answers and no pass mark.
    #[must_use]
    pub fn forward_only() -> Self {
        Self {
            lock_answers: true,
            allow_back: false,
            pass_mark: None,
        }
    }

    /// Exam rules: locked answers, backward navigation, 70 % pass mark.
    #[must_use]
    pub fn exam() -> Self {
        Self {
            lock_answers: true,
            allow_back: true,
            pass_mark: Some(EXAM_PASS_MARK),
        }
    }

    #[must_use]
    pub fn with_lock_answers(mut self, lock_answers: bool) -> Self {
        self.lock_answers = lock_answers;
        self
    }

    #[must_use]
    pub fn with_allow_back(mut self, allow_back: bool) -> Self {
        self.allow_back = allow_back;
        self
    }

    #[must_use]
    pub fn with_pass_mark(mut self, pass_mark: Option<u32>) -> Self {
        self.pass_mark = pass_mark;
        self
    }
}

impl Default for QuizRules {
    fn default() -> Self {
        Self::forward_only()
    }
}

/// Which screen a quiz session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizKind {
    Lesson(LessonId),
    QuickQuiz,
    TacoTrivia,
    FlagMatch,
    Exam,
}

impl QuizKind {
    #[must_use]
    pub fn rules(self) -> QuizRules {
        match self {
            QuizKind::Exam => QuizRules::exam(),
            QuizKind::Lesson(_)
            | QuizKind::QuickQuiz
            | QuizKind::TacoTrivia
            | QuizKind::FlagMatch => QuizRules::forward_only(),
        }
    }

    #[must_use]
    pub fn time_limit(self) -> Option<Duration> {
        match self {
            QuizKind::Exam => Some(Duration::seconds(EXAM_TIME_LIMIT_SECS)),
            _ => None,
        }
    }

    #[must_use]
    pub fn lesson_id(self) -> Option<LessonId> {
        match self {
            QuizKind::Lesson(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for QuizKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizKind::Lesson(id) => write!(f, "lesson:{id}"),
            QuizKind::QuickQuiz => f.write_str("quick_quiz"),
            QuizKind::TacoTrivia => f.write_str("taco_trivia"),
            QuizKind::FlagMatch => f.write_str("flag_match"),
            QuizKind::Exam => f.write_str("exam"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown quiz kind: {0}")]
pub struct ParseQuizKindError(pub String);

impl FromStr for QuizKind {
    type Err = ParseQuizKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quick_quiz" => Ok(QuizKind::QuickQuiz),
            "taco_trivia" => Ok(QuizKind::TacoTrivia),
            "flag_match" => Ok(QuizKind::FlagMatch),
            "exam" => Ok(QuizKind::Exam),
            other => other
                .strip_prefix("lesson:")
                .and_then(|raw| raw.parse::<LessonId>().ok())
                .map(QuizKind::Lesson)
                .ok_or_else(|| ParseQuizKindError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_exam_is_timed_and_navigable() {
        assert_eq!(QuizKind::Exam.time_limit(), Some(Duration::seconds(600)));
        assert!(QuizKind::Exam.rules().allow_back);
        assert_eq!(QuizKind::Exam.rules().pass_mark, Some(70));

        for kind in [
            QuizKind::Lesson(LessonId::new(1)),
            QuizKind::QuickQuiz,
            QuizKind::TacoTrivia,
            QuizKind::FlagMatch,
        ] {
            assert_eq!(kind.time_limit(), None);
            assert_eq!(kind.rules(), QuizRules::forward_only());
        }
    }

    #[test]
    fn kind_string_form_parses_back() {
        for kind in [
            QuizKind::Lesson(LessonId::new(12)),
            QuizKind::QuickQuiz,
            QuizKind::TacoTrivia,
            QuizKind::FlagMatch,
            QuizKind::Exam,
        ] {
            assert_eq!(kind.to_string().parse::<QuizKind>().unwrap(), kind);
        }
        assert!("lesson:abc".parse::<QuizKind>().is_err());
        assert!("bingo".parse::<QuizKind>().is_err());
    }
}
