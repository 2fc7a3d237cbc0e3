mod rules;
mod session;

pub use rules::{EXAM_PASS_MARK, EXAM_TIME_LIMIT_SECS, ParseQuizKindError, QuizKind, QuizRules};
pub use session::{
    Advance, AnswerMode, QuizError, QuizOutcome, QuizSession, QuizState, Tick, percentage,
};
