mod achievement;
mod attempt;
pub mod games;
mod ids;
mod lesson;
mod progress;
mod question;
pub mod quiz;
mod theme;

pub use ids::{AttemptId, LessonId, ParseIdError};

pub use achievement::{Achievement, unlocked_achievements};
pub use attempt::{AttemptError, QuizAttempt};
pub use lesson::{Category, Difficulty, Lesson, LessonError};
pub use progress::{
    LESSON_COMPLETION_BONUS, LessonCompletion, POINTS_PER_LEVEL, ProgressError, StreakUpdate,
    UserProgress,
};
pub use question::{MIN_OPTIONS, Question, QuestionDraft, QuestionError};
pub use quiz::{QuizKind, QuizOutcome, QuizRules, QuizSession};
pub use theme::{Theme, UnknownTheme};
