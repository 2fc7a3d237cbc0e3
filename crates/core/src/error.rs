use thiserror::Error;

use crate::model::games::GameError;
use crate::model::quiz::QuizError;
use crate::model::{AttemptError, LessonError, ProgressError, QuestionError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Attempt(#[from] AttemptError),
}
