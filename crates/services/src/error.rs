//! Shared error types for the services crate.

use thiserror::Error;

use academy_core::model::games::GameError;
use academy_core::model::quiz::QuizError;
use academy_core::model::{AttemptError, LessonId, Theme, UnknownTheme};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error("theme {0} is still locked")]
    ThemeLocked(Theme),
    #[error(transparent)]
    UnknownTheme(#[from] UnknownTheme),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizLoopService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("unknown lesson {0}")]
    UnknownLesson(LessonId),
    #[error("lesson {0} is locked")]
    LessonLocked(LessonId),
    #[error("quiz run is not complete")]
    NotComplete,
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Content(#[from] academy_core::Error),
    #[error(transparent)]
    Attempt(#[from] AttemptError),
    #[error(transparent)]
    Progress(#[from] ProgressServiceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `GameService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GameServiceError {
    #[error("game is not finished")]
    NotComplete,
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Content(#[from] academy_core::Error),
    #[error(transparent)]
    Progress(#[from] ProgressServiceError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
