#![forbid(unsafe_code)]

pub mod app_services;
pub mod content;
pub mod error;
pub mod games;
pub mod progress_service;
pub mod sessions;
pub mod timer;

pub use academy_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, GameServiceError, ProgressServiceError, QuizServiceError};
pub use games::{GameService, MemoryGame};
pub use progress_service::{POINTS_PER_CORRECT, ProgressService, ProgressUpdate};
pub use sessions::{AttemptHistoryService, AttemptListItem, QuizFinish, QuizLoopService, QuizRun};
pub use timer::CountdownTimer;
