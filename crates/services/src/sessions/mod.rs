mod history;
mod run;
mod workflow;

pub use history::{AttemptHistoryService, AttemptListItem};
pub use run::{QuizFinish, QuizRun};
pub use workflow::QuizLoopService;
