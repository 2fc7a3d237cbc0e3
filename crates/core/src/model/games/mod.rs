//! Mini-games that are not multiple-choice quizzes.

mod memory;
mod word;

use thiserror::Error;

pub use memory::{Flip, MemoryBoard, MemoryCard, POINTS_PER_PAIR, Resolution};
pub use word::{NextWord, RoundState, WordBuilder, WordEntry};

/// Rejected game moves. Rejections leave the game untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("game has no content")]
    Empty,

    #[error("layout is not a permutation of the tiles")]
    InvalidLayout,

    #[error("index {index} is out of range for {len} tiles")]
    OutOfRange { index: usize, len: usize },

    #[error("card is already matched")]
    AlreadyMatched,

    #[error("card is already face up")]
    AlreadyFaceUp,

    #[error("a pair is waiting to be resolved")]
    Busy,

    #[error("no pair to resolve")]
    NothingToResolve,

    #[error("tile already used")]
    TileUsed,

    #[error("round already decided")]
    RoundOver,

    #[error("round is still in progress")]
    RoundInProgress,

    #[error("game already completed")]
    Completed,
}
