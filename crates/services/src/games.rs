use academy_core::model::games::{Flip, MemoryBoard, NextWord, Resolution, WordBuilder};
use tracing::info;

use crate::content;
use crate::error::GameServiceError;
use crate::progress_service::{ProgressService, ProgressUpdate};

/// A memory board plus the award it earned once cleared.
#[derive(Debug, Clone)]
pub struct MemoryGame {
    board: MemoryBoard,
    award: Option<ProgressUpdate>,
}

impl MemoryGame {
    #[must_use]
    pub fn new(board: MemoryBoard) -> Self {
        Self { board, award: None }
    }

    #[must_use]
    pub fn board(&self) -> &MemoryBoard {
        &self.board
    }

    /// Set once the cleared board's points are saved.
    #[must_use]
    pub fn award(&self) -> Option<&ProgressUpdate> {
        self.award.as_ref()
    }
}

/// Runs the mini-games over catalog content and banks memory points.
#[derive(Clone)]
pub struct GameService {
    progress: ProgressService,
}

impl GameService {
    #[must_use]
    pub fn new(progress: ProgressService) -> Self {
        Self { progress }
    }

    /// # Errors
    ///
    /// Returns `GameServiceError::Content` if the pairs cannot be laid out.
    pub fn start_memory(&self) -> Result<MemoryGame, GameServiceError> {
        Ok(MemoryGame::new(content::memory_board(&mut rand::rng())?))
    }

    /// # Errors
    ///
    /// Returns `GameServiceError::Game` when the board rejects the flip.
    pub fn flip(&self, game: &mut MemoryGame, index: usize) -> Result<Flip, GameServiceError> {
        Ok(game.board.flip(index)?)
    }

    /// Settle the face-up pair; clearing the board banks its score.
    ///
    /// # Errors
    ///
    /// Returns `GameServiceError::Game` without a pending pair and progress
    /// errors from banking. After a progress error call `bank_memory` again.
    pub async fn resolve(&self, game: &mut MemoryGame) -> Result<Resolution, GameServiceError> {
        let resolution = game.board.resolve()?;
        if let Resolution::Matched { complete: true, .. } = resolution {
            self.bank_memory(game).await?;
        }
        Ok(resolution)
    }

    /// Add a cleared board's score to progress. Later calls return the
    /// stored update.
    ///
    /// # Errors
    ///
    /// Returns `GameServiceError::NotComplete` before the board is cleared,
    /// or progress errors.
    pub async fn bank_memory<'a>(
        &self,
        game: &'a mut MemoryGame,
    ) -> Result<&'a ProgressUpdate, GameServiceError> {
        if !game.board.is_complete() {
            return Err(GameServiceError::NotComplete);
        }
        if game.award.is_none() {
            let points = u64::from(game.board.score());
            let update = self.progress.add_score(points).await?;
            info!(points, moves = game.board.moves(), "memory board cleared");
            game.award = Some(update);
        }
        game.award.as_ref().ok_or(GameServiceError::NotComplete)
    }

    /// # Errors
    ///
    /// Returns `GameServiceError::Content` if the words cannot be loaded.
    pub fn start_words(&self) -> Result<WordBuilder, GameServiceError> {
        Ok(content::word_builder(&mut rand::rng())?)
    }

    /// Move past a solved word and scramble the next one.
    ///
    /// # Errors
    ///
    /// Returns `GameServiceError::Game` unless the current round is solved.
    pub fn next_word(&self, builder: &mut WordBuilder) -> Result<NextWord, GameServiceError> {
        let next = builder.next()?;
        if let NextWord::Word { .. } = next {
            content::scramble_current(builder, &mut rand::rng())?;
        }
        Ok(next)
    }
}
