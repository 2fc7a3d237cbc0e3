use super::GameError;

/// A word to assemble with its hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub hint: String,
}

impl WordEntry {
    #[must_use]
    pub fn new(word: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            word: word.into().trim().to_uppercase(),
            hint: hint.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Building,
    Solved,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextWord {
    Word { index: usize },
    Completed { score: u32, total: u32 },
}

/// Letter-tile game: rebuild each word from its scrambled letters.
#[derive(Debug, Clone)]
pub struct WordBuilder {
    words: Vec<WordEntry>,
    current: usize,
    tiles: Vec<char>,
    picked: Vec<usize>,
    round: RoundState,
    solved: Vec<bool>,
    completed: bool,
}

impl WordBuilder {
    /// # Errors
    ///
    /// Returns `GameError::Empty` if there are no words or any word is blank.
    pub fn new(words: Vec<WordEntry>) -> Result<Self, GameError> {
        if words.is_empty() || words.iter().any(|entry| entry.word.is_empty()) {
            return Err(GameError::Empty);
        }
        let tiles = words[0].word.chars().collect();
        let solved = vec![false; words.len()];
        Ok(Self {
            words,
            current: 0,
            tiles,
            picked: Vec::new(),
            round: RoundState::Building,
            solved,
            completed: false,
        })
    }

    /// Rearrange the current word's tiles with a permutation of tile indices.
    ///
    /// Only allowed before any tile of the round is picked.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidLayout` for a bad permutation and
    /// `GameError::RoundInProgress` once tiles have been picked.
    pub fn scramble(&mut self, order: &[usize]) -> Result<(), GameError> {
        self.ensure_active()?;
        if !self.picked.is_empty() || self.round != RoundState::Building {
            return Err(GameError::RoundInProgress);
        }
        let mut seen = vec![false; self.tiles.len()];
        if order.len() != self.tiles.len() {
            return Err(GameError::InvalidLayout);
        }
        for &i in order {
            if i >= seen.len() || seen[i] {
                return Err(GameError::InvalidLayout);
            }
            seen[i] = true;
        }
        self.tiles = order.iter().map(|&i| self.tiles[i]).collect();
        Ok(())
    }

    /// Use a tile. Solves the round on the right word, fails it when the
    /// guess is full length and wrong.
    ///
    /// # Errors
    ///
    /// Returns `GameError::OutOfRange`, `GameError::TileUsed`,
    /// `GameError::RoundOver` after the round is decided, or
    /// `GameError::Completed`.
    pub fn tap(&mut self, tile: usize) -> Result<RoundState, GameError> {
        self.ensure_active()?;
        if self.round != RoundState::Building {
            return Err(GameError::RoundOver);
        }
        if tile >= self.tiles.len() {
            return Err(GameError::OutOfRange {
                index: tile,
                len: self.tiles.len(),
            });
        }
        if self.picked.contains(&tile) {
            return Err(GameError::TileUsed);
        }

        self.picked.push(tile);
        if self.guess() == self.words[self.current].word {
            self.round = RoundState::Solved;
            self.solved[self.current] = true;
        } else if self.picked.len() == self.tiles.len() {
            self.round = RoundState::Failed;
        }
        Ok(self.round)
    }

    /// Clear the guess after a failed round.
    ///
    /// # Errors
    ///
    /// Returns `GameError::RoundInProgress` unless the round failed.
    pub fn retry(&mut self) -> Result<(), GameError> {
        self.ensure_active()?;
        if self.round != RoundState::Failed {
            return Err(GameError::RoundInProgress);
        }
        self.picked.clear();
        self.round = RoundState::Building;
        Ok(())
    }

    /// Move on after solving the current word.
    ///
    /// # Errors
    ///
    /// Returns `GameError::RoundInProgress` unless the round is solved.
    pub fn next(&mut self) -> Result<NextWord, GameError> {
        self.ensure_active()?;
        if self.round != RoundState::Solved {
            return Err(GameError::RoundInProgress);
        }
        if self.current + 1 >= self.words.len() {
            self.completed = true;
            return Ok(NextWord::Completed {
                score: self.score(),
                total: self.total(),
            });
        }
        self.current += 1;
        self.tiles = self.words[self.current].word.chars().collect();
        self.picked.clear();
        self.round = RoundState::Building;
        Ok(NextWord::Word {
            index: self.current,
        })
    }

    fn ensure_active(&self) -> Result<(), GameError> {
        if self.completed {
            Err(GameError::Completed)
        } else {
            Ok(())
        }
    }

    #[must_use]
    pub fn guess(&self) -> String {
        self.picked.iter().map(|&i| self.tiles[i]).collect()
    }

    #[must_use]
    pub fn current(&self) -> &WordEntry {
        &self.words[self.current]
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn tiles(&self) -> &[char] {
        &self.tiles
    }

    #[must_use]
    pub fn is_tile_used(&self, tile: usize) -> bool {
        self.picked.contains(&tile)
    }

    #[must_use]
    pub fn round(&self) -> RoundState {
        self.round
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        u32::try_from(self.solved.iter().filter(|s| **s).count()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        u32::try_from(self.words.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> WordBuilder {
        WordBuilder::new(vec![
            WordEntry::new("sol", "Sun"),
            WordEntry::new("casa", "House"),
        ])
        .unwrap()
    }

    #[test]
    fn solving_scores_once_and_moves_on() {
        let mut game = builder();
        game.scramble(&[2, 0, 1]).unwrap();
        assert_eq!(game.tiles(), &['L', 'S', 'O']);

        game.tap(1).unwrap();
        game.tap(2).unwrap();
        assert_eq!(game.tap(0).unwrap(), RoundState::Solved);
        assert_eq!(game.score(), 1);
        assert_eq!(game.tap(0), Err(GameError::RoundOver));

        assert_eq!(game.next().unwrap(), NextWord::Word { index: 1 });
        assert_eq!(game.current().hint, "House");
    }

    #[test]
    fn tiles_cannot_be_reused() {
        let mut game = builder();
        game.tap(0).unwrap();
        assert_eq!(game.tap(0), Err(GameError::TileUsed));
        assert_eq!(game.guess(), "S");
    }

    #[test]
    fn wrong_full_guess_fails_and_retry_clears() {
        let mut game = builder();
        game.tap(1).unwrap();
        game.tap(0).unwrap();
        assert_eq!(game.tap(2).unwrap(), RoundState::Failed);
        assert_eq!(game.next(), Err(GameError::RoundInProgress));

        game.retry().unwrap();
        assert_eq!(game.guess(), "");
        assert_eq!(game.round(), RoundState::Building);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn repeated_letters_use_distinct_tiles() {
        let mut game = builder();
        for tile in 0..3 {
            game.tap(tile).unwrap();
        }
        game.next().unwrap();
        for tile in 0..3 {
            assert_eq!(game.tap(tile).unwrap(), RoundState::Building);
        }
        assert_eq!(game.tap(3).unwrap(), RoundState::Solved);
    }

    #[test]
    fn finishing_the_last_word_completes() {
        let mut game = WordBuilder::new(vec![WordEntry::new("flor", "Flower")]).unwrap();
        for tile in 0..4 {
            game.tap(tile).unwrap();
        }
        assert_eq!(
            game.next().unwrap(),
            NextWord::Completed { score: 1, total: 1 }
        );
        assert_eq!(game.tap(0), Err(GameError::Completed));
    }

    #[test]
    fn scramble_rejected_mid_round() {
        let mut game = builder();
        game.tap(0).unwrap();
        assert_eq!(game.scramble(&[0, 1, 2]), Err(GameError::RoundInProgress));
        assert_eq!(
            builder().scramble(&[0, 0, 1]),
            Err(GameError::InvalidLayout)
        );
    }
}
