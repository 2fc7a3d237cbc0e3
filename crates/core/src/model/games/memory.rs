use std::collections::BTreeSet;

use super::GameError;

/// Points awarded for each matched pair.
pub const POINTS_PER_PAIR: u32 = 100;

/// One face of a pair: an emoji on one card, the Spanish word on its partner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryCard {
    pub pair: usize,
    pub face: String,
}

/// What a successful flip did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    /// First card of a pair is face up.
    FirstUp,
    /// Second card is face up; call `resolve` to settle the pair.
    PairPending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Matched { pair: usize, complete: bool },
    Mismatch,
}

/// Pairs game: flip two cards, keep them if they belong together.
///
/// The board order is decided by the caller so shuffling stays outside the
/// model.
#[derive(Debug, Clone)]
pub struct MemoryBoard {
    cards: Vec<MemoryCard>,
    face_up: Vec<usize>,
    matched: BTreeSet<usize>,
    moves: u32,
    score: u32,
}

impl MemoryBoard {
    /// Lay out the two faces of each pair, then reorder with `order`.
    ///
    /// `order` is a permutation of `0..2 * pairs.len()`; pass `None` to keep
    /// the authored layout.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Empty` without pairs and `GameError::InvalidLayout`
    /// if `order` is not a permutation.
    pub fn new(
        pairs: &[(String, String)],
        order: Option<&[usize]>,
    ) -> Result<Self, GameError> {
        if pairs.is_empty() {
            return Err(GameError::Empty);
        }
        let laid: Vec<MemoryCard> = pairs
            .iter()
            .enumerate()
            .flat_map(|(pair, (emoji, word))| {
                [
                    MemoryCard {
                        pair,
                        face: emoji.clone(),
                    },
                    MemoryCard {
                        pair,
                        face: word.clone(),
                    },
                ]
            })
            .collect();

        let cards = match order {
            None => laid,
            Some(order) => {
                let unique: BTreeSet<usize> = order.iter().copied().collect();
                if order.len() != laid.len()
                    || unique.len() != laid.len()
                    || order.iter().any(|&i| i >= laid.len())
                {
                    return Err(GameError::InvalidLayout);
                }
                order.iter().map(|&i| laid[i].clone()).collect()
            }
        };

        Ok(Self {
            cards,
            face_up: Vec::with_capacity(2),
            matched: BTreeSet::new(),
            moves: 0,
            score: 0,
        })
    }

    /// Turn a card face up.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Busy` while a pair awaits `resolve`,
    /// `GameError::OutOfRange`, `GameError::AlreadyMatched`,
    /// `GameError::AlreadyFaceUp` or `GameError::Completed`.
    pub fn flip(&mut self, index: usize) -> Result<Flip, GameError> {
        if self.is_complete() {
            return Err(GameError::Completed);
        }
        if self.face_up.len() >= 2 {
            return Err(GameError::Busy);
        }
        if index >= self.cards.len() {
            return Err(GameError::OutOfRange {
                index,
                len: self.cards.len(),
            });
        }
        if self.matched.contains(&index) {
            return Err(GameError::AlreadyMatched);
        }
        if self.face_up.contains(&index) {
            return Err(GameError::AlreadyFaceUp);
        }

        self.face_up.push(index);
        if self.face_up.len() == 2 {
            self.moves = self.moves.saturating_add(1);
            return Ok(Flip::PairPending);
        }
        Ok(Flip::FirstUp)
    }

    /// Settle the two face-up cards.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NothingToResolve` unless exactly two cards are up.
    pub fn resolve(&mut self) -> Result<Resolution, GameError> {
        let [first, second] = self.face_up[..] else {
            return Err(GameError::NothingToResolve);
        };
        self.face_up.clear();

        let pair = self.cards[first].pair;
        if pair != self.cards[second].pair {
            return Ok(Resolution::Mismatch);
        }

        self.matched.insert(first);
        self.matched.insert(second);
        self.score = self.score.saturating_add(POINTS_PER_PAIR);
        Ok(Resolution::Matched {
            pair,
            complete: self.is_complete(),
        })
    }

    #[must_use]
    pub fn cards(&self) -> &[MemoryCard] {
        &self.cards
    }

    #[must_use]
    pub fn is_face_up(&self, index: usize) -> bool {
        self.face_up.contains(&index) || self.matched.contains(&index)
    }

    #[must_use]
    pub fn is_matched(&self, index: usize) -> bool {
        self.matched.contains(&index)
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        u32::try_from(self.cards.len() / 2)
            .unwrap_or(u32::MAX)
            .saturating_mul(POINTS_PER_PAIR)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.matched.len() == self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs() -> Vec<(String, String)> {
        vec![
            ("🌮".into(), "Taco".into()),
            ("🥑".into(), "Aguacate".into()),
        ]
    }

    #[test]
    fn matching_pair_scores() {
        let mut board = MemoryBoard::new(&pairs(), None).unwrap();
        assert_eq!(board.flip(0).unwrap(), Flip::FirstUp);
        assert_eq!(board.flip(1).unwrap(), Flip::PairPending);
        assert_eq!(
            board.resolve().unwrap(),
            Resolution::Matched {
                pair: 0,
                complete: false
            }
        );
        assert_eq!(board.score(), 100);
        assert_eq!(board.moves(), 1);
        assert!(board.is_matched(0) && board.is_matched(1));
    }

    #[test]
    fn mismatch_turns_cards_back() {
        let mut board = MemoryBoard::new(&pairs(), None).unwrap();
        board.flip(0).unwrap();
        board.flip(2).unwrap();
        assert_eq!(board.resolve().unwrap(), Resolution::Mismatch);
        assert!(!board.is_face_up(0));
        assert!(!board.is_face_up(2));
        assert_eq!(board.score(), 0);
        assert_eq!(board.moves(), 1);
    }

    #[test]
    fn flips_are_blocked_while_a_pair_is_pending() {
        let mut board = MemoryBoard::new(&pairs(), None).unwrap();
        board.flip(0).unwrap();
        board.flip(2).unwrap();
        assert_eq!(board.flip(3), Err(GameError::Busy));
    }

    #[test]
    fn invalid_flips_are_rejected() {
        let mut board = MemoryBoard::new(&pairs(), None).unwrap();
        assert_eq!(
            board.flip(9),
            Err(GameError::OutOfRange { index: 9, len: 4 })
        );
        board.flip(0).unwrap();
        assert_eq!(board.flip(0), Err(GameError::AlreadyFaceUp));
        board.flip(1).unwrap();
        board.resolve().unwrap();
        assert_eq!(board.flip(1), Err(GameError::AlreadyMatched));
        assert_eq!(board.resolve(), Err(GameError::NothingToResolve));
    }

    #[test]
    fn board_completes_after_all_pairs() {
        let order = [3, 0, 2, 1];
        let mut board = MemoryBoard::new(&pairs(), Some(&order)).unwrap();
        assert_eq!(board.cards()[0].face, "Aguacate");

        board.flip(0).unwrap();
        board.flip(2).unwrap();
        board.resolve().unwrap();
        board.flip(1).unwrap();
        board.flip(3).unwrap();
        assert_eq!(
            board.resolve().unwrap(),
            Resolution::Matched {
                pair: 0,
                complete: true
            }
        );
        assert!(board.is_complete());
        assert_eq!(board.score(), board.max_score());
        assert_eq!(board.flip(0), Err(GameError::Completed));
    }

    #[test]
    fn layout_must_be_a_permutation() {
        assert_eq!(
            MemoryBoard::new(&pairs(), Some(&[0, 0, 1, 2])).unwrap_err(),
            GameError::InvalidLayout
        );
        assert_eq!(
            MemoryBoard::new(&[], None).unwrap_err(),
            GameError::Empty
        );
    }
}
