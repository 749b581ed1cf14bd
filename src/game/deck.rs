use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use super::theme::{Theme, Token, TokenKind, MIN_PAIRS};
use crate::error::DeckError;

/// One position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSlot {
    pub position: usize,
    pub kind: TokenKind,
}

/// The dealt board for one game. Fixed once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    theme: Theme,
    slots: Vec<BoardSlot>,
}

impl Board {
    /// Build a board from an explicit arrangement of kinds, one per position.
    ///
    /// Every kind must belong to `theme` and appear exactly twice, and there
    /// must be at least [`MIN_PAIRS`] pairs.
    pub fn from_kinds(theme: Theme, kinds: &[u8]) -> Result<Self, DeckError> {
        let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
        for &kind in kinds {
            if theme.token(TokenKind(kind)).is_none() {
                return Err(DeckError::UnknownKind {
                    kind,
                    theme: theme.name(),
                });
            }
            *counts.entry(kind).or_default() += 1;
        }
        if let Some((&kind, &count)) = counts.iter().find(|(_, count)| **count != 2) {
            return Err(DeckError::UnpairedKind { kind, count });
        }
        if counts.len() < MIN_PAIRS {
            return Err(DeckError::TooFewPairs {
                pairs: counts.len(),
                min: MIN_PAIRS,
            });
        }

        Ok(Board::from_ordered(
            theme,
            kinds.iter().map(|&k| TokenKind(k)),
        ))
    }

    fn from_ordered(theme: Theme, kinds: impl IntoIterator<Item = TokenKind>) -> Self {
        let slots = kinds
            .into_iter()
            .enumerate()
            .map(|(position, kind)| BoardSlot { position, kind })
            .collect();
        Board { theme, slots }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn slots(&self) -> &[BoardSlot] {
        &self.slots
    }

    /// Number of slots (always twice the pair count)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.slots.len() / 2
    }

    /// Get the kind at a position. Panics if the position is off the board.
    pub fn kind_at(&self, position: usize) -> TokenKind {
        self.slots[position].kind
    }

    /// Token shown when the slot at `position` is face-up
    pub fn token_at(&self, position: usize) -> &'static Token {
        let kind = self.kind_at(position);
        self.theme
            .token(kind)
            .unwrap_or_else(|| unreachable!("board holds kind {kind} outside theme {}", self.theme))
    }
}

/// Deal a shuffled board of `pair_count` pairs from `theme`.
///
/// The first `pair_count` tokens of the theme are taken in catalog order, each
/// is duplicated, and the result is shuffled uniformly (Fisher-Yates). Pair
/// counts the theme cannot satisfy are clamped into range.
pub fn build_board<R: Rng + ?Sized>(theme: Theme, pair_count: usize, rng: &mut R) -> Board {
    let pairs = theme.clamp_pairs(pair_count);
    if pairs != pair_count {
        log::warn!(
            "pair count {} out of range for theme {}, clamped to {}",
            pair_count,
            theme,
            pairs
        );
    }

    let mut kinds: Vec<TokenKind> = theme.tokens()[..pairs]
        .iter()
        .flat_map(|t| [t.kind, t.kind])
        .collect();
    kinds.shuffle(rng);

    Board::from_ordered(theme, kinds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn kind_counts(board: &Board) -> BTreeMap<TokenKind, usize> {
        let mut counts = BTreeMap::new();
        for slot in board.slots() {
            *counts.entry(slot.kind).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_every_kind_appears_exactly_twice() {
        let mut rng = StdRng::seed_from_u64(7);
        for theme in Theme::ALL {
            for pairs in 2..=8 {
                let board = build_board(theme, pairs, &mut rng);
                assert_eq!(board.len(), 2 * pairs);
                assert_eq!(board.pair_count(), pairs);
                let counts = kind_counts(&board);
                assert_eq!(counts.len(), pairs);
                assert!(counts.values().all(|&c| c == 2), "{counts:?}");
            }
        }
    }

    #[test]
    fn test_positions_are_contiguous() {
        let mut rng = StdRng::seed_from_u64(1);
        let board = build_board(Theme::Animals, 6, &mut rng);
        for (idx, slot) in board.slots().iter().enumerate() {
            assert_eq!(slot.position, idx);
        }
    }

    #[test]
    fn test_selects_leading_tokens_of_theme() {
        let mut rng = StdRng::seed_from_u64(3);
        let board = build_board(Theme::Monsters, 3, &mut rng);
        let kinds: Vec<_> = kind_counts(&board).into_keys().collect();
        assert_eq!(kinds, vec![TokenKind(1), TokenKind(2), TokenKind(3)]);
    }

    #[test]
    fn test_shuffle_varies_between_calls() {
        let mut rng = StdRng::seed_from_u64(42);
        let first = build_board(Theme::Fruits, 4, &mut rng);
        let differing = (0..20)
            .map(|_| build_board(Theme::Fruits, 4, &mut rng))
            .filter(|b| *b != first)
            .count();
        assert!(differing > 0, "20 deals produced identical orderings");
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = build_board(Theme::Fruits, 8, &mut StdRng::seed_from_u64(99));
        let b = build_board(Theme::Fruits, 8, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_pair_count_is_clamped() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(build_board(Theme::Fruits, 12, &mut rng).pair_count(), 8);
        assert_eq!(build_board(Theme::Fruits, 0, &mut rng).pair_count(), 2);
    }

    #[test]
    fn test_from_kinds_rejects_small_boards() {
        assert_eq!(
            Board::from_kinds(Theme::Fruits, &[]),
            Err(DeckError::TooFewPairs { pairs: 0, min: 2 })
        );
        assert_eq!(
            Board::from_kinds(Theme::Fruits, &[1, 1]),
            Err(DeckError::TooFewPairs { pairs: 1, min: 2 })
        );

        let board = Board::from_kinds(Theme::Fruits, &[2, 1, 1, 2]).unwrap();
        assert!(!crate::game::GameState::new(board).is_complete());
    }

    #[test]
    fn test_from_kinds() {
        let board = Board::from_kinds(Theme::Fruits, &[1, 2, 1, 2]).unwrap();
        assert_eq!(board.kind_at(2), TokenKind(1));
        assert_eq!(board.token_at(1).display, "🍊");

        assert_eq!(
            Board::from_kinds(Theme::Fruits, &[1, 2, 1]),
            Err(DeckError::UnpairedKind { kind: 2, count: 1 })
        );
        assert_eq!(
            Board::from_kinds(Theme::Fruits, &[1, 9, 1, 9]),
            Err(DeckError::UnknownKind {
                kind: 9,
                theme: "fruits"
            })
        );
    }
}
