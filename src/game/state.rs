use std::collections::BTreeSet;

use super::deck::Board;
use super::theme::TokenKind;

/// What a reveal request did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Input was locked, or the slot was already face-up or matched.
    Ignored,
    /// First card of a pair attempt is now showing.
    FirstPick,
    /// Second card matched the first. `completed` is set when this was the last pair.
    Matched { kind: TokenKind, completed: bool },
    /// Second card did not match the first.
    Mismatched,
}

impl RevealOutcome {
    /// Whether this reveal finished a pair attempt and needs a deferred resolution
    pub fn completes_attempt(self) -> bool {
        matches!(self, RevealOutcome::Matched { .. } | RevealOutcome::Mismatched)
    }
}

/// Snapshot of one game. Transitions return a new snapshot and leave `self` alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    revealed: Vec<usize>,
    matched: BTreeSet<TokenKind>,
    moves: u32,
    input_locked: bool,
}

impl GameState {
    /// Create the initial state for a freshly dealt board
    pub fn new(board: Board) -> Self {
        GameState {
            board,
            revealed: Vec::with_capacity(2),
            matched: BTreeSet::new(),
            moves: 0,
            input_locked: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Positions face-up but not yet matched, in reveal order
    pub fn revealed(&self) -> &[usize] {
        &self.revealed
    }

    pub fn matched(&self) -> &BTreeSet<TokenKind> {
        &self.matched
    }

    /// Completed pair attempts so far
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    pub fn pair_count(&self) -> usize {
        self.board.pair_count()
    }

    /// Check if every pair has been found
    pub fn is_complete(&self) -> bool {
        self.matched.len() == self.board.pair_count()
    }

    /// A slot shows its token iff it is revealed or its kind is matched.
    pub fn is_face_up(&self, position: usize) -> bool {
        self.revealed.contains(&position) || self.matched.contains(&self.board.kind_at(position))
    }

    /// Reveal the slot at `position` and return the resulting state.
    ///
    /// Locked input, an already revealed slot, or an already matched slot leave
    /// the state unchanged. Revealing the second card of an attempt counts a
    /// move, records a match if the kinds agree, and locks input until
    /// [`GameState::resolve`] runs.
    ///
    /// # Panics
    ///
    /// If `position` is not on the board.
    pub fn reveal(&self, position: usize) -> (GameState, RevealOutcome) {
        assert!(
            position < self.board.len(),
            "reveal at position {} on a board of {} slots",
            position,
            self.board.len()
        );

        let kind = self.board.kind_at(position);
        if self.input_locked || self.revealed.contains(&position) || self.matched.contains(&kind) {
            return (self.clone(), RevealOutcome::Ignored);
        }

        let mut next = self.clone();
        next.revealed.push(position);

        if next.revealed.len() < 2 {
            return (next, RevealOutcome::FirstPick);
        }

        next.moves += 1;
        next.input_locked = true;

        let first = self.board.kind_at(next.revealed[0]);
        let outcome = if first == kind {
            next.matched.insert(kind);
            RevealOutcome::Matched {
                kind,
                completed: next.is_complete(),
            }
        } else {
            RevealOutcome::Mismatched
        };

        (next, outcome)
    }

    /// Hide the revealed pair and unlock input. Matches and moves are kept.
    pub fn resolve(&self) -> GameState {
        GameState {
            revealed: Vec::with_capacity(2),
            input_locked: false,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Theme;

    /// Kind 1 at positions 0 and 2, kind 2 at positions 1 and 3
    fn two_pair_state() -> GameState {
        GameState::new(Board::from_kinds(Theme::Fruits, &[1, 2, 1, 2]).unwrap())
    }

    #[test]
    fn test_initial_state() {
        let state = two_pair_state();
        assert!(state.revealed().is_empty());
        assert!(state.matched().is_empty());
        assert_eq!(state.moves(), 0);
        assert!(!state.is_input_locked());
        assert!(!state.is_complete());
    }

    #[test]
    fn test_first_pick() {
        let state = two_pair_state();
        let (next, outcome) = state.reveal(1);

        assert_eq!(outcome, RevealOutcome::FirstPick);
        assert_eq!(next.revealed(), &[1]);
        assert_eq!(next.moves(), 0);
        assert!(!next.is_input_locked());
        assert!(next.is_face_up(1));
        assert!(!next.is_face_up(3));
        // Original snapshot untouched
        assert!(state.revealed().is_empty());
    }

    #[test]
    fn test_match_then_resolve() {
        let (state, _) = two_pair_state().reveal(0);
        let (state, outcome) = state.reveal(2);

        assert_eq!(
            outcome,
            RevealOutcome::Matched {
                kind: TokenKind(1),
                completed: false
            }
        );
        assert_eq!(state.moves(), 1);
        assert!(state.is_input_locked());
        assert!(state.matched().contains(&TokenKind(1)));

        let state = state.resolve();
        assert!(state.revealed().is_empty());
        assert!(!state.is_input_locked());
        assert!(state.matched().contains(&TokenKind(1)));
        assert!(state.is_face_up(0));
        assert!(state.is_face_up(2));
        assert!(!state.is_face_up(1));
    }

    #[test]
    fn test_mismatch_then_resolve() {
        let (state, _) = two_pair_state().reveal(0);
        let (state, outcome) = state.reveal(1);

        assert_eq!(outcome, RevealOutcome::Mismatched);
        assert_eq!(state.moves(), 1);
        assert!(state.is_input_locked());
        assert!(state.matched().is_empty());

        let state = state.resolve();
        assert!(state.revealed().is_empty());
        assert!(state.matched().is_empty());
        assert_eq!(state.moves(), 1);
        assert!((0..4).all(|p| !state.is_face_up(p)));
    }

    #[test]
    fn test_retap_revealed_is_noop() {
        let (state, _) = two_pair_state().reveal(0);
        let (next, outcome) = state.reveal(0);

        assert_eq!(outcome, RevealOutcome::Ignored);
        assert_eq!(next, state);
    }

    #[test]
    fn test_tap_matched_is_noop() {
        let (state, _) = two_pair_state().reveal(0);
        let state = state.reveal(2).0.resolve();

        for position in [0, 2] {
            let (next, outcome) = state.reveal(position);
            assert_eq!(outcome, RevealOutcome::Ignored);
            assert_eq!(next, state);
        }
    }

    #[test]
    fn test_tap_while_locked_is_noop() {
        let (state, _) = two_pair_state().reveal(0);
        let (state, _) = state.reveal(1);
        assert!(state.is_input_locked());

        let (next, outcome) = state.reveal(3);
        assert_eq!(outcome, RevealOutcome::Ignored);
        assert_eq!(next.revealed(), &[0, 1]);
        assert_eq!(next.moves(), 1);
        assert_eq!(next, state);
    }

    #[test]
    fn test_completion_is_immediate() {
        let state = two_pair_state();
        let state = state.reveal(0).0.reveal(2).0.resolve();
        let (state, _) = state.reveal(1);
        let (state, outcome) = state.reveal(3);

        assert_eq!(
            outcome,
            RevealOutcome::Matched {
                kind: TokenKind(2),
                completed: true
            }
        );
        // Complete before the deferred clear has run
        assert!(state.is_input_locked());
        assert!(state.is_complete());
        assert_eq!(state.moves(), 2);

        let state = state.resolve();
        assert!(state.is_complete());
        assert!((0..4).all(|p| state.is_face_up(p)));
    }

    #[test]
    fn test_revealed_never_exceeds_two() {
        let mut state = two_pair_state();
        for position in [0, 1, 2, 3, 0, 3] {
            state = state.reveal(position).0;
            assert!(state.revealed().len() <= 2);
        }
    }

    #[test]
    #[should_panic(expected = "reveal at position 4")]
    fn test_out_of_range_panics() {
        let _ = two_pair_state().reveal(4);
    }
}
