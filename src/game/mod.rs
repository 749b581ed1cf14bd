//! Core memory game logic: token themes, deck building, the match state
//! machine with immutable transitions, and the session that owns resets and
//! deferred resolutions.

mod deck;
mod session;
mod state;
mod theme;

pub use deck::{build_board, Board, BoardSlot};
pub use session::{Reveal, ResolutionTicket, Session, SessionSettings};
pub use state::{GameState, RevealOutcome};
pub use theme::{Theme, Token, TokenKind, MIN_PAIRS};
