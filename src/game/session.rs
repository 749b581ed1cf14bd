use std::time::{Duration, Instant};

use rand::rngs::StdRng;

use super::deck::build_board;
use super::state::{GameState, RevealOutcome};
use super::theme::Theme;

/// Settings a session deals boards from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub theme: Theme,
    pub pair_count: usize,
    pub reveal_delay: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            theme: Theme::Fruits,
            pair_count: 2,
            reveal_delay: Duration::from_millis(1000),
        }
    }
}

/// Identifies one scheduled resolution. Only the ticket matching the current
/// game and the latest pair attempt has any effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionTicket {
    pub generation: u64,
    pub move_number: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingResolution {
    ticket: ResolutionTicket,
    due: Instant,
}

/// Result of a reveal request routed through a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reveal {
    pub outcome: RevealOutcome,
    /// Set when the reveal completed a pair attempt and a resolution was scheduled
    pub scheduled: Option<ResolutionTicket>,
}

/// A running game plus everything needed to replace it: current settings, the
/// RNG that deals boards, and the one pending deferred resolution.
#[derive(Debug)]
pub struct Session {
    settings: SessionSettings,
    rng: StdRng,
    state: GameState,
    generation: u64,
    pending: Option<PendingResolution>,
    celebrating: bool,
}

impl Session {
    pub fn new(settings: SessionSettings, mut rng: StdRng) -> Self {
        let settings = SessionSettings {
            pair_count: clamp_pair_count(settings.theme, settings.pair_count),
            ..settings
        };
        let state = GameState::new(build_board(settings.theme, settings.pair_count, &mut rng));
        log::info!(
            "new game: theme={} pairs={}",
            settings.theme,
            settings.pair_count
        );
        Session {
            settings,
            rng,
            state,
            generation: 0,
            pending: None,
            celebrating: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    /// Incremented every time the board is replaced
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ticket of the resolution waiting to fire, if any
    pub fn pending(&self) -> Option<ResolutionTicket> {
        self.pending.map(|p| p.ticket)
    }

    /// True from the moment the last pair is matched until the celebration
    /// reports that it finished.
    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    /// Deal a new board with the current settings. Any pending resolution is dropped.
    pub fn restart(&mut self) {
        let board = build_board(self.settings.theme, self.settings.pair_count, &mut self.rng);
        self.state = GameState::new(board);
        self.generation += 1;
        if let Some(p) = self.pending.take() {
            log::debug!("cancelled pending resolution {:?}", p.ticket);
        }
        self.celebrating = false;
        log::info!(
            "new game: theme={} pairs={} generation={}",
            self.settings.theme,
            self.settings.pair_count,
            self.generation
        );
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
        self.settings.pair_count = theme.clamp_pairs(self.settings.pair_count);
        self.restart();
    }

    /// Change the pair count (clamped to what the theme supports) and restart.
    /// Returns the pair count actually used.
    pub fn set_pair_count(&mut self, pair_count: usize) -> usize {
        let clamped = clamp_pair_count(self.settings.theme, pair_count);
        self.settings.pair_count = clamped;
        self.restart();
        clamped
    }

    /// Route a player's reveal to the engine, scheduling the deferred resolution
    /// when the reveal completes a pair attempt.
    pub fn reveal(&mut self, position: usize, now: Instant) -> Reveal {
        let (next, outcome) = self.state.reveal(position);
        self.state = next;
        log::debug!("reveal {} -> {:?}", position, outcome);

        let scheduled = if outcome.completes_attempt() {
            let ticket = ResolutionTicket {
                generation: self.generation,
                move_number: self.state.moves(),
            };
            self.pending = Some(PendingResolution {
                ticket,
                due: now + self.settings.reveal_delay,
            });
            Some(ticket)
        } else {
            None
        };

        if let RevealOutcome::Matched {
            completed: true, ..
        } = outcome
        {
            log::info!("game complete in {} moves", self.state.moves());
            self.celebrating = true;
        }

        Reveal { outcome, scheduled }
    }

    /// Fire the pending resolution if its delay has elapsed. Returns whether it fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending.map(|p| (p.ticket, p.due)) {
            Some((ticket, due)) if now >= due => self.resolve(ticket),
            _ => false,
        }
    }

    /// Apply the resolution identified by `ticket`. Tickets from an earlier game
    /// or an already resolved attempt are ignored.
    pub fn resolve(&mut self, ticket: ResolutionTicket) -> bool {
        match self.pending() {
            Some(pending) if pending == ticket => {
                self.pending = None;
                self.state = self.state.resolve();
                log::debug!("resolved {:?}", ticket);
                true
            }
            _ => {
                log::debug!("ignored stale resolution {:?}", ticket);
                false
            }
        }
    }

    /// The celebration finished playing. Game state is not touched.
    pub fn finish_celebration(&mut self) {
        self.celebrating = false;
    }
}

/// Clamp a requested pair count into what `theme` can deal, warning when it changes.
fn clamp_pair_count(theme: Theme, requested: usize) -> usize {
    let clamped = theme.clamp_pairs(requested);
    if clamped != requested {
        log::warn!(
            "pair count {} not supported by theme {}, using {}",
            requested,
            theme,
            clamped
        );
    }
    clamped
}
