use std::io;
use std::time::{Duration, Instant};

use crate::game::{RevealOutcome, Session, MIN_PAIRS};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use super::celebration::Celebration;
use super::game_view::{self, COLUMNS};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct App {
    session: Session,
    cursor: usize,
    should_quit: bool,
    message: Option<String>,
    celebration: Option<Celebration>,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            cursor: 0,
            should_quit: false,
            message: None,
            celebration: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            let now = Instant::now();
            self.update(now);
            terminal
                .draw(|f| self.render(f, now))
                .map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Advance timers: the deferred pair resolution and the celebration.
    fn update(&mut self, now: Instant) {
        self.session.tick(now);

        if self.session.is_celebrating() && self.celebration.is_none() {
            self.celebration = Some(Celebration::start(now));
        }
        if let Some(celebration) = self.celebration {
            if celebration.is_finished(now) {
                self.celebration = None;
                self.session.finish_celebration();
            }
        }
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key, Instant::now());
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let len = self.session.state().board().len();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(len - 1);
            }
            KeyCode::Up => {
                if self.cursor >= COLUMNS {
                    self.cursor -= COLUMNS;
                }
            }
            KeyCode::Down => {
                if self.cursor + COLUMNS < len {
                    self.cursor += COLUMNS;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.flip(now);
            }
            KeyCode::Char('t') => {
                let theme = self.session.settings().theme.next();
                self.session.set_theme(theme);
                self.new_game(format!("Theme: {theme}"));
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let pairs = self.session.settings().pair_count + 1;
                let used = self.session.set_pair_count(pairs);
                self.new_game(format!("{used} pairs"));
            }
            KeyCode::Char('-') => {
                let pairs = self
                    .session
                    .settings()
                    .pair_count
                    .saturating_sub(1)
                    .max(MIN_PAIRS);
                let used = self.session.set_pair_count(pairs);
                self.new_game(format!("{used} pairs"));
            }
            KeyCode::Char('r') => {
                self.session.restart();
                self.new_game("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Flip the card under the cursor
    fn flip(&mut self, now: Instant) {
        let reveal = self.session.reveal(self.cursor, now);
        match reveal.outcome {
            RevealOutcome::Ignored | RevealOutcome::FirstPick => {}
            RevealOutcome::Matched {
                completed: true, ..
            } => {
                self.message = Some(format!(
                    "All pairs found in {} moves!",
                    self.session.state().moves()
                ));
            }
            RevealOutcome::Matched { .. } => {
                self.message = Some("Match!".to_string());
            }
            RevealOutcome::Mismatched => {
                self.message = Some("No match".to_string());
            }
        }
    }

    fn new_game(&mut self, message: String) {
        self.cursor = self.cursor.min(self.session.state().board().len() - 1);
        self.celebration = None;
        self.message = Some(message);
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame, now: Instant) {
        game_view::render(
            frame,
            self.session.state(),
            self.cursor,
            &self.message,
            self.celebration.map(|c| c.frame_index(now)),
        );
    }
}
