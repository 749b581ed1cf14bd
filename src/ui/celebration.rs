use std::time::{Duration, Instant};

use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const FRAME_TIME: Duration = Duration::from_millis(150);

const FRAMES: [[&str; 5]; 6] = [
    ["           ", "           ", "           ", "     |     ", "     |     "],
    ["           ", "           ", "     |     ", "     |     ", "           "],
    ["           ", "     *     ", "           ", "           ", "           "],
    ["    \\|/    ", "   - * -   ", "    /|\\    ", "           ", "           "],
    ["  .  |  .  ", " -- *** -- ", "  '  |  '  ", "           ", "           "],
    [" .   '   . ", "     .     ", " '   .   ' ", "           ", "           "],
];

const PALETTE: [Color; 4] = [Color::Yellow, Color::Magenta, Color::Cyan, Color::Red];

/// One-shot fireworks overlay shown when the last pair is found.
#[derive(Debug, Clone, Copy)]
pub struct Celebration {
    started: Instant,
}

impl Celebration {
    pub fn start(now: Instant) -> Self {
        Celebration { started: now }
    }

    pub fn duration() -> Duration {
        FRAME_TIME * (FRAMES.len() as u32 * 2)
    }

    /// Frame index to draw at `now`
    pub fn frame_index(&self, now: Instant) -> usize {
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_millis() / FRAME_TIME.as_millis()) as usize
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= Self::duration()
    }
}

/// Draw the fireworks frame centered over `area`.
pub fn render(frame: &mut Frame, index: usize, area: Rect) {
    let art = &FRAMES[index % FRAMES.len()];
    let color = PALETTE[(index / FRAMES.len()) % PALETTE.len()];

    let [vertical] = Layout::vertical([Constraint::Length(art.len() as u16 + 4)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(25)])
        .flex(Flex::Center)
        .areas(vertical);

    let mut lines: Vec<Line> = art
        .iter()
        .map(|row| Line::styled(*row, Style::default().fg(color)))
        .collect();
    lines.push(Line::styled(
        "You found them all!",
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ));

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(Clear, popup);
    frame.render_widget(widget, popup);
}
