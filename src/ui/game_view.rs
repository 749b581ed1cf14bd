use crate::game::GameState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::celebration;

/// Cards per row on screen
pub const COLUMNS: usize = 4;

const PLACEHOLDER: &str = "??";

pub fn render(
    frame: &mut Frame,
    game_state: &GameState,
    cursor: usize,
    message: &Option<String>,
    celebration_frame: Option<usize>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Board
            Constraint::Length(3), // Message
            Constraint::Length(4), // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, chunks[0]);
    render_board(frame, game_state, cursor, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);

    if let Some(index) = celebration_frame {
        celebration::render(frame, index, chunks[1]);
    }
}

fn render_header(frame: &mut Frame, game_state: &GameState, area: Rect) {
    let status = format!(
        "Theme: {}  |  Pairs: {}  |  Moves: {}",
        game_state.board().theme(),
        game_state.pair_count(),
        game_state.moves()
    );
    let color = if game_state.is_complete() {
        Color::Green
    } else {
        Color::White
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Memory Matching Game"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, game_state: &GameState, cursor: usize, area: Rect) {
    let board = game_state.board();
    let mut lines = vec![Line::from("")];

    for row_start in (0..board.len()).step_by(COLUMNS) {
        let row_end = (row_start + COLUMNS).min(board.len());
        let mut spans = Vec::new();

        for position in row_start..row_end {
            let face_up = game_state.is_face_up(position);
            let symbol = if face_up {
                board.token_at(position).display
            } else {
                PLACEHOLDER
            };

            let color = if game_state.revealed().contains(&position) {
                Color::Yellow
            } else if face_up {
                Color::Green
            } else {
                Color::DarkGray
            };
            let mut style = Style::default().fg(color);

            let (open, close) = if position == cursor {
                style = style.add_modifier(Modifier::BOLD);
                ("[", "]")
            } else {
                (" ", " ")
            };

            spans.push(Span::styled(open, Style::default().fg(Color::Cyan)));
            spans.push(Span::styled(symbol, style));
            spans.push(Span::styled(close, Style::default().fg(Color::Cyan)));
            spans.push(Span::raw("  "));
        }

        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let board_widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line1 = Line::from("Arrows: Move  |  Enter: Flip  |  R: Restart  |  Q: Quit");
    let line2 = Line::from("T: Next theme  |  +/-: More/fewer pairs");

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
