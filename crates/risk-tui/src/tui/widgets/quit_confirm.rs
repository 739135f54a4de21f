// Quit confirmation overlay, drawn over the dashboard while
// `ViewState::confirm_quit` is set.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

const DIALOG_WIDTH: u16 = 34;
const DIALOG_HEIGHT: u16 = 5;

/// Render the overlay centered in `area`. Mentions fetches still in flight,
/// since quitting drops their results.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let dialog = centered(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, dialog);

    let accent = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(" Quit cfbrisk? ", accent));

    let mut lines = vec![Line::from(vec![
        Span::raw("  Leave the dashboard? ("),
        Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw("/"),
        Span::styled("n", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(")"),
    ])];
    if !state.pending.is_empty() {
        lines.push(Line::styled(
            format!("  {} fetch(es) still running", state.pending.len()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog);
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [dialog] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    dialog
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
