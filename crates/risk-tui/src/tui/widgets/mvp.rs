// MVP widget: the selected team's MVP players for the displayed day.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::protocol::FetchKind;
use crate::tui::ViewState;

/// Render the MVP block into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let title = match state.mvps {
        Some(ref mvps) if !mvps.is_empty() => format!("MVPs ({})", mvps.len()),
        _ => "MVPs".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let lines: Vec<Line> = match state.mvps {
        _ if state.pending.contains(&FetchKind::Mvps) => vec![dim("  Loading...")],
        None => vec![dim("  Press m to fetch MVPs.")],
        Some(ref mvps) if mvps.is_empty() => vec![dim("  No MVPs found or team not selected.")],
        Some(ref mvps) => mvps
            .iter()
            .map(|m| Line::from(format!(" {}", m.name)))
            .collect(),
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn dim(text: &str) -> Line<'_> {
    Line::styled(text, Style::default().fg(Color::DarkGray))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
