// Odds widget: predicted winner and chance per contested territory.
//
// Rows arrive already sorted (queried team's wins first). Rows the queried
// team is predicted to win are highlighted; PageUp/PageDown move
// `ViewState::odds_scroll`.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;
use risk_core::model::OddsEntry;

use crate::protocol::FetchKind;
use crate::tui::ViewState;

/// Render the odds table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let title = match (&state.odds_team, &state.odds) {
        (Some(team), Some(entries)) => format!("Odds for {} ({})", team, entries.len()),
        _ => "Odds".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let entries = match state.odds {
        _ if state.pending.contains(&FetchKind::Odds) => {
            return render_hint(frame, area, block, "  Loading odds...");
        }
        None => return render_hint(frame, area, block, "  Press o to fetch odds."),
        Some(ref entries) if entries.is_empty() => {
            return render_hint(frame, area, block, "  No odds available.");
        }
        Some(ref entries) => entries,
    };

    let team = state.odds_team.as_deref().unwrap_or_default();
    let scroll = state.odds_scroll.min(entries.len().saturating_sub(1));

    let header = Row::new(vec!["Territory", "Winner", "Chance", "Detail"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = entries
        .iter()
        .skip(scroll)
        .map(|entry| odds_row(entry, team))
        .collect();

    let widths = [
        Constraint::Length(22),
        Constraint::Length(18),
        Constraint::Length(8),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn render_hint(frame: &mut Frame, area: Rect, block: Block, text: &str) {
    let paragraph = Paragraph::new(Line::styled(text, Style::default().fg(Color::DarkGray)))
        .block(block);
    frame.render_widget(paragraph, area);
}

fn odds_row<'a>(entry: &'a OddsEntry, team: &str) -> Row<'a> {
    let style = if entry.winner == team {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Row::new(vec![
        Cell::from(entry.territory.as_str()),
        Cell::from(entry.winner.as_str()),
        Cell::from(format_chance(entry.chance)),
        Cell::from(entry.detail.as_str()),
    ])
    .style(style)
}

/// Chance in [0, 1] as a percentage with one decimal, e.g. `0.4567` -> `"45.7%"`.
pub fn format_chance(chance: f64) -> String {
    format!("{:.1}%", chance * 100.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
