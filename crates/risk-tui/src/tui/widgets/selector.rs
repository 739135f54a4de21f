// Selector widget: the season, day, team and exclusion inputs.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the selector banner into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let team = state
        .team()
        .map(|t| t.name.clone())
        .unwrap_or_else(|| "Select Team".to_string());

    let exclusion_style = if state.exclusion_mode {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        value
    };
    let mut exclusions = state.exclusion_text.clone();
    if state.exclusion_mode {
        exclusions.push('_');
    } else if exclusions.is_empty() {
        exclusions.push_str("none");
    }

    let line = Line::from(vec![
        Span::styled("Season: ", label),
        Span::styled(season_picker(state), value),
        Span::styled("   Day: ", label),
        Span::styled(state.day.to_string(), value),
        Span::styled("   Team: ", label),
        Span::styled(team, value),
        Span::styled("   Exclude: ", label),
        Span::styled(exclusions, exclusion_style),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Selection"),
    );
    frame.render_widget(paragraph, area);
}

/// "◀ 4 ▶" with an arrow only where another season exists in that direction.
pub fn season_picker(state: &ViewState) -> String {
    let Some(season) = state.season else {
        return "--".to_string();
    };
    let position = state.seasons.iter().position(|&s| s == season);
    let has_prev = position.is_some_and(|i| i > 0);
    let has_next = position.is_some_and(|i| i + 1 < state.seasons.len());
    format!(
        "{} {} {}",
        if has_prev { "\u{25c0}" } else { " " },
        season,
        if has_next { "\u{25b6}" } else { " " }
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
