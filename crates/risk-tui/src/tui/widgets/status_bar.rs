// Status bar widget: app title, current selection, in-flight fetches, and
// the latest notice.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::FetchKind;
use crate::tui::ViewState;

/// Render the status bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![
        Span::styled(
            " CFB Risk ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(selection_summary(state), Style::default().fg(Color::White)),
    ];

    if let Some(loading) = loading_label(state) {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(loading, Style::default().fg(Color::Yellow)));
    }

    if let Some(ref message) = state.status_message {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(message.clone(), Style::default().fg(Color::Red)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// "Season 4 | Day 12 | Texas", with dashes for missing parts.
pub fn selection_summary(state: &ViewState) -> String {
    let season = state
        .season
        .map(|s| s.to_string())
        .unwrap_or_else(|| "--".to_string());
    let team = state.team().map(|t| t.name.as_str()).unwrap_or("--");
    format!("Season {} | Day {} | {}", season, state.day, team)
}

/// "Loading MVPs, odds..." for the fetches still in flight, in a fixed order.
pub fn loading_label(state: &ViewState) -> Option<String> {
    let kinds: Vec<&str> = [FetchKind::Mvps, FetchKind::Moves, FetchKind::Odds]
        .into_iter()
        .filter(|k| state.pending.contains(k))
        .map(FetchKind::label)
        .collect();
    if kinds.is_empty() {
        None
    } else {
        Some(format!("Loading {}...", kinds.join(", ")))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
