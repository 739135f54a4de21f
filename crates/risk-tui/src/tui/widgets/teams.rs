// Teams widget: the teams of the selected season, with the selected one
// highlighted and kept in view.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the team list into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let title = match state.season {
        Some(season) => format!("Teams ({}) - Season {}", state.teams.len(), season),
        None => "Teams".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if state.teams.is_empty() {
        let paragraph = Paragraph::new("  No teams loaded.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = state
        .teams
        .iter()
        .map(|t| ListItem::new(t.name.clone()))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(state.selected_team);
    frame.render_stateful_widget(list, area, &mut list_state);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
