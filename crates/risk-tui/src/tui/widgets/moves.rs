// Legal moves widgets: the defend and attack lists side by side.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::protocol::FetchKind;
use crate::tui::ViewState;

/// Render the territories the team can defend.
pub fn render_defend(frame: &mut Frame, area: Rect, state: &ViewState) {
    let names = state.moves.as_ref().map(|m| m.defend.as_slice());
    render_list(frame, area, "Defend", Color::Green, names, state);
}

/// Render the territories the team can attack.
pub fn render_attack(frame: &mut Frame, area: Rect, state: &ViewState) {
    let names = state.moves.as_ref().map(|m| m.attack.as_slice());
    render_list(frame, area, "Attack", Color::Red, names, state);
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    accent: Color,
    names: Option<&[String]>,
    state: &ViewState,
) {
    let title = match names {
        Some(names) if !names.is_empty() => format!("{} ({})", label, names.len()),
        _ => label.to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(title);

    let hint = Style::default().fg(Color::DarkGray);
    let lines: Vec<Line> = match names {
        _ if state.pending.contains(&FetchKind::Moves) => vec![Line::styled("  Loading...", hint)],
        None => vec![Line::styled("  Press l to fetch moves.", hint)],
        Some([]) => vec![Line::styled("  None", hint)],
        Some(names) => names.iter().map(|n| Line::from(format!(" {n}"))).collect(),
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use risk_core::model::LegalMoves;

    fn rendered(state: &ViewState, attack: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
        terminal
            .draw(|frame| {
                if attack {
                    render_attack(frame, frame.area(), state)
                } else {
                    render_defend(frame, frame.area(), state)
                }
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn hint_before_first_fetch() {
        let state = ViewState::default();
        assert!(rendered(&state, false).contains("Press l"));
        assert!(rendered(&state, true).contains("Press l"));
    }

    #[test]
    fn each_list_shows_its_own_side() {
        let mut state = ViewState::default();
        state.moves = Some(LegalMoves {
            defend: vec!["Austin".into()],
            attack: vec!["Dallas".into(), "Waco".into()],
        });

        let defend = rendered(&state, false);
        assert!(defend.contains("Defend (1)"));
        assert!(defend.contains("Austin"));
        assert!(!defend.contains("Dallas"));

        let attack = rendered(&state, true);
        assert!(attack.contains("Attack (2)"));
        assert!(attack.contains("Waco"));
        assert!(!attack.contains("Austin"));
    }

    #[test]
    fn empty_side_says_none() {
        let mut state = ViewState::default();
        state.moves = Some(LegalMoves::default());
        assert!(rendered(&state, true).contains("None"));
    }
}
