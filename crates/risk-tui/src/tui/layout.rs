// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------------------+
// | Status Bar (1 row)                                            |
// +--------------------------------------------------------------+
// | Selector (3 rows): season, day, team, exclusions              |
// +------------+-------------------------------------------------+
// | Teams      | MVPs (34%)    | Defend (33%)   | Attack (33%)   |
// | (28%)      +-------------------------------------------------+
// |            | Odds table                                      |
// +------------+-------------------------------------------------+
// | Help Bar (1 row)                                              |
// +--------------------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    pub selector: Rect,
    /// Left column: teams of the selected season.
    pub teams: Rect,
    pub mvp: Rect,
    pub defend: Rect,
    pub attack: Rect,
    pub odds: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(3), // selector
            Constraint::Min(10),   // middle section
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let status_bar = vertical[0];
    let selector = vertical[1];
    let middle = vertical[2];
    let help_bar = vertical[3];

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(middle);

    let teams = horizontal[0];
    let results = horizontal[1];

    let results_split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(results);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(results_split[0]);

    AppLayout {
        status_bar,
        selector,
        teams,
        mvp: lists[0],
        defend: lists[1],
        attack: lists[2],
        odds: results_split[1],
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
