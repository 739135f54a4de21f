// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (team selection,
// day, exclusion editing, scrolling).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use risk_core::config::MAX_DAY;

use super::ViewState;
use crate::protocol::UserCommand;

/// Rows moved by PageUp/PageDown in the odds table.
const PAGE_SIZE: usize = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when the key press was handled locally
/// by mutating `ViewState`.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // On Windows, crossterm emits both Press and Release events.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if view_state.exclusion_mode {
        return handle_exclusion_mode(key_event, view_state);
    }

    match key_event.code {
        // Season selection
        KeyCode::Left => step_season(view_state, -1),
        KeyCode::Right => step_season(view_state, 1),

        // Team selection
        KeyCode::Up | KeyCode::Char('k') => {
            step_team(view_state, -1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            step_team(view_state, 1);
            None
        }

        // Day
        KeyCode::Char('+') | KeyCode::Char('=') => {
            view_state.day = view_state.day.saturating_add(1).min(MAX_DAY);
            None
        }
        KeyCode::Char('-') => {
            view_state.day = view_state.day.saturating_sub(1).max(1);
            None
        }

        KeyCode::Char('x') => {
            view_state.exclusion_mode = true;
            None
        }

        // Odds table scrolling
        KeyCode::PageUp => {
            view_state.odds_scroll = view_state.odds_scroll.saturating_sub(PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            let last_row = view_state
                .odds
                .as_ref()
                .map_or(0, |rows| rows.len().saturating_sub(1));
            view_state.odds_scroll = view_state
                .odds_scroll
                .saturating_add(PAGE_SIZE)
                .min(last_row);
            None
        }

        // Fetch triggers
        KeyCode::Char('m') => fetch(view_state, UserCommand::FetchMvps),
        KeyCode::Char('l') => {
            let exclusions = view_state.exclusions();
            fetch(view_state, |query| UserCommand::FetchMoves { query, exclusions })
        }
        KeyCode::Char('o') => fetch(view_state, UserCommand::FetchOdds),
        KeyCode::Char('a') => {
            let exclusions = view_state.exclusions();
            fetch(view_state, |query| UserCommand::FetchAll { query, exclusions })
        }

        KeyCode::Char('r') => {
            view_state.status_message = Some("Reloading teams...".to_string());
            Some(UserCommand::ReloadTeams)
        }

        // Quit: enter confirmation mode instead of quitting immediately
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        _ => None,
    }
}

/// Build a fetch command for the current selection, or refuse with a
/// status notice when no team is selected.
fn fetch(
    view_state: &mut ViewState,
    build: impl FnOnce(crate::protocol::FetchQuery) -> UserCommand,
) -> Option<UserCommand> {
    match view_state.query() {
        Some(query) => {
            view_state.status_message = None;
            Some(build(query))
        }
        None => {
            view_state.status_message = Some("Select a team first".to_string());
            None
        }
    }
}

/// Move the season selection and ask the app for that season's teams.
fn step_season(view_state: &mut ViewState, delta: isize) -> Option<UserCommand> {
    if view_state.seasons.is_empty() {
        return None;
    }
    let last = view_state.seasons.len() - 1;
    let current = view_state
        .season
        .and_then(|s| view_state.seasons.iter().position(|&x| x == s))
        .unwrap_or(last);
    let next = current.saturating_add_signed(delta).min(last);
    if Some(view_state.seasons[next]) == view_state.season {
        return None;
    }
    let season = view_state.seasons[next];
    view_state.season = Some(season);
    Some(UserCommand::SelectSeason(season))
}

fn step_team(view_state: &mut ViewState, delta: isize) {
    if view_state.teams.is_empty() {
        view_state.selected_team = None;
        return;
    }
    let last = view_state.teams.len() - 1;
    view_state.selected_team = Some(match view_state.selected_team {
        None => 0,
        Some(i) => i.saturating_add_signed(delta).min(last),
    });
}

/// Handle key events while in quit confirmation mode.
///
/// - `y` or `q` confirms quit (sends UserCommand::Quit)
/// - `n` or `Esc` cancels (returns to normal mode)
/// - All other keys are blocked (no-op)
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Handle key events while editing the exclusion list.
///
/// - Digits, commas and spaces are appended
/// - Backspace removes the last character
/// - Enter keeps the text, Esc clears it; both leave the mode
fn handle_exclusion_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.exclusion_mode = false;
            view_state.exclusion_text.clear();
        }
        KeyCode::Enter => {
            view_state.exclusion_mode = false;
        }
        KeyCode::Backspace => {
            view_state.exclusion_text.pop();
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == ',' || c == ' ' => {
            view_state.exclusion_text.push(c);
        }
        _ => {}
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
