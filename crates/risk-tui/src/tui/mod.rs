// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the current selection and the latest
// results. The app orchestrator pushes `UiUpdate` messages over an mpsc
// channel; the TUI applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashSet;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use risk_core::config::MAX_DAY;
use risk_core::model::{LegalMoves, MvpEntry, OddsEntry, Team};
use risk_core::moves::parse_exclusions;
use tokio::sync::mpsc;

use crate::protocol::{FetchKind, FetchQuery, UiUpdate, UserCommand};

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state: the user's selection plus the latest fetch results.
///
/// Result fields are `None` until the first fetch of that kind completes,
/// so the widgets can tell "not fetched" from "fetched, nothing found".
pub struct ViewState {
    pub seasons: Vec<u32>,
    pub season: Option<u32>,
    /// Teams of the selected season, sorted by name.
    pub teams: Vec<Team>,
    /// Index into `teams`.
    pub selected_team: Option<usize>,
    pub day: u32,
    /// Territory ids to leave out of the attack set, as typed.
    pub exclusion_text: String,
    pub exclusion_mode: bool,
    pub mvps: Option<Vec<MvpEntry>>,
    pub moves: Option<LegalMoves>,
    pub odds: Option<Vec<OddsEntry>>,
    /// Team the displayed odds were requested for.
    pub odds_team: Option<String>,
    pub odds_scroll: usize,
    /// Fetches issued but not yet answered.
    pub pending: HashSet<FetchKind>,
    /// One-line notice shown in the status bar.
    pub status_message: Option<String>,
    pub confirm_quit: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            seasons: Vec::new(),
            season: None,
            teams: Vec::new(),
            selected_team: None,
            day: 1,
            exclusion_text: String::new(),
            exclusion_mode: false,
            mvps: None,
            moves: None,
            odds: None,
            odds_team: None,
            odds_scroll: 0,
            pending: HashSet::new(),
            status_message: None,
            confirm_quit: false,
        }
    }
}

impl ViewState {
    pub fn with_day(day: u32) -> Self {
        ViewState {
            day: day.clamp(1, MAX_DAY),
            ..ViewState::default()
        }
    }

    pub fn team(&self) -> Option<&Team> {
        self.selected_team.and_then(|i| self.teams.get(i))
    }

    /// The query for the current selection; `None` until both a season
    /// and a team are selected.
    pub fn query(&self) -> Option<FetchQuery> {
        let season = self.season?;
        let team = self.team()?;
        Some(FetchQuery {
            team: team.name.clone(),
            season,
            day: self.day,
        })
    }

    pub fn exclusions(&self) -> HashSet<u32> {
        parse_exclusions(&self.exclusion_text)
    }

    /// Replace the team list, keeping the selected team when it is still
    /// part of the new list.
    fn set_teams(&mut self, teams: Vec<Team>) {
        let previous = self.team().map(|t| t.name.clone());
        self.selected_team = previous.and_then(|name| teams.iter().position(|t| t.name == name));
        self.teams = teams;
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::SeasonsLoaded { seasons, selected } => {
            state.status_message = if seasons.is_empty() {
                Some("No teams loaded (press r to retry)".to_string())
            } else {
                None
            };
            state.seasons = seasons;
            state.season = selected;
            if selected.is_none() {
                state.set_teams(Vec::new());
            }
        }
        UiUpdate::TeamsUpdated { season, teams } => {
            state.season = Some(season);
            state.set_teams(teams);
        }
        UiUpdate::FetchStarted(kind) => {
            state.pending.insert(kind);
        }
        UiUpdate::MvpsLoaded(mvps) => {
            state.pending.remove(&FetchKind::Mvps);
            state.mvps = Some(mvps);
        }
        UiUpdate::MovesLoaded(moves) => {
            state.pending.remove(&FetchKind::Moves);
            state.moves = Some(moves);
        }
        UiUpdate::OddsLoaded { team, entries } => {
            state.pending.remove(&FetchKind::Odds);
            state.odds = Some(entries);
            state.odds_team = Some(team);
            state.odds_scroll = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::selector::render(frame, layout.selector, state);
    widgets::teams::render(frame, layout.teams, state);
    widgets::mvp::render(frame, layout.mvp, state);
    widgets::moves::render_defend(frame, layout.defend, state);
    widgets::moves::render_attack(frame, layout.attack, state);
    widgets::odds::render(frame, layout.odds, state);
    render_help_bar(frame, &layout, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area(), state);
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let text = if state.exclusion_mode {
        " Exclusions: type ids separated by commas | Enter:Keep | Esc:Clear"
    } else {
        " q:Quit | \u{2190}\u{2192}:Season | \u{2191}\u{2193}:Team | +/-:Day | x:Exclude | m:MVPs | l:Moves | o:Odds | a:All | r:Reload"
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal (enters raw mode, enables alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    default_day: u32,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::with_day(default_day);
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // Channel closed: app is shutting down
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(anyhow::Error::from(e)),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::from(e));
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
