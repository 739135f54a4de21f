// Application state and orchestration logic.
//
// The central event loop that turns user commands from the TUI into API
// fetches, collects their results, and pushes UI updates to the TUI render
// loop. Every fetch runs in its own spawned task and reports back through
// the fetch channel, so a slow request never blocks the loop.

use std::collections::HashSet;
use std::sync::Arc;

use risk_core::api::RiskApi;
use risk_core::config::Config;
use risk_core::model::{LegalMoves, MvpEntry, OddsEntry, Team};
use risk_core::moves::{self, MovesQuery};
use risk_core::{mvp, odds, seasons};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::protocol::{FetchKind, FetchQuery, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// Results reported by spawned fetch tasks.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    Teams(Vec<Team>),
    Mvps(Vec<MvpEntry>),
    Moves(LegalMoves),
    Odds { team: String, entries: Vec<OddsEntry> },
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    /// Shared with spawned fetch tasks.
    pub api: Arc<dyn RiskApi>,
    /// Every team the API knows about, unfiltered.
    pub teams: Vec<Team>,
    pub seasons: Vec<u32>,
    pub selected_season: Option<u32>,
    /// Spawned tasks send their results through a clone of this sender.
    pub fetch_tx: mpsc::Sender<FetchEvent>,
}

impl AppState {
    pub fn new(config: Config, api: Arc<dyn RiskApi>, fetch_tx: mpsc::Sender<FetchEvent>) -> Self {
        AppState {
            config,
            api,
            teams: Vec::new(),
            seasons: Vec::new(),
            selected_season: None,
            fetch_tx,
        }
    }

    /// Replace the team list and recompute the season list.
    ///
    /// The selected season survives a reload when it still exists;
    /// otherwise the newest season is selected.
    pub fn apply_teams(&mut self, teams: Vec<Team>) {
        self.teams = teams;
        self.seasons = seasons::distinct_seasons(&self.teams);
        self.selected_season = match self.selected_season {
            Some(s) if self.seasons.contains(&s) => Some(s),
            _ => seasons::latest_season(&self.seasons),
        };
    }

    /// Teams of the selected season, sorted by name.
    pub fn season_teams(&self) -> Vec<Team> {
        match self.selected_season {
            Some(season) => seasons::teams_for_season(&self.teams, season),
            None => Vec::new(),
        }
    }

    pub fn request_teams(&self) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let teams = seasons::load_teams(api.as_ref()).await;
            let _ = tx.send(FetchEvent::Teams(teams)).await;
        })
    }

    pub fn request_mvps(&self, query: FetchQuery) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let mvps = mvp::fetch_mvps(api.as_ref(), &query.team, query.season, query.day).await;
            let _ = tx.send(FetchEvent::Mvps(mvps)).await;
        })
    }

    pub fn request_moves(&self, query: FetchQuery, exclusions: HashSet<u32>) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let tx = self.fetch_tx.clone();
        let static_exclusions = self.config.moves.excluded_territories.clone();
        tokio::spawn(async move {
            let query = moves_query(query, exclusions);
            let legal = moves::fetch_legal_moves(api.as_ref(), &query, &static_exclusions).await;
            let _ = tx.send(FetchEvent::Moves(legal)).await;
        })
    }

    pub fn request_odds(&self, query: FetchQuery) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            let entries = odds::fetch_odds(api.as_ref(), &query.team, query.season, query.day).await;
            let _ = tx
                .send(FetchEvent::Odds {
                    team: query.team,
                    entries,
                })
                .await;
        })
    }

    /// Run the MVP, legal-move and odds fetches concurrently in one task.
    ///
    /// Each fetcher degrades to an empty result on its own, so one failing
    /// endpoint never hides the others.
    pub fn request_all(&self, query: FetchQuery, exclusions: HashSet<u32>) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let tx = self.fetch_tx.clone();
        let static_exclusions = self.config.moves.excluded_territories.clone();
        tokio::spawn(async move {
            let mq = moves_query(query.clone(), exclusions);
            let (mvps, legal, entries) = tokio::join!(
                mvp::fetch_mvps(api.as_ref(), &query.team, query.season, query.day),
                moves::fetch_legal_moves(api.as_ref(), &mq, &static_exclusions),
                odds::fetch_odds(api.as_ref(), &query.team, query.season, query.day),
            );
            let _ = tx.send(FetchEvent::Mvps(mvps)).await;
            let _ = tx.send(FetchEvent::Moves(legal)).await;
            let _ = tx
                .send(FetchEvent::Odds {
                    team: query.team,
                    entries,
                })
                .await;
        })
    }
}

fn moves_query(query: FetchQuery, exclusions: HashSet<u32>) -> MovesQuery {
    MovesQuery {
        team: query.team,
        season: query.season,
        displayed_day: query.day,
        exclusions,
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Requests the team list once on startup, then listens on two channels
/// using `tokio::select!`:
/// 1. User commands from the TUI
/// 2. Results from spawned fetch tasks
///
/// Pushes UI updates through `ui_tx` for the TUI render loop.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut fetch_rx: mpsc::Receiver<FetchEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");
    state.request_teams();

    loop {
        tokio::select! {
            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            // --- Fetch results (state holds a sender, so this never closes) ---
            event = fetch_rx.recv() => {
                if let Some(event) = event {
                    handle_fetch_event(&mut state, event, &ui_tx).await;
                }
            }
        }
    }

    Ok(())
}

/// Handle a user command from the TUI.
async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::ReloadTeams => {
            info!("Reloading team list");
            state.request_teams();
        }
        UserCommand::SelectSeason(season) => {
            if !state.seasons.contains(&season) {
                warn!("Ignoring selection of unknown season {season}");
                return;
            }
            state.selected_season = Some(season);
            let teams = state.season_teams();
            info!("Season {season} selected: {} teams", teams.len());
            let _ = ui_tx.send(UiUpdate::TeamsUpdated { season, teams }).await;
        }
        UserCommand::FetchMvps(query) => {
            info!("Fetching MVPs for {query:?}");
            let _ = ui_tx.send(UiUpdate::FetchStarted(FetchKind::Mvps)).await;
            state.request_mvps(query);
        }
        UserCommand::FetchMoves { query, exclusions } => {
            info!("Fetching legal moves for {query:?} excluding {exclusions:?}");
            let _ = ui_tx.send(UiUpdate::FetchStarted(FetchKind::Moves)).await;
            state.request_moves(query, exclusions);
        }
        UserCommand::FetchOdds(query) => {
            info!("Fetching odds for {query:?}");
            let _ = ui_tx.send(UiUpdate::FetchStarted(FetchKind::Odds)).await;
            state.request_odds(query);
        }
        UserCommand::FetchAll { query, exclusions } => {
            info!("Fetching MVPs, legal moves and odds for {query:?}");
            for kind in [FetchKind::Mvps, FetchKind::Moves, FetchKind::Odds] {
                let _ = ui_tx.send(UiUpdate::FetchStarted(kind)).await;
            }
            state.request_all(query, exclusions);
        }
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
}

/// Handle a result reported by a fetch task.
async fn handle_fetch_event(
    state: &mut AppState,
    event: FetchEvent,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match event {
        FetchEvent::Teams(teams) => {
            state.apply_teams(teams);
            debug!(
                "Team list applied: {} teams, {} seasons",
                state.teams.len(),
                state.seasons.len()
            );
            let _ = ui_tx
                .send(UiUpdate::SeasonsLoaded {
                    seasons: state.seasons.clone(),
                    selected: state.selected_season,
                })
                .await;
            if let Some(season) = state.selected_season {
                let teams = state.season_teams();
                let _ = ui_tx.send(UiUpdate::TeamsUpdated { season, teams }).await;
            }
        }
        FetchEvent::Mvps(mvps) => {
            let _ = ui_tx.send(UiUpdate::MvpsLoaded(mvps)).await;
        }
        FetchEvent::Moves(legal) => {
            let _ = ui_tx.send(UiUpdate::MovesLoaded(legal)).await;
        }
        FetchEvent::Odds { team, entries } => {
            let _ = ui_tx.send(UiUpdate::OddsLoaded { team, entries }).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use risk_core::api::wire::{PlayerRecord, TeamRecord};
    use risk_core::api::MemoryRiskApi;

    fn team(name: &str, id: u32, seasons: &[u32]) -> Team {
        Team {
            name: name.into(),
            id,
            seasons: seasons.to_vec(),
        }
    }

    fn create_test_app_state(api: MemoryRiskApi) -> (AppState, mpsc::Receiver<FetchEvent>) {
        let (fetch_tx, fetch_rx) = mpsc::channel(16);
        let state = AppState::new(Config::default(), Arc::new(api), fetch_tx);
        (state, fetch_rx)
    }

    #[test]
    fn apply_teams_selects_latest_season() {
        let (mut state, _rx) = create_test_app_state(MemoryRiskApi::new());
        state.apply_teams(vec![team("Texas", 1, &[1, 2]), team("Alabama", 2, &[3])]);
        assert_eq!(state.seasons, vec![1, 2, 3]);
        assert_eq!(state.selected_season, Some(3));
        assert_eq!(state.season_teams(), vec![team("Alabama", 2, &[3])]);
    }

    #[test]
    fn apply_teams_keeps_existing_selection() {
        let (mut state, _rx) = create_test_app_state(MemoryRiskApi::new());
        state.selected_season = Some(1);
        state.apply_teams(vec![team("Texas", 1, &[1, 2])]);
        assert_eq!(state.selected_season, Some(1));
    }

    #[test]
    fn apply_empty_teams_clears_selection() {
        let (mut state, _rx) = create_test_app_state(MemoryRiskApi::new());
        state.selected_season = Some(1);
        state.apply_teams(Vec::new());
        assert!(state.seasons.is_empty());
        assert_eq!(state.selected_season, None);
        assert!(state.season_teams().is_empty());
    }

    #[tokio::test]
    async fn request_teams_reports_loaded_list() {
        let api = MemoryRiskApi::new().with_teams(vec![TeamRecord {
            name: "Texas".into(),
            id: 1,
            seasons: vec![2],
        }]);
        let (state, mut rx) = create_test_app_state(api);
        state.request_teams().await.unwrap();
        assert_eq!(
            rx.recv().await.unwrap(),
            FetchEvent::Teams(vec![team("Texas", 1, &[2])])
        );
    }

    #[tokio::test]
    async fn request_all_reports_each_result() {
        let api = MemoryRiskApi::new().with_players(
            "Texas",
            1,
            1,
            vec![PlayerRecord {
                player: "Bevo$0".into(),
                mvp: true,
            }],
        );
        let (state, mut rx) = create_test_app_state(api);
        let query = FetchQuery {
            team: "Texas".into(),
            season: 1,
            day: 1,
        };
        state.request_all(query, HashSet::new()).await.unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            FetchEvent::Mvps(vec![MvpEntry {
                name: "Bevo".into()
            }])
        );
        // Territories and odds are not registered: both degrade to empty.
        assert_eq!(rx.recv().await.unwrap(), FetchEvent::Moves(LegalMoves::default()));
        assert_eq!(
            rx.recv().await.unwrap(),
            FetchEvent::Odds {
                team: "Texas".into(),
                entries: vec![]
            }
        );
    }

    #[tokio::test]
    async fn event_loop_handles_quit_command() {
        let (state, fetch_rx) = create_test_app_state(MemoryRiskApi::new());
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, _ui_rx) = mpsc::channel(64);

        let handle = tokio::spawn(run(cmd_rx, fetch_rx, ui_tx, state));
        cmd_tx.send(UserCommand::Quit).await.unwrap();

        let result = handle.await.unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn event_loop_exits_when_command_channel_closes() {
        let (state, fetch_rx) = create_test_app_state(MemoryRiskApi::new());
        let (cmd_tx, cmd_rx) = mpsc::channel::<UserCommand>(16);
        let (ui_tx, _ui_rx) = mpsc::channel(64);

        let handle = tokio::spawn(run(cmd_rx, fetch_rx, ui_tx, state));
        drop(cmd_tx);

        assert!(handle.await.unwrap().is_ok());
    }
}
