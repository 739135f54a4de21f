// Integration tests for cfbrisk.
//
// These drive the orchestrator loop end-to-end through its channels, backed
// by the in-memory API, and feed the resulting UI updates into the TUI's
// view state the same way the render loop does.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use risk_core::api::wire::{
    NeighborRef, OddsRecord, PlayerRecord, TeamRecord, TeamTurn, TerritoryRecord, TerritoryTurn,
};
use risk_core::api::{Endpoint, MemoryRiskApi};
use risk_core::config::Config;
use risk_core::model::{LegalMoves, MvpEntry};
use risk_tui::app::{self, AppState};
use risk_tui::protocol::{FetchKind, FetchQuery, UiUpdate, UserCommand};
use risk_tui::tui::{apply_ui_update, ViewState};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

// ===========================================================================
// Test helpers
// ===========================================================================

struct Harness {
    cmd_tx: mpsc::Sender<UserCommand>,
    ui_rx: mpsc::Receiver<UiUpdate>,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    fn start(api: Arc<MemoryRiskApi>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, ui_rx) = mpsc::channel(64);
        let (fetch_tx, fetch_rx) = mpsc::channel(16);
        let state = AppState::new(Config::default(), api, fetch_tx);
        let handle = tokio::spawn(app::run(cmd_rx, fetch_rx, ui_tx, state));
        Harness {
            cmd_tx,
            ui_rx,
            handle,
        }
    }

    async fn send(&self, cmd: UserCommand) {
        self.cmd_tx.send(cmd).await.unwrap();
    }

    async fn next(&mut self) -> UiUpdate {
        tokio::time::timeout(Duration::from_secs(5), self.ui_rx.recv())
            .await
            .expect("timed out waiting for a UI update")
            .expect("UI channel closed")
    }

    async fn quit(self) {
        self.cmd_tx.send(UserCommand::Quit).await.unwrap();
        assert!(self.handle.await.unwrap().is_ok());
    }
}

fn team_record(name: &str, id: u32, seasons: &[u32]) -> TeamRecord {
    TeamRecord {
        name: name.into(),
        id,
        seasons: seasons.to_vec(),
    }
}

fn territory(id: u32, name: &str, owner: &str, neighbors: &[u32]) -> TerritoryRecord {
    TerritoryRecord {
        id,
        name: name.into(),
        owner: Some(owner.into()),
        neighbors: neighbors.iter().map(|&id| NeighborRef { id }).collect(),
    }
}

fn turn(teams: &[(&str, u32, f64)]) -> TerritoryTurn {
    TerritoryTurn {
        teams: teams
            .iter()
            .map(|&(team, players, power)| TeamTurn {
                team: team.into(),
                players,
                power,
            })
            .collect(),
    }
}

fn texas_query(day: u32) -> FetchQuery {
    FetchQuery {
        team: "Texas".into(),
        season: 1,
        day,
    }
}

/// A season-1 world: Texas holds Austin and Dallas, Oklahoma holds the
/// rest. Houston (249) is one of the statically excluded ids.
fn season_one_api() -> MemoryRiskApi {
    MemoryRiskApi::new()
        .with_teams(vec![
            team_record("Texas", 1, &[1]),
            team_record("Oklahoma", 2, &[1]),
        ])
        .with_players(
            "Texas",
            1,
            2,
            vec![
                PlayerRecord {
                    player: "Smith$0".into(),
                    mvp: true,
                },
                PlayerRecord {
                    player: "Brown".into(),
                    mvp: false,
                },
                PlayerRecord {
                    player: "Jones".into(),
                    mvp: true,
                },
            ],
        )
        .with_territories(
            1,
            3,
            vec![
                territory(1, "Austin", "Texas", &[2, 249]),
                territory(2, "Norman", "Oklahoma", &[1]),
                territory(3, "Dallas", "Texas", &[1]),
                territory(4, "Waco", "Oklahoma", &[3]),
                territory(249, "Houston", "Oklahoma", &[1]),
            ],
        )
        .with_odds(
            "Texas",
            1,
            2,
            vec![
                OddsRecord {
                    territory: "Norman".into(),
                    winner: "Oklahoma".into(),
                    chance: 0.6,
                },
                OddsRecord {
                    territory: "Austin".into(),
                    winner: "Texas".into(),
                    chance: 0.8,
                },
                OddsRecord {
                    territory: "Waco".into(),
                    winner: "Texas".into(),
                    chance: 0.4,
                },
            ],
        )
        .with_turn("Austin", 1, 2, turn(&[("Oklahoma", 5, 2.5), ("Texas", 10, 7.25)]))
        .with_turn("Waco", 1, 2, turn(&[("Texas", 3, 1.0), ("Baylor", 0, 0.0)]))
}

// ===========================================================================
// Startup and season selection
// ===========================================================================

#[tokio::test]
async fn startup_selects_latest_season() {
    let api = MemoryRiskApi::new().with_teams(vec![
        team_record("Texas", 1, &[1, 2]),
        team_record("Alabama", 2, &[2]),
        team_record("Baylor", 3, &[1]),
    ]);
    let mut harness = Harness::start(Arc::new(api));

    assert_eq!(
        harness.next().await,
        UiUpdate::SeasonsLoaded {
            seasons: vec![1, 2],
            selected: Some(2),
        }
    );
    match harness.next().await {
        UiUpdate::TeamsUpdated { season, teams } => {
            assert_eq!(season, 2);
            let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
            assert_eq!(names, vec!["Alabama", "Texas"]);
        }
        other => panic!("expected TeamsUpdated, got {other:?}"),
    }

    harness.send(UserCommand::SelectSeason(1)).await;
    match harness.next().await {
        UiUpdate::TeamsUpdated { season, teams } => {
            assert_eq!(season, 1);
            let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
            assert_eq!(names, vec!["Baylor", "Texas"]);
        }
        other => panic!("expected TeamsUpdated, got {other:?}"),
    }

    harness.quit().await;
}

#[tokio::test]
async fn team_list_outage_reports_no_seasons_and_reload_retries() {
    let api = Arc::new(MemoryRiskApi::new());
    let mut harness = Harness::start(Arc::clone(&api));

    assert_eq!(
        harness.next().await,
        UiUpdate::SeasonsLoaded {
            seasons: vec![],
            selected: None,
        }
    );

    harness.send(UserCommand::ReloadTeams).await;
    assert_eq!(
        harness.next().await,
        UiUpdate::SeasonsLoaded {
            seasons: vec![],
            selected: None,
        }
    );
    assert_eq!(api.requests(), vec![Endpoint::Teams, Endpoint::Teams]);

    harness.quit().await;
}

// ===========================================================================
// Fetches
// ===========================================================================

#[tokio::test]
async fn fetch_all_delivers_mvps_moves_and_odds() {
    let mut harness = Harness::start(Arc::new(season_one_api()));
    // Startup: seasons + teams.
    harness.next().await;
    harness.next().await;

    harness
        .send(UserCommand::FetchAll {
            query: texas_query(2),
            exclusions: HashSet::from([4]),
        })
        .await;

    for kind in [FetchKind::Mvps, FetchKind::Moves, FetchKind::Odds] {
        assert_eq!(harness.next().await, UiUpdate::FetchStarted(kind));
    }

    assert_eq!(
        harness.next().await,
        UiUpdate::MvpsLoaded(vec![
            MvpEntry {
                name: "Jones".into()
            },
            MvpEntry {
                name: "Smith".into()
            },
        ])
    );

    // Houston is statically excluded, Waco by the user.
    assert_eq!(
        harness.next().await,
        UiUpdate::MovesLoaded(LegalMoves {
            defend: vec!["Austin".into()],
            attack: vec!["Norman".into()],
        })
    );

    match harness.next().await {
        UiUpdate::OddsLoaded { team, entries } => {
            assert_eq!(team, "Texas");
            let order: Vec<&str> = entries.iter().map(|e| e.territory.as_str()).collect();
            assert_eq!(order, vec!["Austin", "Waco", "Norman"]);
            assert_eq!(
                entries[0].detail,
                "Texas: 10 Players, 7.25 Power | Oklahoma: 5 Players, 2.50 Power"
            );
            assert_eq!(entries[1].detail, "Texas: 3 Players, 1.00 Power");
            // No turn data for Norman: detail stays empty, entry survives.
            assert_eq!(entries[2].detail, "");
        }
        other => panic!("expected OddsLoaded, got {other:?}"),
    }

    harness.quit().await;
}

#[tokio::test]
async fn fetch_moves_reads_the_following_day() {
    let api = Arc::new(season_one_api());
    let mut harness = Harness::start(Arc::clone(&api));
    harness.next().await;
    harness.next().await;

    harness
        .send(UserCommand::FetchMoves {
            query: texas_query(2),
            exclusions: HashSet::new(),
        })
        .await;
    assert_eq!(harness.next().await, UiUpdate::FetchStarted(FetchKind::Moves));
    assert_eq!(
        harness.next().await,
        UiUpdate::MovesLoaded(LegalMoves {
            defend: vec!["Austin".into()],
            attack: vec!["Norman".into(), "Waco".into()],
        })
    );

    assert!(api
        .requests()
        .contains(&Endpoint::Territories { season: 1, day: 3 }));

    harness.quit().await;
}

#[tokio::test]
async fn missing_data_degrades_to_empty_results() {
    let mut harness = Harness::start(Arc::new(season_one_api()));
    harness.next().await;
    harness.next().await;

    // Day 7 has nothing registered anywhere.
    harness.send(UserCommand::FetchMvps(texas_query(7))).await;
    assert_eq!(harness.next().await, UiUpdate::FetchStarted(FetchKind::Mvps));
    assert_eq!(harness.next().await, UiUpdate::MvpsLoaded(vec![]));

    harness.send(UserCommand::FetchOdds(texas_query(7))).await;
    assert_eq!(harness.next().await, UiUpdate::FetchStarted(FetchKind::Odds));
    assert_eq!(
        harness.next().await,
        UiUpdate::OddsLoaded {
            team: "Texas".into(),
            entries: vec![],
        }
    );

    harness.quit().await;
}

// ===========================================================================
// Orchestrator -> view state
// ===========================================================================

#[tokio::test]
async fn updates_drive_the_view_state() {
    let mut harness = Harness::start(Arc::new(season_one_api()));
    let mut view = ViewState::with_day(2);

    for _ in 0..2 {
        let update = harness.next().await;
        apply_ui_update(&mut view, update);
    }
    assert_eq!(view.season, Some(1));
    assert_eq!(view.teams.len(), 2);

    view.selected_team = view.teams.iter().position(|t| t.name == "Texas");
    let query = view.query().expect("season and team are selected");
    harness
        .send(UserCommand::FetchAll {
            query,
            exclusions: view.exclusions(),
        })
        .await;

    // Three FetchStarted plus three results.
    for _ in 0..6 {
        let update = harness.next().await;
        apply_ui_update(&mut view, update);
    }
    assert!(view.pending.is_empty());
    assert_eq!(view.mvps.as_ref().map(Vec::len), Some(2));
    assert_eq!(
        view.moves.as_ref().map(|m| m.attack.clone()),
        Some(vec!["Norman".to_string(), "Waco".to_string()])
    );
    assert_eq!(view.odds_team.as_deref(), Some("Texas"));
    assert_eq!(view.odds.as_ref().map(Vec::len), Some(3));

    harness.quit().await;
}
