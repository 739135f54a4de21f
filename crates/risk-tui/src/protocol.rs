// Messages exchanged between the TUI and the app orchestrator.

use std::collections::HashSet;

use risk_core::model::{LegalMoves, MvpEntry, OddsEntry, Team};

/// Which of the three per-team fetches a message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    Mvps,
    Moves,
    Odds,
}

impl FetchKind {
    pub fn label(self) -> &'static str {
        match self {
            FetchKind::Mvps => "MVPs",
            FetchKind::Moves => "moves",
            FetchKind::Odds => "odds",
        }
    }
}

/// Team/season/day a fetch is issued for, as shown on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchQuery {
    pub team: String,
    pub season: u32,
    pub day: u32,
}

/// Commands sent from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Refetch the full team list.
    ReloadTeams,
    /// Re-filter the team list for a season.
    SelectSeason(u32),
    FetchMvps(FetchQuery),
    /// `exclusions` are territory ids typed by the user.
    FetchMoves {
        query: FetchQuery,
        exclusions: HashSet<u32>,
    },
    FetchOdds(FetchQuery),
    /// MVPs, legal moves and odds together.
    FetchAll {
        query: FetchQuery,
        exclusions: HashSet<u32>,
    },
    Quit,
}

/// Updates pushed from the app orchestrator to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// The team list was (re)loaded.
    SeasonsLoaded {
        seasons: Vec<u32>,
        selected: Option<u32>,
    },
    /// Teams of `season`, sorted by name.
    TeamsUpdated { season: u32, teams: Vec<Team> },
    FetchStarted(FetchKind),
    MvpsLoaded(Vec<MvpEntry>),
    MovesLoaded(LegalMoves),
    /// `team` is the team the odds were requested for.
    OddsLoaded { team: String, entries: Vec<OddsEntry> },
}
