// College Football Risk API access.
//
// `RiskApi` is the seam every fetcher goes through. `HttpRiskApi` talks to
// the real service over reqwest; `MemoryRiskApi` serves canned payloads.

pub mod client;
pub mod memory;
pub mod wire;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use wire::{OddsRecord, PlayerRecord, TeamRecord, TerritoryRecord, TerritoryTurn};

pub use client::HttpRiskApi;
pub use memory::MemoryRiskApi;

pub type ApiResult<T> = Result<T, ApiError>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("unexpected payload from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// A request against the API: path plus query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Teams,
    TeamPlayers { team: String, season: u32, day: u32 },
    Territories { season: u32, day: u32 },
    TeamOdds { team: String, season: u32, day: u32 },
    TerritoryTurn { territory: String, season: u32, day: u32 },
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Teams => "/teams",
            Endpoint::TeamPlayers { .. } => "/team/players",
            Endpoint::Territories { .. } => "/territories",
            Endpoint::TeamOdds { .. } => "/team/odds",
            Endpoint::TerritoryTurn { .. } => "/territory/turn",
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::Teams => vec![],
            Endpoint::TeamPlayers { team, season, day } | Endpoint::TeamOdds { team, season, day } => {
                vec![
                    ("team", team.clone()),
                    ("season", season.to_string()),
                    ("day", day.to_string()),
                ]
            }
            Endpoint::Territories { season, day } => {
                vec![("day", day.to_string()), ("season", season.to_string())]
            }
            Endpoint::TerritoryTurn {
                territory,
                season,
                day,
            } => vec![
                ("territory", territory.clone()),
                ("season", season.to_string()),
                ("day", day.to_string()),
            ],
        }
    }
}

/// Human-readable form used in logs and error messages (not URL-encoded).
impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())?;
        for (i, (key, value)) in self.query().iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RiskApi trait
// ---------------------------------------------------------------------------

/// Read-only access to the College Football Risk API.
#[async_trait]
pub trait RiskApi: Send + Sync {
    async fn teams(&self) -> ApiResult<Vec<TeamRecord>>;

    async fn team_players(&self, team: &str, season: u32, day: u32) -> ApiResult<Vec<PlayerRecord>>;

    async fn territories(&self, season: u32, day: u32) -> ApiResult<Vec<TerritoryRecord>>;

    async fn team_odds(&self, team: &str, season: u32, day: u32) -> ApiResult<Vec<OddsRecord>>;

    async fn territory_turn(&self, territory: &str, season: u32, day: u32)
        -> ApiResult<TerritoryTurn>;
}
