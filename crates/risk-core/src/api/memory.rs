// In-memory `RiskApi`: serves canned payloads and records every request.
//
// Anything not registered answers with a 404 status error, which exercises
// the same degrade-to-empty paths as a real outage.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::wire::{OddsRecord, PlayerRecord, TeamRecord, TerritoryRecord, TerritoryTurn};
use super::{ApiError, ApiResult, Endpoint, RiskApi};

#[derive(Debug, Default)]
pub struct MemoryRiskApi {
    teams: Option<Vec<TeamRecord>>,
    players: HashMap<Endpoint, Vec<PlayerRecord>>,
    territories: HashMap<Endpoint, Vec<TerritoryRecord>>,
    odds: HashMap<Endpoint, Vec<OddsRecord>>,
    turns: HashMap<Endpoint, TerritoryTurn>,
    requests: Mutex<Vec<Endpoint>>,
}

impl MemoryRiskApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_teams(mut self, teams: Vec<TeamRecord>) -> Self {
        self.teams = Some(teams);
        self
    }

    pub fn with_players(mut self, team: &str, season: u32, day: u32, players: Vec<PlayerRecord>) -> Self {
        self.players.insert(
            Endpoint::TeamPlayers {
                team: team.to_string(),
                season,
                day,
            },
            players,
        );
        self
    }

    pub fn with_territories(mut self, season: u32, day: u32, territories: Vec<TerritoryRecord>) -> Self {
        self.territories
            .insert(Endpoint::Territories { season, day }, territories);
        self
    }

    pub fn with_odds(mut self, team: &str, season: u32, day: u32, odds: Vec<OddsRecord>) -> Self {
        self.odds.insert(
            Endpoint::TeamOdds {
                team: team.to_string(),
                season,
                day,
            },
            odds,
        );
        self
    }

    pub fn with_turn(mut self, territory: &str, season: u32, day: u32, turn: TerritoryTurn) -> Self {
        self.turns.insert(
            Endpoint::TerritoryTurn {
                territory: territory.to_string(),
                season,
                day,
            },
            turn,
        );
        self
    }

    /// Every request served so far, in arrival order.
    pub fn requests(&self) -> Vec<Endpoint> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn serve<T: Clone>(&self, table: &HashMap<Endpoint, T>, endpoint: Endpoint) -> ApiResult<T> {
        let found = table.get(&endpoint).cloned();
        self.record(endpoint.clone());
        found.ok_or_else(|| not_found(&endpoint))
    }

    fn record(&self, endpoint: Endpoint) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(endpoint);
        }
    }
}

fn not_found(endpoint: &Endpoint) -> ApiError {
    ApiError::Status {
        url: endpoint.to_string(),
        status: reqwest::StatusCode::NOT_FOUND,
    }
}

#[async_trait]
impl RiskApi for MemoryRiskApi {
    async fn teams(&self) -> ApiResult<Vec<TeamRecord>> {
        self.record(Endpoint::Teams);
        self.teams.clone().ok_or_else(|| not_found(&Endpoint::Teams))
    }

    async fn team_players(&self, team: &str, season: u32, day: u32) -> ApiResult<Vec<PlayerRecord>> {
        let endpoint = Endpoint::TeamPlayers {
            team: team.to_string(),
            season,
            day,
        };
        self.serve(&self.players, endpoint)
    }

    async fn territories(&self, season: u32, day: u32) -> ApiResult<Vec<TerritoryRecord>> {
        self.serve(&self.territories, Endpoint::Territories { season, day })
    }

    async fn team_odds(&self, team: &str, season: u32, day: u32) -> ApiResult<Vec<OddsRecord>> {
        let endpoint = Endpoint::TeamOdds {
            team: team.to_string(),
            season,
            day,
        };
        self.serve(&self.odds, endpoint)
    }

    async fn territory_turn(
        &self,
        territory: &str,
        season: u32,
        day: u32,
    ) -> ApiResult<TerritoryTurn> {
        let endpoint = Endpoint::TerritoryTurn {
            territory: territory.to_string(),
            season,
            day,
        };
        self.serve(&self.turns, endpoint)
    }
}
