// Raw JSON payloads returned by the College Football Risk API.
//
// Only the fields the dashboard consumes are declared; serde ignores the
// rest. A missing required field fails the whole decode, which callers
// treat the same as a network failure.

use serde::Deserialize;

/// `/teams` element.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub id: u32,
    pub seasons: Vec<u32>,
}

/// `/team/players` element.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerRecord {
    pub player: String,
    pub mvp: bool,
}

/// `/territories` element.
#[derive(Debug, Clone, Deserialize)]
pub struct TerritoryRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
    pub neighbors: Vec<NeighborRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NeighborRef {
    pub id: u32,
}

/// `/team/odds` element.
#[derive(Debug, Clone, Deserialize)]
pub struct OddsRecord {
    pub territory: String,
    pub winner: String,
    pub chance: f64,
}

/// `/territory/turn` body.
#[derive(Debug, Clone, Deserialize)]
pub struct TerritoryTurn {
    pub teams: Vec<TeamTurn>,
}

/// One contesting team inside a `/territory/turn` body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamTurn {
    pub team: String,
    pub players: u32,
    pub power: f64,
}
