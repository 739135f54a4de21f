// Domain model: the shapes the dashboard works with after the raw API
// payloads have been decoded and normalized.

use crate::api::wire;

/// A team and the seasons it took part in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub id: u32,
    pub seasons: Vec<u32>,
}

impl Team {
    pub fn played_in(&self, season: u32) -> bool {
        self.seasons.contains(&season)
    }
}

impl From<wire::TeamRecord> for Team {
    fn from(raw: wire::TeamRecord) -> Self {
        Team {
            name: raw.name,
            id: raw.id,
            seasons: raw.seasons,
        }
    }
}

/// One node of the territory adjacency graph for a given season/day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Territory {
    pub id: u32,
    pub name: String,
    /// Owning team name. `None` for territories the API reports without one.
    pub owner: Option<String>,
    pub neighbors: Vec<u32>,
}

impl Territory {
    pub fn is_owned_by(&self, team: &str) -> bool {
        self.owner.as_deref() == Some(team)
    }
}

impl From<wire::TerritoryRecord> for Territory {
    fn from(raw: wire::TerritoryRecord) -> Self {
        Territory {
            id: raw.id,
            name: raw.name,
            owner: raw.owner,
            neighbors: raw.neighbors.into_iter().map(|n| n.id).collect(),
        }
    }
}

/// Defend and attack candidates for a team, each sorted by territory name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalMoves {
    pub defend: Vec<String>,
    pub attack: Vec<String>,
}

impl LegalMoves {
    pub fn is_empty(&self) -> bool {
        self.defend.is_empty() && self.attack.is_empty()
    }
}

/// A predicted outcome for one contested territory.
#[derive(Debug, Clone, PartialEq)]
pub struct OddsEntry {
    pub territory: String,
    pub winner: String,
    /// Win probability in [0, 1].
    pub chance: f64,
    /// Contesting teams' player counts and power, e.g.
    /// `"Texas: 120 Players, 85.50 Power | Oklahoma: 40 Players, 20.00 Power"`.
    /// Empty when the territory detail could not be fetched.
    pub detail: String,
}

impl From<wire::OddsRecord> for OddsEntry {
    fn from(raw: wire::OddsRecord) -> Self {
        OddsEntry {
            territory: raw.territory,
            winner: raw.winner,
            chance: raw.chance,
            detail: String::new(),
        }
    }
}

/// A player flagged as most valuable for a team/day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MvpEntry {
    pub name: String,
}
