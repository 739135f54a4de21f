// Odds fetcher: win probabilities for a team's contested territories,
// enriched with the player count and power of every contesting team.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::api::wire::TeamTurn;
use crate::api::RiskApi;
use crate::model::OddsEntry;

/// Build the detail line for one territory.
///
/// Teams with zero players are dropped and `team`'s own segment is moved to
/// the front; the rest keep the API's order.
pub fn format_detail(turns: &[TeamTurn], team: &str) -> String {
    let (own, others): (Vec<&TeamTurn>, Vec<&TeamTurn>) = turns
        .iter()
        .filter(|t| t.players > 0)
        .partition(|t| t.team == team);

    own.into_iter()
        .chain(others)
        .map(|t| format!("{}: {} Players, {:.2} Power", t.team, t.players, t.power))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Ordering used for the odds table: predicted wins for `team` first, then
/// higher chance first, then territory name.
pub fn compare_odds(a: &OddsEntry, b: &OddsEntry, team: &str) -> Ordering {
    let a_wins = a.winner == team;
    let b_wins = b.winner == team;
    b_wins
        .cmp(&a_wins)
        .then_with(|| b.chance.total_cmp(&a.chance))
        .then_with(|| a.territory.cmp(&b.territory))
}

pub fn sort_odds(entries: &mut [OddsEntry], team: &str) {
    entries.sort_by(|a, b| compare_odds(a, b, team));
}

/// Fetch and enrich the odds of `team` for `season`/`day`.
///
/// Territory details are requested concurrently, one request per distinct
/// territory, and merged once all of them have settled. A failed detail
/// request leaves that territory's detail empty; a failed odds request
/// yields an empty list.
pub async fn fetch_odds(api: &dyn RiskApi, team: &str, season: u32, day: u32) -> Vec<OddsEntry> {
    let records = match api.team_odds(team, season, day).await {
        Ok(records) => records,
        Err(e) => {
            warn!("Failed to fetch odds for {team} (season {season}, day {day}): {e}");
            return Vec::new();
        }
    };

    let territories: BTreeSet<String> = records.iter().map(|r| r.territory.clone()).collect();
    debug!(team, count = territories.len(), "fetching territory details");

    let lookups = territories.into_iter().map(|territory| async move {
        let detail = match api.territory_turn(&territory, season, day).await {
            Ok(turn) => format_detail(&turn.teams, team),
            Err(e) => {
                warn!("Failed to fetch turn detail for {territory}: {e}");
                String::new()
            }
        };
        (territory, detail)
    });
    let details: HashMap<String, String> = join_all(lookups).await.into_iter().collect();

    let mut entries: Vec<OddsEntry> = records
        .into_iter()
        .map(|record| {
            let mut entry = OddsEntry::from(record);
            if let Some(detail) = details.get(&entry.territory) {
                entry.detail = detail.clone();
            }
            entry
        })
        .collect();
    sort_odds(&mut entries, team);

    info!(
        "Odds for {team} (season {season}, day {day}): {} territories",
        entries.len()
    );
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::wire::{OddsRecord, TerritoryTurn};
    use crate::api::{Endpoint, MemoryRiskApi};

    fn entry(territory: &str, winner: &str, chance: f64) -> OddsEntry {
        OddsEntry {
            territory: territory.into(),
            winner: winner.into(),
            chance,
            detail: String::new(),
        }
    }

    fn record(territory: &str, winner: &str, chance: f64) -> OddsRecord {
        OddsRecord {
            territory: territory.into(),
            winner: winner.into(),
            chance,
        }
    }

    fn turn(team: &str, players: u32, power: f64) -> TeamTurn {
        TeamTurn {
            team: team.into(),
            players,
            power,
        }
    }

    fn order(entries: &[OddsEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.territory.as_str()).collect()
    }

    #[test]
    fn winner_match_outranks_higher_chance() {
        let mut entries = vec![entry("B", "Y", 0.9), entry("A", "X", 0.3)];
        sort_odds(&mut entries, "X");
        assert_eq!(order(&entries), vec!["A", "B"]);
    }

    #[test]
    fn higher_chance_first_within_group() {
        let mut entries = vec![
            entry("A", "X", 0.2),
            entry("B", "X", 0.8),
            entry("C", "Y", 0.1),
            entry("D", "Z", 0.6),
        ];
        sort_odds(&mut entries, "X");
        assert_eq!(order(&entries), vec!["B", "A", "D", "C"]);
    }

    #[test]
    fn equal_chance_sorted_by_territory() {
        let mut entries = vec![
            entry("Waco", "Y", 0.5),
            entry("Austin", "Y", 0.5),
            entry("Tyler", "X", 0.5),
            entry("Dallas", "X", 0.5),
        ];
        sort_odds(&mut entries, "X");
        assert_eq!(order(&entries), vec!["Dallas", "Tyler", "Austin", "Waco"]);
    }

    #[test]
    fn detail_puts_queried_team_first_and_drops_empty_teams() {
        let turns = vec![
            turn("Oklahoma", 40, 20.0),
            turn("Baylor", 0, 0.0),
            turn("Texas", 120, 85.5),
            turn("TCU", 3, 1.234),
        ];
        assert_eq!(
            format_detail(&turns, "Texas"),
            "Texas: 120 Players, 85.50 Power | Oklahoma: 40 Players, 20.00 Power | TCU: 3 Players, 1.23 Power"
        );
    }

    #[test]
    fn detail_without_queried_team_keeps_api_order() {
        let turns = vec![turn("B", 2, 1.0), turn("A", 1, 0.5)];
        assert_eq!(
            format_detail(&turns, "X"),
            "B: 2 Players, 1.00 Power | A: 1 Players, 0.50 Power"
        );
    }

    #[test]
    fn detail_of_no_players_is_empty() {
        assert_eq!(format_detail(&[turn("A", 0, 0.0)], "A"), "");
        assert_eq!(format_detail(&[], "A"), "");
    }

    #[tokio::test]
    async fn merges_details_and_sorts() {
        let api = MemoryRiskApi::new()
            .with_odds(
                "X",
                1,
                4,
                vec![record("B", "Y", 0.9), record("A", "X", 0.3)],
            )
            .with_turn(
                "A",
                1,
                4,
                TerritoryTurn {
                    teams: vec![turn("Y", 1, 2.0), turn("X", 5, 3.0)],
                },
            )
            .with_turn(
                "B",
                1,
                4,
                TerritoryTurn {
                    teams: vec![turn("Y", 9, 9.0)],
                },
            );

        let odds = fetch_odds(&api, "X", 1, 4).await;
        assert_eq!(order(&odds), vec!["A", "B"]);
        assert_eq!(
            odds[0].detail,
            "X: 5 Players, 3.00 Power | Y: 1 Players, 2.00 Power"
        );
        assert_eq!(odds[1].detail, "Y: 9 Players, 9.00 Power");
    }

    #[tokio::test]
    async fn failed_detail_leaves_detail_empty() {
        let api = MemoryRiskApi::new()
            .with_odds("X", 1, 4, vec![record("A", "X", 0.5), record("B", "X", 0.4)])
            .with_turn(
                "B",
                1,
                4,
                TerritoryTurn {
                    teams: vec![turn("X", 2, 1.0)],
                },
            );

        let odds = fetch_odds(&api, "X", 1, 4).await;
        assert_eq!(odds.len(), 2);
        assert_eq!(odds[0].territory, "A");
        assert!(odds[0].detail.is_empty());
        assert_eq!(odds[1].detail, "X: 2 Players, 1.00 Power");
    }

    #[tokio::test]
    async fn detail_requested_once_per_distinct_territory() {
        let api = MemoryRiskApi::new().with_odds(
            "X",
            2,
            3,
            vec![record("A", "X", 0.5), record("A", "Y", 0.5)],
        );
        let odds = fetch_odds(&api, "X", 2, 3).await;
        assert_eq!(odds.len(), 2);

        let turn_requests = api
            .requests()
            .into_iter()
            .filter(|e| matches!(e, Endpoint::TerritoryTurn { .. }))
            .count();
        assert_eq!(turn_requests, 1);
    }

    #[tokio::test]
    async fn odds_failure_yields_empty() {
        let api = MemoryRiskApi::new();
        assert!(fetch_odds(&api, "X", 1, 1).await.is_empty());
    }
}
