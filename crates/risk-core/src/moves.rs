// Legal-move calculator.
//
// Classifies the territories of a season/day into the ones a team can
// defend (owned, with at least one foreign neighbor) and the ones it can
// attack (foreign, with at least one owned neighbor).

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::api::RiskApi;
use crate::model::{LegalMoves, Territory};

/// Parameters of one legal-move query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovesQuery {
    pub team: String,
    pub season: u32,
    /// The day currently on screen. Territories are fetched for the day after.
    pub displayed_day: u32,
    /// Territory ids the caller wants left out of the attack set.
    pub exclusions: HashSet<u32>,
}

/// Split `territories` into defend and attack sets for `team`.
///
/// `exclusions` only affects the attack set. A neighbor id missing from
/// `territories` counts as not owned by `team`.
pub fn classify(territories: &[Territory], team: &str, exclusions: &HashSet<u32>) -> LegalMoves {
    let owners: HashMap<u32, Option<&str>> = territories
        .iter()
        .map(|t| (t.id, t.owner.as_deref()))
        .collect();
    let neighbor_owned = |id: &u32| owners.get(id).copied().flatten() == Some(team);

    let mut defend = Vec::new();
    let mut attack = Vec::new();

    for territory in territories {
        if territory.is_owned_by(team) {
            if territory.neighbors.iter().any(|n| !neighbor_owned(n)) {
                defend.push(territory.name.clone());
            }
        } else if !exclusions.contains(&territory.id)
            && territory.neighbors.iter().any(neighbor_owned)
        {
            attack.push(territory.name.clone());
        }
    }

    defend.sort();
    attack.sort();
    LegalMoves { defend, attack }
}

/// Fetch next-day territories and classify them for `query.team`.
///
/// `static_exclusions` are the map-specific ids from configuration; they
/// are merged with the caller's own exclusions. Failures yield empty sets.
pub async fn fetch_legal_moves(
    api: &dyn RiskApi,
    query: &MovesQuery,
    static_exclusions: &[u32],
) -> LegalMoves {
    let Some(day) = query.displayed_day.checked_add(1) else {
        warn!(
            "No day follows day {} (season {}); skipping legal moves",
            query.displayed_day, query.season
        );
        return LegalMoves::default();
    };
    let territories: Vec<Territory> = match api.territories(query.season, day).await {
        Ok(records) => records.into_iter().map(Territory::from).collect(),
        Err(e) => {
            warn!(
                "Failed to fetch territories (season {}, day {}): {e}",
                query.season, day
            );
            return LegalMoves::default();
        }
    };

    let mut exclusions = query.exclusions.clone();
    exclusions.extend(static_exclusions.iter().copied());

    let moves = classify(&territories, &query.team, &exclusions);
    if moves.is_empty() && !territories.iter().any(|t| t.is_owned_by(&query.team)) {
        debug!("{} owns no territory on day {}", query.team, day);
    }
    info!(
        "Legal moves for {} (season {}, day {}): {} defend, {} attack",
        query.team,
        query.season,
        day,
        moves.defend.len(),
        moves.attack.len()
    );
    moves
}

/// Parse a comma/space separated list of territory ids, skipping anything
/// that is not a number.
pub fn parse_exclusions(text: &str) -> HashSet<u32> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(|s| s.trim().parse().ok())
        .collect()
}
