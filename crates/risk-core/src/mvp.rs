// MVP fetcher: players the API flags as most valuable for a team/day.

use tracing::{debug, warn};

use crate::api::RiskApi;
use crate::model::MvpEntry;

/// Suffix the API appends to some player names.
const NAME_SENTINEL: &str = "$0";

/// Strip one trailing `$0` from a raw player name.
pub fn display_name(raw: &str) -> &str {
    raw.strip_suffix(NAME_SENTINEL).unwrap_or(raw)
}

/// Fetch the MVPs of `team` for `season`/`day`, sorted by name.
///
/// Errors and malformed payloads are logged and yield an empty list.
pub async fn fetch_mvps(api: &dyn RiskApi, team: &str, season: u32, day: u32) -> Vec<MvpEntry> {
    let players = match api.team_players(team, season, day).await {
        Ok(players) => players,
        Err(e) => {
            warn!("Failed to fetch players for {team} (season {season}, day {day}): {e}");
            return Vec::new();
        }
    };

    let mut mvps: Vec<MvpEntry> = players
        .iter()
        .filter(|p| p.mvp)
        .map(|p| MvpEntry {
            name: display_name(&p.player).to_string(),
        })
        .collect();
    mvps.sort();

    debug!(team, season, day, count = mvps.len(), "MVPs fetched");
    mvps
}
