// Season/team loader: the full team list, the seasons it spans, and the
// per-season roster used by the team selector.

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::api::RiskApi;
use crate::model::Team;

/// Fetch every team. Failures are logged and yield an empty list.
pub async fn load_teams(api: &dyn RiskApi) -> Vec<Team> {
    match api.teams().await {
        Ok(records) => {
            let teams: Vec<Team> = records.into_iter().map(Team::from).collect();
            info!("Loaded {} teams", teams.len());
            teams
        }
        Err(e) => {
            warn!("Failed to load teams: {e}");
            Vec::new()
        }
    }
}

/// Sorted, duplicate-free union of every team's seasons.
pub fn distinct_seasons(teams: &[Team]) -> Vec<u32> {
    teams
        .iter()
        .flat_map(|t| t.seasons.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Teams that played in `season`, sorted by name.
pub fn teams_for_season(teams: &[Team], season: u32) -> Vec<Team> {
    let mut filtered: Vec<Team> = teams.iter().filter(|t| t.played_in(season)).cloned().collect();
    filtered.sort_by(|a, b| a.name.cmp(&b.name));
    filtered
}

/// The season selected when the dashboard starts: the newest one.
pub fn latest_season(seasons: &[u32]) -> Option<u32> {
    seasons.iter().copied().max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::wire::TeamRecord;
    use crate::api::MemoryRiskApi;

    fn team(name: &str, id: u32, seasons: &[u32]) -> Team {
        Team {
            name: name.into(),
            id,
            seasons: seasons.to_vec(),
        }
    }

    fn sample() -> Vec<Team> {
        vec![
            team("Texas", 1, &[3, 1, 2]),
            team("Alabama", 2, &[2, 4]),
            team("Oklahoma", 3, &[1, 1]),
            team("Chaos", 4, &[]),
        ]
    }

    #[test]
    fn seasons_are_sorted_union_without_duplicates() {
        assert_eq!(distinct_seasons(&sample()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn seasons_of_empty_list_is_empty() {
        assert!(distinct_seasons(&[]).is_empty());
    }

    #[test]
    fn teams_filtered_and_sorted_by_name() {
        let names: Vec<String> = teams_for_season(&sample(), 2)
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Alabama", "Texas"]);
    }

    #[test]
    fn unknown_season_gives_no_teams() {
        assert!(teams_for_season(&sample(), 99).is_empty());
    }

    #[test]
    fn latest_season_is_max() {
        assert_eq!(latest_season(&[1, 4, 2]), Some(4));
        assert_eq!(latest_season(&[]), None);
    }

    #[tokio::test]
    async fn load_teams_converts_records() {
        let api = MemoryRiskApi::new().with_teams(vec![TeamRecord {
            name: "Texas".into(),
            id: 131,
            seasons: vec![1, 2],
        }]);
        let teams = load_teams(&api).await;
        assert_eq!(teams, vec![team("Texas", 131, &[1, 2])]);
    }

    #[tokio::test]
    async fn load_teams_failure_yields_empty() {
        let api = MemoryRiskApi::new();
        assert!(load_teams(&api).await.is_empty());
    }
}
