use std::time::Duration;

use tracing::debug;

use crate::store::bounded;
use padel_core::StatsAggregator;
use padel_persistence::repositories::{MatchRepository, PlayerRepository};
use padel_types::{MatchStatus, PadelError, PlayerStats};

pub struct StatisticsService {
    matches: MatchRepository,
    players: PlayerRepository,
    store_timeout: Duration,
}

impl StatisticsService {
    pub fn new(matches: MatchRepository, players: PlayerRepository, store_timeout: Duration) -> Self {
        Self {
            matches,
            players,
            store_timeout,
        }
    }

    /// One entry per player with at least one completed match, sorted by name
    pub async fn compute_stats(&self, group_name: &str) -> Result<Vec<PlayerStats>, PadelError> {
        let completed = bounded(
            self.store_timeout,
            "completed_matches",
            self.matches
                .list_by_status(group_name, MatchStatus::Completed),
        )
        .await?;

        let aggregator =
            StatsAggregator::from_history(completed.iter().map(|(game, detail)| (game, detail)));
        if aggregator.is_empty() {
            return Ok(Vec::new());
        }

        let names = bounded(
            self.store_timeout,
            "player_names",
            self.players.names_by_id(&aggregator.player_ids()),
        )
        .await?;

        debug!(
            "Computed stats over {} completed matches in group '{}'",
            completed.len(),
            group_name
        );
        Ok(aggregator.finish(&names))
    }
}
