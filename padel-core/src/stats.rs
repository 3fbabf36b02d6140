use std::collections::{BTreeMap, HashMap};

use padel_types::{Match, MatchDetail, MatchStatus, PlayerId, PlayerStats};

use crate::MatchOutcome;

pub const UNKNOWN_PLAYER_NAME: &str = "Unknown";

/// Tallies per-player results over a group's completed matches.
///
/// Tie policy: a tied score is a loss for all four players. This mirrors
/// the historical behaviour of the tracker and is kept on purpose; there is
/// no draw column.
#[derive(Debug, Default)]
pub struct StatsAggregator {
    tallies: BTreeMap<PlayerId, PlayerStats>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate a match history, skipping anything that is not completed
    pub fn from_history<'a, I>(history: I) -> Self
    where
        I: IntoIterator<Item = (&'a Match, &'a MatchDetail)>,
    {
        let mut aggregator = Self::new();
        for (game, detail) in history {
            if game.status == MatchStatus::Completed {
                aggregator.record(detail);
            }
        }
        aggregator
    }

    /// Record one completed match for its four participants
    pub fn record(&mut self, detail: &MatchDetail) {
        let outcome = MatchOutcome::from_scores(detail.score_team1, detail.score_team2);

        for player_id in detail.team1 {
            self.tally(
                player_id,
                detail.score_team1,
                detail.score_team2,
                outcome.is_win_for_team1(),
            );
        }
        for player_id in detail.team2 {
            self.tally(
                player_id,
                detail.score_team2,
                detail.score_team1,
                outcome.is_win_for_team2(),
            );
        }
    }

    fn tally(&mut self, player_id: PlayerId, own_score: i32, opposing_score: i32, won: bool) {
        let stats = self
            .tallies
            .entry(player_id)
            .or_insert_with(|| PlayerStats::new(player_id, String::new()));

        stats.total_games += 1;
        stats.total_points += own_score;
        stats.points_won += own_score;
        stats.points_lost += opposing_score;
        if won {
            stats.games_won += 1;
        } else {
            stats.games_lost += 1;
        }
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.tallies.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Attach names, compute rates and sort by player name, then id
    pub fn finish(self, names: &HashMap<PlayerId, String>) -> Vec<PlayerStats> {
        let mut result: Vec<PlayerStats> = self
            .tallies
            .into_values()
            .map(|mut stats| {
                stats.player_name = names
                    .get(&stats.player_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_PLAYER_NAME.to_string());

                if stats.total_games > 0 {
                    stats.game_win_rate = percentage(stats.games_won, stats.total_games);
                    stats.game_loss_rate = percentage(stats.games_lost, stats.total_games);
                }

                // Point rates are taken over every point played, both sides
                let points_played = stats.points_won + stats.points_lost;
                if points_played > 0 {
                    stats.point_win_rate = percentage(stats.points_won, points_played);
                    stats.point_loss_rate = percentage(stats.points_lost, points_played);
                }

                stats
            })
            .collect();

        result.sort_by(|a, b| {
            a.player_name
                .cmp(&b.player_name)
                .then_with(|| a.player_id.cmp(&b.player_id))
        });
        result
    }
}

fn percentage(part: i32, total: i32) -> f64 {
    part as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    struct Fixture {
        ids: [PlayerId; 4],
        names: HashMap<PlayerId, String>,
    }

    fn fixture() -> Fixture {
        let ids = [
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        ];
        let names = ids
            .iter()
            .zip(["Ana", "Bea", "Carla", "Dani"])
            .map(|(id, name)| (*id, name.to_string()))
            .collect();
        Fixture { ids, names }
    }

    fn detail(ids: &[PlayerId; 4], score_team1: i32, score_team2: i32) -> MatchDetail {
        MatchDetail {
            match_id: Uuid::new_v4(),
            team1: [ids[0], ids[1]],
            team2: [ids[2], ids[3]],
            score_team1,
            score_team2,
        }
    }

    fn find<'a>(stats: &'a [PlayerStats], name: &str) -> &'a PlayerStats {
        stats.iter().find(|s| s.player_name == name).unwrap()
    }

    #[test]
    fn test_single_match_tallies() {
        let fx = fixture();
        let mut aggregator = StatsAggregator::new();
        aggregator.record(&detail(&fx.ids, 6, 3));

        let stats = aggregator.finish(&fx.names);
        assert_eq!(stats.len(), 4);

        for name in ["Ana", "Bea"] {
            let s = find(&stats, name);
            assert_eq!(s.total_games, 1);
            assert_eq!(s.games_won, 1);
            assert_eq!(s.games_lost, 0);
            assert_eq!(s.total_points, 6);
            assert_eq!(s.points_won, 6);
            assert_eq!(s.points_lost, 3);
            assert_eq!(s.game_win_rate, 100.0);
            assert_eq!(s.point_win_rate, 6.0 / 9.0 * 100.0);
        }

        for name in ["Carla", "Dani"] {
            let s = find(&stats, name);
            assert_eq!(s.games_lost, 1);
            assert_eq!(s.games_won, 0);
            assert_eq!(s.total_points, 3);
            assert_eq!(s.game_loss_rate, 100.0);
            assert_eq!(s.point_loss_rate, 6.0 / 9.0 * 100.0);
            assert_eq!(s.point_win_rate, 3.0 / 9.0 * 100.0);
        }
    }

    #[test]
    fn test_tie_counts_as_loss_for_both_teams() {
        let fx = fixture();
        let mut aggregator = StatsAggregator::new();
        aggregator.record(&detail(&fx.ids, 4, 4));

        let stats = aggregator.finish(&fx.names);
        assert!(stats.iter().all(|s| s.games_won == 0 && s.games_lost == 1));
    }

    #[test]
    fn test_zero_zero_result_leaves_point_rates_at_zero() {
        let fx = fixture();
        let mut aggregator = StatsAggregator::new();
        aggregator.record(&detail(&fx.ids, 0, 0));

        let stats = aggregator.finish(&fx.names);
        assert!(stats.iter().all(|s| s.point_win_rate == 0.0 && s.point_loss_rate == 0.0));
        assert!(stats.iter().all(|s| s.game_loss_rate == 100.0));
    }

    #[test]
    fn test_output_sorted_by_name() {
        let fx = fixture();
        let mut aggregator = StatsAggregator::new();
        // Dani and Ana swap sides compared to the fixture order
        aggregator.record(&detail(&[fx.ids[3], fx.ids[1], fx.ids[2], fx.ids[0]], 2, 6));

        let names: Vec<_> = aggregator
            .finish(&fx.names)
            .into_iter()
            .map(|s| s.player_name)
            .collect();
        assert_eq!(names, vec!["Ana", "Bea", "Carla", "Dani"]);
    }

    #[test]
    fn test_history_ignores_non_completed_matches() {
        let fx = fixture();
        let completed = detail(&fx.ids, 6, 2);
        let pending = detail(&fx.ids, 0, 0);
        let game = |id, status| Match {
            id,
            group_name: "club".to_string(),
            timestamp: "2024-05-01T10:00:00+00:00".to_string(),
            status,
        };
        let completed_match = game(completed.match_id, MatchStatus::Completed);
        let pending_match = game(pending.match_id, MatchStatus::Pending);

        let aggregator = StatsAggregator::from_history([
            (&completed_match, &completed),
            (&pending_match, &pending),
        ]);
        let stats = aggregator.finish(&fx.names);

        assert!(stats.iter().all(|s| s.total_games == 1));
    }

    #[test]
    fn test_unknown_player_keeps_entry() {
        let fx = fixture();
        let mut aggregator = StatsAggregator::new();
        aggregator.record(&detail(&fx.ids, 6, 1));

        let stats = aggregator.finish(&HashMap::new());
        assert_eq!(stats.len(), 4);
        assert!(stats.iter().all(|s| s.player_name == UNKNOWN_PLAYER_NAME));
    }

    #[test]
    fn test_empty_history_yields_no_entries() {
        let aggregator = StatsAggregator::new();
        assert!(aggregator.is_empty());
        assert!(aggregator.finish(&HashMap::new()).is_empty());
    }
}
