use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::PlayerId;

/// Derived per-player aggregate over the completed matches of one group.
/// Never persisted; recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub player_name: String,

    // Game statistics
    pub total_games: i32,
    pub games_won: i32,
    pub games_lost: i32,
    pub game_win_rate: f64,
    pub game_loss_rate: f64,

    // Point statistics
    pub total_points: i32,
    pub points_won: i32,
    pub points_lost: i32,
    pub point_win_rate: f64,
    pub point_loss_rate: f64,
}

impl PlayerStats {
    pub fn new(player_id: PlayerId, player_name: String) -> Self {
        Self {
            player_id,
            player_name,
            total_games: 0,
            games_won: 0,
            games_lost: 0,
            game_win_rate: 0.0,
            game_loss_rate: 0.0,
            total_points: 0,
            points_won: 0,
            points_lost: 0,
            point_win_rate: 0.0,
            point_loss_rate: 0.0,
        }
    }
}
