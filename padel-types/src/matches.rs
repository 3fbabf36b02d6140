use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::{MatchId, PlayerId, PlayerInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum MatchStatus {
    Pending,   // Teams fixed, waiting for a result
    Completed, // Scores submitted
    Cancelled, // Withdrawn before a result
}

impl MatchStatus {
    pub const ALL: [MatchStatus; 3] = [
        MatchStatus::Pending,
        MatchStatus::Completed,
        MatchStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Completed => "completed",
            MatchStatus::Cancelled => "cancelled",
        }
    }

    /// Only `pending` may move, and only into one of the terminal states
    pub fn can_transition_to(&self, next: MatchStatus) -> bool {
        matches!(
            (self, next),
            (MatchStatus::Pending, MatchStatus::Completed)
                | (MatchStatus::Pending, MatchStatus::Cancelled)
        )
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MatchStatus::Pending),
            "completed" => Ok(MatchStatus::Completed),
            "cancelled" => Ok(MatchStatus::Cancelled),
            other => Err(format!("unknown match status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Match {
    pub id: MatchId,
    pub group_name: String,
    pub timestamp: String, // ISO 8601 string
    pub status: MatchStatus,
}

/// Team composition and score payload, owned 1:1 by a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchDetail {
    pub match_id: MatchId,
    pub team1: [PlayerId; 2],
    pub team2: [PlayerId; 2],
    pub score_team1: i32,
    pub score_team2: i32,
}

impl MatchDetail {
    pub fn participants(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.team1.iter().chain(self.team2.iter()).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchResponse {
    pub id: MatchId,
    pub group_name: String,
    pub timestamp: String,
    pub team1: Vec<PlayerInfo>,
    pub team2: Vec<PlayerInfo>,
    pub score_team1: i32,
    pub score_team2: i32,
    pub status: MatchStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchPage {
    pub matches: Vec<MatchResponse>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}
