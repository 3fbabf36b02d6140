#![allow(dead_code)]

use padel_types::{Match, MatchDetail, MatchStatus, PlayerId};
use uuid::Uuid;

/// Four fresh player ids
pub fn four_players() -> [PlayerId; 4] {
    [
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
    ]
}

/// Creates a match record with the given lineup, status and score
pub fn create_match_record(
    players: [PlayerId; 4],
    status: MatchStatus,
    score_team1: i32,
    score_team2: i32,
) -> (Match, MatchDetail) {
    let match_id = Uuid::new_v4();
    (
        Match {
            id: match_id,
            group_name: "test-group".to_string(),
            timestamp: "2024-03-01T18:30:00+00:00".to_string(),
            status,
        },
        MatchDetail {
            match_id,
            team1: [players[0], players[1]],
            team2: [players[2], players[3]],
            score_team1,
            score_team2,
        },
    )
}

/// Creates a completed match record
pub fn completed(players: [PlayerId; 4], score_team1: i32, score_team2: i32) -> (Match, MatchDetail) {
    create_match_record(players, MatchStatus::Completed, score_team1, score_team2)
}
