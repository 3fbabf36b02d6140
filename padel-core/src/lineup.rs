use std::collections::HashSet;

use padel_types::{PadelError, PlayerId};

pub const PLAYERS_PER_MATCH: usize = 4;

/// Two fixed pairs, taken from the caller's id order.
/// Any shuffling is the caller's business and happens before this point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lineup {
    pub team1: [PlayerId; 2],
    pub team2: [PlayerId; 2],
}

impl Lineup {
    /// Validate a 2v2 lineup: exactly four ids, none repeated.
    /// `ids[0..2]` becomes team 1 and `ids[2..4]` team 2.
    pub fn from_ids(ids: &[PlayerId]) -> Result<Self, PadelError> {
        if ids.len() != PLAYERS_PER_MATCH {
            return Err(PadelError::invalid_input(format!(
                "exactly {} players required for a match, got {}",
                PLAYERS_PER_MATCH,
                ids.len()
            )));
        }

        if has_duplicate_players(ids) {
            return Err(PadelError::invalid_input(
                "duplicate players are not allowed in a match",
            ));
        }

        Ok(Self {
            team1: [ids[0], ids[1]],
            team2: [ids[2], ids[3]],
        })
    }

    pub fn players(&self) -> [PlayerId; PLAYERS_PER_MATCH] {
        [self.team1[0], self.team1[1], self.team2[0], self.team2[1]]
    }
}

pub fn has_duplicate_players(ids: &[PlayerId]) -> bool {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().any(|id| !seen.insert(*id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn ids(n: usize) -> Vec<PlayerId> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn test_lineup_splits_by_input_order() {
        let ids = ids(4);
        let lineup = Lineup::from_ids(&ids).unwrap();

        assert_eq!(lineup.team1, [ids[0], ids[1]]);
        assert_eq!(lineup.team2, [ids[2], ids[3]]);
        assert_eq!(lineup.players().to_vec(), ids);
    }

    #[test]
    fn test_lineup_rejects_wrong_player_count() {
        for n in [0, 3, 5] {
            let result = Lineup::from_ids(&ids(n));
            assert!(matches!(result, Err(PadelError::InvalidInput { .. })));
        }
    }

    #[test]
    fn test_lineup_rejects_repeated_ids() {
        let mut ids = ids(4);

        // Repeated across teams
        ids[3] = ids[0];
        assert!(matches!(
            Lineup::from_ids(&ids),
            Err(PadelError::InvalidInput { .. })
        ));

        // Repeated within a team
        let mut ids = self::ids(4);
        ids[1] = ids[0];
        assert!(matches!(
            Lineup::from_ids(&ids),
            Err(PadelError::InvalidInput { .. })
        ));
    }
}
