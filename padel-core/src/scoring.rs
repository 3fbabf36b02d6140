use padel_types::PadelError;

pub const DEFAULT_MAX_SCORE: i32 = 10;

/// Inclusive range a submitted team score must fall in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRange {
    pub max: i32,
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self {
            max: DEFAULT_MAX_SCORE,
        }
    }
}

impl ScoreRange {
    pub fn new(max: i32) -> Self {
        Self { max }
    }

    pub fn contains(&self, score: i32) -> bool {
        (0..=self.max).contains(&score)
    }

    /// Both scores must be in range; the first offender is reported
    pub fn validate(&self, score_team1: i32, score_team2: i32) -> Result<(), PadelError> {
        for score in [score_team1, score_team2] {
            if !self.contains(score) {
                return Err(PadelError::InvalidScore {
                    score,
                    max: self.max,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Team1Won,
    Team2Won,
    Tie,
}

impl MatchOutcome {
    pub fn from_scores(score_team1: i32, score_team2: i32) -> Self {
        match score_team1.cmp(&score_team2) {
            std::cmp::Ordering::Greater => MatchOutcome::Team1Won,
            std::cmp::Ordering::Less => MatchOutcome::Team2Won,
            std::cmp::Ordering::Equal => MatchOutcome::Tie,
        }
    }

    /// Whether the given side is credited with a win.
    /// A tie credits nobody: both sides record a loss.
    pub fn is_win_for_team1(&self) -> bool {
        matches!(self, MatchOutcome::Team1Won)
    }

    pub fn is_win_for_team2(&self) -> bool {
        matches!(self, MatchOutcome::Team2Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range_accepts_bounds() {
        let range = ScoreRange::default();
        assert!(range.validate(0, 10).is_ok());
        assert!(range.validate(10, 0).is_ok());
    }

    #[test]
    fn test_out_of_range_scores_rejected() {
        let range = ScoreRange::default();
        assert_eq!(
            range.validate(11, 3),
            Err(PadelError::InvalidScore { score: 11, max: 10 })
        );
        assert_eq!(
            range.validate(6, -1),
            Err(PadelError::InvalidScore { score: -1, max: 10 })
        );
    }

    #[test]
    fn test_configured_upper_bound() {
        let range = ScoreRange::new(8);
        assert!(range.validate(8, 6).is_ok());
        assert!(matches!(
            range.validate(9, 6),
            Err(PadelError::InvalidScore { score: 9, max: 8 })
        ));
    }

    #[test]
    fn test_tie_is_a_win_for_nobody() {
        let outcome = MatchOutcome::from_scores(5, 5);
        assert_eq!(outcome, MatchOutcome::Tie);
        assert!(!outcome.is_win_for_team1());
        assert!(!outcome.is_win_for_team2());

        assert!(MatchOutcome::from_scores(6, 3).is_win_for_team1());
        assert!(MatchOutcome::from_scores(2, 6).is_win_for_team2());
    }
}
