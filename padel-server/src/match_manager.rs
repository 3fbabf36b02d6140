use std::collections::HashMap;
use std::time::Duration;

use tracing::info;

use crate::store::bounded;
use padel_core::{ExportRow, Lineup, ScoreRange, UNKNOWN_PLAYER_NAME, render_matches_csv};
use padel_persistence::repositories::match_repository::MatchRecord;
use padel_persistence::repositories::{MatchRepository, PlayerRepository};
use padel_types::{
    MatchId, MatchPage, MatchResponse, MatchStatus, PadelError, PlayerId, PlayerInfo,
};

pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, Clone)]
pub struct MatchSettings {
    pub score_range: ScoreRange,
    pub store_timeout: Duration,
    pub recent_limit: u64,
    pub default_page_size: u64,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            score_range: ScoreRange::default(),
            store_timeout: Duration::from_secs(5),
            recent_limit: 20,
            default_page_size: 10,
        }
    }
}

/// Creates, cancels and resolves matches.
///
/// Only `pending` matches move. Cancel and result submission are single
/// conditional transactions, so two racing resolutions of the same match
/// yield one success and one failure.
pub struct MatchManager {
    matches: MatchRepository,
    players: PlayerRepository,
    settings: MatchSettings,
}

impl MatchManager {
    pub fn new(matches: MatchRepository, players: PlayerRepository, settings: MatchSettings) -> Self {
        Self {
            matches,
            players,
            settings,
        }
    }

    /// Teams follow input order: ids[0..2] against ids[2..4]
    pub async fn create_match(
        &self,
        group_name: &str,
        player_ids: &[PlayerId],
    ) -> Result<MatchResponse, PadelError> {
        let lineup = Lineup::from_ids(player_ids)?;
        let roster = lineup.players();

        let members = bounded(
            self.settings.store_timeout,
            "find_players",
            self.players.find_in_group(group_name, &roster),
        )
        .await?;
        let names: HashMap<PlayerId, String> =
            members.into_iter().map(|p| (p.id, p.name)).collect();

        if let Some(stranger) = roster.iter().find(|id| !names.contains_key(*id)) {
            return Err(PadelError::invalid_input(format!(
                "player {} is not a member of group '{}'",
                stranger, group_name
            )));
        }

        let record = bounded(
            self.settings.store_timeout,
            "create_match",
            self.matches
                .create_match(group_name, lineup.team1, lineup.team2),
        )
        .await?;

        info!("Created match {} in group '{}'", record.0.id, group_name);
        Ok(to_response(record, &names))
    }

    /// Applied one by one. The first failure stops the batch and is returned;
    /// matches created before it stay committed.
    pub async fn create_matches(
        &self,
        group_name: &str,
        lineups: &[Vec<PlayerId>],
    ) -> Result<Vec<MatchResponse>, PadelError> {
        let mut responses = Vec::with_capacity(lineups.len());
        for player_ids in lineups {
            responses.push(self.create_match(group_name, player_ids).await?);
        }
        Ok(responses)
    }

    /// Removes a pending match together with its detail
    pub async fn cancel_match(
        &self,
        group_name: &str,
        match_id: MatchId,
    ) -> Result<MatchStatus, PadelError> {
        let cancelled = bounded(
            self.settings.store_timeout,
            "cancel_match",
            self.matches.cancel_pending(group_name, match_id),
        )
        .await?;

        if !cancelled {
            return Err(PadelError::NotFoundOrAlreadyResolved { match_id });
        }

        info!("Cancelled match {} in group '{}'", match_id, group_name);
        Ok(MatchStatus::Cancelled)
    }

    pub async fn submit_results(
        &self,
        group_name: &str,
        match_id: MatchId,
        score_team1: i32,
        score_team2: i32,
    ) -> Result<MatchResponse, PadelError> {
        self.settings.score_range.validate(score_team1, score_team2)?;

        let completed = bounded(
            self.settings.store_timeout,
            "submit_results",
            self.matches
                .complete_pending(group_name, match_id, score_team1, score_team2),
        )
        .await?;

        if !completed {
            return Err(PadelError::AlreadyResolved { match_id });
        }

        info!(
            "Recorded result {}-{} for match {} in group '{}'",
            score_team1, score_team2, match_id, group_name
        );

        let record = bounded(
            self.settings.store_timeout,
            "get_match",
            self.matches.find_in_group(group_name, match_id),
        )
        .await?
        .ok_or_else(|| PadelError::CorruptRecord {
            message: format!("completed match {} disappeared", match_id),
        })?;

        let mut responses = self.resolve(vec![record]).await?;
        responses.pop().ok_or_else(|| PadelError::Internal {
            message: "resolved match list was empty".to_string(),
        })
    }

    /// `page` is 1-based; out-of-range sizes fall back to the default or the cap
    pub async fn list_matches(
        &self,
        group_name: &str,
        page: u64,
        page_size: u64,
    ) -> Result<MatchPage, PadelError> {
        let page = page.max(1);
        let page_size = match page_size {
            0 => self.settings.default_page_size,
            size => size.min(MAX_PAGE_SIZE),
        };

        let total = bounded(
            self.settings.store_timeout,
            "count_matches",
            self.matches.count_in_group(group_name),
        )
        .await?;

        // Pages past the end, including offsets beyond u64, are empty
        let matches = match (page - 1).checked_mul(page_size) {
            Some(offset) if offset < total => {
                let records = bounded(
                    self.settings.store_timeout,
                    "list_matches",
                    self.matches.list_page(group_name, offset, page_size),
                )
                .await?;
                self.resolve(records).await?
            }
            _ => Vec::new(),
        };

        Ok(MatchPage {
            matches,
            total,
            page,
            page_size,
            total_pages: total.div_ceil(page_size),
        })
    }

    pub async fn get_recent_matches(
        &self,
        group_name: &str,
        limit: Option<u64>,
    ) -> Result<Vec<MatchResponse>, PadelError> {
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(self.settings.recent_limit)
            .min(MAX_PAGE_SIZE);

        let records = bounded(
            self.settings.store_timeout,
            "recent_matches",
            self.matches.list_page(group_name, 0, limit),
        )
        .await?;

        self.resolve(records).await
    }

    /// Completed matches as CSV, newest first
    pub async fn export_matches_csv(&self, group_name: &str) -> Result<String, PadelError> {
        let records = bounded(
            self.settings.store_timeout,
            "completed_matches",
            self.matches
                .list_by_status(group_name, MatchStatus::Completed),
        )
        .await?;

        let names = self.names_for(&records).await?;
        let name_of = |id: &PlayerId| {
            names
                .get(id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_PLAYER_NAME.to_string())
        };

        let rows: Vec<ExportRow> = records
            .iter()
            .map(|(game, detail)| ExportRow {
                timestamp: game.timestamp.clone(),
                team1: detail.team1.each_ref().map(name_of),
                team2: detail.team2.each_ref().map(name_of),
                score_team1: detail.score_team1,
                score_team2: detail.score_team2,
            })
            .collect();

        info!(
            "Exported {} completed matches for group '{}'",
            rows.len(),
            group_name
        );
        Ok(render_matches_csv(&rows))
    }

    async fn names_for(
        &self,
        records: &[MatchRecord],
    ) -> Result<HashMap<PlayerId, String>, PadelError> {
        let mut ids: Vec<PlayerId> = records
            .iter()
            .flat_map(|(_, detail)| detail.participants())
            .collect();
        ids.sort();
        ids.dedup();

        bounded(
            self.settings.store_timeout,
            "player_names",
            self.players.names_by_id(&ids),
        )
        .await
    }

    async fn resolve(&self, records: Vec<MatchRecord>) -> Result<Vec<MatchResponse>, PadelError> {
        let names = self.names_for(&records).await?;
        Ok(records
            .into_iter()
            .map(|record| to_response(record, &names))
            .collect())
    }
}

fn to_response((game, detail): MatchRecord, names: &HashMap<PlayerId, String>) -> MatchResponse {
    let info = |id: &PlayerId| PlayerInfo {
        id: *id,
        name: names
            .get(id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_PLAYER_NAME.to_string()),
    };

    MatchResponse {
        id: game.id,
        group_name: game.group_name,
        timestamp: game.timestamp,
        team1: detail.team1.iter().map(info).collect(),
        team2: detail.team2.iter().map(info).collect(),
        score_team1: detail.score_team1,
        score_team2: detail.score_team2,
        status: game.status,
    }
}
