use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::entities::{match_details, matches, prelude::*};
use crate::{StoreError, StoreResult};
use padel_types::{Match, MatchDetail, MatchId, MatchStatus, PlayerId};

/// A match together with its 1:1 detail record
pub type MatchRecord = (Match, MatchDetail);

/// Stored statuses a match may leave to enter `next`
fn statuses_moving_to(next: MatchStatus) -> Vec<&'static str> {
    MatchStatus::ALL
        .into_iter()
        .filter(|status| status.can_transition_to(next))
        .map(|status| status.as_str())
        .collect()
}

#[derive(Clone)]
pub struct MatchRepository {
    db: DatabaseConnection,
}

impl MatchRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn models_to_record(
        model: matches::Model,
        detail: Option<match_details::Model>,
    ) -> StoreResult<MatchRecord> {
        let status = model
            .status
            .parse::<MatchStatus>()
            .map_err(StoreError::Corrupt)?;
        let detail = detail.ok_or_else(|| {
            StoreError::Corrupt(format!("match {} has no detail record", model.id))
        })?;

        let game = Match {
            id: model.id,
            group_name: model.group_name,
            timestamp: model.timestamp.to_rfc3339(),
            status,
        };
        let detail = MatchDetail {
            match_id: detail.match_id,
            team1: [detail.team1_player1, detail.team1_player2],
            team2: [detail.team2_player1, detail.team2_player2],
            score_team1: detail.score_team1,
            score_team2: detail.score_team2,
        };

        Ok((game, detail))
    }

    fn models_to_records(
        rows: Vec<(matches::Model, Option<match_details::Model>)>,
    ) -> StoreResult<Vec<MatchRecord>> {
        rows.into_iter()
            .map(|(model, detail)| Self::models_to_record(model, detail))
            .collect()
    }

    /// Insert a pending match and its detail in one transaction
    pub async fn create_match(
        &self,
        group_name: &str,
        team1: [PlayerId; 2],
        team2: [PlayerId; 2],
    ) -> StoreResult<MatchRecord> {
        let match_id = Uuid::new_v4();
        let txn = self.db.begin().await?;

        let match_model = matches::ActiveModel {
            id: ActiveValue::Set(match_id),
            group_name: ActiveValue::Set(group_name.to_string()),
            timestamp: ActiveValue::Set(chrono::Utc::now().into()),
            status: ActiveValue::Set(MatchStatus::Pending.as_str().to_string()),
        };
        Matches::insert(match_model).exec(&txn).await?;

        let detail_model = match_details::ActiveModel {
            match_id: ActiveValue::Set(match_id),
            team1_player1: ActiveValue::Set(team1[0]),
            team1_player2: ActiveValue::Set(team1[1]),
            team2_player1: ActiveValue::Set(team2[0]),
            team2_player2: ActiveValue::Set(team2[1]),
            score_team1: ActiveValue::Set(0),
            score_team2: ActiveValue::Set(0),
        };
        MatchDetails::insert(detail_model).exec(&txn).await?;

        txn.commit().await?;
        debug!("Created match {} in group {}", match_id, group_name);

        self.find_in_group(group_name, match_id)
            .await?
            .ok_or_else(|| StoreError::Corrupt(format!("created match {} not found", match_id)))
    }

    /// Delete a pending match and its detail together.
    /// Returns `false`, with nothing changed, if no pending match matched.
    pub async fn cancel_pending(&self, group_name: &str, match_id: MatchId) -> StoreResult<bool> {
        let txn = self.db.begin().await?;

        // Child row first; the conditional delete below decides whether this sticks
        MatchDetails::delete_many()
            .filter(match_details::Column::MatchId.eq(match_id))
            .exec(&txn)
            .await?;

        let deleted = Matches::delete_many()
            .filter(matches::Column::Id.eq(match_id))
            .filter(matches::Column::GroupName.eq(group_name))
            .filter(matches::Column::Status.is_in(statuses_moving_to(MatchStatus::Cancelled)))
            .exec(&txn)
            .await?;

        if deleted.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        txn.commit().await?;
        Ok(true)
    }

    /// Move a pending match to completed and write both scores, or do nothing.
    /// Returns `false` if the match was not pending at commit time.
    pub async fn complete_pending(
        &self,
        group_name: &str,
        match_id: MatchId,
        score_team1: i32,
        score_team2: i32,
    ) -> StoreResult<bool> {
        let txn = self.db.begin().await?;

        let updated = Matches::update_many()
            .col_expr(
                matches::Column::Status,
                Expr::value(MatchStatus::Completed.as_str()),
            )
            .filter(matches::Column::Id.eq(match_id))
            .filter(matches::Column::GroupName.eq(group_name))
            .filter(matches::Column::Status.is_in(statuses_moving_to(MatchStatus::Completed)))
            .exec(&txn)
            .await?;

        if updated.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        let scored = MatchDetails::update_many()
            .col_expr(match_details::Column::ScoreTeam1, Expr::value(score_team1))
            .col_expr(match_details::Column::ScoreTeam2, Expr::value(score_team2))
            .filter(match_details::Column::MatchId.eq(match_id))
            .exec(&txn)
            .await?;

        if scored.rows_affected != 1 {
            // Dropping the transaction rolls the status change back
            return Err(StoreError::Corrupt(format!(
                "match {} has no detail record",
                match_id
            )));
        }

        txn.commit().await?;
        Ok(true)
    }

    pub async fn find_in_group(
        &self,
        group_name: &str,
        match_id: MatchId,
    ) -> StoreResult<Option<MatchRecord>> {
        let row = Matches::find_by_id(match_id)
            .filter(matches::Column::GroupName.eq(group_name))
            .find_also_related(MatchDetails)
            .one(&self.db)
            .await?;

        row.map(|(model, detail)| Self::models_to_record(model, detail))
            .transpose()
    }

    pub async fn count_in_group(&self, group_name: &str) -> StoreResult<u64> {
        let total = Matches::find()
            .filter(matches::Column::GroupName.eq(group_name))
            .count(&self.db)
            .await?;
        Ok(total)
    }

    /// Newest first; id breaks timestamp ties so paging is stable
    pub async fn list_page(
        &self,
        group_name: &str,
        offset: u64,
        limit: u64,
    ) -> StoreResult<Vec<MatchRecord>> {
        let rows = Matches::find()
            .filter(matches::Column::GroupName.eq(group_name))
            .order_by_desc(matches::Column::Timestamp)
            .order_by_desc(matches::Column::Id)
            .find_also_related(MatchDetails)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Self::models_to_records(rows)
    }

    pub async fn list_by_status(
        &self,
        group_name: &str,
        status: MatchStatus,
    ) -> StoreResult<Vec<MatchRecord>> {
        let rows = Matches::find()
            .filter(matches::Column::GroupName.eq(group_name))
            .filter(matches::Column::Status.eq(status.as_str()))
            .order_by_desc(matches::Column::Timestamp)
            .order_by_desc(matches::Column::Id)
            .find_also_related(MatchDetails)
            .all(&self.db)
            .await?;

        Self::models_to_records(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::setup_test_db;

    fn lineup() -> ([PlayerId; 2], [PlayerId; 2]) {
        (
            [Uuid::new_v4(), Uuid::new_v4()],
            [Uuid::new_v4(), Uuid::new_v4()],
        )
    }

    #[test]
    fn test_only_pending_matches_are_resolvable() {
        assert_eq!(statuses_moving_to(MatchStatus::Cancelled), vec!["pending"]);
        assert_eq!(statuses_moving_to(MatchStatus::Completed), vec!["pending"]);
        assert!(statuses_moving_to(MatchStatus::Pending).is_empty());
    }

    #[tokio::test]
    async fn test_create_match_writes_both_records() {
        let repo = MatchRepository::new(setup_test_db().await);
        let (team1, team2) = lineup();

        let (game, detail) = repo.create_match("club", team1, team2).await.unwrap();
        assert_eq!(game.status, MatchStatus::Pending);
        assert_eq!(game.group_name, "club");
        assert_eq!(detail.match_id, game.id);
        assert_eq!(detail.team1, team1);
        assert_eq!(detail.team2, team2);
        assert_eq!((detail.score_team1, detail.score_team2), (0, 0));
    }

    #[tokio::test]
    async fn test_cancel_pending_removes_match_and_detail() {
        let db = setup_test_db().await;
        let repo = MatchRepository::new(db.clone());
        let (team1, team2) = lineup();
        let (game, _) = repo.create_match("club", team1, team2).await.unwrap();

        assert!(repo.cancel_pending("club", game.id).await.unwrap());
        assert!(repo.find_in_group("club", game.id).await.unwrap().is_none());

        let orphan = MatchDetails::find_by_id(game.id).one(&db).await.unwrap();
        assert!(orphan.is_none());

        // Second attempt finds nothing
        assert!(!repo.cancel_pending("club", game.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_cancel_from_other_group_changes_nothing() {
        let db = setup_test_db().await;
        let repo = MatchRepository::new(db.clone());
        let (team1, team2) = lineup();
        let (game, _) = repo.create_match("club", team1, team2).await.unwrap();

        assert!(!repo.cancel_pending("intruders", game.id).await.unwrap());

        // Rolled back: the detail row is still there
        let (still_there, detail) = repo.find_in_group("club", game.id).await.unwrap().unwrap();
        assert_eq!(still_there.status, MatchStatus::Pending);
        assert_eq!(detail.team1, team1);
    }

    #[tokio::test]
    async fn test_complete_pending_only_once() {
        let repo = MatchRepository::new(setup_test_db().await);
        let (team1, team2) = lineup();
        let (game, _) = repo.create_match("club", team1, team2).await.unwrap();

        assert!(repo.complete_pending("club", game.id, 6, 3).await.unwrap());
        assert!(!repo.complete_pending("club", game.id, 1, 6).await.unwrap());

        let (game, detail) = repo.find_in_group("club", game.id).await.unwrap().unwrap();
        assert_eq!(game.status, MatchStatus::Completed);
        assert_eq!((detail.score_team1, detail.score_team2), (6, 3));

        // Completed matches cannot be cancelled
        assert!(!repo.cancel_pending("club", game.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_paging_and_status_filter() {
        let repo = MatchRepository::new(setup_test_db().await);
        let mut created = Vec::new();
        for _ in 0..5 {
            let (team1, team2) = lineup();
            created.push(repo.create_match("club", team1, team2).await.unwrap().0);
        }
        let (team1, team2) = lineup();
        repo.create_match("other", team1, team2).await.unwrap();

        repo.complete_pending("club", created[1].id, 6, 2)
            .await
            .unwrap();

        assert_eq!(repo.count_in_group("club").await.unwrap(), 5);

        let first = repo.list_page("club", 0, 2).await.unwrap();
        let rest = repo.list_page("club", 2, 10).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(rest.len(), 3);

        let all: Vec<_> = first.iter().chain(rest.iter()).map(|(m, _)| m.id).collect();
        for id in created.iter().map(|m| m.id) {
            assert!(all.contains(&id));
        }

        let completed = repo
            .list_by_status("club", MatchStatus::Completed)
            .await
            .unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].0.id, created[1].id);
    }
}
