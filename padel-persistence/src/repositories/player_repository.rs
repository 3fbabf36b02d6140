use std::collections::HashMap;

use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::entities::{players, prelude::*};
use crate::repositories::is_unique_violation;
use crate::StoreResult;
use padel_types::{Player, PlayerId};

#[derive(Clone)]
pub struct PlayerRepository {
    db: DatabaseConnection,
}

impl PlayerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_player(model: players::Model) -> Player {
        Player {
            id: model.id,
            group_name: model.group_name,
            name: model.name,
        }
    }

    /// Returns `None` when the group already has a player with this name
    pub async fn add_player(&self, group_name: &str, name: &str) -> StoreResult<Option<Player>> {
        let player_model = players::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            group_name: ActiveValue::Set(group_name.to_string()),
            name: ActiveValue::Set(name.to_string()),
        };

        let inserted = match Players::insert(player_model).exec(&self.db).await {
            Ok(inserted) => inserted,
            Err(err) if is_unique_violation(&err) => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let created = Players::find_by_id(inserted.last_insert_id)
            .one(&self.db)
            .await?
            .map(Self::model_to_player);

        Ok(created)
    }

    pub async fn list_players(&self, group_name: &str) -> StoreResult<Vec<Player>> {
        let players = Players::find()
            .filter(players::Column::GroupName.eq(group_name))
            .order_by_asc(players::Column::Name)
            .all(&self.db)
            .await?;

        Ok(players.into_iter().map(Self::model_to_player).collect())
    }

    /// Players of `group_name` among `ids`; ids from other groups are dropped
    pub async fn find_in_group(
        &self,
        group_name: &str,
        ids: &[PlayerId],
    ) -> StoreResult<Vec<Player>> {
        let players = Players::find()
            .filter(players::Column::GroupName.eq(group_name))
            .filter(players::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?;

        Ok(players.into_iter().map(Self::model_to_player).collect())
    }

    pub async fn names_by_id(&self, ids: &[PlayerId]) -> StoreResult<HashMap<PlayerId, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let players = Players::find()
            .filter(players::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?;

        Ok(players.into_iter().map(|p| (p.id, p.name)).collect())
    }
}
