use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::entities::{groups, prelude::*};
use crate::repositories::is_unique_violation;
use crate::StoreResult;
use padel_types::{Group, GroupDetails, GroupId};

#[derive(Clone)]
pub struct GroupRepository {
    db: DatabaseConnection,
}

impl GroupRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_group(model: groups::Model) -> Group {
        Group {
            id: model.id,
            name: model.name,
            password_hash: model.password_hash,
            created_at: model.created_at.to_rfc3339(),
        }
    }

    /// Returns `None` when the name is already taken
    pub async fn create_group(&self, name: &str, password_hash: &str) -> StoreResult<Option<Group>> {
        let group_model = groups::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(name.to_string()),
            password_hash: ActiveValue::Set(password_hash.to_string()),
            created_at: ActiveValue::Set(chrono::Utc::now().into()),
        };

        let inserted = match Groups::insert(group_model).exec(&self.db).await {
            Ok(inserted) => inserted,
            Err(err) if is_unique_violation(&err) => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let created = Groups::find_by_id(inserted.last_insert_id)
            .one(&self.db)
            .await?
            .map(Self::model_to_group);

        Ok(created)
    }

    pub async fn find_by_name(&self, name: &str) -> StoreResult<Option<Group>> {
        let group_model = Groups::find()
            .filter(groups::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(group_model.map(Self::model_to_group))
    }

    pub async fn find_by_id(&self, id: GroupId) -> StoreResult<Option<Group>> {
        let group_model = Groups::find_by_id(id).one(&self.db).await?;
        Ok(group_model.map(Self::model_to_group))
    }

    pub async fn list_groups(&self) -> StoreResult<Vec<GroupDetails>> {
        let groups = Groups::find()
            .order_by_asc(groups::Column::Name)
            .all(&self.db)
            .await?;

        Ok(groups
            .into_iter()
            .map(|model| GroupDetails {
                name: model.name,
                created_at: model.created_at.to_rfc3339(),
            })
            .collect())
    }
}
