use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub group_name: String,
    pub timestamp: DateTimeWithTimeZone,
    /// "pending" | "completed" | "cancelled"
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::match_details::Entity")]
    MatchDetails,
}

impl Related<super::match_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MatchDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
