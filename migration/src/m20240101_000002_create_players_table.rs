use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Players::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Players::GroupName).string().not_null())
                    .col(ColumnDef::new(Players::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // One name per group; duplicate inserts fail on this index
        manager
            .create_index(
                Index::create()
                    .name("idx_players_group_name_name")
                    .table(Players::Table)
                    .col(Players::GroupName)
                    .col(Players::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Players::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Players {
    Table,
    Id,
    GroupName,
    Name,
}
