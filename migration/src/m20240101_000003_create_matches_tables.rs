use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Matches::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Matches::GroupName).string().not_null())
                    .col(
                        ColumnDef::new(Matches::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Matches::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing and stats always filter by group and sort by time
        manager
            .create_index(
                Index::create()
                    .name("idx_matches_group_name_timestamp")
                    .table(Matches::Table)
                    .col(Matches::GroupName)
                    .col(Matches::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MatchDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MatchDetails::MatchId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MatchDetails::Team1Player1).uuid().not_null())
                    .col(ColumnDef::new(MatchDetails::Team1Player2).uuid().not_null())
                    .col(ColumnDef::new(MatchDetails::Team2Player1).uuid().not_null())
                    .col(ColumnDef::new(MatchDetails::Team2Player2).uuid().not_null())
                    .col(
                        ColumnDef::new(MatchDetails::ScoreTeam1)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(MatchDetails::ScoreTeam2)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_details_match_id")
                            .from(MatchDetails::Table, MatchDetails::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MatchDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Matches::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Matches {
    Table,
    Id,
    GroupName,
    Timestamp,
    Status,
}

#[derive(DeriveIden)]
enum MatchDetails {
    Table,
    MatchId,
    #[sea_orm(iden = "team1_player1")]
    Team1Player1,
    #[sea_orm(iden = "team1_player2")]
    Team1Player2,
    #[sea_orm(iden = "team2_player1")]
    Team2Player1,
    #[sea_orm(iden = "team2_player2")]
    Team2Player2,
    #[sea_orm(iden = "score_team1")]
    ScoreTeam1,
    #[sea_orm(iden = "score_team2")]
    ScoreTeam2,
}
