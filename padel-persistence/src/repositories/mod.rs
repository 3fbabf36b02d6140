pub mod group_repository;
pub mod match_repository;
pub mod player_repository;

pub use group_repository::GroupRepository;
pub use match_repository::MatchRepository;
pub use player_repository::PlayerRepository;

use sea_orm::{DbErr, SqlErr};

/// Inserts rely on unique indexes instead of a count-then-insert pre-check
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
pub(crate) async fn setup_test_db() -> sea_orm::DatabaseConnection {
    use migration::{Migrator, MigratorTrait};

    let db = crate::connection::connect_to_memory_database().await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}
