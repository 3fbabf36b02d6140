#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use padel_persistence::connection::{connect_and_migrate, connect_to_memory_database};
use padel_persistence::repositories::{GroupRepository, MatchRepository, PlayerRepository};
use padel_server::auth::PasswordHasher;
use padel_server::group_directory::GroupDirectory;
use padel_server::match_manager::{MatchManager, MatchSettings};
use padel_server::player_directory::PlayerDirectory;
use padel_server::statistics::StatisticsService;
use padel_types::{Group, PlayerId};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

pub const TEST_GROUP: &str = "tuesday-club";
pub const TEST_PASSWORD: &str = "secret";

/// Lowest cost bcrypt accepts, keeps the suite fast
pub const TEST_BCRYPT_COST: u32 = 4;

/// Test setup that provides all services over one database
pub struct TestSetup {
    pub db: DatabaseConnection,
    pub groups: GroupDirectory,
    pub players: PlayerDirectory,
    pub matches: Arc<MatchManager>,
    pub stats: StatisticsService,
}

impl TestSetup {
    pub async fn new() -> Self {
        let db = connect_to_memory_database().await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        Self::with_database(db)
    }

    /// Setup over a fresh SQLite file with a multi-connection pool, so
    /// concurrent writers meet real database locking
    pub async fn file_backed() -> (Self, TempDatabase) {
        let path = std::env::temp_dir().join(format!("padel-test-{}.db", Uuid::new_v4()));
        let url = format!("sqlite://{}?mode=rwc", path.display());
        let db = connect_and_migrate(&url).await.unwrap();
        (Self::with_database(db), TempDatabase { path })
    }

    pub fn with_database(db: DatabaseConnection) -> Self {
        let timeout = Duration::from_secs(5);
        let group_repository = GroupRepository::new(db.clone());
        let player_repository = PlayerRepository::new(db.clone());
        let match_repository = MatchRepository::new(db.clone());

        Self {
            groups: GroupDirectory::new(
                group_repository.clone(),
                PasswordHasher::new(TEST_BCRYPT_COST),
                timeout,
            ),
            players: PlayerDirectory::new(player_repository.clone(), group_repository, timeout),
            matches: Arc::new(MatchManager::new(
                match_repository.clone(),
                player_repository.clone(),
                MatchSettings {
                    store_timeout: timeout,
                    ..MatchSettings::default()
                },
            )),
            stats: StatisticsService::new(match_repository, player_repository, timeout),
            db,
        }
    }

    pub async fn create_group(&self, name: &str) -> Group {
        self.groups.create_group(name, TEST_PASSWORD).await.unwrap()
    }

    /// Adds the named players to a group, returning their ids in order
    pub async fn add_players(&self, group_name: &str, names: &[&str]) -> Vec<PlayerId> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            ids.push(self.players.add_player(group_name, name).await.unwrap().id);
        }
        ids
    }

    /// Creates the test group with four players
    pub async fn with_four_players() -> (Self, Vec<PlayerId>) {
        let setup = Self::new().await;
        let ids = setup.seed_four_players().await;
        (setup, ids)
    }

    pub async fn seed_four_players(&self) -> Vec<PlayerId> {
        self.create_group(TEST_GROUP).await;
        self.add_players(TEST_GROUP, &["Ana", "Bruno", "Carla", "Diego"])
            .await
    }
}

/// Removes the database file and its WAL companions when dropped
pub struct TempDatabase {
    path: PathBuf,
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}
