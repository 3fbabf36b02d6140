use std::time::Duration;

use tracing::info;

use crate::store::bounded;
use padel_persistence::repositories::{GroupRepository, PlayerRepository};
use padel_types::{PadelError, Player};

pub struct PlayerDirectory {
    players: PlayerRepository,
    groups: GroupRepository,
    store_timeout: Duration,
}

impl PlayerDirectory {
    pub fn new(players: PlayerRepository, groups: GroupRepository, store_timeout: Duration) -> Self {
        Self {
            players,
            groups,
            store_timeout,
        }
    }

    /// Add a uniquely named player; the store's unique index settles races
    pub async fn add_player(&self, group_name: &str, name: &str) -> Result<Player, PadelError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PadelError::invalid_input("player name must not be empty"));
        }

        let group = bounded(
            self.store_timeout,
            "get_group_by_name",
            self.groups.find_by_name(group_name),
        )
        .await?;
        if group.is_none() {
            return Err(PadelError::GroupNotFound {
                name: group_name.to_string(),
            });
        }

        match bounded(
            self.store_timeout,
            "add_player",
            self.players.add_player(group_name, name),
        )
        .await?
        {
            Some(player) => {
                info!("Added player '{}' to group '{}'", player.name, group_name);
                Ok(player)
            }
            None => Err(PadelError::DuplicatePlayer {
                name: name.to_string(),
            }),
        }
    }

    pub async fn list_players(&self, group_name: &str) -> Result<Vec<Player>, PadelError> {
        bounded(
            self.store_timeout,
            "list_players",
            self.players.list_players(group_name),
        )
        .await
    }
}
