use std::time::Duration;

use tracing::info;

use crate::auth::{PasswordHasher, check_password};
use crate::store::bounded;
use padel_persistence::repositories::GroupRepository;
use padel_types::{Group, GroupAccess, GroupDetails, GroupId, PadelError};

/// Owns group identity and the password gate in front of every group-scoped call
pub struct GroupDirectory {
    groups: GroupRepository,
    hasher: PasswordHasher,
    store_timeout: Duration,
}

impl GroupDirectory {
    pub fn new(groups: GroupRepository, hasher: PasswordHasher, store_timeout: Duration) -> Self {
        Self {
            groups,
            hasher,
            store_timeout,
        }
    }

    pub async fn create_group(&self, name: &str, password: &str) -> Result<Group, PadelError> {
        if name.trim().is_empty() || password.is_empty() {
            return Err(PadelError::invalid_input("missing name or password"));
        }

        let hash = self.hasher.hash(password).await?;

        match bounded(
            self.store_timeout,
            "create_group",
            self.groups.create_group(name, &hash),
        )
        .await?
        {
            Some(group) => {
                info!("Created group '{}'", group.name);
                Ok(group)
            }
            None => Err(PadelError::DuplicateGroup {
                name: name.to_string(),
            }),
        }
    }

    pub async fn get_group_by_name(&self, name: &str) -> Result<Group, PadelError> {
        bounded(
            self.store_timeout,
            "get_group_by_name",
            self.groups.find_by_name(name),
        )
        .await?
        .ok_or_else(|| PadelError::GroupNotFound {
            name: name.to_string(),
        })
    }

    pub async fn get_group_by_id(&self, id: GroupId) -> Result<Group, PadelError> {
        bounded(
            self.store_timeout,
            "get_group_by_id",
            self.groups.find_by_id(id),
        )
        .await?
        .ok_or_else(|| PadelError::GroupNotFound {
            name: id.to_string(),
        })
    }

    pub async fn list_groups(&self) -> Result<Vec<GroupDetails>, PadelError> {
        bounded(self.store_timeout, "list_groups", self.groups.list_groups()).await
    }

    pub fn check_password(&self, password: &str, hash: &str) -> bool {
        check_password(password, hash)
    }

    /// Resolve the acting group, failing unless the password matches
    pub async fn authenticate(
        &self,
        name: &str,
        password: Option<&str>,
    ) -> Result<Group, PadelError> {
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or(PadelError::InvalidPassword)?;
        let group = self.get_group_by_name(name).await?;

        if self.hasher.verify(password, &group.password_hash).await? {
            Ok(group)
        } else {
            Err(PadelError::InvalidPassword)
        }
    }

    /// Public view of a group; a wrong or missing password is not an error here
    pub async fn access(
        &self,
        name: &str,
        password: Option<&str>,
    ) -> Result<GroupAccess, PadelError> {
        let group = self.get_group_by_name(name).await?;

        let is_authenticated = match password.filter(|p| !p.is_empty()) {
            Some(password) => self.hasher.verify(password, &group.password_hash).await?,
            None => false,
        };

        Ok(GroupAccess {
            name: group.name,
            created_at: group.created_at,
            is_authenticated,
        })
    }
}
