use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::GroupId;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    /// bcrypt hash, never sent to clients
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password_hash: String,
    pub created_at: String, // ISO 8601 string
}

/// Public listing shape for a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GroupDetails {
    pub name: String,
    pub created_at: String,
}

impl From<&Group> for GroupDetails {
    fn from(group: &Group) -> Self {
        GroupDetails {
            name: group.name.clone(),
            created_at: group.created_at.clone(),
        }
    }
}

/// Group details plus whether the caller proved knowledge of the password
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GroupAccess {
    pub name: String,
    pub created_at: String,
    pub is_authenticated: bool,
}
