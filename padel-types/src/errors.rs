use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::MatchId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, thiserror::Error)]
#[ts(export)]
pub enum PadelError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
    #[error("invalid score {score}: must be between 0 and {max}")]
    InvalidScore { score: i32, max: i32 },
    #[error("group name '{name}' already exists")]
    DuplicateGroup { name: String },
    #[error("player '{name}' already exists in this group")]
    DuplicatePlayer { name: String },
    #[error("group '{name}' not found")]
    GroupNotFound { name: String },
    #[error("invalid password")]
    InvalidPassword,
    #[error("match {match_id} not found or already resolved")]
    NotFoundOrAlreadyResolved { match_id: MatchId },
    #[error("match {match_id} is not pending")]
    AlreadyResolved { match_id: MatchId },
    #[error("store unavailable: {message}")]
    StoreUnavailable { message: String },
    #[error("store call '{operation}' timed out")]
    Timeout { operation: String },
    #[error("corrupt record: {message}")]
    CorruptRecord { message: String },
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl PadelError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        PadelError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Transient store failures. Reads may be retried as-is; match creation
    /// has no idempotency key, so a blind retry can create a second match.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PadelError::StoreUnavailable { .. } | PadelError::Timeout { .. }
        )
    }
}
