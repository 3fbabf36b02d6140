pub mod errors;
pub mod group;
pub mod matches;
pub mod player;
pub mod stats;

// Re-export all types
pub use errors::*;
pub use group::*;
pub use matches::*;
pub use player::*;
pub use stats::*;

pub type GroupId = uuid::Uuid;
pub type PlayerId = uuid::Uuid;
pub type MatchId = uuid::Uuid;
