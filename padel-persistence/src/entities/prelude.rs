pub use super::groups::Entity as Groups;
pub use super::match_details::Entity as MatchDetails;
pub use super::matches::Entity as Matches;
pub use super::players::Entity as Players;
