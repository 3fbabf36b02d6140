pub mod prelude;

pub mod groups;
pub mod match_details;
pub mod matches;
pub mod players;
