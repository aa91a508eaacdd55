pub mod error;
pub mod matches;
pub mod players;
pub mod standings;
pub mod teams;
pub mod tournament;
pub mod validation;
