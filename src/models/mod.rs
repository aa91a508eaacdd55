pub mod common;
pub mod goal;
pub mod matches;
pub mod player;
pub mod standings;
pub mod team;
