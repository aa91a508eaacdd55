// src/models/team.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Round-robin bucket a team is drawn into.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, sqlx::Type)]
#[sqlx(type_name = "varchar")]
pub enum TeamGroup {
    A,
    B,
    C,
    D,
}

impl TeamGroup {
    pub const ALL: [TeamGroup; 4] = [TeamGroup::A, TeamGroup::B, TeamGroup::C, TeamGroup::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamGroup::A => "A",
            TeamGroup::B => "B",
            TeamGroup::C => "C",
            TeamGroup::D => "D",
        }
    }
}

impl Default for TeamGroup {
    fn default() -> Self {
        TeamGroup::A
    }
}

impl fmt::Display for TeamGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeamGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(TeamGroup::A),
            "B" => Ok(TeamGroup::B),
            "C" => Ok(TeamGroup::C),
            "D" => Ok(TeamGroup::D),
            other => Err(format!("{} is not a valid group. Use one of A, B, C or D.", other)),
        }
    }
}

/// Season record of a team. Only the standings recomputation produces these values.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamStats {
    pub played: i32,
    pub won: i32,
    pub drawn: i32,
    pub lost: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub points: i32,
}

impl TeamStats {
    pub fn goal_difference(&self) -> i32 {
        self.goals_for - self.goals_against
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    #[sqlx(rename = "team_group")]
    #[serde(rename = "group")]
    pub group: TeamGroup,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub stats: TeamStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Team as exposed over the API, with the goal difference computed on read.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TeamResponse {
    #[serde(flatten)]
    pub team: Team,
    pub goal_difference: i32,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        let goal_difference = team.stats.goal_difference();
        Self { team, goal_difference }
    }
}

/// Request to create a new team
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateTeamRequest {
    pub name: String,
    pub group: Option<TeamGroup>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct TeamQuery {
    pub group: Option<String>,
    pub search: Option<String>,
}
