// src/models/matches.rs
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::goal::GoalDetail;
use crate::models::player::Player;
use crate::models::team::TeamGroup;

pub const DEFAULT_STAGE: &str = "Group Stage";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Finished,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Finished => "finished",
        }
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Match {
    pub id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_score: i32,
    pub away_score: i32,
    pub status: MatchStatus,
    #[sqlx(rename = "match_group")]
    #[serde(rename = "group")]
    pub group: Option<TeamGroup>,
    pub stage: String,
    pub match_order: i32,
    pub match_time: Option<NaiveTime>, // Kickoff time of day
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    pub fn involves(&self, team_id: Uuid) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }
}

/// Group label a new match gets when none is given: the teams' shared group, if any.
pub fn default_match_group(home_group: TeamGroup, away_group: TeamGroup) -> Option<TeamGroup> {
    if home_group == away_group {
        Some(home_group)
    } else {
        None
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct MatchWithTeams {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fixture: Match,
    pub home_team_name: String,
    pub away_team_name: String,
}

// Request/Response DTOs
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateMatchRequest {
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub stage: Option<String>,
    pub group: Option<TeamGroup>,
    pub match_time: Option<NaiveTime>,
    pub match_order: Option<i32>,
}

/// Fixture edits. Scores only change through the result workflow.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UpdateMatchRequest {
    pub home_team_id: Option<Uuid>,
    pub away_team_id: Option<Uuid>,
    pub stage: Option<String>,
    pub group: Option<TeamGroup>,
    pub match_time: Option<NaiveTime>,
    pub match_order: Option<i32>,
    pub status: Option<MatchStatus>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct GoalAttribution {
    pub player_id: Uuid,
    pub team_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatchResultRequest {
    pub home_score: i32,
    pub away_score: i32,
    #[serde(default)]
    pub goals: Vec<GoalAttribution>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct MatchQuery {
    pub group: Option<String>,
    pub stage: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchDetailResponse {
    #[serde(rename = "match")]
    pub fixture: MatchWithTeams,
    pub goals: Vec<GoalDetail>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResultContext {
    #[serde(rename = "match")]
    pub fixture: MatchWithTeams,
    pub home_players: Vec<Player>,
    pub away_players: Vec<Player>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchWithTeams>,
    pub groups: Vec<TeamGroup>,
    pub stages: Vec<String>,
    pub selected_group: Option<TeamGroup>,
    pub selected_stage: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HomeResponse {
    pub upcoming_matches: Vec<MatchWithTeams>,
    pub recent_matches: Vec<MatchWithTeams>,
}
