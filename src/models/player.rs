// src/models/player.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub team_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Player annotated with the team name and the number of goals scored so far.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct PlayerWithGoals {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub player: Player,
    pub team_name: String,
    pub goal_count: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreatePlayerRequest {
    pub name: String,
    pub team_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct PlayerQuery {
    pub team_id: Option<Uuid>,
    pub search: Option<String>,
}
