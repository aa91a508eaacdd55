use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A recorded goal with the scorer's and team's names resolved.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct GoalDetail {
    pub id: Uuid,
    pub player_id: Uuid,
    pub player_name: String,
    pub team_id: Uuid,
    pub team_name: String,
}
