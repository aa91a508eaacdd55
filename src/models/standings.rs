// src/models/standings.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::models::team::{TeamGroup, TeamResponse};

/// Ordered group tables. Groups without teams are left out.
#[derive(Debug, Serialize, Deserialize)]
pub struct StandingsResponse {
    pub groups: BTreeMap<TeamGroup, Vec<TeamResponse>>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TopScorer {
    pub player_id: Uuid,
    pub name: String,
    pub team_id: Uuid,
    pub team_name: String,
    pub goals_scored: i64,
}

/// Outcome of one standings recomputation run.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct AggregationSummary {
    pub teams_updated: usize,
    pub matches_counted: usize,
}
