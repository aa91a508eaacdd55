use std::collections::HashMap;
use uuid::Uuid;

use crate::models::matches::{GoalAttribution, Match};
use crate::tournament::error::TournamentError;

const MAX_NAME_LENGTH: usize = 100;
const MAX_STAGE_LENGTH: usize = 50;

/// Centralized validation for tournament mutations
pub struct TournamentValidator;

impl TournamentValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a team name and return it trimmed
    pub fn validate_team_name(&self, name: &str) -> Result<String, TournamentError> {
        self.validate_name("Team name", name, MAX_NAME_LENGTH)
    }

    /// Validate a player name and return it trimmed
    pub fn validate_player_name(&self, name: &str) -> Result<String, TournamentError> {
        self.validate_name("Player name", name, MAX_NAME_LENGTH)
    }

    pub fn validate_stage(&self, stage: &str) -> Result<String, TournamentError> {
        self.validate_name("Stage", stage, MAX_STAGE_LENGTH)
    }

    fn validate_name(&self, field: &str, value: &str, max_length: usize) -> Result<String, TournamentError> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(TournamentError::validation(format!("{} cannot be empty", field)));
        }

        if trimmed.chars().count() > max_length {
            return Err(TournamentError::validation(format!(
                "{} too long (maximum {} characters)",
                field, max_length
            )));
        }

        if trimmed.contains('\0') {
            return Err(TournamentError::validation(format!("{} contains invalid characters", field)));
        }

        Ok(trimmed.to_string())
    }

    pub fn validate_distinct_teams(&self, home_team_id: Uuid, away_team_id: Uuid) -> Result<(), TournamentError> {
        if home_team_id == away_team_id {
            return Err(TournamentError::validation("A team cannot play against itself"));
        }
        Ok(())
    }

    pub fn validate_scores(&self, home_score: i32, away_score: i32) -> Result<(), TournamentError> {
        if home_score < 0 || away_score < 0 {
            return Err(TournamentError::validation(format!(
                "Scores cannot be negative (got {} - {})",
                home_score, away_score
            )));
        }
        Ok(())
    }

    /// Check that the attributed goals line up with the recorded score.
    ///
    /// `squads` maps every known player id to the team they play for.
    pub fn validate_goal_attributions(
        &self,
        fixture: &Match,
        home_score: i32,
        away_score: i32,
        goals: &[GoalAttribution],
        squads: &HashMap<Uuid, Uuid>,
    ) -> Result<(), TournamentError> {
        self.validate_scores(home_score, away_score)?;

        let mut home_goals = 0;
        let mut away_goals = 0;

        for goal in goals {
            if !fixture.involves(goal.team_id) {
                return Err(TournamentError::validation(format!(
                    "Team {} does not play in this match",
                    goal.team_id
                )));
            }

            match squads.get(&goal.player_id) {
                None => {
                    return Err(TournamentError::not_found(format!("Player {} not found", goal.player_id)));
                }
                Some(team_id) if *team_id != goal.team_id => {
                    return Err(TournamentError::validation(format!(
                        "Player {} does not play for team {}",
                        goal.player_id, goal.team_id
                    )));
                }
                Some(_) => {}
            }

            if goal.team_id == fixture.home_team_id {
                home_goals += 1;
            } else {
                away_goals += 1;
            }
        }

        if home_goals != home_score || away_goals != away_score {
            return Err(TournamentError::validation(format!(
                "Goal scorers ({} - {}) do not match the score ({} - {})",
                home_goals, away_goals, home_score, away_score
            )));
        }

        Ok(())
    }
}

impl Default for TournamentValidator {
    fn default() -> Self {
        Self::new()
    }
}
