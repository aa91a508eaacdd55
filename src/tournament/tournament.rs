use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::{map_write_error, require_record};
use crate::models::common::DashboardResponse;
use crate::models::matches::*;
use crate::models::player::{CreatePlayerRequest, Player, PlayerQuery, PlayerWithGoals};
use crate::models::standings::{AggregationSummary, StandingsResponse, TopScorer};
use crate::models::team::{CreateTeamRequest, Team, TeamGroup, TeamQuery};
use crate::tournament::error::TournamentError;
use crate::tournament::matches::{MatchFilter, MatchService, NewMatch};
use crate::tournament::players::PlayerService;
use crate::tournament::standings::{StandingsConfig, StandingsService};
use crate::tournament::teams::TeamService;
use crate::tournament::validation::TournamentValidator;

const HOME_PAGE_LIMIT: i64 = 6;

/// Main tournament service that orchestrates all tournament operations
pub struct TournamentService {
    pool: PgPool,
    teams: TeamService,
    players: PlayerService,
    matches: MatchService,
    standings: StandingsService,
    validator: TournamentValidator,
}

impl TournamentService {
    pub fn new(pool: PgPool, standings_config: StandingsConfig) -> Self {
        Self {
            pool: pool.clone(),
            teams: TeamService::new(pool.clone()),
            players: PlayerService::new(pool.clone()),
            matches: MatchService::new(pool.clone()),
            standings: StandingsService::new(pool, standings_config),
            validator: TournamentValidator::new(),
        }
    }

    // Teams

    pub async fn create_team(&self, request: CreateTeamRequest) -> Result<Team, TournamentError> {
        let name = self.validator.validate_team_name(&request.name)?;
        self.teams
            .create(&name, request.group.unwrap_or_default())
            .await
            .map_err(|e| map_write_error(e, &format!("Team \"{}\" already exists", name)))
    }

    pub async fn list_teams(&self, query: &TeamQuery) -> Result<Vec<Team>, TournamentError> {
        let group = parse_group_filter(query.group.as_deref())?;
        let search = non_empty(query.search.as_deref());
        Ok(self.teams.list(group, search).await?)
    }

    pub async fn get_team(&self, team_id: Uuid) -> Result<Team, TournamentError> {
        require_record(self.teams.get(team_id).await, "Team not found")
    }

    /// Delete a team with its squad and matches, then rebuild the tables
    pub async fn delete_team(&self, team_id: Uuid) -> Result<AggregationSummary, TournamentError> {
        let mut tx = self.pool.begin().await?;
        StandingsService::lock_standings(&mut tx).await?;

        if self.teams.delete_in_tx(&mut tx, team_id).await? == 0 {
            return Err(TournamentError::not_found("Team not found"));
        }

        let summary = self.standings.recompute_in_tx(&mut tx).await?;
        tx.commit().await?;

        tracing::info!("Deleted team {}", team_id);
        Ok(summary)
    }

    // Players

    pub async fn create_player(&self, request: CreatePlayerRequest) -> Result<Player, TournamentError> {
        let name = self.validator.validate_player_name(&request.name)?;
        require_record(self.teams.get(request.team_id).await, "Team not found")?;

        self.players
            .create(&name, request.team_id)
            .await
            .map_err(|e| map_write_error(e, "Player already exists"))
    }

    pub async fn list_players(&self, query: &PlayerQuery) -> Result<Vec<PlayerWithGoals>, TournamentError> {
        let search = non_empty(query.search.as_deref());
        Ok(self.players.list(query.team_id, search).await?)
    }

    /// Scorers cannot be removed while their goals are on record.
    ///
    /// The player row stays locked from the goal count to the delete, so a
    /// result crediting this player either commits first and is counted, or
    /// waits and then finds the player gone.
    pub async fn delete_player(&self, player_id: Uuid) -> Result<(), TournamentError> {
        let mut tx = self.pool.begin().await?;

        let player = require_record(
            self.players.get_for_update(&mut tx, player_id).await,
            "Player not found",
        )?;

        let goals = self.players.goal_count_in_tx(&mut tx, player.id).await?;
        if goals > 0 {
            return Err(TournamentError::conflict(format!(
                "{} has {} recorded goal(s); correct those match results first",
                player.name, goals
            )));
        }

        self.players.delete_in_tx(&mut tx, player.id).await?;
        tx.commit().await?;

        tracing::info!("Deleted player {} ({})", player.name, player.id);
        Ok(())
    }

    pub async fn top_scorers(&self) -> Result<Vec<TopScorer>, TournamentError> {
        Ok(self.players.top_scorers().await?)
    }

    // Matches

    pub async fn create_match(&self, request: CreateMatchRequest) -> Result<Match, TournamentError> {
        self.validator
            .validate_distinct_teams(request.home_team_id, request.away_team_id)?;

        let home = require_record(self.teams.get(request.home_team_id).await, "Home team not found")?;
        let away = require_record(self.teams.get(request.away_team_id).await, "Away team not found")?;

        let stage = match non_empty(request.stage.as_deref()) {
            Some(stage) => self.validator.validate_stage(stage)?,
            None => DEFAULT_STAGE.to_string(),
        };

        let new_match = NewMatch {
            home_team_id: home.id,
            away_team_id: away.id,
            group: request.group.or_else(|| default_match_group(home.group, away.group)),
            stage,
            match_order: request.match_order.unwrap_or(0),
            match_time: request.match_time,
        };

        self.matches
            .create(&new_match)
            .await
            .map_err(|e| map_write_error(e, "Match already exists"))
    }

    pub async fn list_matches(&self, query: &MatchQuery) -> Result<Vec<MatchWithTeams>, TournamentError> {
        let filter = MatchFilter {
            status: parse_status_filter(query.status.as_deref())?,
            group: parse_group_filter(query.group.as_deref())?,
            stage: non_empty(query.stage.as_deref()).map(str::to_string),
        };
        Ok(self.matches.list(&filter).await?)
    }

    pub async fn get_match_detail(&self, match_id: Uuid) -> Result<MatchDetailResponse, TournamentError> {
        let fixture = require_record(self.matches.get_with_teams(match_id).await, "Match not found")?;
        let goals = self.matches.goals(match_id).await?;
        Ok(MatchDetailResponse { fixture, goals })
    }

    /// The match together with both squads, for entering a result
    pub async fn match_result_context(&self, match_id: Uuid) -> Result<MatchResultContext, TournamentError> {
        let fixture = require_record(self.matches.get_with_teams(match_id).await, "Match not found")?;
        let home_players = self.players.by_team(fixture.fixture.home_team_id).await?;
        let away_players = self.players.by_team(fixture.fixture.away_team_id).await?;

        Ok(MatchResultContext {
            fixture,
            home_players,
            away_players,
        })
    }

    /// Record the final score and scorers of a match.
    ///
    /// The score, the goal records and the recomputed standings are written in
    /// one transaction, so either all of them change or none do.
    pub async fn record_result(
        &self,
        match_id: Uuid,
        request: MatchResultRequest,
    ) -> Result<MatchDetailResponse, TournamentError> {
        self.validator.validate_scores(request.home_score, request.away_score)?;

        let mut tx = self.pool.begin().await?;
        StandingsService::lock_standings(&mut tx).await?;

        let fixture = require_record(
            self.matches.get_for_update(&mut tx, match_id).await,
            "Match not found",
        )?;

        let scorer_ids: Vec<Uuid> = request.goals.iter().map(|g| g.player_id).collect();
        let squads = self.players.squad_map_in_tx(&mut tx, &scorer_ids).await?;
        self.validator.validate_goal_attributions(
            &fixture,
            request.home_score,
            request.away_score,
            &request.goals,
            &squads,
        )?;

        let was_finished = fixture.is_finished();
        self.matches
            .finish_in_tx(&mut tx, match_id, request.home_score, request.away_score)
            .await?;
        self.matches
            .replace_goals_in_tx(&mut tx, match_id, &request.goals)
            .await?;
        let summary = self.standings.recompute_in_tx(&mut tx).await?;

        tx.commit().await?;

        tracing::info!(
            "Recorded result for match {}: {} - {} ({}), {} teams updated",
            match_id,
            request.home_score,
            request.away_score,
            if was_finished { "corrected" } else { "finished" },
            summary.teams_updated
        );

        self.get_match_detail(match_id).await
    }

    /// Edit fixture details. Reverting a finished match to scheduled drops its
    /// goals and score.
    pub async fn update_match(&self, match_id: Uuid, request: UpdateMatchRequest) -> Result<Match, TournamentError> {
        let mut tx = self.pool.begin().await?;
        StandingsService::lock_standings(&mut tx).await?;

        let mut fixture = require_record(
            self.matches.get_for_update(&mut tx, match_id).await,
            "Match not found",
        )?;
        let was_finished = fixture.is_finished();

        match request.status {
            Some(MatchStatus::Scheduled) if was_finished => {
                fixture.status = MatchStatus::Scheduled;
                fixture.home_score = 0;
                fixture.away_score = 0;
                let removed = self.matches.delete_goals_in_tx(&mut tx, match_id).await?;
                tracing::info!("Reverted match {} to scheduled, removed {} goals", match_id, removed);
            }
            Some(MatchStatus::Finished) if !was_finished => {
                return Err(TournamentError::validation(
                    "A match is finished by recording its result",
                ));
            }
            _ => {}
        }

        let changes_teams = request.home_team_id.is_some_and(|id| id != fixture.home_team_id)
            || request.away_team_id.is_some_and(|id| id != fixture.away_team_id);

        if changes_teams {
            if fixture.is_finished() {
                return Err(TournamentError::validation(
                    "Teams of a finished match cannot change; revert it to scheduled first",
                ));
            }

            let home_team_id = request.home_team_id.unwrap_or(fixture.home_team_id);
            let away_team_id = request.away_team_id.unwrap_or(fixture.away_team_id);
            self.validator.validate_distinct_teams(home_team_id, away_team_id)?;

            let home = require_record(self.teams.get_in_tx(&mut tx, home_team_id).await, "Home team not found")?;
            let away = require_record(self.teams.get_in_tx(&mut tx, away_team_id).await, "Away team not found")?;

            fixture.home_team_id = home.id;
            fixture.away_team_id = away.id;
            if request.group.is_none() {
                fixture.group = default_match_group(home.group, away.group);
            }
        }

        if let Some(stage) = request.stage.as_deref() {
            fixture.stage = self.validator.validate_stage(stage)?;
        }
        if let Some(group) = request.group {
            fixture.group = Some(group);
        }
        if let Some(match_order) = request.match_order {
            fixture.match_order = match_order;
        }
        if let Some(match_time) = request.match_time {
            fixture.match_time = Some(match_time);
        }

        let updated = self.matches.update_in_tx(&mut tx, &fixture).await?;

        // Stage edits can move a finished match in or out of the tables
        if was_finished {
            self.standings.recompute_in_tx(&mut tx).await?;
        }

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete_match(&self, match_id: Uuid) -> Result<(), TournamentError> {
        let mut tx = self.pool.begin().await?;
        StandingsService::lock_standings(&mut tx).await?;

        let fixture = require_record(
            self.matches.get_for_update(&mut tx, match_id).await,
            "Match not found",
        )?;

        self.matches.delete_in_tx(&mut tx, match_id).await?;
        if fixture.is_finished() {
            self.standings.recompute_in_tx(&mut tx).await?;
        }

        tx.commit().await?;
        tracing::info!("Deleted match {} (was {})", match_id, fixture.status.as_str());
        Ok(())
    }

    // Presentation

    pub async fn home(&self) -> Result<HomeResponse, TournamentError> {
        Ok(HomeResponse {
            upcoming_matches: self.matches.upcoming(HOME_PAGE_LIMIT).await?,
            recent_matches: self.matches.recent_results(HOME_PAGE_LIMIT).await?,
        })
    }

    /// All fixtures, or only finished ones when `finished_only` is set
    pub async fn match_listing(&self, query: &MatchQuery, finished_only: bool) -> Result<MatchListResponse, TournamentError> {
        let selected_group = parse_group_filter(query.group.as_deref())?;
        let selected_stage = non_empty(query.stage.as_deref()).map(str::to_string);

        let filter = MatchFilter {
            status: finished_only.then_some(MatchStatus::Finished),
            group: selected_group,
            stage: selected_stage.clone(),
        };

        Ok(MatchListResponse {
            matches: self.matches.list(&filter).await?,
            groups: TeamGroup::ALL.to_vec(),
            stages: self.matches.distinct_stages().await?,
            selected_group,
            selected_stage,
        })
    }

    pub async fn standings(&self) -> Result<StandingsResponse, TournamentError> {
        Ok(self.standings.get_standings().await?)
    }

    pub async fn recompute_standings(&self) -> Result<AggregationSummary, TournamentError> {
        self.standings.recompute().await
    }

    pub async fn dashboard(&self) -> Result<DashboardResponse, TournamentError> {
        Ok(DashboardResponse {
            teams_count: self.teams.count().await?,
            players_count: self.players.count().await?,
            matches_count: self.matches.count().await?,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Empty filter values mean "no filter"
pub fn parse_group_filter(value: Option<&str>) -> Result<Option<TeamGroup>, TournamentError> {
    non_empty(value)
        .map(|v| v.parse::<TeamGroup>().map_err(TournamentError::Validation))
        .transpose()
}

pub fn parse_status_filter(value: Option<&str>) -> Result<Option<MatchStatus>, TournamentError> {
    match non_empty(value).map(str::to_lowercase).as_deref() {
        None => Ok(None),
        Some("scheduled") => Ok(Some(MatchStatus::Scheduled)),
        Some("finished") => Ok(Some(MatchStatus::Finished)),
        Some(other) => Err(TournamentError::validation(format!(
            "{} is not a valid status. Use either `scheduled` or `finished`.",
            other
        ))),
    }
}
