use chrono::NaiveTime;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::goal::GoalDetail;
use crate::models::matches::{GoalAttribution, Match, MatchStatus, MatchWithTeams};
use crate::models::team::TeamGroup;

const MATCH_WITH_TEAMS: &str = r#"
    SELECT
        m.*,
        ht.name AS home_team_name,
        awt.name AS away_team_name
    FROM matches m
    JOIN teams ht ON ht.id = m.home_team_id
    JOIN teams awt ON awt.id = m.away_team_id
"#;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchFilter {
    pub status: Option<MatchStatus>,
    pub group: Option<TeamGroup>,
    pub stage: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMatch {
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub group: Option<TeamGroup>,
    pub stage: String,
    pub match_order: i32,
    pub match_time: Option<NaiveTime>,
}

/// Match repository: fixtures, results and goal records
pub struct MatchService {
    pool: PgPool,
}

impl MatchService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a scheduled 0-0 fixture
    pub async fn create(&self, new_match: &NewMatch) -> Result<Match, sqlx::Error> {
        let fixture = sqlx::query_as::<_, Match>(
            r#"
            INSERT INTO matches (id, home_team_id, away_team_id, match_group, stage, match_order, match_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_match.home_team_id)
        .bind(new_match.away_team_id)
        .bind(new_match.group)
        .bind(&new_match.stage)
        .bind(new_match.match_order)
        .bind(new_match.match_time)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            "Scheduled match {}: {} vs {} ({})",
            fixture.id, fixture.home_team_id, fixture.away_team_id, fixture.stage
        );
        Ok(fixture)
    }

    /// Fetch a match and lock its row for the rest of the transaction
    pub async fn get_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        match_id: Uuid,
    ) -> Result<Option<Match>, sqlx::Error> {
        sqlx::query_as::<_, Match>("SELECT * FROM matches WHERE id = $1 FOR UPDATE")
            .bind(match_id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub async fn get_with_teams(&self, match_id: Uuid) -> Result<Option<MatchWithTeams>, sqlx::Error> {
        sqlx::query_as::<_, MatchWithTeams>(&format!("{} WHERE m.id = $1", MATCH_WITH_TEAMS))
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Matches in fixture order (match_order, then creation)
    pub async fn list(&self, filter: &MatchFilter) -> Result<Vec<MatchWithTeams>, sqlx::Error> {
        let sql = format!(
            r#"{}
            WHERE ($1::varchar IS NULL OR m.status = $1)
              AND ($2::varchar IS NULL OR m.match_group = $2)
              AND ($3::varchar IS NULL OR m.stage = $3)
            ORDER BY m.match_order, m.created_at
            "#,
            MATCH_WITH_TEAMS
        );

        sqlx::query_as::<_, MatchWithTeams>(&sql)
            .bind(filter.status)
            .bind(filter.group)
            .bind(filter.stage.as_deref())
            .fetch_all(&self.pool)
            .await
    }

    /// Next scheduled fixtures in fixture order
    pub async fn upcoming(&self, limit: i64) -> Result<Vec<MatchWithTeams>, sqlx::Error> {
        let sql = format!(
            "{} WHERE m.status = 'scheduled' ORDER BY m.match_order, m.created_at LIMIT $1",
            MATCH_WITH_TEAMS
        );
        sqlx::query_as::<_, MatchWithTeams>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }

    /// Most recently created finished matches
    pub async fn recent_results(&self, limit: i64) -> Result<Vec<MatchWithTeams>, sqlx::Error> {
        let sql = format!(
            "{} WHERE m.status = 'finished' ORDER BY m.created_at DESC LIMIT $1",
            MATCH_WITH_TEAMS
        );
        sqlx::query_as::<_, MatchWithTeams>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn distinct_stages(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT DISTINCT stage FROM matches ORDER BY stage")
            .fetch_all(&self.pool)
            .await
    }

    /// Goals of a match in the order they were recorded
    pub async fn goals(&self, match_id: Uuid) -> Result<Vec<GoalDetail>, sqlx::Error> {
        sqlx::query_as::<_, GoalDetail>(
            r#"
            SELECT
                g.id,
                g.player_id,
                p.name AS player_name,
                g.team_id,
                t.name AS team_name
            FROM goals g
            JOIN players p ON p.id = g.player_id
            JOIN teams t ON t.id = g.team_id
            WHERE g.match_id = $1
            ORDER BY g.created_at, g.id
            "#,
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Store the final score and mark the match finished
    pub async fn finish_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        match_id: Uuid,
        home_score: i32,
        away_score: i32,
    ) -> Result<Match, sqlx::Error> {
        sqlx::query_as::<_, Match>(
            r#"
            UPDATE matches
            SET home_score = $1,
                away_score = $2,
                status = 'finished',
                updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(home_score)
        .bind(away_score)
        .bind(match_id)
        .fetch_one(&mut **tx)
        .await
    }

    /// Replace every goal of a match with `goals`
    pub async fn replace_goals_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        match_id: Uuid,
        goals: &[GoalAttribution],
    ) -> Result<(), sqlx::Error> {
        self.delete_goals_in_tx(tx, match_id).await?;

        // clock_timestamp() keeps insertion order visible in created_at
        for goal in goals {
            sqlx::query(
                r#"
                INSERT INTO goals (id, match_id, player_id, team_id, created_at)
                VALUES ($1, $2, $3, $4, clock_timestamp())
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(match_id)
            .bind(goal.player_id)
            .bind(goal.team_id)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    pub async fn delete_goals_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        match_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM goals WHERE match_id = $1")
            .bind(match_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    /// Persist fixture fields, status and scores of an edited match
    pub async fn update_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        fixture: &Match,
    ) -> Result<Match, sqlx::Error> {
        sqlx::query_as::<_, Match>(
            r#"
            UPDATE matches
            SET home_team_id = $1,
                away_team_id = $2,
                home_score = $3,
                away_score = $4,
                status = $5,
                match_group = $6,
                stage = $7,
                match_order = $8,
                match_time = $9,
                updated_at = NOW()
            WHERE id = $10
            RETURNING *
            "#,
        )
        .bind(fixture.home_team_id)
        .bind(fixture.away_team_id)
        .bind(fixture.home_score)
        .bind(fixture.away_score)
        .bind(fixture.status)
        .bind(fixture.group)
        .bind(&fixture.stage)
        .bind(fixture.match_order)
        .bind(fixture.match_time)
        .bind(fixture.id)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn delete_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        match_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(match_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM matches")
            .fetch_one(&self.pool)
            .await
    }
}
