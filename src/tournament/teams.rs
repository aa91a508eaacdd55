use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::team::{Team, TeamGroup};
use crate::tournament::standings::standings_order;

/// Service responsible for team records
pub struct TeamService {
    pool: PgPool,
}

impl TeamService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a team with an all-zero record
    pub async fn create(&self, name: &str, group: TeamGroup) -> Result<Team, sqlx::Error> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (id, name, team_group)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(group)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Created team {} ({}) in group {}", team.name, team.id, team.group);
        Ok(team)
    }

    pub async fn get(&self, team_id: Uuid) -> Result<Option<Team>, sqlx::Error> {
        sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
            .bind(team_id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn get_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        team_id: Uuid,
    ) -> Result<Option<Team>, sqlx::Error> {
        sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
            .bind(team_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Teams in table order, optionally narrowed to a group and a name search
    pub async fn list(&self, group: Option<TeamGroup>, search: Option<&str>) -> Result<Vec<Team>, sqlx::Error> {
        let mut teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT * FROM teams
            WHERE ($1::varchar IS NULL OR team_group = $1)
              AND ($2::text IS NULL OR name ILIKE $2)
            "#,
        )
        .bind(group)
        .bind(search.map(like_pattern))
        .fetch_all(&self.pool)
        .await?;

        teams.sort_by(standings_order);
        Ok(teams)
    }

    /// Delete a team. Players, matches and goals go with it.
    pub async fn delete_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        team_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(team_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM teams")
            .fetch_one(&self.pool)
            .await
    }
}

/// Case-insensitive substring pattern with LIKE wildcards escaped.
pub fn like_pattern(search: &str) -> String {
    let escaped = search
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
