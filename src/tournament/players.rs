use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::player::{Player, PlayerWithGoals};
use crate::models::standings::TopScorer;
use crate::tournament::teams::like_pattern;

/// Service responsible for squads and scorer statistics
pub struct PlayerService {
    pool: PgPool,
}

impl PlayerService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str, team_id: Uuid) -> Result<Player, sqlx::Error> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            INSERT INTO players (id, name, team_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(team_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Added player {} ({}) to team {}", player.name, player.id, team_id);
        Ok(player)
    }

    /// Players ordered by team then name, with their goal tally
    pub async fn list(&self, team_id: Option<Uuid>, search: Option<&str>) -> Result<Vec<PlayerWithGoals>, sqlx::Error> {
        sqlx::query_as::<_, PlayerWithGoals>(
            r#"
            SELECT
                p.*,
                t.name AS team_name,
                COUNT(g.id) AS goal_count
            FROM players p
            JOIN teams t ON t.id = p.team_id
            LEFT JOIN goals g ON g.player_id = p.id
            WHERE ($1::uuid IS NULL OR p.team_id = $1)
              AND ($2::text IS NULL OR p.name ILIKE $2)
            GROUP BY p.id, t.name
            ORDER BY t.name, p.name
            "#,
        )
        .bind(team_id)
        .bind(search.map(like_pattern))
        .fetch_all(&self.pool)
        .await
    }

    /// Squad of one team ordered by name
    pub async fn by_team(&self, team_id: Uuid) -> Result<Vec<Player>, sqlx::Error> {
        sqlx::query_as::<_, Player>("SELECT * FROM players WHERE team_id = $1 ORDER BY name")
            .bind(team_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Map each known player id among `player_ids` to the team they play for.
    /// The rows stay share-locked until `tx` ends.
    pub async fn squad_map_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        player_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Uuid>, sqlx::Error> {
        if player_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Uuid, Uuid)> = sqlx::query_as("SELECT id, team_id FROM players WHERE id = ANY($1) FOR SHARE")
            .bind(player_ids.to_vec())
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().collect())
    }

    /// Lock a player row until the transaction ends. Goal inserts for the
    /// player wait on this lock.
    pub async fn get_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        player_id: Uuid,
    ) -> Result<Option<Player>, sqlx::Error> {
        sqlx::query_as::<_, Player>("SELECT * FROM players WHERE id = $1 FOR UPDATE")
            .bind(player_id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub async fn goal_count_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        player_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM goals WHERE player_id = $1")
            .bind(player_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn delete_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        player_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM players WHERE id = $1")
            .bind(player_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    /// Players who have scored, most goals first, then by name
    pub async fn top_scorers(&self) -> Result<Vec<TopScorer>, sqlx::Error> {
        sqlx::query_as::<_, TopScorer>(
            r#"
            SELECT
                p.id AS player_id,
                p.name,
                p.team_id,
                t.name AS team_name,
                COUNT(g.id) AS goals_scored
            FROM players p
            JOIN teams t ON t.id = p.team_id
            JOIN goals g ON g.player_id = p.id
            GROUP BY p.id, t.name
            HAVING COUNT(g.id) > 0
            ORDER BY goals_scored DESC, p.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM players")
            .fetch_one(&self.pool)
            .await
    }
}
