use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;
use uuid::Uuid;

use crate::models::standings::{AggregationSummary, StandingsResponse};
use crate::models::team::{Team, TeamResponse, TeamStats};
use crate::tournament::error::{is_transient, TournamentError};

/// Which finished matches count towards the group tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandingsScope {
    /// Only matches whose stage label mentions "group".
    #[default]
    GroupStage,
    AllMatches,
}

impl StandingsScope {
    pub fn includes(&self, stage: &str) -> bool {
        match self {
            StandingsScope::GroupStage => stage.to_lowercase().contains("group"),
            StandingsScope::AllMatches => true,
        }
    }
}

/// Scoreline of a finished match, the only input the aggregation looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct MatchOutcome {
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_score: i32,
    pub away_score: i32,
}

#[derive(Debug, FromRow)]
struct FinishedMatchRow {
    #[sqlx(flatten)]
    outcome: MatchOutcome,
    stage: String,
}

/// Recompute every team's season record from scratch.
///
/// Every id in `team_ids` starts from an all-zero record, so teams without a
/// finished match come out zeroed. The result depends only on the multiset of
/// outcomes, never on their order.
pub fn aggregate<'a, T, M>(team_ids: T, matches: M) -> BTreeMap<Uuid, TeamStats>
where
    T: IntoIterator<Item = Uuid>,
    M: IntoIterator<Item = &'a MatchOutcome>,
{
    let mut table: BTreeMap<Uuid, TeamStats> = team_ids
        .into_iter()
        .map(|id| (id, TeamStats::default()))
        .collect();

    for outcome in matches {
        apply_result(
            table.entry(outcome.home_team_id).or_default(),
            outcome.home_score,
            outcome.away_score,
        );
        apply_result(
            table.entry(outcome.away_team_id).or_default(),
            outcome.away_score,
            outcome.home_score,
        );
    }

    table
}

fn apply_result(stats: &mut TeamStats, scored: i32, conceded: i32) {
    stats.played += 1;
    stats.goals_for += scored;
    stats.goals_against += conceded;

    match scored.cmp(&conceded) {
        Ordering::Greater => {
            stats.won += 1;
            stats.points += 3;
        }
        Ordering::Less => stats.lost += 1,
        Ordering::Equal => {
            stats.drawn += 1;
            stats.points += 1;
        }
    }
}

/// Table order: group, then points and goals scored (both descending).
/// Goals scored, not goal difference, is the secondary key. Name breaks remaining ties.
pub fn standings_order(a: &Team, b: &Team) -> Ordering {
    a.group
        .cmp(&b.group)
        .then_with(|| b.stats.points.cmp(&a.stats.points))
        .then_with(|| b.stats.goals_for.cmp(&a.stats.goals_for))
        .then_with(|| a.name.cmp(&b.name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Exponential backoff before retry number `attempt` (1-based), without jitter.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(10);
        self.base_delay.saturating_mul(1u32 << exponent)
    }

    fn delay_with_jitter(&self, attempt: u32) -> Duration {
        let jitter_cap = (self.base_delay.as_millis() / 2) as u64;
        let jitter = if jitter_cap > 0 {
            rand::thread_rng().gen_range(0..=jitter_cap)
        } else {
            0
        };
        self.backoff(attempt) + Duration::from_millis(jitter)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(50),
        }
    }
}

/// Run `operation` until it succeeds, fails with a non-transient error, or
/// `policy.max_attempts` is used up.
pub async fn retry_transient<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < policy.max_attempts && is_transient(&e) => {
                let delay = policy.delay_with_jitter(attempt);
                tracing::warn!(
                    "Standings recomputation attempt {} failed: {}. Retrying in {:?}",
                    attempt, e, delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::error!("Standings recomputation failed after {} attempt(s): {}", attempt, e);
                return Err(e);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandingsConfig {
    pub scope: StandingsScope,
    pub retry: RetryPolicy,
}

/// Service responsible for the derived team statistics
#[derive(Debug)]
pub struct StandingsService {
    pool: PgPool,
    config: StandingsConfig,
}

impl StandingsService {
    pub fn new(pool: PgPool, config: StandingsConfig) -> Self {
        Self { pool, config }
    }

    /// Run a full recomputation in its own transaction, retrying transient storage failures.
    pub async fn recompute(&self) -> Result<AggregationSummary, TournamentError> {
        retry_transient(&self.config.retry, || self.recompute_once())
            .await
            .map_err(TournamentError::Storage)
    }

    async fn recompute_once(&self) -> Result<AggregationSummary, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let summary = self.recompute_in_tx(&mut tx).await?;
        tx.commit().await?;
        Ok(summary)
    }

    /// Serialize standings writers for the rest of the transaction.
    pub async fn lock_standings(tx: &mut Transaction<'_, Postgres>) -> Result<(), sqlx::Error> {
        sqlx::query("LOCK TABLE teams IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Reset, recompute and persist every team's record inside `tx`.
    pub async fn recompute_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<AggregationSummary, sqlx::Error> {
        Self::lock_standings(tx).await?;

        let team_ids: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM teams")
            .fetch_all(&mut **tx)
            .await?;

        let finished = sqlx::query_as::<_, FinishedMatchRow>(
            r#"
            SELECT home_team_id, away_team_id, home_score, away_score, stage
            FROM matches
            WHERE status = 'finished'
            "#,
        )
        .fetch_all(&mut **tx)
        .await?;

        let outcomes: Vec<MatchOutcome> = finished
            .into_iter()
            .filter(|row| self.config.scope.includes(&row.stage))
            .map(|row| row.outcome)
            .collect();

        let table = aggregate(team_ids, &outcomes);

        for (team_id, stats) in &table {
            sqlx::query(
                r#"
                UPDATE teams
                SET played = $1,
                    won = $2,
                    drawn = $3,
                    lost = $4,
                    goals_for = $5,
                    goals_against = $6,
                    points = $7,
                    updated_at = NOW()
                WHERE id = $8
                "#,
            )
            .bind(stats.played)
            .bind(stats.won)
            .bind(stats.drawn)
            .bind(stats.lost)
            .bind(stats.goals_for)
            .bind(stats.goals_against)
            .bind(stats.points)
            .bind(team_id)
            .execute(&mut **tx)
            .await?;
        }

        tracing::info!(
            "🏆 Recomputed standings for {} teams from {} finished matches ({:?})",
            table.len(), outcomes.len(), self.config.scope
        );

        Ok(AggregationSummary {
            teams_updated: table.len(),
            matches_counted: outcomes.len(),
        })
    }

    /// Group tables, each ordered by `standings_order`. Empty groups are omitted.
    pub async fn get_standings(&self) -> Result<StandingsResponse, sqlx::Error> {
        let mut teams = sqlx::query_as::<_, Team>("SELECT * FROM teams")
            .fetch_all(&self.pool)
            .await?;
        teams.sort_by(standings_order);

        let mut groups: BTreeMap<_, Vec<TeamResponse>> = BTreeMap::new();
        for team in teams {
            groups.entry(team.group).or_default().push(TeamResponse::from(team));
        }

        Ok(StandingsResponse { groups })
    }
}
