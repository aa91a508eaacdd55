use actix_web::web;
use sqlx::PgPool;

use crate::tournament::standings::StandingsConfig;
use crate::tournament::tournament::TournamentService;

pub mod match_handler;
pub mod player_handler;
pub mod standings_handler;
pub mod team_handler;

pub(crate) fn tournament_service(
    pool: &web::Data<PgPool>,
    standings_config: &web::Data<StandingsConfig>,
) -> TournamentService {
    TournamentService::new(pool.get_ref().clone(), *standings_config.get_ref())
}
