//! Database helper functions to reduce boilerplate error handling.
//!
//! These helpers simplify common patterns like:
//! - Fetching a required record (NotFound if missing)
//! - Translating constraint violations into domain errors
//!
//! # Usage
//!
//! ```ignore
//! let team = require_record(
//!     sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
//!         .bind(team_id)
//!         .fetch_optional(pool)
//!         .await,
//!     "Team not found"
//! )?;
//! ```

use crate::tournament::error::TournamentError;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

/// Unwrap an optional database result, returning NotFound if None.
pub fn require_record<T>(
    result: Result<Option<T>, sqlx::Error>,
    not_found_message: &str,
) -> Result<T, TournamentError> {
    match result {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(TournamentError::not_found(not_found_message)),
        Err(e) => Err(TournamentError::Storage(e)),
    }
}

/// Map a write failure to the matching domain error.
///
/// Unique violations become `Conflict`, foreign key violations `NotFound`
/// and check violations `Validation`. Everything else is a storage failure.
pub fn map_write_error(error: sqlx::Error, conflict_message: &str) -> TournamentError {
    let code = error
        .as_database_error()
        .and_then(|db_error| db_error.code())
        .map(|code| code.into_owned());

    match code.as_deref() {
        Some(UNIQUE_VIOLATION) => TournamentError::conflict(conflict_message),
        Some(FOREIGN_KEY_VIOLATION) => TournamentError::not_found("Referenced record not found"),
        Some(CHECK_VIOLATION) => TournamentError::validation("Value violates a tournament constraint"),
        _ => TournamentError::Storage(error),
    }
}
