//! Database error types for sbk-db.

use sbk_core::errors::CoreError;
use sbk_engine::EngineError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB or a refused transition).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Why a dashboard calculation produced no snapshot.
///
/// Nothing is stored for any of these.
#[derive(Debug, Error)]
pub enum CalculationError {
    /// The request was rejected before any data was read.
    #[error("invalid calculation request: {0}")]
    Validation(#[from] CoreError),

    /// The compute budget ran out.
    #[error("{0}")]
    Budget(EngineError),

    /// A computed figure overflowed to a non-finite number.
    #[error("{0}")]
    Overflow(EngineError),

    /// The engine failed for another reason.
    #[error("calculation failed: {0}")]
    Engine(EngineError),

    /// Reading projects or timeline entries failed.
    #[error("failed to load calculation inputs: {0}")]
    Storage(#[from] DatabaseError),

    /// The finished snapshot could not be written.
    #[error(
        "failed to store snapshot ({projects_considered} projects, \
         {timelines_considered} timeline entries considered): {source}"
    )]
    Persistence {
        #[source]
        source: DatabaseError,
        projects_considered: usize,
        timelines_considered: usize,
    },
}

impl From<EngineError> for CalculationError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::BudgetExceeded { .. } => Self::Budget(err),
            EngineError::NonFiniteTotal { .. } => Self::Overflow(err),
            EngineError::IdGeneration(_) => Self::Engine(err),
        }
    }
}
