//! Cross-cutting error types for Sitebook.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `EngineError`) are defined in
//! their respective crates. They converge into `anyhow` in `sbk-cli`.

use thiserror::Error;

/// Errors that can be raised by any Sitebook crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A status transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Input failed validation (missing name, inverted date range).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
