use std::fmt;

use sbk_core::enums::RateKind;

/// Errors loading or validating a rate catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read rate catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rate catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {kind} rate for {key}: {reason}")]
    InvalidRate {
        kind: RateKind,
        key: String,
        reason: String,
    },
}

/// Which compute budget a calculation ran out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetLimit {
    TimelineEntries { max: usize, found: usize },
    WallClock { max_ms: u64 },
}

impl fmt::Display for BudgetLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimelineEntries { max, found } => {
                write!(f, "{found} timeline entries exceeds the limit of {max}")
            }
            Self::WallClock { max_ms } => write!(f, "wall clock limit of {max_ms} ms reached"),
        }
    }
}

/// Errors raised by the aggregation engine itself. Degraded lookups are not
/// errors; they become diagnostics on the result.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(
        "compute budget exceeded: {limit} ({projects_considered} projects, \
         {timelines_considered} timeline entries considered)"
    )]
    BudgetExceeded {
        limit: BudgetLimit,
        projects_considered: usize,
        timelines_considered: usize,
    },

    #[error(
        "{field} is not a finite number ({projects_considered} projects, \
         {timelines_considered} timeline entries considered)"
    )]
    NonFiniteTotal {
        field: String,
        projects_considered: usize,
        timelines_considered: usize,
    },

    #[error("failed to generate snapshot id: {0}")]
    IdGeneration(String),
}
