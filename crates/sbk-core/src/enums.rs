//! Status and classification enums for Sitebook.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! [`SnapshotStatus`] carries a small state machine; `allowed_next_states()`
//! enforces valid metadata transitions at the storage layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// RateKind
// ---------------------------------------------------------------------------

/// The seven rate catalog tables.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RateKind {
    WorkerRole,
    EngineerSpecialty,
    ArchitectSpecialty,
    Material,
    Tool,
    ProjectType,
    ProjectPriority,
}

impl RateKind {
    pub const ALL: [Self; 7] = [
        Self::WorkerRole,
        Self::EngineerSpecialty,
        Self::ArchitectSpecialty,
        Self::Material,
        Self::Tool,
        Self::ProjectType,
        Self::ProjectPriority,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WorkerRole => "worker_role",
            Self::EngineerSpecialty => "engineer_specialty",
            Self::ArchitectSpecialty => "architect_specialty",
            Self::Material => "material",
            Self::Tool => "tool",
            Self::ProjectType => "project_type",
            Self::ProjectPriority => "project_priority",
        }
    }
}

impl fmt::Display for RateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LaborType
// ---------------------------------------------------------------------------

/// Which staffing list an itemized labor line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LaborType {
    Worker,
    Engineer,
    Architect,
    ProjectManager,
}

impl LaborType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Worker => "worker",
            Self::Engineer => "engineer",
            Self::Architect => "architect",
            Self::ProjectManager => "project_manager",
        }
    }
}

impl fmt::Display for LaborType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SnapshotStatus
// ---------------------------------------------------------------------------

/// Display label of a stored dashboard snapshot. Metadata only; never
/// affects computed fields.
///
/// ```text
/// draft → final → archived
///       → archived
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotStatus {
    #[default]
    Draft,
    Final,
    Archived,
}

impl SnapshotStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Final, Self::Archived],
            Self::Final => &[Self::Archived],
            Self::Archived => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed. Staying put is
    /// always allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self == next || self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Final => "final",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for SnapshotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
