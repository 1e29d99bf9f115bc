use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A construction project as kept by the project directory.
///
/// `project_type` and `priority` stay as free text: the directory accepts
/// whatever the office records, and the cost engine degrades on values it
/// has no rates for.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectRecord {
    pub code: String,
    pub name: String,
    pub project_type: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
}
