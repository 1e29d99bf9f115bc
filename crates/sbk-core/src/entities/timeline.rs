use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::measure::Measure;

/// A tradesperson on site for the day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct WorkerAssignment {
    #[serde(default)]
    pub name: String,
    /// Catalog key, e.g. `"General Laborer"`.
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub hours_worked: Measure,
}

/// An engineer or architect on site for the day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SpecialistAssignment {
    #[serde(default)]
    pub name: String,
    /// Catalog key, e.g. `"Structural"`.
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub hours_worked: Measure,
}

/// A project manager on site. No hours: managers are billed a fixed day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ManagerAssignment {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MaterialUsage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: Measure,
    /// Explicit total cost, used only for materials the catalog does not price.
    #[serde(default)]
    pub cost: Measure,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ToolUsage {
    #[serde(default)]
    pub name: String,
    /// Units rented for the day.
    #[serde(default)]
    pub quantity: Measure,
    /// Free-text rental status (`"in_use"`, `"returned"`, ...). Not priced.
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExpenseItem {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: Measure,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// One day of recorded activity on a single project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TimelineEntry {
    #[serde(default)]
    pub id: String,
    pub project_code: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub workers: Vec<WorkerAssignment>,
    #[serde(default)]
    pub engineers: Vec<SpecialistAssignment>,
    #[serde(default)]
    pub architects: Vec<SpecialistAssignment>,
    #[serde(default)]
    pub project_managers: Vec<ManagerAssignment>,
    #[serde(default)]
    pub materials: Vec<MaterialUsage>,
    #[serde(default)]
    pub tools: Vec<ToolUsage>,
    #[serde(default)]
    pub expenses: Vec<ExpenseItem>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TimelineEntry {
    /// An entry with no activity recorded yet.
    #[must_use]
    pub fn empty(project_code: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: String::new(),
            project_code: project_code.into(),
            date,
            workers: Vec::new(),
            engineers: Vec::new(),
            architects: Vec::new(),
            project_managers: Vec::new(),
            materials: Vec::new(),
            tools: Vec::new(),
            expenses: Vec::new(),
            notes: None,
        }
    }

    /// Whether the entry falls inside an inclusive, optionally open date range.
    #[must_use]
    pub fn within(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
        from.is_none_or(|from| self.date >= from) && to.is_none_or(|to| self.date <= to)
    }
}
