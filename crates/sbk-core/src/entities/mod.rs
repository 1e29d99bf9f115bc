//! Entity structs for all Sitebook domain objects.
//!
//! Project records and timeline entries map to tables in the libSQL database;
//! the snapshot types are persisted as one JSON payload per dashboard.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation.

mod project;
mod snapshot;
mod timeline;

pub use project::ProjectRecord;
pub use snapshot::{
    Analytics, CostTotals, DailyCost, DashboardSnapshot, Diagnostic, DiagnosticKind,
    FinancialSummary, LaborAnalytics, LaborLine, MaterialAnalytics, MaterialLine,
    ProjectBreakdown, SelectionCriteria, SnapshotSummary, StaffingCounts, ToolAnalytics, ToolLine,
};
pub use timeline::{
    ExpenseItem, ManagerAssignment, MaterialUsage, SpecialistAssignment, TimelineEntry, ToolUsage,
    WorkerAssignment,
};
