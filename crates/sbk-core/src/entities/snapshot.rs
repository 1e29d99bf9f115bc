use std::collections::BTreeMap;
use std::ops::AddAssign;

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{LaborType, RateKind, SnapshotStatus};

/// One priced person-day.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LaborLine {
    #[serde(rename = "type")]
    pub labor_type: LaborType,
    pub name: String,
    /// Role or specialty as it appears in the catalog.
    pub role: String,
    pub hours: f64,
    pub rate: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MaterialLine {
    pub name: String,
    pub quantity: f64,
    /// Catalog unit cost, or the implied unit cost of a custom material.
    pub unit_cost: f64,
    pub cost: f64,
    /// `true` when priced from an explicit cost rather than the catalog.
    pub custom: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ToolLine {
    pub name: String,
    pub quantity: f64,
    pub daily_rate: f64,
    pub cost: f64,
    pub status: Option<String>,
}

/// Head counts by staffing list.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StaffingCounts {
    pub workers: u64,
    pub engineers: u64,
    pub architects: u64,
    pub project_managers: u64,
}

impl StaffingCounts {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.workers + self.engineers + self.architects + self.project_managers
    }
}

impl AddAssign for StaffingCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.workers += rhs.workers;
        self.engineers += rhs.engineers;
        self.architects += rhs.architects;
        self.project_managers += rhs.project_managers;
    }
}

/// Cost line for one timeline entry, after the project multiplier.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DailyCost {
    pub date: NaiveDate,
    pub entry_id: String,
    pub daily_cost: f64,
    pub labor_cost: f64,
    pub material_cost: f64,
    pub tool_cost: f64,
    pub expense_cost: f64,
    pub workers: u64,
    pub engineers: u64,
    pub architects: u64,
    pub project_managers: u64,
    /// Itemized lines at catalog prices (before the multiplier).
    pub labor: Vec<LaborLine>,
    pub materials: Vec<MaterialLine>,
    pub tools: Vec<ToolLine>,
}

/// Per-project subtotal nested inside a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProjectBreakdown {
    pub project_code: String,
    pub project_name: String,
    pub project_type: String,
    pub priority: String,
    /// Type base cost plus priority urgency fee, charged once per project.
    pub base_cost: f64,
    pub multiplier: f64,
    pub labor_cost: f64,
    pub material_cost: f64,
    pub tool_cost: f64,
    pub expense_cost: f64,
    /// `base_cost + labor_cost + material_cost + tool_cost + expense_cost`.
    pub total_cost: f64,
    pub timeline_entries: u64,
    pub staffing: StaffingCounts,
    pub labor_hours: f64,
    pub daily_costs: Vec<DailyCost>,
}

/// Portfolio grand totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CostTotals {
    pub total_project_cost: f64,
    pub total_base_cost: f64,
    pub total_labor_cost: f64,
    pub total_material_cost: f64,
    pub total_tool_cost: f64,
    pub total_expense_cost: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LaborAnalytics {
    pub total_hours: f64,
    pub hours_by_role: BTreeMap<String, f64>,
    /// Multiplier-adjusted labor cost by role.
    pub cost_by_role: BTreeMap<String, f64>,
    pub staffing: StaffingCounts,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MaterialAnalytics {
    /// Multiplier-adjusted spend by material name.
    pub spend_by_material: BTreeMap<String, f64>,
    pub quantity_by_material: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ToolAnalytics {
    /// Multiplier-adjusted rental spend by tool name.
    pub spend_by_tool: BTreeMap<String, f64>,
    pub units_by_tool: BTreeMap<String, f64>,
}

/// Portfolio-wide counters computed alongside the totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Analytics {
    pub labor: LaborAnalytics,
    pub materials: MaterialAnalytics,
    pub tools: ToolAnalytics,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FinancialSummary {
    pub grand_total: f64,
    pub project_count: u64,
    pub timeline_entry_count: u64,
    pub average_project_cost: f64,
    /// Assumed margin: a fixed share of the grand total.
    pub profit_margin: f64,
    /// `profit_margin / grand_total * 100`, or 0 for an empty portfolio.
    pub roi: f64,
}

/// What a calculation was asked to cover.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SelectionCriteria {
    /// Requested project codes; empty means every known project.
    pub project_codes: Vec<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Why an input contributed zero.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    UnknownRate { rate_kind: RateKind, key: String },
    MalformedNumber { field: String, raw: String },
    UnknownProjectType { key: String },
    UnknownPriority { key: String },
}

/// A degraded lookup recorded during a calculation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Diagnostic {
    pub project_code: String,
    pub entry_id: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

/// The persisted result of one calculation request.
///
/// Only `name` and `status` may change after creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DashboardSnapshot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: SnapshotStatus,
    pub calculated_at: DateTime<Utc>,
    pub criteria: SelectionCriteria,
    pub totals: CostTotals,
    pub projects: Vec<ProjectBreakdown>,
    pub analytics: Analytics,
    pub summary: FinancialSummary,
    /// Requested project codes the directory did not know.
    #[serde(default)]
    pub missing_projects: Vec<String>,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

/// A stored snapshot as shown in listings, without its breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SnapshotSummary {
    pub id: String,
    pub name: String,
    pub status: SnapshotStatus,
    pub calculated_at: DateTime<Utc>,
    pub grand_total: f64,
    pub project_count: u64,
    pub timeline_entry_count: u64,
}

impl From<&DashboardSnapshot> for SnapshotSummary {
    fn from(snapshot: &DashboardSnapshot) -> Self {
        Self {
            id: snapshot.id.clone(),
            name: snapshot.name.clone(),
            status: snapshot.status,
            calculated_at: snapshot.calculated_at,
            grand_total: snapshot.summary.grand_total,
            project_count: snapshot.summary.project_count,
            timeline_entry_count: snapshot.summary.timeline_entry_count,
        }
    }
}
