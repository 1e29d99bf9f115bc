//! Per-project rollup of timeline entries into a priced breakdown.

use std::collections::BTreeMap;

use sbk_core::entities::{
    Analytics, DailyCost, Diagnostic, DiagnosticKind, ProjectBreakdown, ProjectRecord,
    StaffingCounts, TimelineEntry,
};

use crate::catalog::RateCatalog;
use crate::labor::{Crew, labor_cost};
use crate::multiplier::resolve_multiplier;
use crate::resources::{expense_cost, material_cost, tool_cost};

/// One project's share of a portfolio.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRollup {
    pub breakdown: ProjectBreakdown,
    pub analytics: Analytics,
    pub diagnostics: Vec<Diagnostic>,
}

fn add_to(map: &mut BTreeMap<String, f64>, key: &str, amount: f64) {
    *map.entry(key.to_string()).or_insert(0.0) += amount;
}

/// Fold `other` into `into`. Map entries are summed key by key.
pub fn merge_analytics(into: &mut Analytics, other: &Analytics) {
    into.labor.total_hours += other.labor.total_hours;
    into.labor.staffing += other.labor.staffing;
    for (role, hours) in &other.labor.hours_by_role {
        add_to(&mut into.labor.hours_by_role, role, *hours);
    }
    for (role, cost) in &other.labor.cost_by_role {
        add_to(&mut into.labor.cost_by_role, role, *cost);
    }
    for (name, spend) in &other.materials.spend_by_material {
        add_to(&mut into.materials.spend_by_material, name, *spend);
    }
    for (name, quantity) in &other.materials.quantity_by_material {
        add_to(&mut into.materials.quantity_by_material, name, *quantity);
    }
    for (name, spend) in &other.tools.spend_by_tool {
        add_to(&mut into.tools.spend_by_tool, name, *spend);
    }
    for (name, units) in &other.tools.units_by_tool {
        add_to(&mut into.tools.units_by_tool, name, *units);
    }
}

/// Drop every priced figure of a day that overflowed. Headcounts stay.
fn clear_prices(day: &mut DailyCost) {
    day.daily_cost = 0.0;
    day.labor_cost = 0.0;
    day.material_cost = 0.0;
    day.tool_cost = 0.0;
    day.expense_cost = 0.0;
    day.labor.clear();
    day.materials.clear();
    day.tools.clear();
}

/// Price every entry of one project, in the order given.
///
/// The project multiplier is resolved once and applied to each of the four
/// daily components; the base cost is charged once. Staffing and hours are
/// counted before the multiplier. Unknown keys and malformed numbers
/// contribute zero and come back as diagnostics.
#[must_use]
pub fn roll_up_project(
    catalog: &RateCatalog,
    project: &ProjectRecord,
    entries: &[&TimelineEntry],
) -> ProjectRollup {
    let resolved = resolve_multiplier(catalog, &project.project_type, &project.priority);
    let factor = resolved.multiplier;

    let mut diagnostics: Vec<Diagnostic> = resolved
        .degraded
        .into_iter()
        .map(|kind| Diagnostic {
            project_code: project.code.clone(),
            entry_id: None,
            date: None,
            kind,
        })
        .collect();
    let mut analytics = Analytics::default();
    let mut daily_costs = Vec::with_capacity(entries.len());
    let mut staffing = StaffingCounts::default();
    let (mut labor_total, mut material_total, mut tool_total, mut expense_total) =
        (0.0, 0.0, 0.0, 0.0);
    let mut labor_hours = 0.0;

    for entry in entries {
        let labor = labor_cost(catalog, Crew::of(entry));
        let materials = material_cost(catalog, &entry.materials);
        let tools = tool_cost(catalog, &entry.tools);
        let expenses = expense_cost(&entry.expenses);

        let mut day = DailyCost {
            date: entry.date,
            entry_id: entry.id.clone(),
            labor_cost: labor.total * factor,
            material_cost: materials.total * factor,
            tool_cost: tools.total * factor,
            expense_cost: expenses.total * factor,
            daily_cost: (labor.total + materials.total + tools.total + expenses.total) * factor,
            workers: labor.staffing.workers,
            engineers: labor.staffing.engineers,
            architects: labor.staffing.architects,
            project_managers: labor.staffing.project_managers,
            labor: labor.lines,
            materials: materials.lines,
            tools: tools.lines,
        };
        let mut day_hours = labor.total_hours;
        if !(day.daily_cost.is_finite() && day_hours.is_finite()) {
            diagnostics.push(Diagnostic {
                project_code: project.code.clone(),
                entry_id: Some(entry.id.clone()),
                date: Some(entry.date),
                kind: DiagnosticKind::MalformedNumber {
                    field: "daily_cost".to_string(),
                    raw: day.daily_cost.to_string(),
                },
            });
            day_hours = 0.0;
            clear_prices(&mut day);
        }

        labor_total += day.labor_cost;
        material_total += day.material_cost;
        tool_total += day.tool_cost;
        expense_total += day.expense_cost;
        labor_hours += day_hours;
        staffing += labor.staffing;

        analytics.labor.total_hours += day_hours;
        analytics.labor.staffing += labor.staffing;
        for line in &day.labor {
            add_to(&mut analytics.labor.hours_by_role, &line.role, line.hours);
            add_to(&mut analytics.labor.cost_by_role, &line.role, line.cost * factor);
        }
        for line in &day.materials {
            add_to(&mut analytics.materials.spend_by_material, &line.name, line.cost * factor);
            add_to(&mut analytics.materials.quantity_by_material, &line.name, line.quantity);
        }
        for line in &day.tools {
            add_to(&mut analytics.tools.spend_by_tool, &line.name, line.cost * factor);
            add_to(&mut analytics.tools.units_by_tool, &line.name, line.quantity);
        }

        let degraded = labor
            .degraded
            .into_iter()
            .chain(materials.degraded)
            .chain(tools.degraded)
            .chain(expenses.degraded);
        diagnostics.extend(degraded.map(|kind| Diagnostic {
            project_code: project.code.clone(),
            entry_id: Some(entry.id.clone()),
            date: Some(entry.date),
            kind,
        }));

        daily_costs.push(day);
    }

    for diagnostic in &diagnostics {
        log_degraded(diagnostic);
    }

    let breakdown = ProjectBreakdown {
        project_code: project.code.clone(),
        project_name: project.name.clone(),
        project_type: project.project_type.clone(),
        priority: project.priority.clone(),
        base_cost: resolved.base_cost,
        multiplier: factor,
        labor_cost: labor_total,
        material_cost: material_total,
        tool_cost: tool_total,
        expense_cost: expense_total,
        total_cost: resolved.base_cost + labor_total + material_total + tool_total + expense_total,
        timeline_entries: entries.len() as u64,
        staffing,
        labor_hours,
        daily_costs,
    };

    tracing::debug!(
        project = %breakdown.project_code,
        entries = breakdown.timeline_entries,
        total = breakdown.total_cost,
        "project rolled up"
    );

    ProjectRollup {
        breakdown,
        analytics,
        diagnostics,
    }
}

fn log_degraded(diagnostic: &Diagnostic) {
    let entry = diagnostic.entry_id.as_deref().unwrap_or("-");
    match &diagnostic.kind {
        DiagnosticKind::UnknownRate { rate_kind, key } => tracing::warn!(
            project = %diagnostic.project_code,
            entry,
            %rate_kind,
            key = %key,
            "no catalog rate, contributing zero"
        ),
        DiagnosticKind::MalformedNumber { field, raw } => tracing::warn!(
            project = %diagnostic.project_code,
            entry,
            field = %field,
            raw = %raw,
            "malformed number, contributing zero"
        ),
        DiagnosticKind::UnknownProjectType { key } => tracing::warn!(
            project = %diagnostic.project_code,
            key = %key,
            "unknown project type, no base cost and factor 1"
        ),
        DiagnosticKind::UnknownPriority { key } => tracing::warn!(
            project = %diagnostic.project_code,
            key = %key,
            "unknown priority, no urgency fee and factor 1"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use sbk_core::entities::{MaterialUsage, WorkerAssignment};
    use sbk_core::measure::Measure;

    fn project(project_type: &str, priority: &str) -> ProjectRecord {
        ProjectRecord {
            code: "PRJ-1".into(),
            name: "Test".into(),
            project_type: project_type.into(),
            priority: priority.into(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn entry(id: &str, d: u32) -> TimelineEntry {
        let mut entry =
            TimelineEntry::empty("PRJ-1", NaiveDate::from_ymd_opt(2024, 4, d).unwrap());
        entry.id = id.into();
        entry
    }

    #[test]
    fn multiplier_applies_to_components_not_base() {
        let mut day = entry("tle-00000001", 1);
        day.workers.push(WorkerAssignment {
            name: "Ana".into(),
            role: "General Laborer".into(),
            hours_worked: Measure::Value(8.0),
        });
        let rollup = roll_up_project(
            &RateCatalog::builtin(),
            &project("Bridge Construction", "Critical"),
            &[&day],
        );
        let b = &rollup.breakdown;
        assert_eq!(b.base_cost, 28_000.0);
        assert_eq!(b.multiplier, 3.0);
        assert_eq!(b.labor_cost, 360.0);
        assert_eq!(b.total_cost, 28_360.0);
        assert_eq!(b.labor_hours, 8.0);
        assert_eq!(b.daily_costs[0].labor[0].cost, 120.0);
        assert_eq!(rollup.analytics.labor.cost_by_role["General Laborer"], 360.0);
        assert_eq!(rollup.analytics.labor.hours_by_role["General Laborer"], 8.0);
    }

    #[test]
    fn base_cost_is_charged_once_for_many_days() {
        let days: Vec<TimelineEntry> = (1..=5)
            .map(|d| entry(&format!("tle-0000000{d}"), d))
            .collect();
        let refs: Vec<&TimelineEntry> = days.iter().collect();
        let rollup = roll_up_project(
            &RateCatalog::builtin(),
            &project("Residential Building", "Medium"),
            &refs,
        );
        assert_eq!(rollup.breakdown.base_cost, 10_500.0);
        assert_eq!(rollup.breakdown.total_cost, 10_500.0);
        assert_eq!(rollup.breakdown.daily_costs.len(), 5);
    }

    #[test]
    fn project_without_entries_still_has_a_breakdown() {
        let rollup = roll_up_project(&RateCatalog::builtin(), &project("Renovation", "Low"), &[]);
        assert_eq!(rollup.breakdown.timeline_entries, 0);
        assert_eq!(rollup.breakdown.labor_cost, 0.0);
        assert_eq!(rollup.breakdown.total_cost, 5_000.0);
    }

    #[test]
    fn degraded_inputs_carry_entry_context() {
        let mut day = entry("tle-0000000a", 2);
        day.materials.push(MaterialUsage {
            name: "Concrete".into(),
            quantity: Measure::from_text("lots"),
            cost: Measure::Absent,
        });
        let rollup = roll_up_project(&RateCatalog::builtin(), &project("Moonbase", "Low"), &[&day]);

        assert_eq!(rollup.diagnostics.len(), 2);
        assert_eq!(rollup.diagnostics[0].entry_id, None);
        assert!(matches!(
            rollup.diagnostics[0].kind,
            DiagnosticKind::UnknownProjectType { .. }
        ));
        assert_eq!(rollup.diagnostics[1].entry_id.as_deref(), Some("tle-0000000a"));
        assert_eq!(rollup.breakdown.material_cost, 0.0);
    }

    #[test]
    fn overflowing_day_contributes_zero() {
        let mut huge = entry("tle-0000000b", 3);
        huge.workers.push(WorkerAssignment {
            name: "Bo".into(),
            role: "Foreman".into(),
            hours_worked: Measure::from_text("1e307"),
        });
        let mut normal = entry("tle-0000000c", 4);
        normal.workers.push(WorkerAssignment {
            name: "Ana".into(),
            role: "General Laborer".into(),
            hours_worked: Measure::Value(8.0),
        });
        let rollup = roll_up_project(
            &RateCatalog::builtin(),
            &project("Bridge Construction", "Critical"),
            &[&huge, &normal],
        );

        let b = &rollup.breakdown;
        assert_eq!(b.labor_cost, 360.0);
        assert_eq!(b.total_cost, 28_360.0);
        assert_eq!(b.labor_hours, 8.0);
        assert_eq!(b.daily_costs[0].daily_cost, 0.0);
        assert!(b.daily_costs[0].labor.is_empty());
        assert_eq!(b.daily_costs[0].workers, 1);
        assert_eq!(rollup.analytics.labor.cost_by_role.get("Foreman"), None);
        assert_eq!(rollup.analytics.labor.total_hours, 8.0);

        assert_eq!(rollup.diagnostics.len(), 1);
        assert_eq!(rollup.diagnostics[0].entry_id.as_deref(), Some("tle-0000000b"));
        assert!(matches!(
            &rollup.diagnostics[0].kind,
            DiagnosticKind::MalformedNumber { field, raw } if field == "daily_cost" && raw == "inf"
        ));
    }

    #[test]
    fn merge_sums_maps_key_by_key() {
        let mut day = entry("tle-00000001", 1);
        day.workers.push(WorkerAssignment {
            name: "Ana".into(),
            role: "Mason".into(),
            hours_worked: Measure::Value(2.0),
        });
        let rollup =
            roll_up_project(&RateCatalog::builtin(), &project("Renovation", "Low"), &[&day]);

        let mut total = Analytics::default();
        merge_analytics(&mut total, &rollup.analytics);
        merge_analytics(&mut total, &rollup.analytics);
        assert_eq!(total.labor.hours_by_role["Mason"], 4.0);
        assert_eq!(total.labor.staffing.workers, 2);
    }
}
