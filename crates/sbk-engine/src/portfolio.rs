//! Portfolio aggregation across every selected project.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use sbk_core::entities::{
    Analytics, CostTotals, Diagnostic, ProjectBreakdown, ProjectRecord, SelectionCriteria,
    TimelineEntry,
};

use crate::catalog::RateCatalog;
use crate::error::{BudgetLimit, EngineError};
use crate::rollup::{ProjectRollup, merge_analytics, roll_up_project};

pub const DEFAULT_MAX_TIMELINE_ENTRIES: usize = 250_000;
pub const DEFAULT_MAX_WALL_CLOCK: Duration = Duration::from_secs(30);

/// Upper bounds on a single calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputeBudget {
    pub max_timeline_entries: usize,
    pub max_wall_clock: Duration,
}

impl Default for ComputeBudget {
    fn default() -> Self {
        Self {
            max_timeline_entries: DEFAULT_MAX_TIMELINE_ENTRIES,
            max_wall_clock: DEFAULT_MAX_WALL_CLOCK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Roll projects up on the rayon pool. Output is identical either way.
    pub parallel: bool,
    pub budget: ComputeBudget,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            budget: ComputeBudget::default(),
        }
    }
}

/// Everything a snapshot needs except its identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    pub totals: CostTotals,
    pub projects: Vec<ProjectBreakdown>,
    pub analytics: Analytics,
    pub timeline_entry_count: u64,
    /// Requested codes with no matching project record, in request order.
    pub missing_projects: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

fn first_bad<'a>(figures: &[(&'a str, f64)]) -> Option<&'a str> {
    figures
        .iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(field, _)| *field)
}

impl Portfolio {
    /// Path of the first computed figure that is not a finite number.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<String> {
        let t = &self.totals;
        if let Some(field) = first_bad(&[
            ("total_project_cost", t.total_project_cost),
            ("total_base_cost", t.total_base_cost),
            ("total_labor_cost", t.total_labor_cost),
            ("total_material_cost", t.total_material_cost),
            ("total_tool_cost", t.total_tool_cost),
            ("total_expense_cost", t.total_expense_cost),
        ]) {
            return Some(format!("totals.{field}"));
        }

        for p in &self.projects {
            if let Some(field) = first_bad(&[
                ("base_cost", p.base_cost),
                ("multiplier", p.multiplier),
                ("total_cost", p.total_cost),
                ("labor_cost", p.labor_cost),
                ("material_cost", p.material_cost),
                ("tool_cost", p.tool_cost),
                ("expense_cost", p.expense_cost),
                ("labor_hours", p.labor_hours),
            ]) {
                return Some(format!("projects[{}].{field}", p.project_code));
            }
        }

        let a = &self.analytics;
        if !a.labor.total_hours.is_finite() {
            return Some("analytics.labor.total_hours".to_string());
        }
        let maps = [
            ("analytics.labor.hours_by_role", &a.labor.hours_by_role),
            ("analytics.labor.cost_by_role", &a.labor.cost_by_role),
            ("analytics.materials.spend_by_material", &a.materials.spend_by_material),
            ("analytics.materials.quantity_by_material", &a.materials.quantity_by_material),
            ("analytics.tools.spend_by_tool", &a.tools.spend_by_tool),
            ("analytics.tools.units_by_tool", &a.tools.units_by_tool),
        ];
        for (path, map) in maps {
            if let Some(key) = map.iter().find(|(_, v)| !v.is_finite()).map(|(k, _)| k) {
                return Some(format!("{path}[{key}]"));
            }
        }
        None
    }
}

/// Pick the projects a calculation covers, in output order.
///
/// With no requested codes every known project is selected in the order
/// given. Otherwise requested codes are matched in request order, and codes
/// with no record are returned separately.
#[must_use]
pub fn select_projects<'a>(
    known: &'a [ProjectRecord],
    requested: &[String],
) -> (Vec<&'a ProjectRecord>, Vec<String>) {
    if requested.is_empty() {
        return (known.iter().collect(), Vec::new());
    }
    let by_code: HashMap<&str, &ProjectRecord> =
        known.iter().map(|p| (p.code.as_str(), p)).collect();

    let mut selected = Vec::with_capacity(requested.len());
    let mut missing = Vec::new();
    for code in requested {
        match by_code.get(code.as_str()) {
            Some(project) => {
                if !selected.iter().any(|p: &&ProjectRecord| p.code == project.code) {
                    selected.push(*project);
                }
            }
            None => {
                if !missing.contains(code) {
                    missing.push(code.clone());
                }
            }
        }
    }
    (selected, missing)
}

/// Roll up every selected project and fold the results into grand totals.
///
/// `entries` may contain entries of unselected projects and entries outside
/// the date range; both are ignored. Entries of one project are priced in
/// the order they appear in `entries`.
///
/// # Errors
///
/// Returns `EngineError::BudgetExceeded` when the matching entries exceed
/// `max_timeline_entries` (checked before any work), or when the wall clock
/// budget runs out before a project's rollup starts. Returns
/// `EngineError::NonFiniteTotal` when a folded figure overflows.
pub fn aggregate_portfolio(
    catalog: &RateCatalog,
    known: &[ProjectRecord],
    entries: &[TimelineEntry],
    criteria: &SelectionCriteria,
    options: &EngineOptions,
) -> Result<Portfolio, EngineError> {
    aggregate_since(Instant::now(), catalog, known, entries, criteria, options)
}

/// [`aggregate_portfolio`] with the wall clock budget counted from `started`.
fn aggregate_since(
    started: Instant,
    catalog: &RateCatalog,
    known: &[ProjectRecord],
    entries: &[TimelineEntry],
    criteria: &SelectionCriteria,
    options: &EngineOptions,
) -> Result<Portfolio, EngineError> {
    let (selected, missing_projects) = select_projects(known, &criteria.project_codes);

    for code in &missing_projects {
        tracing::warn!(project = %code, "requested project not found, leaving it out");
    }

    let mut by_project: HashMap<&str, Vec<&TimelineEntry>> =
        selected.iter().map(|p| (p.code.as_str(), Vec::new())).collect();
    for entry in entries {
        if !entry.within(criteria.date_from, criteria.date_to) {
            continue;
        }
        if let Some(bucket) = by_project.get_mut(entry.project_code.as_str()) {
            bucket.push(entry);
        }
    }

    let timelines_considered: usize = by_project.values().map(Vec::len).sum();
    let projects_considered = selected.len();
    let budget = options.budget;
    if timelines_considered > budget.max_timeline_entries {
        return Err(EngineError::BudgetExceeded {
            limit: BudgetLimit::TimelineEntries {
                max: budget.max_timeline_entries,
                found: timelines_considered,
            },
            projects_considered,
            timelines_considered,
        });
    }

    let roll = |project: &&ProjectRecord| -> Result<ProjectRollup, EngineError> {
        if started.elapsed() > budget.max_wall_clock {
            return Err(EngineError::BudgetExceeded {
                limit: BudgetLimit::WallClock {
                    max_ms: u64::try_from(budget.max_wall_clock.as_millis()).unwrap_or(u64::MAX),
                },
                projects_considered,
                timelines_considered,
            });
        }
        let project_entries = by_project
            .get(project.code.as_str())
            .map_or(&[][..], Vec::as_slice);
        Ok(roll_up_project(catalog, project, project_entries))
    };

    let rollups: Vec<ProjectRollup> = if options.parallel {
        selected.par_iter().map(roll).collect::<Result<Vec<_>, _>>()?
    } else {
        selected.iter().map(roll).collect::<Result<Vec<_>, _>>()?
    };

    let mut portfolio = Portfolio {
        missing_projects,
        ..Portfolio::default()
    };
    for rollup in rollups {
        let b = &rollup.breakdown;
        portfolio.totals.total_project_cost += b.total_cost;
        portfolio.totals.total_base_cost += b.base_cost;
        portfolio.totals.total_labor_cost += b.labor_cost;
        portfolio.totals.total_material_cost += b.material_cost;
        portfolio.totals.total_tool_cost += b.tool_cost;
        portfolio.totals.total_expense_cost += b.expense_cost;
        portfolio.timeline_entry_count += b.timeline_entries;
        merge_analytics(&mut portfolio.analytics, &rollup.analytics);
        portfolio.diagnostics.extend(rollup.diagnostics);
        portfolio.projects.push(rollup.breakdown);
    }

    if let Some(field) = portfolio.first_non_finite() {
        return Err(EngineError::NonFiniteTotal {
            field,
            projects_considered,
            timelines_considered,
        });
    }

    tracing::debug!(
        projects = portfolio.projects.len(),
        entries = portfolio.timeline_entry_count,
        elapsed = ?started.elapsed(),
        parallel = options.parallel,
        "portfolio aggregated"
    );

    Ok(portfolio)
}
