//! Labor pricing for one day's crew.

use sbk_core::entities::{
    DiagnosticKind, LaborLine, ManagerAssignment, SpecialistAssignment, StaffingCounts,
    TimelineEntry, WorkerAssignment,
};
use sbk_core::enums::{LaborType, RateKind};
use sbk_core::measure::Measure;

use crate::catalog::RateCatalog;

/// Project managers record no hours and are billed a fixed day.
pub const MANAGER_DAY_HOURS: f64 = 8.0;
pub const MANAGER_HOURLY_RATE: f64 = 45.0;
pub const MANAGER_ROLE: &str = "Project Manager";

/// The four staffing lists of a timeline entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crew<'a> {
    pub workers: &'a [WorkerAssignment],
    pub engineers: &'a [SpecialistAssignment],
    pub architects: &'a [SpecialistAssignment],
    pub project_managers: &'a [ManagerAssignment],
}

impl<'a> Crew<'a> {
    #[must_use]
    pub fn of(entry: &'a TimelineEntry) -> Self {
        Self {
            workers: &entry.workers,
            engineers: &entry.engineers,
            architects: &entry.architects,
            project_managers: &entry.project_managers,
        }
    }

    #[must_use]
    pub const fn staffing(&self) -> StaffingCounts {
        StaffingCounts {
            workers: self.workers.len() as u64,
            engineers: self.engineers.len() as u64,
            architects: self.architects.len() as u64,
            project_managers: self.project_managers.len() as u64,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaborCost {
    pub total: f64,
    /// Priced assignments in input order: workers, engineers, architects,
    /// then project managers.
    pub lines: Vec<LaborLine>,
    /// Hours of every parsed assignment, priced or not.
    pub total_hours: f64,
    pub staffing: StaffingCounts,
    pub degraded: Vec<DiagnosticKind>,
}

impl LaborCost {
    #[allow(clippy::too_many_arguments)]
    fn push_hours(
        &mut self,
        catalog: &RateCatalog,
        labor_type: LaborType,
        kind: RateKind,
        field: String,
        name: &str,
        role: &str,
        hours: &Measure,
    ) {
        if let Some(raw) = hours.malformed() {
            self.degraded.push(DiagnosticKind::MalformedNumber {
                field,
                raw: raw.to_string(),
            });
        }
        let hours = hours.or_zero();
        self.total_hours += hours;

        let Some((role, rate)) = catalog.hourly_rate(kind, role) else {
            self.degraded.push(DiagnosticKind::UnknownRate {
                rate_kind: kind,
                key: role.to_string(),
            });
            return;
        };
        let cost = hours * rate;
        self.total += cost;
        self.lines.push(LaborLine {
            labor_type,
            name: name.to_string(),
            role: role.to_string(),
            hours,
            rate,
            cost,
        });
    }
}

/// Price a crew against the catalog. Unknown roles contribute zero and are
/// left out of `lines`; they are reported in `degraded`.
#[must_use]
pub fn labor_cost(catalog: &RateCatalog, crew: Crew<'_>) -> LaborCost {
    let mut cost = LaborCost {
        staffing: crew.staffing(),
        ..LaborCost::default()
    };

    for (i, worker) in crew.workers.iter().enumerate() {
        cost.push_hours(
            catalog,
            LaborType::Worker,
            RateKind::WorkerRole,
            format!("workers[{i}].hours_worked"),
            &worker.name,
            &worker.role,
            &worker.hours_worked,
        );
    }
    for (i, engineer) in crew.engineers.iter().enumerate() {
        cost.push_hours(
            catalog,
            LaborType::Engineer,
            RateKind::EngineerSpecialty,
            format!("engineers[{i}].hours_worked"),
            &engineer.name,
            &engineer.specialty,
            &engineer.hours_worked,
        );
    }
    for (i, architect) in crew.architects.iter().enumerate() {
        cost.push_hours(
            catalog,
            LaborType::Architect,
            RateKind::ArchitectSpecialty,
            format!("architects[{i}].hours_worked"),
            &architect.name,
            &architect.specialty,
            &architect.hours_worked,
        );
    }
    for manager in crew.project_managers {
        let line_cost = MANAGER_DAY_HOURS * MANAGER_HOURLY_RATE;
        cost.total += line_cost;
        cost.total_hours += MANAGER_DAY_HOURS;
        cost.lines.push(LaborLine {
            labor_type: LaborType::ProjectManager,
            name: manager.name.clone(),
            role: MANAGER_ROLE.to_string(),
            hours: MANAGER_DAY_HOURS,
            rate: MANAGER_HOURLY_RATE,
            cost: line_cost,
        });
    }

    cost
}
