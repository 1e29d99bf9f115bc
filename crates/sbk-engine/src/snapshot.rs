//! Final assembly of a dashboard snapshot from an aggregated portfolio.

use chrono::{DateTime, Utc};
use sbk_core::entities::{DashboardSnapshot, FinancialSummary};
use sbk_core::enums::SnapshotStatus;
use sbk_core::ids::{PREFIX_SNAPSHOT, format_id};
use sbk_core::request::CalculationRequest;

use crate::error::EngineError;
use crate::portfolio::Portfolio;

/// Share of the grand total reported as profit.
pub const ASSUMED_PROFIT_MARGIN: f64 = 0.15;

/// Identity given to a snapshot when it is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotStamp {
    pub id: String,
    pub calculated_at: DateTime<Utc>,
}

impl SnapshotStamp {
    /// A random `dsh-` id stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::IdGeneration` if the OS random source fails.
    pub fn fresh() -> Result<Self, EngineError> {
        let mut bytes = [0u8; 4];
        getrandom::fill(&mut bytes).map_err(|e| EngineError::IdGeneration(e.to_string()))?;
        Ok(Self {
            id: format_id(PREFIX_SNAPSHOT, bytes),
            calculated_at: Utc::now(),
        })
    }
}

#[must_use]
pub fn financial_summary(portfolio: &Portfolio) -> FinancialSummary {
    let grand_total = portfolio.totals.total_project_cost;
    let project_count = portfolio.projects.len() as u64;
    let average_project_cost = if project_count == 0 {
        0.0
    } else {
        grand_total / project_count as f64
    };
    let profit_margin = grand_total * ASSUMED_PROFIT_MARGIN;
    let roi = if grand_total == 0.0 {
        0.0
    } else {
        profit_margin / grand_total * 100.0
    };

    FinancialSummary {
        grand_total,
        project_count,
        timeline_entry_count: portfolio.timeline_entry_count,
        average_project_cost,
        profit_margin,
        roi,
    }
}

/// Build the immutable snapshot. Every computed field comes from
/// `portfolio`; only the identity comes from `stamp`.
#[must_use]
pub fn assemble_snapshot(
    request: &CalculationRequest,
    portfolio: Portfolio,
    stamp: SnapshotStamp,
) -> DashboardSnapshot {
    let summary = financial_summary(&portfolio);
    DashboardSnapshot {
        id: stamp.id,
        name: request.dashboard_name.trim().to_string(),
        status: SnapshotStatus::Draft,
        calculated_at: stamp.calculated_at,
        criteria: request.criteria(),
        totals: portfolio.totals,
        projects: portfolio.projects,
        analytics: portfolio.analytics,
        summary,
        missing_projects: portfolio.missing_projects,
        diagnostics: portfolio.diagnostics,
    }
}
