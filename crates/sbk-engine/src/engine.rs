use sbk_core::entities::{DashboardSnapshot, ProjectRecord, TimelineEntry};
use sbk_core::request::CalculationRequest;

use crate::catalog::RateCatalog;
use crate::error::EngineError;
use crate::portfolio::{EngineOptions, Portfolio, aggregate_portfolio};
use crate::snapshot::{SnapshotStamp, assemble_snapshot};

/// A loaded catalog plus the options every calculation runs with.
///
/// Cheap to share across threads; holds no per-calculation state.
#[derive(Debug, Clone)]
pub struct CostEngine {
    catalog: RateCatalog,
    options: EngineOptions,
}

impl CostEngine {
    #[must_use]
    pub const fn new(catalog: RateCatalog, options: EngineOptions) -> Self {
        Self { catalog, options }
    }

    #[must_use]
    pub const fn catalog(&self) -> &RateCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Aggregate without assembling a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::BudgetExceeded` if the compute budget runs out,
    /// or `EngineError::NonFiniteTotal` if a total overflows.
    pub fn aggregate(
        &self,
        request: &CalculationRequest,
        projects: &[ProjectRecord],
        entries: &[TimelineEntry],
    ) -> Result<Portfolio, EngineError> {
        aggregate_portfolio(
            &self.catalog,
            projects,
            entries,
            &request.criteria(),
            &self.options,
        )
    }

    /// Aggregate and assemble a snapshot under `stamp`.
    ///
    /// The request is assumed valid; see [`CalculationRequest::validate`].
    ///
    /// # Errors
    ///
    /// See [`CostEngine::aggregate`].
    pub fn calculate(
        &self,
        request: &CalculationRequest,
        projects: &[ProjectRecord],
        entries: &[TimelineEntry],
        stamp: SnapshotStamp,
    ) -> Result<DashboardSnapshot, EngineError> {
        let portfolio = self.aggregate(request, projects, entries)?;
        Ok(assemble_snapshot(request, portfolio, stamp))
    }
}

impl Default for CostEngine {
    fn default() -> Self {
        Self::new(RateCatalog::builtin(), EngineOptions::default())
    }
}
