//! Dashboard calculation: read inputs, run the engine, store the snapshot.

use sbk_core::entities::{DashboardSnapshot, ProjectRecord, TimelineEntry};
use sbk_core::request::CalculationRequest;
use sbk_engine::CostEngine;
use sbk_engine::snapshot::{SnapshotStamp, assemble_snapshot};

use crate::error::{CalculationError, DatabaseError};
use crate::repos::TimelineFilter;
use crate::service::SiteService;

impl SiteService {
    /// Compute a dashboard snapshot for `request` and persist it.
    ///
    /// The snapshot is returned only once it has been committed; on any
    /// error nothing is stored.
    ///
    /// # Errors
    ///
    /// See [`CalculationError`] for the failure classes.
    pub async fn calculate_dashboard(
        &self,
        engine: &CostEngine,
        request: &CalculationRequest,
    ) -> Result<DashboardSnapshot, CalculationError> {
        request.validate()?;
        let criteria = request.criteria();

        let (projects, entries) = self.load_calculation_inputs(request).await?;
        tracing::debug!(
            projects = projects.len(),
            entries = entries.len(),
            requested = criteria.project_codes.len(),
            "calculation inputs loaded"
        );

        let portfolio = engine.aggregate(request, &projects, &entries)?;
        let stamp = SnapshotStamp::fresh()?;
        let snapshot = assemble_snapshot(request, portfolio, stamp);

        self.insert_snapshot(&snapshot)
            .await
            .map_err(|source| CalculationError::Persistence {
                source,
                projects_considered: snapshot.projects.len(),
                timelines_considered: usize::try_from(snapshot.summary.timeline_entry_count)
                    .unwrap_or(usize::MAX),
            })?;

        tracing::info!(
            snapshot = %snapshot.id,
            name = %snapshot.name,
            projects = snapshot.projects.len(),
            grand_total = snapshot.summary.grand_total,
            diagnostics = snapshot.diagnostics.len(),
            "dashboard snapshot stored"
        );
        Ok(snapshot)
    }

    async fn load_calculation_inputs(
        &self,
        request: &CalculationRequest,
    ) -> Result<(Vec<ProjectRecord>, Vec<TimelineEntry>), DatabaseError> {
        let codes = request.normalized_projects();

        if codes.is_empty() {
            let projects = self.list_projects(None).await?;
            let entries = self
                .find_timeline_entries(
                    &TimelineFilter::default().between(request.date_from, request.date_to),
                )
                .await?;
            return Ok((projects, entries));
        }

        let projects = self.find_projects(&codes).await?;
        let mut entries = Vec::new();
        for project in &projects {
            let filter = TimelineFilter::for_project(project.code.as_str())
                .between(request.date_from, request.date_to);
            entries.extend(self.find_timeline_entries(&filter).await?);
        }
        Ok((projects, entries))
    }
}
