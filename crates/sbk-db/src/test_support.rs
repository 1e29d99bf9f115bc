//! Shared test utilities for sbk-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::NaiveDate;
    use sbk_core::entities::{ProjectRecord, TimelineEntry, WorkerAssignment};
    use sbk_core::measure::Measure;

    use crate::SiteDb;
    use crate::service::SiteService;

    /// Create an in-memory SiteService.
    pub async fn test_service() -> SiteService {
        let db = SiteDb::open_local(":memory:").await.unwrap();
        SiteService::from_db(db)
    }

    pub fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    /// Create a project and return it.
    pub async fn seed_project(
        svc: &SiteService,
        code: &str,
        project_type: &str,
        priority: &str,
    ) -> ProjectRecord {
        svc.create_project(code, &format!("Project {code}"), project_type, priority)
            .await
            .unwrap()
    }

    /// Record one General Laborer working `hours` on `d` June 2024.
    pub async fn seed_laborer_day(
        svc: &SiteService,
        code: &str,
        d: u32,
        hours: f64,
    ) -> TimelineEntry {
        let mut entry = TimelineEntry::empty(code, day(d));
        entry.workers.push(WorkerAssignment {
            name: "Ana".into(),
            role: "General Laborer".into(),
            hours_worked: Measure::Value(hours),
        });
        svc.add_timeline_entry(entry).await.unwrap()
    }
}
