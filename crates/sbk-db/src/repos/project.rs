//! Project directory repository.

use chrono::Utc;
use sbk_core::entities::ProjectRecord;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::service::SiteService;

const SELECT_COLS: &str = "code, name, project_type, priority, created_at";

fn row_to_project(row: &libsql::Row) -> Result<ProjectRecord, DatabaseError> {
    Ok(ProjectRecord {
        code: row.get(0)?,
        name: row.get(1)?,
        project_type: row.get(2)?,
        priority: row.get(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl SiteService {
    /// Register a project. Type and priority are stored as given; unknown
    /// values price as neutral rather than failing here.
    pub async fn create_project(
        &self,
        code: &str,
        name: &str,
        project_type: &str,
        priority: &str,
    ) -> Result<ProjectRecord, DatabaseError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(DatabaseError::InvalidState("project code is required".into()));
        }
        let now = Utc::now();

        self.db()
            .conn()
            .execute(
                "INSERT INTO projects (code, name, project_type, priority, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![code, name, project_type, priority, now.to_rfc3339()],
            )
            .await?;

        tracing::debug!(project = code, "project created");

        Ok(ProjectRecord {
            code: code.to_string(),
            name: name.to_string(),
            project_type: project_type.to_string(),
            priority: priority.to_string(),
            created_at: now,
        })
    }

    pub async fn get_project(&self, code: &str) -> Result<ProjectRecord, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects WHERE code = ?1"),
                [code],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_project(&row)
    }

    /// Projects whose code is in `codes`, ordered by code. Unknown codes are
    /// simply absent from the result.
    pub async fn find_projects(
        &self,
        codes: &[String],
    ) -> Result<Vec<ProjectRecord>, DatabaseError> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders: Vec<String> = (1..=codes.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "SELECT {SELECT_COLS} FROM projects WHERE code IN ({}) ORDER BY code",
            placeholders.join(", ")
        );
        let params: Vec<libsql::Value> = codes.iter().map(|c| c.as_str().into()).collect();

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }

    /// Every project ordered by code, optionally capped at `limit`.
    pub async fn list_projects(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<ProjectRecord>, DatabaseError> {
        let limit_clause = limit.map(|l| format!(" LIMIT {l}")).unwrap_or_default();
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects ORDER BY code{limit_clause}"),
                (),
            )
            .await?;

        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }

    /// Delete a project and, through the foreign key, its timeline.
    pub async fn delete_project(&self, code: &str) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM projects WHERE code = ?1", [code])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }
}
