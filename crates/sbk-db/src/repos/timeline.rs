//! Timeline store: one row per project per recorded day.

use std::path::Path;

use chrono::NaiveDate;
use sbk_core::entities::TimelineEntry;
use sbk_core::ids::PREFIX_TIMELINE;

use crate::error::DatabaseError;
use crate::helpers::{decode_json_list, encode_json, get_opt_string, parse_date};
use crate::service::SiteService;

const SELECT_COLS: &str = "id, project_code, entry_date, workers, engineers, architects, \
                           project_managers, materials, tools, expenses, notes";

/// Which entries to read. Every field is optional; date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineFilter {
    pub project_code: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl TimelineFilter {
    #[must_use]
    pub fn for_project(code: impl Into<String>) -> Self {
        Self {
            project_code: Some(code.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }
}

fn list<T: serde::de::DeserializeOwned>(
    row: &libsql::Row,
    idx: i32,
    column: &str,
    id: &str,
) -> Result<Vec<T>, DatabaseError> {
    Ok(decode_json_list(get_opt_string(row, idx)?.as_deref(), column, id))
}

fn row_to_entry(row: &libsql::Row) -> Result<TimelineEntry, DatabaseError> {
    let id: String = row.get(0)?;
    Ok(TimelineEntry {
        project_code: row.get(1)?,
        date: parse_date(&row.get::<String>(2)?)?,
        workers: list(row, 3, "workers", &id)?,
        engineers: list(row, 4, "engineers", &id)?,
        architects: list(row, 5, "architects", &id)?,
        project_managers: list(row, 6, "project_managers", &id)?,
        materials: list(row, 7, "materials", &id)?,
        tools: list(row, 8, "tools", &id)?,
        expenses: list(row, 9, "expenses", &id)?,
        notes: get_opt_string(row, 10)?,
        id,
    })
}

impl SiteService {
    /// Store one day of activity. A `tle-` id is generated when the entry
    /// has none.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if the project code is unknown.
    pub async fn add_timeline_entry(
        &self,
        mut entry: TimelineEntry,
    ) -> Result<TimelineEntry, DatabaseError> {
        entry.project_code = entry.project_code.trim().to_string();
        match self.get_project(&entry.project_code).await {
            Ok(_) => {}
            Err(DatabaseError::NoResult) => {
                return Err(DatabaseError::InvalidState(format!(
                    "unknown project code '{}'",
                    entry.project_code
                )));
            }
            Err(e) => return Err(e),
        }
        if entry.id.trim().is_empty() {
            entry.id = self.db().generate_id(PREFIX_TIMELINE).await?;
        }

        self.db()
            .conn()
            .execute(
                "INSERT INTO timeline_entries (id, project_code, entry_date, workers, engineers,
                     architects, project_managers, materials, tools, expenses, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                libsql::params![
                    entry.id.as_str(),
                    entry.project_code.as_str(),
                    entry.date.format("%Y-%m-%d").to_string(),
                    encode_json(&entry.workers)?,
                    encode_json(&entry.engineers)?,
                    encode_json(&entry.architects)?,
                    encode_json(&entry.project_managers)?,
                    encode_json(&entry.materials)?,
                    encode_json(&entry.tools)?,
                    encode_json(&entry.expenses)?,
                    entry.notes.as_deref()
                ],
            )
            .await?;

        Ok(entry)
    }

    pub async fn get_timeline_entry(&self, id: &str) -> Result<TimelineEntry, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM timeline_entries WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_entry(&row)
    }

    /// Entries matching `filter`, ordered by date then insertion order.
    pub async fn find_timeline_entries(
        &self,
        filter: &TimelineFilter,
    ) -> Result<Vec<TimelineEntry>, DatabaseError> {
        let mut clauses = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref code) = filter.project_code {
            params.push(code.as_str().into());
            clauses.push(format!("project_code = ?{}", params.len()));
        }
        if let Some(from) = filter.date_from {
            params.push(from.format("%Y-%m-%d").to_string().into());
            clauses.push(format!("entry_date >= ?{}", params.len()));
        }
        if let Some(to) = filter.date_to {
            params.push(to.format("%Y-%m-%d").to_string().into());
            clauses.push(format!("entry_date <= ?{}", params.len()));
        }

        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };
        let sql = format!(
            "SELECT {SELECT_COLS} FROM timeline_entries{where_clause} ORDER BY entry_date, seq"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_entry(&row)?);
        }
        Ok(entries)
    }

    pub async fn delete_timeline_entry(&self, id: &str) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM timeline_entries WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }

    /// Import entries from a JSON Lines file, one entry per line.
    ///
    /// Every line is parsed before anything is written, and the inserts share
    /// one transaction, so a file that fails anywhere imports nothing.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Other` if the file cannot be read or a line is
    /// not a timeline entry, and the `add_timeline_entry` errors otherwise.
    pub async fn import_timeline_jsonl(
        &self,
        path: &Path,
    ) -> Result<Vec<TimelineEntry>, DatabaseError> {
        let parsed: Vec<TimelineEntry> = serde_jsonlines::json_lines(path)
            .map_err(|e| DatabaseError::Other(e.into()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DatabaseError::Other(e.into()))?;

        let tx = self.db().conn().transaction().await?;
        let mut stored = Vec::with_capacity(parsed.len());
        for (line, entry) in parsed.into_iter().enumerate() {
            match self.add_timeline_entry(entry).await {
                Ok(entry) => stored.push(entry),
                Err(e) => {
                    if let Err(rollback) = tx.rollback().await {
                        tracing::warn!(error = %rollback, "timeline import rollback failed");
                    }
                    tracing::debug!(
                        path = %path.display(),
                        line = line + 1,
                        "timeline import aborted"
                    );
                    return Err(e);
                }
            }
        }
        tx.commit().await?;
        tracing::info!(path = %path.display(), count = stored.len(), "timeline entries imported");
        Ok(stored)
    }
}
