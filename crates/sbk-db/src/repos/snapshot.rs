//! Dashboard snapshot store.
//!
//! The full snapshot lives in the `payload` JSON column. `name` and `status`
//! are kept in their own columns because they are the only mutable fields;
//! on read they take precedence over the payload.

use chrono::{DateTime, SecondsFormat, Utc};
use sbk_core::entities::{DashboardSnapshot, SnapshotSummary};
use sbk_core::enums::SnapshotStatus;

use crate::error::DatabaseError;
use crate::helpers::{encode_json, parse_datetime, parse_enum};
use crate::service::SiteService;
use crate::updates::snapshot::SnapshotUpdate;

const SUMMARY_COLS: &str =
    "id, name, status, calculated_at, grand_total, project_count, timeline_entry_count";

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn row_to_summary(row: &libsql::Row) -> Result<SnapshotSummary, DatabaseError> {
    Ok(SnapshotSummary {
        id: row.get(0)?,
        name: row.get(1)?,
        status: parse_enum(&row.get::<String>(2)?)?,
        calculated_at: parse_datetime(&row.get::<String>(3)?)?,
        grand_total: row.get(4)?,
        project_count: u64::try_from(row.get::<i64>(5)?).unwrap_or_default(),
        timeline_entry_count: u64::try_from(row.get::<i64>(6)?).unwrap_or_default(),
    })
}

fn count_param(n: u64) -> libsql::Value {
    i64::try_from(n).unwrap_or(i64::MAX).into()
}

impl SiteService {
    /// Store a snapshot in a single transaction. Either the whole snapshot
    /// is written or nothing is.
    pub async fn insert_snapshot(&self, snapshot: &DashboardSnapshot) -> Result<(), DatabaseError> {
        let payload = encode_json(snapshot)?;
        let tx = self.db().conn().transaction().await?;
        tx.execute(
            "INSERT INTO dashboard_snapshots (id, name, status, calculated_at, grand_total,
                 project_count, timeline_entry_count, payload, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            libsql::params_from_iter(vec![
                libsql::Value::from(snapshot.id.as_str()),
                snapshot.name.as_str().into(),
                snapshot.status.as_str().into(),
                timestamp(snapshot.calculated_at).into(),
                snapshot.summary.grand_total.into(),
                count_param(snapshot.summary.project_count),
                count_param(snapshot.summary.timeline_entry_count),
                payload.into(),
                timestamp(Utc::now()).into(),
            ]),
        )
        .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Stored snapshots, newest calculation first.
    pub async fn list_snapshots(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<SnapshotSummary>, DatabaseError> {
        let limit_clause = limit.map(|l| format!(" LIMIT {l}")).unwrap_or_default();
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SUMMARY_COLS} FROM dashboard_snapshots
                     ORDER BY calculated_at DESC, rowid DESC{limit_clause}"
                ),
                (),
            )
            .await?;

        let mut summaries = Vec::new();
        while let Some(row) = rows.next().await? {
            summaries.push(row_to_summary(&row)?);
        }
        Ok(summaries)
    }

    pub async fn get_snapshot(&self, id: &str) -> Result<DashboardSnapshot, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT name, status, payload FROM dashboard_snapshots WHERE id = ?1",
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;

        let payload: String = row.get(2)?;
        let mut snapshot: DashboardSnapshot = serde_json::from_str(&payload)
            .map_err(|e| DatabaseError::Query(format!("Corrupt snapshot payload for {id}: {e}")))?;
        snapshot.name = row.get(0)?;
        snapshot.status = parse_enum(&row.get::<String>(1)?)?;
        Ok(snapshot)
    }

    /// Rename a snapshot or move it along `draft → final → archived`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` for an unknown id and
    /// `DatabaseError::InvalidState` for a blank name or a refused transition.
    pub async fn update_snapshot_metadata(
        &self,
        id: &str,
        update: SnapshotUpdate,
    ) -> Result<DashboardSnapshot, DatabaseError> {
        let current = self.get_snapshot(id).await?;
        if update.is_empty() {
            return Ok(current);
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref name) = update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(DatabaseError::InvalidState("snapshot name must not be blank".into()));
            }
            sets.push(format!("name = ?{idx}"));
            params.push(name.into());
            idx += 1;
        }
        if let Some(status) = update.status {
            if !current.status.can_transition_to(status) {
                return Err(DatabaseError::InvalidState(format!(
                    "Cannot transition snapshot {id} from {} to {status}",
                    current.status
                )));
            }
            sets.push(format!("status = ?{idx}"));
            params.push(status.as_str().into());
            idx += 1;
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(timestamp(Utc::now()).into());
        idx += 1;

        params.push(id.into());
        let sql = format!(
            "UPDATE dashboard_snapshots SET {} WHERE id = ?{idx}",
            sets.join(", ")
        );
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        tracing::debug!(snapshot = id, update = ?update, "snapshot metadata updated");
        self.get_snapshot(id).await
    }

    pub async fn delete_snapshot(&self, id: &str) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM dashboard_snapshots WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }

    /// Number of stored snapshots with the given status, or all of them.
    pub async fn count_snapshots(
        &self,
        status: Option<SnapshotStatus>,
    ) -> Result<u64, DatabaseError> {
        let mut rows = match status {
            Some(status) => {
                self.db()
                    .conn()
                    .query(
                        "SELECT count(*) FROM dashboard_snapshots WHERE status = ?1",
                        [status.as_str()],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query("SELECT count(*) FROM dashboard_snapshots", ())
                    .await?
            }
        };
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(u64::try_from(row.get::<i64>(0)?).unwrap_or_default())
    }
}
