use std::path::Path;

use anyhow::Context;
use sbk_core::entities::TimelineEntry;
use sbk_db::repos::TimelineFilter;
use serde::Serialize;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TimelineCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct TimelineListResponse {
    entries: Vec<TimelineRow>,
}

/// One entry as listed: headcounts instead of the full assignment lists.
#[derive(Debug, Serialize)]
struct TimelineRow {
    id: String,
    project_code: String,
    date: chrono::NaiveDate,
    workers: usize,
    engineers: usize,
    architects: usize,
    project_managers: usize,
    materials: usize,
    tools: usize,
    expenses: usize,
}

impl From<&TimelineEntry> for TimelineRow {
    fn from(entry: &TimelineEntry) -> Self {
        Self {
            id: entry.id.clone(),
            project_code: entry.project_code.clone(),
            date: entry.date,
            workers: entry.workers.len(),
            engineers: entry.engineers.len(),
            architects: entry.architects.len(),
            project_managers: entry.project_managers.len(),
            materials: entry.materials.len(),
            tools: entry.tools.len(),
            expenses: entry.expenses.len(),
        }
    }
}

/// Handle `sbk timeline`.
pub async fn handle(
    action: &TimelineCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TimelineCommands::Add { file } => {
            let entry = read_entry(file)?;
            let stored = ctx.service.add_timeline_entry(entry).await?;
            output(&stored, flags.format)
        }
        TimelineCommands::Import { path } => {
            let imported = ctx
                .service
                .import_timeline_jsonl(path)
                .await
                .with_context(|| format!("failed to import {}", path.display()))?;
            let ids: Vec<&str> = imported.iter().map(|e| e.id.as_str()).collect();
            output(&json!({ "imported": ids.len(), "ids": ids }), flags.format)
        }
        TimelineCommands::List {
            project,
            from,
            to,
            limit,
        } => {
            let filter = TimelineFilter {
                project_code: project.clone(),
                date_from: *from,
                date_to: *to,
            };
            let limit = effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
            let mut entries = ctx.service.find_timeline_entries(&filter).await?;
            entries.truncate(usize::try_from(limit)?);
            let entries = entries.iter().map(TimelineRow::from).collect();
            output(&TimelineListResponse { entries }, flags.format)
        }
        TimelineCommands::Get { id } => {
            output(&ctx.service.get_timeline_entry(id).await?, flags.format)
        }
        TimelineCommands::Delete { id } => {
            ctx.service.delete_timeline_entry(id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}

fn read_entry(path: &Path) -> anyhow::Result<TimelineEntry> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a timeline entry", path.display()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sbk_core::measure::Measure;
    use tempfile::TempDir;

    use super::{TimelineRow, read_entry};

    #[test]
    fn entry_file_with_hand_typed_numbers_parses() {
        let temp = TempDir::new().expect("tempdir should create");
        let path = temp.path().join("day.json");
        std::fs::write(
            &path,
            r#"{"project_code":"A-1","date":"2024-06-03",
                "workers":[{"name":"Ana","role":"Mason","hours_worked":"7.5"}],
                "tools":[{"name":"Crane","quantity":"one"}]}"#,
        )
        .expect("entry should write");

        let entry = read_entry(&path).expect("entry should parse");
        assert_eq!(entry.workers[0].hours_worked, Measure::Value(7.5));
        assert_eq!(entry.tools[0].quantity.malformed(), Some("one"));

        let row = TimelineRow::from(&entry);
        assert_eq!(row.workers, 1);
        assert_eq!(row.tools, 1);
        assert_eq!(row.expenses, 0);
    }

    #[test]
    fn entry_without_date_is_an_error() {
        let temp = TempDir::new().expect("tempdir should create");
        let path = temp.path().join("day.json");
        std::fs::write(&path, r#"{"project_code":"A-1"}"#).expect("entry should write");

        let err = read_entry(&path).unwrap_err();
        assert!(err.to_string().contains("is not a timeline entry"));
    }
}
