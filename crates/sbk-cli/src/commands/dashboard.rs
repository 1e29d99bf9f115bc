use sbk_core::entities::{DashboardSnapshot, SnapshotSummary};
use sbk_core::enums::SnapshotStatus;
use sbk_core::request::CalculationRequest;
use sbk_db::updates::snapshot::SnapshotUpdateBuilder;
use serde::Serialize;
use serde_json::json;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::cli::subcommands::DashboardCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SnapshotListResponse {
    snapshots: Vec<SnapshotSummary>,
}

#[derive(Debug, Serialize)]
struct BreakdownResponse {
    projects: Vec<BreakdownRow>,
}

/// The per-project cost columns of a snapshot, for table output.
#[derive(Debug, Serialize)]
struct BreakdownRow {
    project_code: String,
    project_type: String,
    priority: String,
    multiplier: f64,
    base_cost: f64,
    labor_cost: f64,
    material_cost: f64,
    tool_cost: f64,
    expense_cost: f64,
    total_cost: f64,
}

fn breakdown(snapshot: &DashboardSnapshot) -> BreakdownResponse {
    BreakdownResponse {
        projects: snapshot
            .projects
            .iter()
            .map(|p| BreakdownRow {
                project_code: p.project_code.clone(),
                project_type: p.project_type.clone(),
                priority: p.priority.clone(),
                multiplier: p.multiplier,
                base_cost: p.base_cost,
                labor_cost: p.labor_cost,
                material_cost: p.material_cost,
                tool_cost: p.tool_cost,
                expense_cost: p.expense_cost,
                total_cost: p.total_cost,
            })
            .collect(),
    }
}

/// Tables get the breakdown; JSON formats get the whole snapshot.
fn output_snapshot(snapshot: &DashboardSnapshot, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => output(&breakdown(snapshot), format),
        OutputFormat::Json | OutputFormat::Raw => output(snapshot, format),
    }
}

/// Handle `sbk dashboard`.
pub async fn handle(
    action: &DashboardCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DashboardCommands::Calculate {
            name,
            projects,
            from,
            to,
        } => {
            let request = CalculationRequest::new(name.as_str())
                .with_projects(projects.iter().map(String::as_str))
                .with_range(*from, *to);
            let snapshot = ctx.service.calculate_dashboard(&ctx.engine, &request).await?;

            if !snapshot.missing_projects.is_empty() {
                tracing::warn!(
                    missing = ?snapshot.missing_projects,
                    "requested projects were not found and are left out"
                );
            }
            if !snapshot.diagnostics.is_empty() && !flags.quiet {
                tracing::info!(
                    count = snapshot.diagnostics.len(),
                    "some inputs contributed zero; see the snapshot diagnostics"
                );
            }
            output_snapshot(&snapshot, flags.format)
        }
        DashboardCommands::List { limit } => {
            let limit = effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
            let snapshots = ctx.service.list_snapshots(Some(limit)).await?;
            output(&SnapshotListResponse { snapshots }, flags.format)
        }
        DashboardCommands::Get { id } => {
            let snapshot = ctx.service.get_snapshot(id).await?;
            output_snapshot(&snapshot, flags.format)
        }
        DashboardCommands::Update { id, name, status } => {
            if name.is_none() && status.is_none() {
                anyhow::bail!("At least one of --name or --status must be provided");
            }
            let mut builder = SnapshotUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name.as_str());
            }
            if let Some(status) = status {
                builder = builder.status(parse_enum::<SnapshotStatus>(status, "status")?);
            }
            let snapshot = ctx
                .service
                .update_snapshot_metadata(id, builder.build())
                .await?;
            output(&SnapshotSummary::from(&snapshot), flags.format)
        }
        DashboardCommands::Delete { id } => {
            ctx.service.delete_snapshot(id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}
