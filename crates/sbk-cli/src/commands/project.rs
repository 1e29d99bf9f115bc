use sbk_core::entities::ProjectRecord;
use serde::Serialize;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ProjectListResponse {
    projects: Vec<ProjectRecord>,
}

/// Handle `sbk project`.
pub async fn handle(
    action: &ProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Create {
            code,
            name,
            project_type,
            priority,
        } => {
            let catalog = ctx.engine.catalog();
            if catalog.project_type(project_type).is_none() {
                tracing::warn!(
                    project_type = %project_type,
                    "project type is not in the rate catalog; it will carry no base cost"
                );
            }
            if catalog.priority(priority).is_none() {
                tracing::warn!(
                    priority = %priority,
                    "priority is not in the rate catalog; it will carry no urgency fee"
                );
            }
            let project = ctx
                .service
                .create_project(code, name, project_type, priority)
                .await?;
            output(&project, flags.format)
        }
        ProjectCommands::List { limit } => {
            let limit = effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
            let projects = ctx.service.list_projects(Some(limit)).await?;
            output(&ProjectListResponse { projects }, flags.format)
        }
        ProjectCommands::Get { code } => {
            output(&ctx.service.get_project(code).await?, flags.format)
        }
        ProjectCommands::Delete { code } => {
            ctx.service.delete_project(code).await?;
            output(&json!({ "deleted": code }), flags.format)
        }
    }
}
