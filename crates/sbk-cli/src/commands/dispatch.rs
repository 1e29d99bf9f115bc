use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Project { action } => commands::project::handle(&action, ctx, flags).await,
        Commands::Timeline { action } => commands::timeline::handle(&action, ctx, flags).await,
        Commands::Dashboard { action } => commands::dashboard::handle(&action, ctx, flags).await,
        Commands::Rates { action } => commands::rates::handle(&action, ctx, flags),
        Commands::Init(_) => unreachable!("init is pre-dispatched in main"),
    }
}
