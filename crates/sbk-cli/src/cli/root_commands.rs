use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    DashboardCommands, ProjectCommands, RatesCommands, TimelineCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create `.sitebook/` with a starter configuration.
    Init(InitArgs),
    /// Project directory.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Daily site timeline.
    Timeline {
        #[command(subcommand)]
        action: TimelineCommands,
    },
    /// Cost dashboards.
    Dashboard {
        #[command(subcommand)]
        action: DashboardCommands,
    },
    /// Rate catalog.
    Rates {
        #[command(subcommand)]
        action: RatesCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config.toml.
    #[arg(long)]
    pub force: bool,
}
