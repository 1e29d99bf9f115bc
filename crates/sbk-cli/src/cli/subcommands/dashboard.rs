use chrono::NaiveDate;
use clap::Subcommand;

/// Dashboard snapshot commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DashboardCommands {
    /// Calculate and store a new snapshot.
    Calculate {
        #[arg(long)]
        name: String,
        /// Project code to include; repeat for more. Omit for all projects.
        #[arg(long = "project")]
        projects: Vec<String>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// List stored snapshots, newest first.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a snapshot by ID.
    Get { id: String },
    /// Rename a snapshot or change its status.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// draft, final or archived
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a snapshot.
    Delete { id: String },
}
