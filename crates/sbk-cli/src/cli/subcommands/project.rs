use clap::Subcommand;

/// Project directory commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Register a project.
    Create {
        code: String,
        #[arg(long)]
        name: String,
        /// Project type, e.g. "Bridge Construction".
        #[arg(long = "type")]
        project_type: String,
        /// Priority, e.g. "High".
        #[arg(long)]
        priority: String,
    },
    /// List projects.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a project by code.
    Get { code: String },
    /// Delete a project and its timeline.
    Delete { code: String },
}
