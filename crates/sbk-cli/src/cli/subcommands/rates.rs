use clap::Subcommand;

/// Rate catalog commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RatesCommands {
    /// List catalog entries, optionally for one table.
    List {
        /// worker-role, engineer-specialty, architect-specialty, material,
        /// tool, project-type or project-priority
        #[arg(long)]
        kind: Option<String>,
    },
    /// Look up a single key.
    Lookup { kind: String, key: String },
}
