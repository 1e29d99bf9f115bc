use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;

/// Timeline entry commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TimelineCommands {
    /// Record one day from a JSON file.
    Add {
        #[arg(long)]
        file: PathBuf,
    },
    /// Import a JSON Lines file, one entry per line.
    Import { path: PathBuf },
    /// List entries.
    List {
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get an entry by ID.
    Get { id: String },
    /// Delete an entry.
    Delete { id: String },
}
