//! CLI mode implementation
//!
//! Drives search, filtering, presets and history against JSON files.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use task_search::model::{EntityType, FilterKind, Priority, SortField, SortOrder, SortSpec};

/// Task search CLI
#[derive(Parser, Debug)]
#[command(name = "task-search")]
#[command(about = "Search and filter task, project and user collections", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Directory holding presets and search history
    #[arg(long, global = true, env = "TASK_SEARCH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ranked free-text search across tasks, projects and users
    Search(SearchArgs),
    /// Apply structured criteria to a task or project list
    Filter(FilterArgs),
    /// Manage saved filter presets
    Presets(PresetsArgs),
    /// Inspect or clear search history
    History(HistoryArgs),
}

/// Sort flags shared by search and filter
#[derive(Args, Debug, Clone, Default)]
pub struct SortArgs {
    /// Sort key: relevance, title, date or priority
    #[arg(long)]
    pub sort: Option<SortField>,

    /// Sort direction: asc or desc (defaults per key)
    #[arg(long)]
    pub order: Option<SortOrder>,
}

impl SortArgs {
    /// Sort directive from the flags, filling gaps from `fallback`
    pub fn resolve(&self, fallback: SortSpec) -> SortSpec {
        let spec = self.sort.map_or(fallback, SortSpec::new);
        match self.order {
            Some(order) => spec.with_order(order),
            None => spec,
        }
    }
}

/// Search command arguments
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search terms (case-insensitive)
    #[arg(short = 'q', long)]
    pub query: String,

    /// JSON array of tasks
    #[arg(long)]
    pub tasks: Option<PathBuf>,

    /// JSON array of projects
    #[arg(long)]
    pub projects: Option<PathBuf>,

    /// JSON array of users
    #[arg(long)]
    pub users: Option<PathBuf>,

    /// Keep only these entity types (repeatable)
    #[arg(long = "type")]
    pub types: Vec<EntityType>,

    /// Keep only these statuses (repeatable)
    #[arg(long)]
    pub status: Vec<String>,

    /// Keep only these priorities (repeatable)
    #[arg(long)]
    pub priority: Vec<Priority>,

    /// Keep only results due (or ending) on or after this RFC 3339 time
    #[arg(long)]
    pub from: Option<DateTime<Utc>>,

    /// Keep only results due (or ending) on or before this RFC 3339 time
    #[arg(long)]
    pub to: Option<DateTime<Utc>>,

    #[command(flatten)]
    pub sort: SortArgs,

    /// Maximum number of results (default 50)
    #[arg(short = 'l', long)]
    pub limit: Option<usize>,

    /// Do not record this query in search history
    #[arg(long)]
    pub no_history: bool,
}

/// Filter command arguments
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Collection type: tasks or projects
    pub kind: FilterKind,

    /// JSON array of entities to filter
    #[arg(short, long)]
    pub input: PathBuf,

    /// Criteria object as JSON
    #[arg(long, conflicts_with = "preset")]
    pub criteria: Option<String>,

    /// Id of a saved preset to apply
    #[arg(long)]
    pub preset: Option<String>,

    #[command(flatten)]
    pub sort: SortArgs,
}

#[derive(Args, Debug)]
pub struct PresetsArgs {
    #[command(subcommand)]
    pub command: PresetsCommands,
}

#[derive(Subcommand, Debug)]
pub enum PresetsCommands {
    /// List default and saved presets
    List {
        /// Only presets for tasks or projects
        #[arg(long = "type")]
        kind: Option<FilterKind>,
    },
    /// Save a new preset
    Save {
        #[arg(long)]
        name: String,
        #[arg(long = "type")]
        kind: FilterKind,
        /// Criteria object as JSON
        #[arg(long)]
        criteria: String,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Change a saved preset
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Replacement criteria object as JSON
        #[arg(long)]
        criteria: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a saved preset
    Delete { id: String },
    /// Print a preset as shareable JSON
    Export { id: String },
    /// Save a preset from an exported JSON file
    Import { file: PathBuf },
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommands,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// Recent searches, newest first
    List,
    /// Query suggestions for a partial input
    Suggest { query: Option<String> },
    /// Remove one entry
    Remove { id: String },
    /// Remove all entries
    Clear,
}
