//! task-search CLI
//!
//! Runs one engine operation per invocation:
//! - `search` - ranked search over JSON entity files
//! - `filter` - structured criteria or a saved preset over one collection
//! - `presets` / `history` - manage persisted presets and search history
//!
//! Results are printed as JSON on stdout; logs and errors go to stderr.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, HistoryCommands, PresetsCommands};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use task_search::config::{load_config, Config};
use task_search::filter::{active_filter_count, clear_filters, filter_projects, filter_stats, filter_tasks};
use task_search::model::{DateRange, FilterCriteria, FilterKind, PresetDraft, PresetUpdate};
use task_search::search::compose::{sort_projects, sort_tasks, ResultFilters};
use task_search::search::engine::DEFAULT_LIMIT;
use task_search::{
    AppError, Corpus, FileStore, HistoryStore, PresetStore, SearchEngine, SearchRequest,
    StorageKeys, Store, UnavailableStore,
};

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = if cli.verbose || cli.quiet {
        tracing_subscriber::EnvFilter::new(log_level)
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    match run(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

/// Persistence and defaults shared by every command
struct AppContext {
    config: Config,
    store: Arc<dyn Store>,
    keys: StorageKeys,
}

impl AppContext {
    fn load(data_dir: Option<&Path>) -> Result<Self> {
        let config = load_config().map_err(|e| AppError::Config(format!("{:#}", e)))?;

        let store: Arc<dyn Store> = match config.resolve_data_dir(data_dir) {
            Some(dir) => {
                debug!("Using data directory {}", dir.display());
                Arc::new(FileStore::new(dir))
            }
            None => {
                warn!("No data directory available; presets and history will not persist");
                Arc::new(UnavailableStore)
            }
        };
        let keys = StorageKeys::new(&config.namespace);

        Ok(Self { config, store, keys })
    }

    fn presets(&self) -> PresetStore {
        PresetStore::new(self.store.clone(), &self.keys)
    }

    fn history(&self) -> HistoryStore {
        HistoryStore::new(self.store.clone(), &self.keys)
    }
}

fn run(cli: Cli) -> Result<String> {
    let ctx = AppContext::load(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Search(args) => execute_search(&ctx, args),
        Commands::Filter(args) => execute_filter(&ctx, args),
        Commands::Presets(args) => execute_presets(&ctx, args.command),
        Commands::History(args) => execute_history(&ctx, args.command),
    }
}

/// Read a JSON array of entities; a missing path is an empty collection
fn load_entities<T: DeserializeOwned>(path: Option<&PathBuf>) -> Result<Vec<T>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let data = fs::read_to_string(path)
        .map_err(|e| AppError::NotFound(format!("{}: {}", path.display(), e)))?;
    let items = serde_json::from_str(&data)
        .map_err(AppError::from)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(items)
}

fn parse_criteria(kind: FilterKind, json: &str) -> Result<FilterCriteria> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(AppError::from)?;
    Ok(FilterCriteria::from_value(kind, value).map_err(AppError::from)?)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn execute_search(ctx: &AppContext, args: cli::SearchArgs) -> Result<String> {
    let corpus = Corpus {
        tasks: load_entities(args.tasks.as_ref())?,
        projects: load_entities(args.projects.as_ref())?,
        users: load_entities(args.users.as_ref())?,
    };

    let mut engine = SearchEngine::new(corpus).with_default_sort(ctx.config.default_sort);
    if !args.no_history {
        engine = engine.with_history(ctx.history());
    }

    let request = SearchRequest::new(args.query)
        .with_filters(ResultFilters {
            types: args.types,
            status: args.status,
            priority: args.priority,
            date_range: DateRange::new(args.from, args.to),
        })
        .with_sort(args.sort.resolve(ctx.config.default_sort))
        .with_limit(args.limit.unwrap_or(DEFAULT_LIMIT));

    let results = engine.search(&request)?;
    to_json(&results)
}

fn execute_filter(ctx: &AppContext, args: cli::FilterArgs) -> Result<String> {
    let criteria = if let Some(id) = &args.preset {
        let preset = ctx
            .presets()
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("preset {}", id)))?;
        if preset.kind() != args.kind {
            return Err(AppError::InvalidInput(format!(
                "preset {} applies to {}, not {}",
                id,
                preset.kind(),
                args.kind
            ))
            .into());
        }
        preset.filters
    } else if let Some(json) = &args.criteria {
        parse_criteria(args.kind, json)?
    } else {
        clear_filters(args.kind)
    };

    let sort = args.sort.resolve(ctx.config.default_sort);
    let active = active_filter_count(&criteria);

    match criteria {
        FilterCriteria::Task(filters) => {
            let tasks = load_entities(Some(&args.input))?;
            let mut kept = filter_tasks(&tasks, &filters);
            sort_tasks(&mut kept, sort);
            to_json(&json!({
                "items": kept,
                "stats": filter_stats(tasks.len(), kept.len()),
                "activeFilters": active,
            }))
        }
        FilterCriteria::Project(filters) => {
            let projects = load_entities(Some(&args.input))?;
            let mut kept = filter_projects(&projects, &filters);
            sort_projects(&mut kept, sort);
            to_json(&json!({
                "items": kept,
                "stats": filter_stats(projects.len(), kept.len()),
                "activeFilters": active,
            }))
        }
    }
}

fn execute_presets(ctx: &AppContext, command: PresetsCommands) -> Result<String> {
    let presets = ctx.presets();

    match command {
        PresetsCommands::List { kind } => {
            let listed = match kind {
                Some(kind) => presets.list_by_type(kind),
                None => presets.list(),
            };
            to_json(&listed)
        }
        PresetsCommands::Save {
            name,
            kind,
            criteria,
            icon,
            color,
        } => {
            let draft = PresetDraft {
                name,
                filters: parse_criteria(kind, &criteria)?,
                icon,
                color,
            };
            to_json(&presets.save(draft)?)
        }
        PresetsCommands::Update {
            id,
            name,
            criteria,
            icon,
            color,
        } => {
            let existing = presets
                .get(&id)
                .ok_or_else(|| AppError::NotFound(format!("preset {}", id)))?;
            let filters = criteria
                .map(|json| parse_criteria(existing.kind(), &json))
                .transpose()?;
            let update = PresetUpdate {
                name,
                filters,
                icon,
                color,
            };
            let updated = presets.update(&id, update)?.ok_or_else(|| {
                AppError::InvalidInput(format!("preset {} is built in and cannot be changed", id))
            })?;
            to_json(&updated)
        }
        PresetsCommands::Delete { id } => {
            let deleted = presets.delete(&id)?;
            to_json(&json!({ "id": id, "deleted": deleted }))
        }
        PresetsCommands::Export { id } => {
            let preset = presets
                .get(&id)
                .ok_or_else(|| AppError::NotFound(format!("preset {}", id)))?;
            Ok(PresetStore::export(&preset)?)
        }
        PresetsCommands::Import { file } => {
            let data = fs::read_to_string(&file)
                .map_err(|e| AppError::NotFound(format!("{}: {}", file.display(), e)))?;
            to_json(&presets.import(&data)?)
        }
    }
}

fn execute_history(ctx: &AppContext, command: HistoryCommands) -> Result<String> {
    let history = ctx.history();

    match command {
        HistoryCommands::List => to_json(&history.try_entries()?),
        HistoryCommands::Suggest { query } => {
            to_json(&history.suggestions(query.as_deref().unwrap_or("")))
        }
        HistoryCommands::Remove { id } => {
            if !history.remove(&id)? {
                return Err(AppError::NotFound(format!("history entry {}", id)).into());
            }
            to_json(&json!({ "id": id, "removed": true }))
        }
        HistoryCommands::Clear => {
            history.clear()?;
            to_json(&json!({ "cleared": true }))
        }
    }
}

/// Map AppError to exit code
fn get_exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<AppError>()
        .map_or(5, AppError::exit_code)
}
