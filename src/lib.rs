//! task-search: ranked search, structured filtering, filter presets and
//! search history over in-memory task, project and user collections.
//!
//! The engine performs no I/O beyond a string-keyed [`store::Store`] used
//! by [`presets::PresetStore`] and [`history::HistoryStore`].

pub mod config;
pub mod error;
pub mod filter;
pub mod history;
pub mod model;
pub mod presets;
pub mod search;
pub mod store;
pub mod utils;

#[cfg(test)]
mod tests_end_to_end;

pub use error::AppError;
pub use history::HistoryStore;
pub use presets::PresetStore;
pub use search::{Corpus, SearchEngine, SearchRequest};
pub use store::{FileStore, MemoryStore, StorageKeys, Store, UnavailableStore};
