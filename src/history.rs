//! Search history and query suggestions
//!
//! Newest entry first, one entry per distinct query string, at most
//! [`HISTORY_LIMIT`] entries.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::model::{FilterCriteria, SearchHistoryEntry};
use crate::search::scoring::normalize;
use crate::store::{read_collection, write_collection, StorageKeys, Store, StoreError};
use crate::utils::{generate_id, now};

pub const HISTORY_LIMIT: usize = 20;
pub const SUGGESTION_LIMIT: usize = 5;

/// Canned queries offered alongside history matches
pub const COMMON_SEARCHES: [&str; 5] = [
    "high priority tasks",
    "overdue tasks",
    "my tasks",
    "completed projects",
    "in progress",
];

pub struct HistoryStore {
    store: Arc<dyn Store>,
    key: String,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn Store>, keys: &StorageKeys) -> Self {
        Self {
            store,
            key: keys.history.clone(),
        }
    }

    fn load(&self) -> Result<Vec<SearchHistoryEntry>, StoreError> {
        read_collection(self.store.as_ref(), &self.key)
    }

    /// Record a query. Blank queries are ignored; an existing entry with the
    /// same query string is replaced by the new one at the front.
    pub fn add(
        &self,
        query: &str,
        filters: Option<FilterCriteria>,
        result_count: usize,
    ) -> Result<Option<SearchHistoryEntry>, AppError> {
        if query.trim().is_empty() {
            return Ok(None);
        }

        let mut entries = self.load()?;
        entries.retain(|e| e.query != query);

        let at = now();
        let entry = SearchHistoryEntry {
            id: generate_id("search", at),
            query: query.to_string(),
            filters,
            timestamp: at,
            result_count,
        };
        entries.insert(0, entry.clone());
        entries.truncate(HISTORY_LIMIT);

        write_collection(self.store.as_ref(), &self.key, &entries)?;
        debug!("Recorded search '{}' ({} results)", query, result_count);
        Ok(Some(entry))
    }

    pub fn try_entries(&self) -> Result<Vec<SearchHistoryEntry>, AppError> {
        Ok(self.load()?)
    }

    /// Stored entries, newest first; empty when the backend fails
    pub fn entries(&self) -> Vec<SearchHistoryEntry> {
        self.load().unwrap_or_else(|e| {
            warn!("Search history unavailable: {}", e);
            Vec::new()
        })
    }

    /// Up to [`SUGGESTION_LIMIT`] query strings for a partial input.
    ///
    /// Blank input yields the most recent queries. Otherwise history queries
    /// starting with the input come first, then canned queries containing it.
    pub fn suggestions(&self, query: &str) -> Vec<String> {
        let entries = self.entries();
        let needle = normalize(query);

        if needle.is_empty() {
            return entries
                .into_iter()
                .take(SUGGESTION_LIMIT)
                .map(|e| e.query)
                .collect();
        }

        let from_history = entries
            .into_iter()
            .map(|e| e.query)
            .filter(|q| q.to_lowercase().starts_with(&needle));
        let canned = COMMON_SEARCHES
            .iter()
            .filter(|s| s.contains(needle.as_str()))
            .map(|s| s.to_string());

        let mut suggestions: Vec<String> = Vec::new();
        for candidate in from_history.chain(canned) {
            if suggestions.len() == SUGGESTION_LIMIT {
                break;
            }
            if !suggestions.contains(&candidate) {
                suggestions.push(candidate);
            }
        }
        suggestions
    }

    /// Drop one entry by id; returns whether it existed
    pub fn remove(&self, id: &str) -> Result<bool, AppError> {
        let mut entries = self.load()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        write_collection(self.store.as_ref(), &self.key, &entries)?;
        Ok(true)
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.store.remove(&self.key)?;
        info!("Cleared search history");
        Ok(())
    }
}
