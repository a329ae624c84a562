//! Search Engine Integration
//!
//! Ties together the entity searchers, result composition and search
//! history over one in-memory corpus.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::compose::{compose, ResultFilters};
use super::entities::search_all;
use crate::error::{validate_query, AppError};
use crate::history::HistoryStore;
use crate::model::{Project, SearchResult, SortSpec, Task, User};

/// Default cap on returned results
pub const DEFAULT_LIMIT: usize = 50;

/// Already-fetched entity collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Corpus {
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
    pub users: Vec<User>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.tasks.len() + self.projects.len() + self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One search call: free text plus structured narrowing
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub filters: ResultFilters,
    /// Falls back to the engine's default sort when unset
    pub sort: Option<SortSpec>,
    pub limit: usize,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            filters: ResultFilters::default(),
            sort: None,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_filters(mut self, filters: ResultFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Search engine that combines scoring, filtering, sorting and history
pub struct SearchEngine {
    corpus: Corpus,
    history: Option<HistoryStore>,
    default_sort: SortSpec,
}

impl SearchEngine {
    pub fn new(corpus: Corpus) -> Self {
        Self {
            corpus,
            history: None,
            default_sort: SortSpec::default(),
        }
    }

    /// Record every non-blank query in `history`
    pub fn with_history(mut self, history: HistoryStore) -> Self {
        self.history = Some(history);
        self
    }

    pub fn with_default_sort(mut self, sort: SortSpec) -> Self {
        self.default_sort = sort;
        self
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Score the corpus, apply filters, sort, then cap at `request.limit`.
    ///
    /// History write failures are logged and do not fail the search.
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, AppError> {
        if request.query.trim().is_empty() {
            return Ok(Vec::new());
        }
        validate_query(&request.query)?;

        let scored = search_all(
            &request.query,
            &self.corpus.tasks,
            &self.corpus.projects,
            &self.corpus.users,
            usize::MAX,
        );
        let sort = request.sort.unwrap_or(self.default_sort);
        let mut results = compose(scored, &request.filters, sort);
        results.truncate(request.limit);

        debug!(
            "Search '{}' over {} entities returned {}",
            request.query,
            self.corpus.len(),
            results.len()
        );

        if let Some(history) = &self.history {
            if let Err(e) = history.add(&request.query, None, results.len()) {
                warn!("Search not recorded in history: {}", e);
            }
        }

        Ok(results)
    }
}
