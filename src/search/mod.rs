//! Relevance search over tasks, projects and users
//!
//! `scoring` ranks one string against a query, `entities` applies it to
//! each entity type, `compose` filters and sorts the merged results, and
//! `engine` ties them to a corpus and search history.

pub mod compose;
pub mod engine;
pub mod entities;
pub mod scoring;

#[cfg(test)]
mod property_tests;

pub use compose::{compose, sort_projects, sort_results, sort_tasks, ResultFilters};
pub use engine::{Corpus, SearchEngine, SearchRequest};
pub use entities::{search_all, search_projects, search_tasks, search_users, Searchable};
pub use scoring::{find_highlights, levenshtein, normalize, score};
