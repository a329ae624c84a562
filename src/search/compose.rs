//! Result composition: filter, then sort
//!
//! Every sort key has a natural ascending comparator. `SortOrder::Desc`
//! reverses it, so `Asc` on relevance puts the lowest score first. Sorting
//! is stable and always runs on the already-filtered set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::model::{
    DateRange, EntityType, Priority, Project, SearchResult, SortField, SortOrder, SortSpec, Task,
};

/// Rank used by the priority sort key.
///
/// Only `high`, `medium` and `low` are ranked; anything else, including a
/// missing value, ranks 0.
pub fn priority_rank(priority: Option<&str>) -> u8 {
    match priority {
        Some("high") => 3,
        Some("medium") => 2,
        Some("low") => 1,
        _ => 0,
    }
}

/// Case-folded comparison with a raw tie-break, standing in for a locale compare
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn date_or_epoch(date: Option<DateTime<Utc>>) -> i64 {
    date.map_or(0, |d| d.timestamp_millis())
}

fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

/// Structured constraints on search results, read from type and metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultFilters {
    pub types: Vec<EntityType>,
    /// Raw status strings; matches task and project statuses alike
    pub status: Vec<String>,
    pub priority: Vec<Priority>,
    /// Checked against `dueDate`, falling back to `endDate`
    pub date_range: DateRange,
}

impl ResultFilters {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.status.is_empty()
            && self.priority.is_empty()
            && !self.date_range.is_set()
    }

    pub fn matches(&self, result: &SearchResult) -> bool {
        if !self.types.is_empty() && !self.types.contains(&result.entity_type) {
            return false;
        }

        if !self.status.is_empty() {
            let status = result.metadata_str("status");
            if !status.is_some_and(|s| self.status.iter().any(|f| f == s)) {
                return false;
            }
        }

        if !self.priority.is_empty() {
            let priority = result.metadata_str("priority");
            if !priority.is_some_and(|p| self.priority.iter().any(|f| f.as_str() == p)) {
                return false;
            }
        }

        let date = result
            .metadata_date("dueDate")
            .or_else(|| result.metadata_date("endDate"));
        self.date_range.contains(date)
    }
}

fn compare_results(a: &SearchResult, b: &SearchResult, field: SortField) -> Ordering {
    match field {
        SortField::Relevance => a.score.cmp(&b.score),
        SortField::Title => compare_titles(&a.title, &b.title),
        SortField::Date => date_or_epoch(a.metadata_date("dueDate"))
            .cmp(&date_or_epoch(b.metadata_date("dueDate"))),
        SortField::Priority => priority_rank(a.metadata_str("priority"))
            .cmp(&priority_rank(b.metadata_str("priority"))),
    }
}

/// Stable sort of search results
pub fn sort_results(results: &mut [SearchResult], sort: SortSpec) {
    results.sort_by(|a, b| directed(compare_results(a, b, sort.field), sort.order));
}

/// Apply `filters` and then sort by `sort`
pub fn compose(
    results: Vec<SearchResult>,
    filters: &ResultFilters,
    sort: SortSpec,
) -> Vec<SearchResult> {
    let before = results.len();
    let mut kept: Vec<SearchResult> = if filters.is_empty() {
        results
    } else {
        results.into_iter().filter(|r| filters.matches(r)).collect()
    };
    sort_results(&mut kept, sort);

    debug!(
        "Composed {} of {} results by {:?} {:?}",
        kept.len(),
        before,
        sort.field,
        sort.order
    );
    kept
}

/// Sort tasks from the pure-filter path. Relevance keeps input order.
pub fn sort_tasks(tasks: &mut [Task], sort: SortSpec) {
    let compare = |a: &Task, b: &Task| match sort.field {
        SortField::Relevance => Ordering::Equal,
        SortField::Title => compare_titles(&a.title, &b.title),
        SortField::Date => date_or_epoch(a.due_date).cmp(&date_or_epoch(b.due_date)),
        SortField::Priority => priority_rank(Some(a.priority.as_str()))
            .cmp(&priority_rank(Some(b.priority.as_str()))),
    };
    tasks.sort_by(|a, b| directed(compare(a, b), sort.order));
}

/// Sort projects from the pure-filter path.
///
/// Projects carry no priority, so that key keeps input order like relevance.
pub fn sort_projects(projects: &mut [Project], sort: SortSpec) {
    let compare = |a: &Project, b: &Project| match sort.field {
        SortField::Relevance | SortField::Priority => Ordering::Equal,
        SortField::Title => compare_titles(&a.name, &b.name),
        SortField::Date => date_or_epoch(a.end_date).cmp(&date_or_epoch(b.end_date)),
    };
    projects.sort_by(|a, b| directed(compare(a, b), sort.order));
}
