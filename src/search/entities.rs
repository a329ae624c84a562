//! Per-entity searchers
//!
//! Each entity type names a primary field (title or name) and one weighted
//! secondary field. The combined score is a weighted max of the two field
//! scores, and anything under [`MIN_SCORE`] is dropped.

use serde_json::{json, Map, Value};
use tracing::debug;

use super::scoring::{highlight, normalize, score};
use crate::model::{EntityRef, EntityType, Project, SearchResult, Task, User};

/// Results scoring below this are never returned
pub const MIN_SCORE: u8 = 10;

/// Weight of a task/project description match, in percent
pub const DESCRIPTION_WEIGHT_PCT: u16 = 70;

/// Weight of a user email match, in percent
pub const EMAIL_WEIGHT_PCT: u16 = 80;

/// An entity the searchers know how to score and convert
pub trait Searchable {
    const ENTITY_TYPE: EntityType;
    /// Field name reported in the highlight entry
    const PRIMARY_FIELD: &'static str;
    /// Weight of the secondary field, in percent
    const SECONDARY_WEIGHT_PCT: u16;

    fn primary_text(&self) -> &str;
    fn secondary_text(&self) -> Option<&str>;

    /// Result skeleton with id, title, subtitle and metadata filled in
    fn to_result(&self) -> SearchResult;
}

fn ref_ids(refs: &[EntityRef]) -> Value {
    Value::Array(refs.iter().map(|r| json!(r.id())).collect())
}

fn skeleton(id: &str, entity_type: EntityType, title: &str) -> SearchResult {
    SearchResult {
        id: id.to_string(),
        entity_type,
        title: title.to_string(),
        description: None,
        subtitle: None,
        metadata: Map::new(),
        score: 0,
        highlights: Vec::new(),
    }
}

impl Searchable for Task {
    const ENTITY_TYPE: EntityType = EntityType::Task;
    const PRIMARY_FIELD: &'static str = "title";
    const SECONDARY_WEIGHT_PCT: u16 = DESCRIPTION_WEIGHT_PCT;

    fn primary_text(&self) -> &str {
        &self.title
    }

    fn secondary_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn to_result(&self) -> SearchResult {
        let mut result = skeleton(&self.id, Self::ENTITY_TYPE, &self.title);
        result.description = self.description.clone();
        result.subtitle = Some(self.status.label().to_string());

        let meta = &mut result.metadata;
        meta.insert("status".into(), json!(self.status.as_str()));
        meta.insert("priority".into(), json!(self.priority.as_str()));
        if let Some(due) = self.due_date {
            meta.insert("dueDate".into(), json!(due.to_rfc3339()));
        }
        if let Some(project_id) = &self.project_id {
            meta.insert("projectId".into(), json!(project_id));
        }
        meta.insert("assignees".into(), ref_ids(&self.assignees));
        meta.insert("tags".into(), ref_ids(&self.tags));
        result
    }
}

impl Searchable for Project {
    const ENTITY_TYPE: EntityType = EntityType::Project;
    const PRIMARY_FIELD: &'static str = "name";
    const SECONDARY_WEIGHT_PCT: u16 = DESCRIPTION_WEIGHT_PCT;

    fn primary_text(&self) -> &str {
        &self.name
    }

    fn secondary_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn to_result(&self) -> SearchResult {
        let mut result = skeleton(&self.id, Self::ENTITY_TYPE, &self.name);
        result.description = self.description.clone();
        result.subtitle = Some(format!("{}% complete", self.progress));

        let meta = &mut result.metadata;
        meta.insert("status".into(), json!(self.status.as_str()));
        meta.insert("progress".into(), json!(self.progress));
        if let Some(end) = self.end_date {
            meta.insert("endDate".into(), json!(end.to_rfc3339()));
        }
        meta.insert("members".into(), ref_ids(&self.members));
        meta.insert("tags".into(), ref_ids(&self.tags));
        result
    }
}

impl Searchable for User {
    const ENTITY_TYPE: EntityType = EntityType::User;
    const PRIMARY_FIELD: &'static str = "name";
    const SECONDARY_WEIGHT_PCT: u16 = EMAIL_WEIGHT_PCT;

    fn primary_text(&self) -> &str {
        &self.name
    }

    fn secondary_text(&self) -> Option<&str> {
        Some(&self.email)
    }

    fn to_result(&self) -> SearchResult {
        let mut result = skeleton(&self.id, Self::ENTITY_TYPE, &self.name);
        result.subtitle = Some(self.email.clone());

        let meta = &mut result.metadata;
        meta.insert("email".into(), json!(self.email));
        if let Some(role) = &self.role {
            meta.insert("role".into(), json!(role));
        }
        result
    }
}

/// `max(primary, weight * secondary)`, floored
fn weighted_max(primary: u8, secondary: u8, weight_pct: u16) -> u8 {
    let weighted = u16::from(secondary) * weight_pct / 100;
    u16::from(primary).max(weighted).min(100) as u8
}

/// Score one entity; `None` when it falls under the threshold
pub fn score_entity<T: Searchable>(query: &str, item: &T) -> Option<SearchResult> {
    let primary = score(query, item.primary_text());
    let secondary = item.secondary_text().map_or(0, |text| score(query, text));
    let combined = weighted_max(primary, secondary, T::SECONDARY_WEIGHT_PCT);

    if combined < MIN_SCORE {
        return None;
    }

    let mut result = item.to_result();
    result.score = combined;
    // always the primary field, even when the secondary field won
    result.highlights = vec![highlight(T::PRIMARY_FIELD, query, item.primary_text())];
    Some(result)
}

/// Search a collection; results come back by descending score, ties in input order
pub fn search_entities<T: Searchable>(query: &str, items: &[T]) -> Vec<SearchResult> {
    if normalize(query).is_empty() {
        return Vec::new();
    }

    let mut results: Vec<SearchResult> = items
        .iter()
        .filter_map(|item| score_entity(query, item))
        .collect();

    results.sort_by(|a, b| b.score.cmp(&a.score));

    debug!(
        "{} search for {:?}: {} of {} candidates kept",
        T::ENTITY_TYPE.as_str(),
        query,
        results.len(),
        items.len()
    );
    results
}

pub fn search_tasks(query: &str, tasks: &[Task]) -> Vec<SearchResult> {
    search_entities(query, tasks)
}

pub fn search_projects(query: &str, projects: &[Project]) -> Vec<SearchResult> {
    search_entities(query, projects)
}

pub fn search_users(query: &str, users: &[User]) -> Vec<SearchResult> {
    search_entities(query, users)
}

/// Search all three collections and merge by score.
///
/// Ties keep tasks ahead of projects ahead of users.
pub fn search_all(
    query: &str,
    tasks: &[Task],
    projects: &[Project],
    users: &[User],
    limit: usize,
) -> Vec<SearchResult> {
    let mut results = search_tasks(query, tasks);
    results.extend(search_projects(query, projects));
    results.extend(search_users(query, users));

    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(limit);
    results
}
