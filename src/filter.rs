//! Structured filtering over task and project collections
//!
//! Fields combine with AND; list-valued fields match when the entity's own
//! value is one of the listed values (OR within the field). Empty or unset
//! fields impose no constraint. The `search` field is a plain
//! case-insensitive substring check, not the ranked search path.

use tracing::debug;

use crate::model::{
    EntityRef, FilterCriteria, FilterKind, FilterStats, Project, ProjectFilters, Task,
    TaskFilters,
};

fn any_ref_in(refs: &[EntityRef], allowed: &[String]) -> bool {
    refs.iter().any(|r| allowed.iter().any(|id| id == r.id()))
}

fn text_matches(search: &str, fields: &[Option<&str>]) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Whether one task passes every constrained field
pub fn task_matches(task: &Task, filters: &TaskFilters) -> bool {
    if !filters.status.is_empty() && !filters.status.contains(&task.status) {
        return false;
    }
    if !filters.priority.is_empty() && !filters.priority.contains(&task.priority) {
        return false;
    }
    if !filters.assignees.is_empty() && !any_ref_in(&task.assignees, &filters.assignees) {
        return false;
    }
    if !filters.tags.is_empty() && !any_ref_in(&task.tags, &filters.tags) {
        return false;
    }
    if !filters.date_range.contains(task.due_date) {
        return false;
    }
    if let Some(project_id) = &filters.project_id {
        if task.project_id.as_ref() != Some(project_id) {
            return false;
        }
    }
    text_matches(
        &filters.search,
        &[Some(task.title.as_str()), task.description.as_deref()],
    )
}

/// Whether one project passes every constrained field
pub fn project_matches(project: &Project, filters: &ProjectFilters) -> bool {
    if !filters.status.is_empty() && !filters.status.contains(&project.status) {
        return false;
    }
    if !filters.members.is_empty() && !any_ref_in(&project.members, &filters.members) {
        return false;
    }
    if !filters.tags.is_empty() && !any_ref_in(&project.tags, &filters.tags) {
        return false;
    }
    if !filters.date_range.contains(project.end_date) {
        return false;
    }
    if let Some(range) = &filters.progress_range {
        if !range.contains(project.progress) {
            return false;
        }
    }
    text_matches(
        &filters.search,
        &[Some(project.name.as_str()), project.description.as_deref()],
    )
}

pub fn filter_tasks(tasks: &[Task], filters: &TaskFilters) -> Vec<Task> {
    let kept: Vec<Task> = tasks
        .iter()
        .filter(|t| task_matches(t, filters))
        .cloned()
        .collect();
    debug!("Task filter kept {} of {}", kept.len(), tasks.len());
    kept
}

pub fn filter_projects(projects: &[Project], filters: &ProjectFilters) -> Vec<Project> {
    let kept: Vec<Project> = projects
        .iter()
        .filter(|p| project_matches(p, filters))
        .cloned()
        .collect();
    debug!("Project filter kept {} of {}", kept.len(), projects.len());
    kept
}

/// True iff a list field is non-empty, a date bound is set, or the search
/// text is non-blank. `projectId` and `progressRange` do not count.
pub fn has_active_filters(criteria: &FilterCriteria) -> bool {
    active_filter_count(criteria) > 0
}

/// Number of constrained fields among those `has_active_filters` considers
pub fn active_filter_count(criteria: &FilterCriteria) -> usize {
    let (lists, date_set, search) = match criteria {
        FilterCriteria::Task(f) => (
            [
                f.status.is_empty(),
                f.priority.is_empty(),
                f.assignees.is_empty(),
                f.tags.is_empty(),
            ],
            f.date_range.is_set(),
            f.search.as_str(),
        ),
        FilterCriteria::Project(f) => (
            [
                f.status.is_empty(),
                f.members.is_empty(),
                f.tags.is_empty(),
                true,
            ],
            f.date_range.is_set(),
            f.search.as_str(),
        ),
    };

    lists.iter().filter(|empty| !**empty).count()
        + usize::from(date_set)
        + usize::from(!search.trim().is_empty())
}

/// Criteria with every field explicitly reset
pub fn clear_filters(kind: FilterKind) -> FilterCriteria {
    match kind {
        FilterKind::Task => FilterCriteria::Task(TaskFilters::default()),
        FilterKind::Project => FilterCriteria::Project(ProjectFilters::default()),
    }
}

/// Share of a collection that survived filtering
pub fn filter_stats(total_count: usize, filtered_count: usize) -> FilterStats {
    let filter_rate = if total_count == 0 {
        0.0
    } else {
        filtered_count as f64 / total_count as f64 * 100.0
    };
    FilterStats {
        total_count,
        filtered_count,
        filter_rate,
    }
}
