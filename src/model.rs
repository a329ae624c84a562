//! Entities, search results and filter criteria
//!
//! Everything here serializes to the camelCase JSON shape the stored
//! preset/history collections and the input entity files use.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Kind of entity a search result points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Task,
    Project,
    Note,
    User,
    Team,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Task => "task",
            EntityType::Project => "project",
            EntityType::Note => "note",
            EntityType::User => "user",
            EntityType::Team => "team",
        }
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "task" => Ok(EntityType::Task),
            "project" => Ok(EntityType::Project),
            "note" => Ok(EntityType::Note),
            "user" => Ok(EntityType::User),
            "team" => Ok(EntityType::Team),
            other => Err(format!("unknown entity type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
        }
    }

    /// Human-readable label, used as the task result subtitle
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To do",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Review => "In review",
            TaskStatus::Done => "Done",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "review" => Ok(TaskStatus::Review),
            "done" => Ok(TaskStatus::Done),
            other => Err(format!("unknown task status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    #[default]
    Active,
    OnHold,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::Active => "active",
            ProjectStatus::OnHold => "on_hold",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "planning" => Ok(ProjectStatus::Planning),
            "active" => Ok(ProjectStatus::Active),
            "on_hold" => Ok(ProjectStatus::OnHold),
            "completed" => Ok(ProjectStatus::Completed),
            "cancelled" => Ok(ProjectStatus::Cancelled),
            other => Err(format!("unknown project status '{}'", other)),
        }
    }
}

/// Reference to another entity: either a bare id or an embedded object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Id(String),
    Embedded {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl EntityRef {
    pub fn id(&self) -> &str {
        match self {
            EntityRef::Id(id) => id,
            EntityRef::Embedded { id, .. } => id,
        }
    }
}

impl From<&str> for EntityRef {
    fn from(id: &str) -> Self {
        EntityRef::Id(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub assignees: Vec<EntityRef>,
    #[serde(default)]
    pub tags: Vec<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            priority: Priority::default(),
            assignees: Vec::new(),
            tags: Vec::new(),
            project_id: None,
            due_date: None,
            created_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    /// Completion percentage, 0-100
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub members: Vec<EntityRef>,
    #[serde(default)]
    pub tags: Vec<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            status: ProjectStatus::default(),
            progress: 0,
            members: Vec::new(),
            tags: Vec::new(),
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            avatar: None,
            role: None,
        }
    }
}

/// Literal match spans inside one field of a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub field: String,
    pub text: String,
    /// Half-open `(start, end)` char offsets into `text`
    pub indices: Vec<(usize, usize)>,
}

/// One scored hit produced by a searcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Relevance in `[0, 100]`
    pub score: u8,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

impl SearchResult {
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    /// Parse an RFC 3339 metadata field such as `dueDate`
    pub fn metadata_date(&self, key: &str) -> Option<DateTime<Utc>> {
        self.metadata_str(key)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|d| d.with_timezone(&Utc))
    }
}

/// Inclusive date window; unset bounds are open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    pub fn is_set(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// An unset range admits everything; a set range rejects missing dates.
    pub fn contains(&self, date: Option<DateTime<Utc>>) -> bool {
        if !self.is_set() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Inclusive progress window in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRange {
    pub min: u8,
    pub max: u8,
}

impl ProgressRange {
    pub fn contains(&self, progress: u8) -> bool {
        progress >= self.min && progress <= self.max
    }
}

/// Stored criteria may carry `null` where a value was cleared
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskFilters {
    #[serde(deserialize_with = "null_as_default")]
    pub status: Vec<TaskStatus>,
    #[serde(deserialize_with = "null_as_default")]
    pub priority: Vec<Priority>,
    /// User ids
    #[serde(deserialize_with = "null_as_default")]
    pub assignees: Vec<String>,
    /// Tag ids
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub date_range: DateRange,
    pub project_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub search: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectFilters {
    #[serde(deserialize_with = "null_as_default")]
    pub status: Vec<ProjectStatus>,
    /// User ids
    #[serde(deserialize_with = "null_as_default")]
    pub members: Vec<String>,
    /// Tag ids
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub date_range: DateRange,
    pub progress_range: Option<ProgressRange>,
    #[serde(deserialize_with = "null_as_default")]
    pub search: String,
}

/// Which collection a criteria bundle or preset applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Task,
    Project,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::Task => write!(f, "task"),
            FilterKind::Project => write!(f, "project"),
        }
    }
}

impl FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "task" | "tasks" => Ok(FilterKind::Task),
            "project" | "projects" => Ok(FilterKind::Project),
            other => Err(format!("unknown filter type '{}'", other)),
        }
    }
}

/// Criteria for either collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "criteria", rename_all = "lowercase")]
pub enum FilterCriteria {
    Task(TaskFilters),
    Project(ProjectFilters),
}

impl FilterCriteria {
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterCriteria::Task(_) => FilterKind::Task,
            FilterCriteria::Project(_) => FilterKind::Project,
        }
    }

    /// Parse the bare criteria object for a known kind
    pub fn from_value(kind: FilterKind, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            FilterKind::Task => FilterCriteria::Task(serde_json::from_value(value)?),
            FilterKind::Project => FilterCriteria::Project(serde_json::from_value(value)?),
        })
    }

    /// The bare criteria object, without the type tag
    pub fn to_value(&self) -> Value {
        let value = match self {
            FilterCriteria::Task(filters) => serde_json::to_value(filters),
            FilterCriteria::Project(filters) => serde_json::to_value(filters),
        };
        value.unwrap_or(Value::Null)
    }
}

/// Named, reusable criteria bundle
///
/// Serialized as `{ id, name, type, filters, icon?, color?, isDefault, createdAt, updatedAt }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPreset", into = "RawPreset")]
pub struct FilterPreset {
    pub id: String,
    pub name: String,
    pub filters: FilterCriteria,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FilterPreset {
    pub fn kind(&self) -> FilterKind {
        self.filters.kind()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPreset {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: FilterKind,
    filters: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default)]
    is_default: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RawPreset> for FilterPreset {
    type Error = serde_json::Error;

    fn try_from(raw: RawPreset) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.id,
            name: raw.name,
            filters: FilterCriteria::from_value(raw.kind, raw.filters)?,
            icon: raw.icon,
            color: raw.color,
            is_default: raw.is_default,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

impl From<FilterPreset> for RawPreset {
    fn from(preset: FilterPreset) -> Self {
        Self {
            id: preset.id,
            name: preset.name,
            kind: preset.filters.kind(),
            filters: preset.filters.to_value(),
            icon: preset.icon,
            color: preset.color,
            is_default: preset.is_default,
            created_at: preset.created_at,
            updated_at: preset.updated_at,
        }
    }
}

/// Fields a caller supplies when saving or importing a preset
#[derive(Debug, Clone, PartialEq)]
pub struct PresetDraft {
    pub name: String,
    pub filters: FilterCriteria,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl PresetDraft {
    pub fn new(name: impl Into<String>, filters: FilterCriteria) -> Self {
        Self {
            name: name.into(),
            filters,
            icon: None,
            color: None,
        }
    }
}

/// Partial update applied by `PresetStore::update`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetUpdate {
    pub name: Option<String>,
    pub filters: Option<FilterCriteria>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    pub id: String,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterCriteria>,
    pub timestamp: DateTime<Utc>,
    pub result_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStats {
    pub total_count: usize,
    pub filtered_count: usize,
    /// Percentage of the input that survived filtering
    pub filter_rate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Relevance,
    Title,
    Date,
    Priority,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relevance" => Ok(SortField::Relevance),
            "title" => Ok(SortField::Title),
            "date" => Ok(SortField::Date),
            "priority" => Ok(SortField::Priority),
            other => Err(format!("unknown sort field '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// Sort directive `{ field, order }`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    /// Sort by `field` in its natural default direction
    pub fn new(field: SortField) -> Self {
        let order = match field {
            SortField::Title => SortOrder::Asc,
            SortField::Relevance | SortField::Date | SortField::Priority => SortOrder::Desc,
        };
        Self { field, order }
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_entity_ref_accepts_id_or_object() {
        let refs: Vec<EntityRef> =
            serde_json::from_str(r#"["u1", {"id": "u2", "name": "Ana"}, {"id": "u3", "extra": 1}]"#)
                .unwrap();
        let ids: Vec<&str> = refs.iter().map(EntityRef::id).collect();
        assert_eq!(ids, vec!["u1", "u2", "u3"]);
    }

    #[test]
    fn test_task_deserializes_camel_case() {
        let task: Task = serde_json::from_str(
            r#"{"id":"t1","title":"Ship","status":"in_progress","priority":"high",
                "projectId":"p1","dueDate":"2024-05-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.project_id.as_deref(), Some("p1"));
        assert!(task.due_date.is_some());
        assert!(task.assignees.is_empty());
    }

    #[test]
    fn test_date_range_bounds_are_inclusive() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let range = DateRange::new(Some(start), Some(end));

        assert!(range.contains(Some(start)));
        assert!(range.contains(Some(end)));
        assert!(!range.contains(Some(end + chrono::Duration::seconds(1))));
        assert!(!range.contains(None));
        assert!(DateRange::default().contains(None));
    }

    #[test]
    fn test_cleared_filters_keep_explicit_shape() {
        let value = serde_json::to_value(TaskFilters::default()).unwrap();
        assert_eq!(value["status"], serde_json::json!([]));
        assert_eq!(value["dateRange"], serde_json::json!({"start": null, "end": null}));
        assert_eq!(value["projectId"], Value::Null);
        assert_eq!(value["search"], serde_json::json!(""));
    }

    #[test]
    fn test_preset_json_shape() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let preset = FilterPreset {
            id: "preset_1".to_string(),
            name: "Mine".to_string(),
            filters: FilterCriteria::Project(ProjectFilters {
                status: vec![ProjectStatus::Active],
                ..Default::default()
            }),
            icon: None,
            color: Some("#ff0000".to_string()),
            is_default: false,
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&preset).unwrap();
        assert_eq!(value["type"], "project");
        assert_eq!(value["isDefault"], false);
        assert_eq!(value["filters"]["status"], serde_json::json!(["active"]));

        let back: FilterPreset = serde_json::from_value(value).unwrap();
        assert_eq!(back, preset);
    }

    #[test]
    fn test_preset_rejects_mismatched_filters() {
        let json = r#"{"id":"x","name":"n","type":"task","filters":{"status":["on_hold"]},
                      "createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<FilterPreset>(json).is_err());
    }

    #[test]
    fn test_filters_accept_null_fields() {
        let filters: TaskFilters = serde_json::from_str(
            r#"{"status":null,"priority":["high"],"tags":null,"dateRange":null,"search":null}"#,
        )
        .unwrap();
        assert!(filters.status.is_empty());
        assert_eq!(filters.priority, vec![Priority::High]);
        assert!(!filters.date_range.is_set());
        assert_eq!(filters.search, "");

        let filters: ProjectFilters =
            serde_json::from_str(r#"{"members":null,"search":null}"#).unwrap();
        assert_eq!(filters, ProjectFilters::default());
    }

    #[test]
    fn test_sort_spec_defaults() {
        assert_eq!(SortSpec::default().field, SortField::Relevance);
        assert_eq!(SortSpec::default().order, SortOrder::Desc);
        assert_eq!(SortSpec::new(SortField::Title).order, SortOrder::Asc);
        assert_eq!(SortSpec::new(SortField::Date).order, SortOrder::Desc);
    }

    #[test]
    fn test_parse_enums_from_str() {
        assert_eq!("in_progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert_eq!("URGENT".parse::<Priority>(), Ok(Priority::Urgent));
        assert_eq!("projects".parse::<FilterKind>(), Ok(FilterKind::Project));
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}
