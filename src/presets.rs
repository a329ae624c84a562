//! Filter presets
//!
//! Five built-in presets are generated on every read and never stored.
//! User presets live as one JSON array under the presets key; every write
//! is a full read-modify-write of that array, last writer wins.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::model::{
    DateRange, FilterCriteria, FilterKind, FilterPreset, Priority, PresetDraft, PresetUpdate,
    ProjectFilters, ProjectStatus, TaskFilters, TaskStatus,
};
use crate::store::{read_collection, write_collection, StorageKeys, Store, StoreError};
use crate::utils::{generate_id, now};

pub const DEFAULT_HIGH_PRIORITY: &str = "default_high_priority";
pub const DEFAULT_IN_PROGRESS: &str = "default_in_progress";
pub const DEFAULT_DUE_SOON: &str = "default_due_soon";
pub const DEFAULT_ACTIVE_PROJECTS: &str = "default_active_projects";
pub const DEFAULT_COMPLETED_PROJECTS: &str = "default_completed_projects";

/// Window used by the "due soon" preset
pub const DUE_SOON_DAYS: i64 = 7;

const DEFAULT_IDS: [&str; 5] = [
    DEFAULT_HIGH_PRIORITY,
    DEFAULT_IN_PROGRESS,
    DEFAULT_DUE_SOON,
    DEFAULT_ACTIVE_PROJECTS,
    DEFAULT_COMPLETED_PROJECTS,
];

pub fn is_default_id(id: &str) -> bool {
    DEFAULT_IDS.contains(&id)
}

fn builtin(
    id: &str,
    name: &str,
    icon: &str,
    color: &str,
    filters: FilterCriteria,
    at: DateTime<Utc>,
) -> FilterPreset {
    FilterPreset {
        id: id.to_string(),
        name: name.to_string(),
        filters,
        icon: Some(icon.to_string()),
        color: Some(color.to_string()),
        is_default: true,
        created_at: at,
        updated_at: at,
    }
}

/// Built-in presets stamped with `at`: three for tasks, two for projects
pub fn default_presets_at(at: DateTime<Utc>) -> Vec<FilterPreset> {
    vec![
        builtin(
            DEFAULT_HIGH_PRIORITY,
            "High priority",
            "flag",
            "#ef4444",
            FilterCriteria::Task(TaskFilters {
                priority: vec![Priority::High, Priority::Urgent],
                ..Default::default()
            }),
            at,
        ),
        builtin(
            DEFAULT_IN_PROGRESS,
            "In progress",
            "loader",
            "#3b82f6",
            FilterCriteria::Task(TaskFilters {
                status: vec![TaskStatus::InProgress],
                ..Default::default()
            }),
            at,
        ),
        builtin(
            DEFAULT_DUE_SOON,
            "Due soon",
            "clock",
            "#f59e0b",
            FilterCriteria::Task(TaskFilters {
                date_range: DateRange::new(Some(at), Some(at + Duration::days(DUE_SOON_DAYS))),
                ..Default::default()
            }),
            at,
        ),
        builtin(
            DEFAULT_ACTIVE_PROJECTS,
            "Active projects",
            "folder-open",
            "#10b981",
            FilterCriteria::Project(ProjectFilters {
                status: vec![ProjectStatus::Active],
                ..Default::default()
            }),
            at,
        ),
        builtin(
            DEFAULT_COMPLETED_PROJECTS,
            "Completed projects",
            "check-circle",
            "#6b7280",
            FilterCriteria::Project(ProjectFilters {
                status: vec![ProjectStatus::Completed],
                ..Default::default()
            }),
            at,
        ),
    ]
}

pub fn default_presets() -> Vec<FilterPreset> {
    default_presets_at(now())
}

/// Shape accepted by `import`; only name, type and filters are required
#[derive(Deserialize)]
struct ImportedPreset {
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<FilterKind>,
    filters: Option<Value>,
    icon: Option<String>,
    color: Option<String>,
}

pub struct PresetStore {
    store: Arc<dyn Store>,
    key: String,
}

impl PresetStore {
    pub fn new(store: Arc<dyn Store>, keys: &StorageKeys) -> Self {
        Self {
            store,
            key: keys.presets.clone(),
        }
    }

    fn load_user(&self) -> Result<Vec<FilterPreset>, StoreError> {
        let mut presets: Vec<FilterPreset> = read_collection(self.store.as_ref(), &self.key)?;
        presets.retain(|p| !p.is_default && !is_default_id(&p.id));
        Ok(presets)
    }

    fn write_user(&self, presets: &[FilterPreset]) -> Result<(), AppError> {
        write_collection(self.store.as_ref(), &self.key, presets)?;
        Ok(())
    }

    /// Defaults followed by user presets, or `StorageUnavailable`
    pub fn try_list(&self) -> Result<Vec<FilterPreset>, AppError> {
        let mut presets = default_presets();
        presets.extend(self.load_user()?);
        Ok(presets)
    }

    /// Defaults followed by user presets; user presets read as empty when
    /// the backend fails
    pub fn list(&self) -> Vec<FilterPreset> {
        let mut presets = default_presets();
        match self.load_user() {
            Ok(user) => presets.extend(user),
            Err(e) => warn!("Listing default presets only: {}", e),
        }
        presets
    }

    pub fn list_by_type(&self, kind: FilterKind) -> Vec<FilterPreset> {
        self.list().into_iter().filter(|p| p.kind() == kind).collect()
    }

    pub fn get(&self, id: &str) -> Option<FilterPreset> {
        self.list().into_iter().find(|p| p.id == id)
    }

    /// Persist a new user preset with a fresh id and timestamps
    pub fn save(&self, draft: PresetDraft) -> Result<FilterPreset, AppError> {
        if draft.name.trim().is_empty() {
            return Err(AppError::InvalidInput("Preset name cannot be empty".to_string()));
        }

        let mut presets = self.load_user()?;
        let at = now();
        let preset = FilterPreset {
            id: generate_id("preset", at),
            name: draft.name,
            filters: draft.filters,
            icon: draft.icon,
            color: draft.color,
            is_default: false,
            created_at: at,
            updated_at: at,
        };
        presets.push(preset.clone());
        self.write_user(&presets)?;

        info!("Saved {} preset {} ({})", preset.kind(), preset.id, preset.name);
        Ok(preset)
    }

    /// Merge `update` into a user preset. Defaults and unknown ids give `None`.
    pub fn update(&self, id: &str, update: PresetUpdate) -> Result<Option<FilterPreset>, AppError> {
        let mut presets = self.load_user()?;
        let Some(preset) = presets.iter_mut().find(|p| p.id == id) else {
            debug!("No user preset {} to update", id);
            return Ok(None);
        };

        if let Some(name) = update.name {
            preset.name = name;
        }
        if let Some(filters) = update.filters {
            preset.filters = filters;
        }
        if let Some(icon) = update.icon {
            preset.icon = Some(icon);
        }
        if let Some(color) = update.color {
            preset.color = Some(color);
        }
        preset.updated_at = now().max(preset.created_at);

        let updated = preset.clone();
        self.write_user(&presets)?;
        info!("Updated preset {}", id);
        Ok(Some(updated))
    }

    /// Remove a user preset. Succeeds whether or not the id existed;
    /// default ids are never removed.
    pub fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut presets = self.load_user()?;
        let before = presets.len();
        presets.retain(|p| p.id != id);
        self.write_user(&presets)?;

        if presets.len() < before {
            info!("Deleted preset {}", id);
        } else {
            debug!("Preset {} not among user presets", id);
        }
        Ok(true)
    }

    /// Serialize one preset for sharing
    pub fn export(preset: &FilterPreset) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(preset)?)
    }

    /// Parse an exported preset and save it as a new user preset
    pub fn import(&self, json: &str) -> Result<FilterPreset, AppError> {
        let imported: ImportedPreset = serde_json::from_str(json)?;

        let (Some(name), Some(kind), Some(filters)) =
            (imported.name, imported.kind, imported.filters)
        else {
            return Err(AppError::InvalidInput(
                "Preset must have name, type and filters".to_string(),
            ));
        };

        let draft = PresetDraft {
            name,
            filters: FilterCriteria::from_value(kind, filters)?,
            icon: imported.icon,
            color: imported.color,
        };
        self.save(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, UnavailableStore};

    fn store() -> PresetStore {
        PresetStore::new(Arc::new(MemoryStore::new()), &StorageKeys::default())
    }

    fn task_draft(name: &str) -> PresetDraft {
        PresetDraft::new(
            name,
            FilterCriteria::Task(TaskFilters {
                status: vec![TaskStatus::Todo],
                ..Default::default()
            }),
        )
    }

    #[test]
    fn test_defaults_layout() {
        let defaults = default_presets();
        assert_eq!(defaults.len(), 5);
        assert!(defaults.iter().all(|p| p.is_default));
        assert_eq!(defaults.iter().filter(|p| p.kind() == FilterKind::Task).count(), 3);
        assert_eq!(defaults.iter().filter(|p| p.kind() == FilterKind::Project).count(), 2);
    }

    #[test]
    fn test_due_soon_window() {
        let at = Utc::now();
        let due_soon = default_presets_at(at)
            .into_iter()
            .find(|p| p.id == DEFAULT_DUE_SOON)
            .unwrap();
        let FilterCriteria::Task(filters) = due_soon.filters else {
            panic!("due soon should be a task preset");
        };
        assert_eq!(filters.date_range.start, Some(at));
        assert_eq!(filters.date_range.end, Some(at + Duration::days(7)));
    }

    #[test]
    fn test_list_starts_with_defaults() {
        let presets = store();
        let listed = presets.list();
        assert_eq!(listed.len(), 5);
        assert_eq!(listed[0].id, DEFAULT_HIGH_PRIORITY);
    }

    #[test]
    fn test_save_appends_user_preset() {
        let presets = store();
        let saved = presets.save(task_draft("My todo")).unwrap();

        assert!(saved.id.starts_with("preset_"));
        assert!(!saved.is_default);
        assert_eq!(saved.created_at, saved.updated_at);

        let listed = presets.list();
        assert_eq!(listed.len(), 6);
        assert_eq!(listed[5], saved);
        assert_eq!(presets.get(&saved.id), Some(saved));
    }

    #[test]
    fn test_only_user_presets_are_persisted() {
        let backend = Arc::new(MemoryStore::new());
        let presets = PresetStore::new(backend.clone(), &StorageKeys::default());
        presets.save(task_draft("Mine")).unwrap();

        let raw = backend.get("task-search:filter-presets").unwrap().unwrap();
        let stored: Vec<FilterPreset> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Mine");
    }

    #[test]
    fn test_save_rejects_blank_name() {
        assert!(matches!(
            store().save(task_draft("  ")),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_update_merges_fields() {
        let presets = store();
        let saved = presets.save(task_draft("Old")).unwrap();

        let updated = presets
            .update(
                &saved.id,
                PresetUpdate {
                    name: Some("New".to_string()),
                    color: Some("#000000".to_string()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "New");
        assert_eq!(updated.color.as_deref(), Some("#000000"));
        assert_eq!(updated.filters, saved.filters);
        assert!(updated.updated_at >= saved.updated_at);
        assert_eq!(presets.get(&saved.id).unwrap().name, "New");
    }

    #[test]
    fn test_update_unknown_or_default_is_none() {
        let presets = store();
        assert_eq!(presets.update("missing", PresetUpdate::default()).unwrap(), None);
        let rename = PresetUpdate {
            name: Some("Hijacked".to_string()),
            ..Default::default()
        };
        assert_eq!(presets.update(DEFAULT_IN_PROGRESS, rename).unwrap(), None);
        assert_eq!(presets.get(DEFAULT_IN_PROGRESS).unwrap().name, "In progress");
    }

    #[test]
    fn test_delete_is_idempotent() {
        let presets = store();
        let saved = presets.save(task_draft("Temp")).unwrap();

        assert!(presets.delete(&saved.id).unwrap());
        assert!(presets.delete(&saved.id).unwrap());
        assert!(presets.get(&saved.id).is_none());
    }

    #[test]
    fn test_default_cannot_be_deleted() {
        let presets = store();
        let first = presets.list();
        assert!(presets.delete(DEFAULT_HIGH_PRIORITY).unwrap());
        let second = presets.list();

        assert!(first.iter().any(|p| p.id == DEFAULT_HIGH_PRIORITY));
        assert!(second.iter().any(|p| p.id == DEFAULT_HIGH_PRIORITY));
    }

    #[test]
    fn test_stored_defaults_are_ignored() {
        let backend = Arc::new(MemoryStore::new());
        let presets = PresetStore::new(backend.clone(), &StorageKeys::default());
        write_collection(backend.as_ref(), "task-search:filter-presets", &default_presets()).unwrap();

        assert_eq!(presets.list().len(), 5);
    }

    #[test]
    fn test_unreadable_preset_does_not_erase_others() {
        let backend = Arc::new(MemoryStore::new());
        let seeded = PresetStore::new(Arc::new(MemoryStore::new()), &StorageKeys::default());
        let mine = seeded.save(task_draft("Mine")).unwrap();

        let legacy = serde_json::json!({
            "id": "preset_legacy",
            "name": "Legacy",
            "type": "task",
            "filters": { "status": ["blocked"], "search": null },
            "isDefault": false,
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        });
        let stored = serde_json::json!([serde_json::to_value(&mine).unwrap(), legacy]);
        backend
            .set("task-search:filter-presets", &stored.to_string())
            .unwrap();

        let presets = PresetStore::new(backend.clone(), &StorageKeys::default());
        assert!(presets.list().iter().any(|p| p.name == "Mine"));

        presets.save(task_draft("New")).unwrap();
        let raw = backend.get("task-search:filter-presets").unwrap().unwrap();
        let names: Vec<String> = serde_json::from_str::<Vec<FilterPreset>>(&raw)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Mine", "New"]);
    }

    #[test]
    fn test_null_search_in_stored_preset_is_readable() {
        let backend = Arc::new(MemoryStore::new());
        backend
            .set(
                "task-search:filter-presets",
                r#"[{"id":"preset_old","name":"Old","type":"project","filters":{"status":["active"],"search":null,"members":null},"createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}]"#,
            )
            .unwrap();

        let presets = PresetStore::new(backend, &StorageKeys::default());
        let old = presets.get("preset_old").unwrap();
        assert_eq!(old.kind(), FilterKind::Project);
        assert!(!old.is_default);
    }

    #[test]
    fn test_export_import_creates_new_preset() {
        let presets = store();
        let saved = presets.save(task_draft("Shared")).unwrap();
        let json = PresetStore::export(&saved).unwrap();

        let imported = presets.import(&json).unwrap();
        assert_ne!(imported.id, saved.id);
        assert_eq!(imported.name, "Shared");
        assert_eq!(imported.filters, saved.filters);
        assert_eq!(presets.list().len(), 7);
    }

    #[test]
    fn test_import_minimal_json() {
        let presets = store();
        let imported = presets
            .import(r#"{"name":"Live","type":"project","filters":{"status":["active"]}}"#)
            .unwrap();
        assert_eq!(imported.kind(), FilterKind::Project);
    }

    #[test]
    fn test_import_errors() {
        let presets = store();
        assert!(matches!(presets.import("{not json"), Err(AppError::Parse(_))));
        assert!(matches!(
            presets.import(r#"{"name":"No filters","type":"task"}"#),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            presets.import(r#"{"name":"Wrong","type":"task","filters":{"status":["on_hold"]}}"#),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn test_unavailable_backend() {
        let presets = PresetStore::new(Arc::new(UnavailableStore), &StorageKeys::default());

        assert_eq!(presets.list().len(), 5);
        assert!(matches!(presets.try_list(), Err(AppError::StorageUnavailable(_))));
        assert!(matches!(
            presets.save(task_draft("x")),
            Err(AppError::StorageUnavailable(_))
        ));
    }
}
