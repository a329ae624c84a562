#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    use crate::filter::{filter_stats, filter_tasks, has_active_filters};
    use crate::model::{
        FilterCriteria, FilterKind, Priority, Project, SortField, SortSpec, Task, TaskStatus,
    };
    use crate::presets::{DEFAULT_DUE_SOON, DEFAULT_HIGH_PRIORITY};
    use crate::search::compose::{compose, ResultFilters};
    use crate::search::entities::search_tasks;
    use crate::{
        Corpus, FileStore, HistoryStore, MemoryStore, PresetStore, SearchEngine, SearchRequest,
        StorageKeys, Store, UnavailableStore,
    };

    fn backend() -> Arc<dyn Store> {
        Arc::new(MemoryStore::new())
    }

    #[test]
    fn login_query_scores_substring_and_highlights_title() {
        let tasks = vec![
            Task::new("1", "Fix login bug").with_description("auth issue"),
            Task::new("2", "Design homepage"),
        ];

        let results = search_tasks("login", &tasks);
        assert_eq!(results.len(), 1, "homepage task should fall below the threshold");
        assert_eq!(results[0].id, "1");
        assert_eq!(results[0].score, 70);
        assert_eq!(results[0].highlights[0].field, "title");
        assert_eq!(results[0].highlights[0].indices, vec![(4, 9)]);
    }

    #[test]
    fn title_sort_orders_banana_after_apple() {
        let results: Vec<_> = ["Banana", "Apple"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut r = crate::search::Searchable::to_result(&Project::new(i.to_string(), *name));
                r.score = 50;
                r
            })
            .collect();

        let sorted = compose(results, &ResultFilters::default(), SortSpec::new(SortField::Title));
        let titles: Vec<&str> = sorted.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "Banana"]);
    }

    #[test]
    fn default_presets_survive_deletion_attempts() {
        let presets = PresetStore::new(backend(), &StorageKeys::default());

        let before = presets.list();
        presets.delete(DEFAULT_HIGH_PRIORITY).expect("delete succeeds");
        let after = presets.list();

        assert!(before.iter().any(|p| p.id == DEFAULT_HIGH_PRIORITY));
        assert!(after.iter().any(|p| p.id == DEFAULT_HIGH_PRIORITY));
        assert_eq!(before.len(), after.len());
    }

    #[test]
    fn history_collapses_duplicates_and_evicts_oldest() {
        let history = HistoryStore::new(backend(), &StorageKeys::default());

        history.add("report", None, 2).unwrap();
        history.add("report", None, 5).unwrap();
        let entries = history.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].result_count, 5);

        for i in 0..20 {
            history.add(&format!("query {}", i), None, i).unwrap();
        }
        let entries = history.entries();
        assert_eq!(entries.len(), 20);
        assert!(
            entries.iter().all(|e| e.query != "report"),
            "oldest entry should be evicted by the 21st distinct query"
        );
    }

    #[test]
    fn preset_filters_drive_filter_engine() {
        let presets = PresetStore::new(backend(), &StorageKeys::default());
        let high = presets.get(DEFAULT_HIGH_PRIORITY).expect("default preset present");

        let tasks = vec![
            Task::new("a", "Ship release").with_priority(Priority::Urgent),
            Task::new("b", "Update docs").with_priority(Priority::Low),
            Task::new("c", "Patch CVE").with_priority(Priority::High),
        ];

        let FilterCriteria::Task(filters) = &high.filters else {
            panic!("high priority preset should hold task criteria");
        };
        assert!(has_active_filters(&high.filters));

        let kept = filter_tasks(&tasks, filters);
        let ids: Vec<&str> = kept.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        let stats = filter_stats(tasks.len(), kept.len());
        assert!((stats.filter_rate - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn due_soon_preset_selects_next_week() {
        let presets = PresetStore::new(backend(), &StorageKeys::default());
        let due_soon = presets.get(DEFAULT_DUE_SOON).expect("default preset present");
        let FilterCriteria::Task(filters) = due_soon.filters else {
            panic!("due soon preset should hold task criteria");
        };

        let tasks = vec![
            Task::new("soon", "Soon").with_due_date(Utc::now() + Duration::days(3)),
            Task::new("later", "Later").with_due_date(Utc::now() + Duration::days(30)),
            Task::new("undated", "Undated"),
        ];
        let kept = filter_tasks(&tasks, &filters);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "soon");
    }

    #[test]
    fn saved_presets_and_history_persist_across_file_stores() {
        let dir = TempDir::new().unwrap();
        let keys = StorageKeys::new("acme");

        {
            let store: Arc<dyn Store> = Arc::new(FileStore::new(dir.path()));
            let presets = PresetStore::new(store.clone(), &keys);
            let criteria = crate::filter::clear_filters(FilterKind::Task);
            presets
                .save(crate::model::PresetDraft::new("Everything", criteria))
                .unwrap();

            let engine = SearchEngine::new(Corpus {
                tasks: vec![Task::new("t", "Quarterly report")],
                ..Default::default()
            })
            .with_history(HistoryStore::new(store, &keys));
            engine.search(&SearchRequest::new("report")).unwrap();
        }

        let reopened: Arc<dyn Store> = Arc::new(FileStore::new(dir.path()));
        let presets = PresetStore::new(reopened.clone(), &keys);
        assert!(presets.list().iter().any(|p| p.name == "Everything"));

        let history = HistoryStore::new(reopened, &keys);
        assert_eq!(history.entries()[0].query, "report");
        assert_eq!(history.entries()[0].result_count, 1);
    }

    #[test]
    fn unavailable_backend_degrades_to_defaults_and_empty_history() {
        let store: Arc<dyn Store> = Arc::new(UnavailableStore);
        let presets = PresetStore::new(store.clone(), &StorageKeys::default());
        let history = HistoryStore::new(store, &StorageKeys::default());

        assert_eq!(presets.list().len(), 5);
        assert_eq!(presets.list_by_type(FilterKind::Project).len(), 2);
        assert!(history.entries().is_empty());
        assert_eq!(history.suggestions(""), Vec::<String>::new());
        assert!(presets.try_list().is_err());
    }

    #[test]
    fn search_then_narrow_by_status() {
        let engine = SearchEngine::new(Corpus {
            tasks: vec![
                Task::new("1", "Deploy API").with_status(TaskStatus::Done),
                Task::new("2", "Deploy web").with_status(TaskStatus::InProgress),
            ],
            ..Default::default()
        });

        let request = SearchRequest::new("deploy").with_filters(ResultFilters {
            status: vec!["in_progress".to_string()],
            ..Default::default()
        });
        let results = engine.search(&request).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "2");
        assert_eq!(results[0].subtitle.as_deref(), Some("In progress"));
    }
}
