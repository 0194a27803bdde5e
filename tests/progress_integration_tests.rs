use cp_companion::progress::{
    ChecklistFlag, JsonFileStore, KeyValueStore, ProgressTracker, TOPICS, TopicProgress,
};
use tempfile::tempdir;

#[test]
fn test_toggle_cycle_survives_restart() {
    let dir = tempdir().unwrap();

    {
        let mut tracker = ProgressTracker::new(JsonFileStore::open(dir.path()).unwrap());
        tracker.toggle("dijkstra", ChecklistFlag::Read);
        tracker.toggle("dijkstra", ChecklistFlag::Watched);
        let outcome = tracker.toggle("dijkstra", ChecklistFlag::Solved);
        assert_eq!(outcome.completed_total, 1);
    }

    // A fresh process sees the same state
    let mut tracker = ProgressTracker::new(JsonFileStore::open(dir.path()).unwrap());
    assert_eq!(tracker.completed_total(), 1);
    assert!(tracker.progress("dijkstra").is_done());

    let undone = tracker.toggle("dijkstra", ChecklistFlag::Read);
    assert_eq!(undone.completed_total, 0);

    let redone = tracker.toggle("dijkstra", ChecklistFlag::Read);
    assert_eq!(redone.completed_total, 1);

    let reopened = JsonFileStore::open(dir.path()).unwrap();
    assert_eq!(
        reopened.get("completed_topics").unwrap(),
        Some("1".to_string())
    );
    let raw = reopened.get("progress:dijkstra").unwrap().unwrap();
    let record: TopicProgress = serde_json::from_str(&raw).unwrap();
    assert!(record.counted);
}

#[test]
fn test_store_file_is_a_flat_json_object() {
    let dir = tempdir().unwrap();
    let mut tracker = ProgressTracker::new(JsonFileStore::open(dir.path()).unwrap());
    tracker.toggle("bfs", ChecklistFlag::Watched);

    let content = std::fs::read_to_string(dir.path().join("progress.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    let object = value.as_object().unwrap();
    assert!(object.contains_key("progress:bfs"));
    assert!(object.contains_key("completed_topics"));
}

#[test]
fn test_summary_reports_every_topic() {
    let dir = tempdir().unwrap();
    let mut tracker = ProgressTracker::new(JsonFileStore::open(dir.path()).unwrap());
    for flag in ChecklistFlag::ALL {
        tracker.toggle("kmp", flag);
    }

    let summary = tracker.summary();
    assert_eq!(summary.len(), TOPICS.len());
    let done: Vec<_> = summary
        .iter()
        .filter(|(_, progress)| progress.is_done())
        .map(|(topic, _)| topic.slug)
        .collect();
    assert_eq!(done, vec!["kmp"]);
}
