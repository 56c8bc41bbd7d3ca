use std::fs;
use todo_tactician::query::{query, Filter, SortKey};
use todo_tactician::{from_str, load, save, to_string, Error, NewTask, Task, TaskStore, TaskUpdate};

fn sample_store() -> TaskStore {
    let mut store = TaskStore::new();
    store
        .add(NewTask::new("Write docs").with_due("2025-08-26").with_priority(5))
        .unwrap();
    store.add(NewTask::new("Refactor").with_priority(2)).unwrap();
    store
        .add(NewTask::new("Leap day review").with_due("2024-02-29"))
        .unwrap();
    store.update(2, TaskUpdate::new().with_done(true)).unwrap();
    store
}

fn sorted(tasks: &[Task]) -> Vec<Task> {
    let mut tasks = tasks.to_vec();
    tasks.sort_by_key(|t| t.id);
    tasks
}

#[test]
fn test_missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = load(dir.path().join("nonexistent.json")).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    let store = sample_store();

    save(&path, &store).unwrap();
    let back = load(&path).unwrap();

    assert_eq!(sorted(back.as_slice()), sorted(store.as_slice()));
}

#[test]
fn test_round_trip_after_delete_reorders() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    let mut store = sample_store();
    store.delete(1);

    save(&path, &store).unwrap();
    let back = load(&path).unwrap();

    let ids: Vec<u32> = back.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 2]);
    assert_eq!(sorted(back.as_slice()), sorted(store.as_slice()));
}

#[test]
fn test_escaping_round_trip() {
    let mut store = TaskStore::new();
    let title = "Say \"hi\" to C:\\Users\\me\tnow";
    store.add(NewTask::new(title)).unwrap();

    let text = to_string(&store);
    assert!(text.contains(r#""Say \"hi\" to C:\\Users\\me\tnow""#));

    let back = from_str(&text).unwrap();
    assert_eq!(back.get(1).unwrap().title, title);
}

#[test]
fn test_written_document_shape() {
    let text = to_string(&sample_store());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.first(), Some(&"["));
    assert_eq!(lines.last(), Some(&"]"));
    assert!(lines[1].starts_with("  { \"id\": 1, \"title\": "));
    assert!(lines[1].ends_with("},"));
    assert!(lines[3].ends_with(" }"));
    assert!(text.ends_with("]\n"));

    let via_json: Vec<Task> = serde_json::from_str(&text).unwrap();
    assert_eq!(via_json.len(), 3);
}

#[test]
fn test_fail_fast_on_invalid_date() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    fs::write(
        &path,
        r#"[
  { "id": 1, "title": "fine", "due": "2025-08-26", "priority": 5, "done": false },
  { "id": 2, "title": "bad", "due": "2025-13-01", "priority": 2, "done": false },
  { "id": 3, "title": "also fine", "due": "", "priority": 1, "done": true }
]"#,
    )
    .unwrap();

    match load(&path) {
        Err(Error::InvalidRecord { record, field, .. }) => {
            assert_eq!(record, 2);
            assert_eq!(field, "due");
        }
        other => panic!("expected invalid record, got {:?}", other.map(|s| s.len())),
    }
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    fs::write(&path, r#"[ { "id": 1, "title": "unterminated } ]"#).unwrap();

    let err = load(&path).unwrap_err();
    assert!(err.is_syntax(), "{}", err);
}

#[test]
fn test_unknown_keys_are_dropped_on_save() {
    let store = from_str(
        r#"[{ "id": 5, "title": "t", "tags": ["a", "b"], "meta": {"owner": "x", "n": null}, "done": true }]"#,
    )
    .unwrap();
    let text = to_string(&store);
    assert!(!text.contains("tags"));
    assert!(!text.contains("owner"));
    assert_eq!(
        text,
        "[\n  { \"id\": 5, \"title\": \"t\", \"due\": \"\", \"priority\": 3, \"done\": true }\n]\n"
    );
}

#[test]
fn test_loaded_ids_drive_allocation() {
    let mut store = from_str(r#"[{"id": 10, "title": "a"}, {"id": 4, "title": "b"}]"#).unwrap();
    let task = store.add(NewTask::new("c")).unwrap();
    assert_eq!(task.id, 11);
}

#[test]
fn test_empty_title_from_storage_is_accepted() {
    let store = from_str(r#"[{"id": 1, "title": ""}]"#).unwrap();
    assert_eq!(store.get(1).unwrap().title, "");
}

#[test]
fn test_query_over_loaded_document() {
    let store = from_str(
        r#"[
  { "id": 1, "title": "a", "due": "2025-08-26", "priority": 2, "done": false },
  { "id": 2, "title": "b", "due": "2025-08-26", "priority": 4, "done": false },
  { "id": 3, "title": "c", "due": "2025-08-26", "priority": 4, "done": false },
  { "id": 4, "title": "d", "due": "", "priority": 5, "done": true }
]"#,
    )
    .unwrap();

    let by_due: Vec<u32> = query(&store, SortKey::Due, &Filter::new())
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(by_due, vec![2, 3, 1, 4]);

    let urgent: Vec<u32> = query(
        &store,
        SortKey::Priority,
        &Filter::new().with_min_priority(4).pending_only(),
    )
    .iter()
    .map(|t| t.id)
    .collect();
    assert_eq!(urgent, vec![2, 3]);
}
