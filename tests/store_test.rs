use std::fs;

use chrono::NaiveDate;
use studydesk::store::to_json;
use studydesk::{Document, LoadResult, Store};
use tempfile::TempDir;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn store_in(dir: &TempDir) -> Store {
    Store::new(dir.path().join("learning_app_data.json"))
}

#[test]
fn missing_file_is_first_run() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let loaded = store.load();
    assert!(matches!(loaded, LoadResult::Missing));
    assert_eq!(loaded.into_document(), Document::default());
}

#[test]
fn corrupt_file_is_backed_up_and_discarded() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "{ not json").unwrap();

    let loaded = store.load();
    match &loaded {
        LoadResult::Corrupt { backup, .. } => {
            let backup = backup.as_ref().expect("backup should be written");
            assert_eq!(fs::read_to_string(backup).unwrap(), "{ not json");
        }
        other => panic!("expected Corrupt, got {other:?}"),
    }
    assert_eq!(loaded.into_document(), Document::default());
}

#[test]
fn repeated_corruption_keeps_every_backup() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    fs::write(store.path(), "first garbage").unwrap();
    let first = match store.load() {
        LoadResult::Corrupt { backup: Some(path), .. } => path,
        other => panic!("expected backed up Corrupt, got {other:?}"),
    };

    store.save(&Document::default()).unwrap();
    fs::write(store.path(), "second garbage").unwrap();
    let second = match store.load() {
        LoadResult::Corrupt { backup: Some(path), .. } => path,
        other => panic!("expected backed up Corrupt, got {other:?}"),
    };

    assert_ne!(first, second);
    assert_eq!(fs::read_to_string(&first).unwrap(), "first garbage");
    assert_eq!(fs::read_to_string(&second).unwrap(), "second garbage");
}

#[test]
fn wrong_shape_counts_as_corrupt() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), r#"{"tasks": "nope"}"#).unwrap();

    assert!(matches!(store.load(), LoadResult::Corrupt { .. }));
}

#[test]
fn missing_sections_default_to_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), r#"{"schedules": {"2024-05-05": "遠足"}}"#).unwrap();

    let doc = store.load().into_document();
    assert_eq!(doc.schedules.get_note(ymd(2024, 5, 5)), "遠足");
    assert!(doc.tasks.is_empty());
}

#[test]
fn large_task_ids_load_without_dropping_schedules() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(
        store.path(),
        r#"{"schedules": {"2024-05-05": "遠足"}, "tasks": [{"id": 5000000000, "text": "a", "completed": false}]}"#,
    )
    .unwrap();

    let mut doc = match store.load() {
        LoadResult::Loaded(doc) => doc,
        other => panic!("expected Loaded, got {other:?}"),
    };
    assert_eq!(doc.schedules.get_note(ymd(2024, 5, 5)), "遠足");
    assert_eq!(doc.tasks.add_task("b"), Some(5_000_000_001));
}

#[test]
fn writes_four_space_indented_utf8() {
    let mut doc = Document::default();
    doc.schedules.set_note(ymd(2024, 5, 5), "遠足");
    doc.tasks.add_task("数学");

    let json = String::from_utf8(to_json(&doc).unwrap()).unwrap();
    let expected = r#"{
    "schedules": {
        "2024-05-05": "遠足"
    },
    "tasks": [
        {
            "id": 1,
            "text": "数学",
            "completed": false
        }
    ]
}"#;
    assert_eq!(json, expected);
}

#[test]
fn empty_document_shape() {
    let json = String::from_utf8(to_json(&Document::default()).unwrap()).unwrap();
    assert_eq!(json, "{\n    \"schedules\": {},\n    \"tasks\": []\n}");
}

#[test]
fn save_is_idempotent_after_first_normalization() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    // Out of order keys and two-space indent, as another writer might leave it.
    fs::write(
        store.path(),
        r#"{
  "tasks": [{"id": 3, "text": "b", "completed": true}, {"id": 1, "text": "a", "completed": false}],
  "schedules": {"2024-12-01": "x", "2024-01-15": "y"}
}"#,
    )
    .unwrap();

    let doc = store.load().into_document();
    store.save(&doc).unwrap();
    let first = fs::read(store.path()).unwrap();

    let doc = store.load().into_document();
    store.save(&doc).unwrap();
    let second = fs::read(store.path()).unwrap();

    assert_eq!(first, second);
    // Task order is creation order, not re-sorted.
    let ids: Vec<i64> = doc.tasks.tasks().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

#[test]
fn save_creates_parent_dirs_and_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let store = Store::new(dir.path().join("nested").join("data.json"));

    store.save(&Document::default()).unwrap();

    assert!(store.path().exists());
    assert!(!dir.path().join("nested").join("data.json.tmp").exists());
}
