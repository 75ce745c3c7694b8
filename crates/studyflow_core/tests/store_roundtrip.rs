use chrono::{TimeZone, Utc};
use studyflow_core::db::{open_db, open_db_in_memory};
use studyflow_core::{
    Category, KeyValueStore, Lane, RecordId, RecordStore, SessionDraft, SessionPriority,
    SqliteKeyValueStore, StudySession, Task, TaskDraft, TaskPriority, SESSIONS_KEY, TASKS_KEY,
};

fn sample_tasks() -> Vec<Task> {
    let first = TaskDraft::new("Write report", "quarterly", Category::Work, TaskPriority::High)
        .unwrap();
    let second = TaskDraft::new("Groceries", "", Category::Personal, TaskPriority::Low).unwrap();
    vec![
        Task::create(RecordId::new(1), first),
        Task {
            lane: Lane::InProgress,
            ..Task::create(RecordId::new(2), second)
        },
    ]
}

fn sample_sessions() -> Vec<StudySession> {
    let start = Utc.with_ymd_and_hms(2024, 2, 10, 14, 30, 0).unwrap();
    let draft = SessionDraft::new(
        "Math",
        "Linear algebra",
        50,
        start,
        SessionPriority::High,
        "matrices, exam",
        "chapter 3",
    )
    .unwrap();
    let mut done = StudySession::planned(RecordId::new(10), draft.clone(), "summary".into());
    done.complete(Utc.with_ymd_and_hms(2024, 2, 10, 15, 20, 0).unwrap());
    vec![done, StudySession::planned(RecordId::new(11), draft, String::new())]
}

#[test]
fn save_then_load_roundtrips_both_collections() {
    let conn = open_db_in_memory().unwrap();
    let store = RecordStore::new(SqliteKeyValueStore::new(&conn));

    store.save(TASKS_KEY, &sample_tasks()).unwrap();
    store.save(SESSIONS_KEY, &sample_sessions()).unwrap();

    assert_eq!(store.load::<Task>(TASKS_KEY), sample_tasks());
    assert_eq!(store.load::<StudySession>(SESSIONS_KEY), sample_sessions());
}

#[test]
fn collections_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studyflow.db");

    {
        let conn = open_db(&path).unwrap();
        RecordStore::new(SqliteKeyValueStore::new(&conn))
            .save(TASKS_KEY, &sample_tasks())
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = RecordStore::new(SqliteKeyValueStore::new(&conn));
    assert_eq!(store.load::<Task>(TASKS_KEY), sample_tasks());
}

#[test]
fn corrupt_or_missing_values_load_as_empty() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKeyValueStore::new(&conn);
    kv.set(TASKS_KEY, "[{\"id\": 1, \"title\": ").unwrap();

    let store = RecordStore::new(&kv);
    assert!(store.load::<Task>(TASKS_KEY).is_empty());
    assert!(store.load::<StudySession>(SESSIONS_KEY).is_empty());
}

#[test]
fn clear_removes_the_stored_value() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKeyValueStore::new(&conn);
    let store = RecordStore::new(&kv);
    store.save(TASKS_KEY, &sample_tasks()).unwrap();

    store.clear(TASKS_KEY).unwrap();
    assert_eq!(kv.get(TASKS_KEY).unwrap(), None);
    assert!(store.load::<Task>(TASKS_KEY).is_empty());
}

#[test]
fn reads_records_written_by_the_browser_app() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKeyValueStore::new(&conn);
    kv.set(
        TASKS_KEY,
        r#"[{"id":"1712345678901","title":"Edited","description":"","category":"Work","priority":"Medium","lane":"done"}]"#,
    )
    .unwrap();
    kv.set(
        SESSIONS_KEY,
        r#"[{"id":1712345678999,"subject":"Bio","topic":"Cells","duration":25,"start":"2024-04-05T10:00:00.000Z","priority":"Normal","tags":["lab"],"notes":"","summary":"","status":"done","completedAt":"2024-04-05T10:25:00.000Z"}]"#,
    )
    .unwrap();

    let store = RecordStore::new(&kv);
    let tasks = store.load::<Task>(TASKS_KEY);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, RecordId::new(1_712_345_678_901));
    assert_eq!(tasks[0].lane, Lane::Done);
    assert!(!tasks[0].is_draggable());

    let sessions = store.load::<StudySession>(SESSIONS_KEY);
    assert_eq!(sessions.len(), 1);
    assert!(sessions[0].is_done());
    assert_eq!(sessions[0].tags, vec!["lab".to_string()]);
}
