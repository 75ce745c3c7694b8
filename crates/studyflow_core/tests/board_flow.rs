use std::collections::HashSet;
use studyflow_core::db::open_db_in_memory;
use studyflow_core::{
    BoardService, Category, Lane, MemoryKeyValueStore, MutationOutcome, RecordId, RecordStore,
    ServiceError, SqliteKeyValueStore, Task, TaskDraft, TaskPriority, TASKS_KEY,
};

fn draft(title: &str) -> TaskDraft {
    TaskDraft::new(title, "", Category::Personal, TaskPriority::Medium).unwrap()
}

#[test]
fn add_then_move_to_done() {
    let conn = open_db_in_memory().unwrap();
    let mut board = BoardService::load(RecordStore::new(SqliteKeyValueStore::new(&conn)));
    assert!(board.tasks().is_empty());

    let added = board
        .add_task(TaskDraft::new("Write report", "", Category::Work, TaskPriority::High).unwrap())
        .unwrap();
    assert_eq!(board.tasks().len(), 1);
    assert_eq!(added.lane, Lane::Todo);
    assert_eq!(added.title, "Write report");
    assert_eq!(added.category, Category::Work);
    assert_eq!(added.priority, TaskPriority::High);

    let outcome = board.move_task(added.id, Lane::Done).unwrap();
    assert_eq!(outcome, MutationOutcome::Applied);
    assert_eq!(board.tasks().len(), 1);
    let moved = board.find(added.id).unwrap();
    assert_eq!(moved.lane, Lane::Done);
    assert!(!moved.is_draggable());

    let reloaded = BoardService::load(RecordStore::new(SqliteKeyValueStore::new(&conn)));
    assert_eq!(reloaded.tasks(), board.tasks());
}

#[test]
fn move_is_idempotent_and_touches_only_the_target() {
    let kv = MemoryKeyValueStore::new();
    let mut board = BoardService::load(RecordStore::new(&kv));
    let first = board.add_task(draft("first")).unwrap();
    let second = board.add_task(draft("second")).unwrap();

    board.move_task(first.id, Lane::InProgress).unwrap();
    let once = board.tasks().to_vec();
    board.move_task(first.id, Lane::InProgress).unwrap();
    assert_eq!(board.tasks(), once.as_slice());

    assert_eq!(board.find(second.id).unwrap(), &second);
    assert_eq!(board.find(first.id).unwrap().title, "first");
}

#[test]
fn operations_on_unknown_ids_are_reported_no_ops() {
    let kv = MemoryKeyValueStore::new();
    let mut board = BoardService::load(RecordStore::new(&kv));
    board.add_task(draft("only")).unwrap();
    let before = board.tasks().to_vec();
    let stale = RecordId::new(-1);

    assert_eq!(board.move_task(stale, Lane::Done).unwrap(), MutationOutcome::NotFound);
    assert_eq!(board.update_task(stale, draft("x")).unwrap(), MutationOutcome::NotFound);
    assert_eq!(board.delete_task(stale).unwrap(), MutationOutcome::NotFound);
    assert_eq!(board.tasks(), before.as_slice());
}

#[test]
fn update_replaces_form_fields_but_keeps_lane() {
    let kv = MemoryKeyValueStore::new();
    let mut board = BoardService::load(RecordStore::new(&kv));
    let task = board.add_task(draft("draft")).unwrap();
    board.move_task(task.id, Lane::InProgress).unwrap();

    let edit = TaskDraft::new("final", "details", Category::Work, TaskPriority::Low).unwrap();
    assert!(board.update_task(task.id, edit).unwrap().is_applied());

    let updated = board.find(task.id).unwrap();
    assert_eq!(updated.title, "final");
    assert_eq!(updated.description, "details");
    assert_eq!(updated.category, Category::Work);
    assert_eq!(updated.lane, Lane::InProgress);
}

#[test]
fn deleted_ids_are_never_reused() {
    let kv = MemoryKeyValueStore::new();
    let mut board = BoardService::load(RecordStore::new(&kv));
    let mut seen = HashSet::new();

    for _ in 0..50 {
        let task = board.add_task(draft("same")).unwrap();
        assert!(seen.insert(task.id), "id {} was reused", task.id);
        board.delete_task(task.id).unwrap();
    }
    assert!(board.tasks().is_empty());

    let mut reopened = BoardService::load(RecordStore::new(&kv));
    for _ in 0..10 {
        let task = reopened.add_task(draft("same")).unwrap();
        assert!(seen.insert(task.id), "id {} was reused", task.id);
    }
}

#[test]
fn lanes_partition_the_board() {
    let kv = MemoryKeyValueStore::new();
    let mut board = BoardService::load(RecordStore::new(&kv));
    let lanes = [Lane::Done, Lane::Todo, Lane::InProgress, Lane::Todo, Lane::Done, Lane::Todo];
    for (index, lane) in lanes.iter().enumerate() {
        let task = board.add_task(draft(&format!("t{index}"))).unwrap();
        board.move_task(task.id, *lane).unwrap();
    }

    let groups = board.lanes();
    assert_eq!(groups.total(), board.tasks().len());

    let concatenated: Vec<&Task> = groups.iter().flat_map(|(_, tasks)| tasks.iter()).collect();
    let ids: HashSet<RecordId> = concatenated.iter().map(|task| task.id).collect();
    assert_eq!(ids.len(), board.tasks().len());

    for (lane, tasks) in groups.iter() {
        assert!(tasks.iter().all(|task| task.lane == lane));
        let expected: Vec<RecordId> = board
            .tasks()
            .iter()
            .filter(|task| task.lane == lane)
            .map(|task| task.id)
            .collect();
        let actual: Vec<RecordId> = tasks.iter().map(|task| task.id).collect();
        assert_eq!(actual, expected);
    }
}

#[test]
fn failed_write_surfaces_error_and_keeps_board() {
    let kv = MemoryKeyValueStore::with_quota(TASKS_KEY.len() + 150);
    let mut board = BoardService::load(RecordStore::new(&kv));
    board.add_task(draft("fits")).unwrap();

    let err = board
        .add_task(draft("this one pushes the collection past the quota"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Store(_)));
    assert_eq!(board.tasks().len(), 1);

    let reloaded = BoardService::load(RecordStore::new(&kv));
    assert_eq!(reloaded.tasks(), board.tasks());
}
