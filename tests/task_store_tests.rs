use cronograma::{
    Day, MemoryTaskStore, NewTask, PersistenceError, TaskRecord, TaskStore, TaskUpdate,
};

fn d(y: i32, m: u32, d: u32) -> Day {
    Day::from_ymd(y, m, d).unwrap()
}

#[test]
fn memory_store_assigns_increasing_ids_and_never_reuses_them() {
    let store = MemoryTaskStore::new();
    let a = store.create(NewTask::new("Wireframes", d(2025, 1, 6))).unwrap();
    let b = store.create(NewTask::new("Prototipos", d(2025, 1, 7))).unwrap();
    assert_eq!((a.id, b.id), (1, 2));

    store.delete(b.id).unwrap();
    let c = store.create(NewTask::new("Revisión", d(2025, 1, 8))).unwrap();
    assert_eq!(c.id, 3);
    assert_eq!(store.list().unwrap(), vec![a, c]);
}

#[test]
fn updates_merge_only_the_provided_fields() {
    let store = MemoryTaskStore::new();
    let mut task = NewTask::new("Pentesting interno", d(2025, 2, 3));
    task.description = Some("Red corporativa".into());
    let created = store.create(task).unwrap();

    let mut update = TaskUpdate::new(created.id);
    update.date = Some(d(2025, 2, 4));
    update.assigned_to = Some("Bob".into());
    let updated = store.update(update).unwrap();

    assert_eq!(updated.title, "Pentesting interno");
    assert_eq!(updated.description.as_deref(), Some("Red corporativa"));
    assert_eq!(updated.assigned_to.as_deref(), Some("Bob"));
    assert_eq!(updated.date, d(2025, 2, 4));
    assert!(!updated.completed);
}

#[test]
fn blank_titles_are_invalid() {
    let store = MemoryTaskStore::new();
    let err = store.create(NewTask::new(" \t", d(2025, 1, 1))).unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidData(_)));

    let created = store.create(NewTask::new("Ok", d(2025, 1, 1))).unwrap();
    let mut update = TaskUpdate::new(created.id);
    update.title = Some(String::new());
    assert!(matches!(
        store.update(update),
        Err(PersistenceError::InvalidData(_))
    ));
    assert_eq!(store.list().unwrap()[0].title, "Ok");
}

#[test]
fn unknown_ids_are_not_found() {
    let store = MemoryTaskStore::new();
    let err = store.delete(5).unwrap_err();
    assert!(matches!(err, PersistenceError::NotFound(_)));
    assert_eq!(err.to_string(), "task 5 not found");
    assert!(matches!(
        store.update(TaskUpdate::new(5)),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn seeded_store_continues_after_the_highest_id() {
    let seed = vec![
        NewTask::new("Uno", d(2025, 1, 1)).with_id(4),
        NewTask::new("Dos", d(2025, 1, 2)).with_id(9),
    ];
    let store = MemoryTaskStore::with_tasks(seed).unwrap();
    let next = store.create(NewTask::new("Tres", d(2025, 1, 3))).unwrap();
    assert_eq!(next.id, 10);

    let duplicate = vec![
        NewTask::new("Uno", d(2025, 1, 1)).with_id(1),
        NewTask::new("Otra", d(2025, 1, 1)).with_id(1),
    ];
    assert!(MemoryTaskStore::with_tasks(duplicate).is_err());
}

#[test]
fn task_json_is_camel_case_and_omits_missing_fields() {
    let mut task = NewTask::new("Deploy", d(2025, 3, 1)).with_id(7);
    task.assigned_to = Some("Ana".into());
    let value = serde_json::to_value(&task).unwrap();
    assert_eq!(value["assignedTo"], "Ana");
    assert_eq!(value["date"], "2025-03-01");
    assert!(value.get("description").is_none());

    let parsed: TaskRecord = serde_json::from_str(
        r#"{"id":7,"title":"Deploy","date":"2025-03-01T12:00:00.000Z"}"#,
    )
    .unwrap();
    assert_eq!(parsed.date, d(2025, 3, 1));
    assert!(!parsed.completed);
}
