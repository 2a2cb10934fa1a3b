use cronograma::{ManualTasks, Roster, parse_manual_tasks};

#[test]
fn manual_task_text_splits_on_commas_semicolons_and_pipes() {
    assert_eq!(parse_manual_tasks("HTML, CSS, JS"), vec!["HTML", "CSS", "JS"]);
    assert_eq!(
        parse_manual_tasks("a;b|c , d"),
        vec!["a", "b", "c", "d"]
    );
    assert_eq!(parse_manual_tasks(" ,; | "), Vec::<String>::new());
    assert_eq!(parse_manual_tasks("Revisar PR de login"), vec!["Revisar PR de login"]);
}

#[test]
fn missing_positions_read_as_empty_lists() {
    let manual: ManualTasks = [(2, "deploy")].into_iter().collect();
    assert!(manual.parsed(0).is_empty());
    assert_eq!(manual.parsed(2), vec!["deploy"]);
}

#[test]
fn removing_a_position_shifts_later_entries_down() {
    let mut manual: ManualTasks = [(0, "a"), (1, "b"), (3, "d")].into_iter().collect();
    manual.remove_position(1);
    let entries: Vec<(usize, &str)> = manual.iter().collect();
    assert_eq!(entries, vec![(0, "a"), (2, "d")]);
}

#[test]
fn manual_tasks_serialize_with_string_keys() {
    let manual: ManualTasks = [(0, "HTML, CSS"), (2, "QA")].into_iter().collect();
    let json = serde_json::to_string(&manual).unwrap();
    assert_eq!(json, r#"{"0":"HTML, CSS","2":"QA"}"#);
    let back: ManualTasks = serde_json::from_str(&json).unwrap();
    assert_eq!(back, manual);
}

#[test]
fn roster_slots_keep_blank_names() {
    let mut roster = Roster::with_blank_slot();
    assert_eq!(roster.len(), 1);
    assert!(!roster.has_valid_member());

    assert!(roster.set(0, "Ana"));
    assert_eq!(roster.add("  "), 1);
    assert_eq!(roster.add("Bob"), 2);
    assert!(roster.has_valid_member());
    assert!(!roster.set(5, "Nadie"));

    assert_eq!(roster.remove(1), Some("  ".to_string()));
    assert_eq!(roster.members(), &["Ana".to_string(), "Bob".to_string()]);
    assert_eq!(roster.remove(7), None);
}
