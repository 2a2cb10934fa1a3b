use cronograma::{
    AssignmentField, Catalog, Day, GenerateError, JsonProjectStore, ManualTasks, Project,
    ProjectStore, Roster, Schedule, Workspace, WorkspaceError,
};
use tempfile::tempdir;

fn d(y: i32, m: u32, d: u32) -> Day {
    Day::from_ymd(y, m, d).unwrap()
}

fn staffed_workspace() -> Workspace {
    let mut workspace = Workspace::new(Catalog::builtin());
    workspace.set_member(0, "Ana");
    workspace.add_member("Bob");
    workspace.select_days([d(2025, 3, 3), d(2025, 3, 4), d(2025, 3, 5)]);
    workspace
}

#[test]
fn starts_blank_on_the_web_type() {
    let workspace = Workspace::default();
    assert_eq!(workspace.draft().project_type, "web");
    assert_eq!(workspace.selected_template().unwrap().id(), "web");
    assert_eq!(workspace.draft().team_members.members(), &[String::new()]);
    assert!(workspace.current_project_id().is_none());
    assert!(!workspace.is_editing());
}

#[test]
fn type_selection_keeps_index_and_draft_in_sync() {
    let mut workspace = Workspace::default();
    workspace.prev_project_type();
    assert_eq!(workspace.template_index(), 4);
    assert_eq!(workspace.draft().project_type, "ai");
    workspace.next_project_type();
    workspace.next_project_type();
    assert_eq!(workspace.draft().project_type, "mobile");

    workspace.select_project_type("security").unwrap();
    assert_eq!(workspace.template_index(), 3);
    let err = workspace.select_project_type("desktop").unwrap_err();
    assert_eq!(err, WorkspaceError::UnknownProjectType("desktop".into()));
    assert_eq!(workspace.draft().project_type, "security");
}

#[test]
fn failed_generation_leaves_the_schedule_alone() {
    let mut workspace = staffed_workspace();
    workspace.generate_from(d(2025, 1, 1)).unwrap();
    let before = workspace.draft().schedule.clone();

    workspace.set_member(0, " ");
    workspace.set_member(1, "");
    let err = workspace.generate_from(d(2025, 1, 1)).unwrap_err();
    assert_eq!(err, WorkspaceError::Generate(GenerateError::NoValidMembers));
    assert_eq!(workspace.draft().schedule, before);
}

#[test]
fn generation_resets_done_flags() {
    let mut workspace = staffed_workspace();
    workspace.generate_from(d(2025, 1, 1)).unwrap();
    assert!(workspace.toggle_done(0, 0));
    assert!(workspace.draft().schedule.assignment(0, 0).unwrap().done);

    workspace.generate_from(d(2025, 1, 1)).unwrap();
    assert!(
        workspace
            .draft()
            .schedule
            .rows()
            .iter()
            .flat_map(|r| &r.assignments)
            .all(|a| !a.done)
    );
}

#[test]
fn removing_a_member_moves_manual_tasks_with_the_roster() {
    let mut workspace = staffed_workspace();
    workspace.add_member("Cleo");
    workspace.set_manual_tasks(0, "ana task");
    workspace.set_manual_tasks(2, "cleo task");

    assert_eq!(workspace.remove_member(1), Some("Bob".to_string()));
    workspace.generate_from(d(2025, 1, 1)).unwrap();
    let first = &workspace.draft().schedule.rows()[0];
    assert_eq!(first.assignments[1].member, "Cleo");
    assert_eq!(first.assignments[1].task, "cleo task");
    assert_eq!(workspace.remove_member(7), None);
}

#[test]
fn save_requires_a_name_and_reuses_the_id() {
    let mut workspace = staffed_workspace();
    assert_eq!(
        workspace.save_current().unwrap_err(),
        WorkspaceError::MissingProjectName
    );
    workspace.set_name("   ");
    assert!(workspace.save_current().is_err());

    workspace.set_name("Portal clientes");
    let id = workspace.save_current().unwrap();
    assert_eq!(workspace.current_project_id(), Some(id.as_str()));
    assert_eq!(workspace.save_current().unwrap(), id);
    assert_eq!(workspace.projects().len(), 1);
    assert_eq!(workspace.project(&id).unwrap().name, "Portal clientes");
}

#[test]
fn generating_updates_the_open_project() {
    let mut workspace = staffed_workspace();
    workspace.set_name("Portal");
    let id = workspace.save_current().unwrap();
    assert!(workspace.project(&id).unwrap().schedule.is_empty());

    workspace.set_name("");
    workspace.generate_from(d(2025, 1, 1)).unwrap();
    let saved = workspace.project(&id).unwrap();
    assert_eq!(saved.schedule.len(), 3);
    assert_eq!(saved.name, "Sin nombre");
}

#[test]
fn sync_keeps_the_stored_name_when_the_draft_name_is_blank() {
    let mut workspace = staffed_workspace();
    assert!(!workspace.sync_current());
    workspace.set_name("Portal");
    let id = workspace.save_current().unwrap();

    workspace.set_name("");
    workspace.toggle_day(d(2025, 3, 10));
    assert!(workspace.sync_current());
    let saved = workspace.project(&id).unwrap();
    assert_eq!(saved.name, "Portal");
    assert_eq!(saved.selected_days.len(), 4);
}

#[test]
fn duplicate_load_delete_and_clear() {
    let mut workspace = staffed_workspace();
    workspace.select_project_type("cloud").unwrap();
    workspace.set_name("Infra");
    let id = workspace.save_current().unwrap();

    let copy_id = workspace.duplicate_project(&id).unwrap();
    assert_ne!(copy_id, id);
    assert_eq!(workspace.project(&copy_id).unwrap().name, "Infra (copia)");

    workspace.clear();
    assert_eq!(workspace.draft().project_type, "web");
    assert_eq!(workspace.template_index(), 0);
    assert!(workspace.current_project_id().is_none());

    workspace.load_project(&copy_id).unwrap();
    assert_eq!(workspace.draft().name, "Infra (copia)");
    assert_eq!(workspace.draft().project_type, "cloud");
    assert_eq!(workspace.template_index(), 2);

    let removed = workspace.delete_project(&copy_id).unwrap();
    assert_eq!(removed.id, copy_id);
    assert!(workspace.current_project_id().is_none());
    assert_eq!(workspace.draft().name, "");
    assert_eq!(workspace.projects().len(), 1);

    assert_eq!(
        workspace.load_project("missing").unwrap_err(),
        WorkspaceError::ProjectNotFound("missing".into())
    );
    assert!(workspace.delete_project("missing").is_err());
}

#[test]
fn deleting_another_project_keeps_the_editor() {
    let mut workspace = staffed_workspace();
    workspace.set_name("Uno");
    let first = workspace.save_current().unwrap();
    let second = workspace.duplicate_project(&first).unwrap();

    workspace.delete_project(&second).unwrap();
    assert_eq!(workspace.current_project_id(), Some(first.as_str()));
    assert_eq!(workspace.draft().name, "Uno");
}

#[test]
fn restore_reopens_the_last_opened_project() {
    let dir = tempdir().unwrap();
    let store = JsonProjectStore::new(dir.path());

    let mut workspace = staffed_workspace();
    workspace.set_name("Primero");
    let first = workspace.save_current().unwrap();
    let second = workspace.duplicate_project(&first).unwrap();
    workspace.load_project(&second).unwrap();
    workspace.persist(&store).unwrap();

    let restored = Workspace::restore(Catalog::builtin(), &store).unwrap();
    assert_eq!(restored.projects().len(), 2);
    assert_eq!(restored.current_project_id(), Some(second.as_str()));
    assert_eq!(restored.draft().name, "Primero (copia)");

    store.save_last_opened(Some("gone")).unwrap();
    let restored = Workspace::restore(Catalog::builtin(), &store).unwrap();
    assert_eq!(restored.current_project_id(), Some(first.as_str()));
}

#[test]
fn restore_from_an_empty_store_is_blank() {
    let dir = tempdir().unwrap();
    let store = JsonProjectStore::new(dir.path().join("nested"));
    let workspace = Workspace::restore(Catalog::builtin(), &store).unwrap();
    assert!(workspace.projects().is_empty());
    assert!(workspace.current_project_id().is_none());
}

#[test]
fn text_edits_need_edit_mode_but_done_flags_do_not() {
    let mut workspace = staffed_workspace();
    workspace.generate_from(d(2025, 1, 1)).unwrap();
    let before = workspace.draft().schedule.clone();

    assert!(!workspace.set_assignment_field(0, 0, AssignmentField::Task("Demo".into())));
    assert!(!workspace.set_assignment_field(0, 1, AssignmentField::Member("Bea".into())));
    assert_eq!(workspace.draft().schedule, before);
    assert!(workspace.set_assignment_field(0, 0, AssignmentField::Done(true)));
    assert!(workspace.toggle_done(0, 1));

    assert!(workspace.toggle_editing());
    assert!(workspace.set_assignment_field(0, 0, AssignmentField::Task("Demo".into())));
    assert_eq!(workspace.draft().schedule.assignment(0, 0).unwrap().task, "Demo");
    assert!(!workspace.toggle_editing());
    assert!(!workspace.is_editing());
}

#[test]
fn selecting_days_skips_ones_already_selected() {
    let mut workspace = staffed_workspace();
    workspace.select_days([d(2025, 3, 4), d(2025, 3, 6), d(2025, 3, 6), d(2025, 3, 3)]);
    assert_eq!(
        workspace.draft().selected_days,
        vec![d(2025, 3, 3), d(2025, 3, 4), d(2025, 3, 5), d(2025, 3, 6)]
    );
}

#[test]
fn opening_a_project_of_an_unknown_type_falls_back_to_web() {
    let dir = tempdir().unwrap();
    let store = JsonProjectStore::new(dir.path());
    let stored = Project {
        id: "42".into(),
        name: "Escritorio".into(),
        project_type: "desktop".into(),
        selected_days: vec![d(2025, 3, 3)],
        team_members: Roster::new(["Ana"]),
        manual_tasks: ManualTasks::default(),
        schedule: Schedule::new(),
    };
    store.save_projects(&[stored]).unwrap();

    let mut workspace = Workspace::restore(Catalog::builtin(), &store).unwrap();
    workspace.select_project_type("ai").unwrap();
    workspace.load_project("42").unwrap();
    assert_eq!(workspace.current_project_id(), Some("42"));
    assert_eq!(workspace.draft().project_type, "web");
    assert_eq!(workspace.template_index(), 0);
    assert_eq!(workspace.selected_template().unwrap().id(), "web");

    workspace.generate_from(d(2025, 1, 1)).unwrap();
    assert_eq!(workspace.project("42").unwrap().project_type, "web");
}
