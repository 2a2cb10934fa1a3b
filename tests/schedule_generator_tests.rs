use cronograma::calculations::SprintPartition;
use cronograma::{
    Catalog, Day, GENERAL_TASK, GenerateError, ManualTasks, ProjectTemplate, Roster,
    ScheduleGenerator, generate,
};

fn d(y: i32, m: u32, d: u32) -> Day {
    Day::from_ymd(y, m, d).unwrap()
}

fn single_sprint_template() -> ProjectTemplate {
    ProjectTemplate::new(
        "demo",
        "Demo",
        vec!["S1"],
        vec![("S1".to_string(), vec!["A", "B", "C"])],
    )
    .unwrap()
}

fn three_sprint_template() -> ProjectTemplate {
    ProjectTemplate::new(
        "three",
        "Three",
        vec!["S1", "S2", "S3"],
        vec![
            ("S1".to_string(), vec!["a1", "a2"]),
            ("S2".to_string(), vec!["b1"]),
        ],
    )
    .unwrap()
}

fn weekdays(count: usize) -> Vec<Day> {
    (0..count as i64).map(|i| d(2025, 3, 3).offset(i)).collect()
}

#[test]
fn pool_rotation_offsets_by_member() {
    let template = single_sprint_template();
    let roster = Roster::new(["Ana", "Bob"]);
    let schedule = generate(
        &[d(2025, 1, 6), d(2025, 1, 7)],
        &roster,
        &ManualTasks::new(),
        &template,
    )
    .unwrap();

    let tasks: Vec<Vec<&str>> = schedule
        .rows()
        .iter()
        .map(|row| row.assignments.iter().map(|a| a.task.as_str()).collect())
        .collect();
    assert_eq!(tasks, vec![vec!["A", "B"], vec!["B", "C"]]);
    assert!(schedule.rows().iter().all(|row| row.sprint == "S1"));
}

#[test]
fn manual_tasks_cycle_per_day() {
    let template = single_sprint_template();
    let roster = Roster::new(["Ana"]);
    let manual: ManualTasks = [(0, "HTML, CSS, JS")].into_iter().collect();
    let schedule = generate(&weekdays(5), &roster, &manual, &template).unwrap();

    let tasks: Vec<&str> = schedule
        .rows()
        .iter()
        .map(|row| row.assignments[0].task.as_str())
        .collect();
    assert_eq!(tasks, vec!["HTML", "CSS", "JS", "HTML", "CSS"]);
}

#[test]
fn manual_tasks_split_on_every_delimiter() {
    let template = single_sprint_template();
    let roster = Roster::new(["Ana", "Bob"]);
    let manual: ManualTasks = [(1, " x ; y| ,z ")].into_iter().collect();
    let schedule = generate(&weekdays(4), &roster, &manual, &template).unwrap();

    let bob: Vec<&str> = schedule
        .rows()
        .iter()
        .map(|row| row.assignments[1].task.as_str())
        .collect();
    assert_eq!(bob, vec!["x", "y", "z", "x"]);
    let ana: Vec<&str> = schedule
        .rows()
        .iter()
        .map(|row| row.assignments[0].task.as_str())
        .collect();
    assert_eq!(ana, vec!["A", "B", "C", "A"]);
}

#[test]
fn rows_are_unique_ascending_and_cover_the_roster() {
    let template = three_sprint_template();
    let roster = Roster::new(["Ana", "", "Cleo"]);
    let selected = vec![d(2025, 3, 5), d(2025, 3, 3), d(2025, 3, 5), d(2025, 3, 4)];
    let schedule = generate(&selected, &roster, &ManualTasks::new(), &template).unwrap();

    let dates: Vec<Day> = schedule.rows().iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![d(2025, 3, 3), d(2025, 3, 4), d(2025, 3, 5)]);
    for row in schedule.rows() {
        let members: Vec<&str> = row.assignments.iter().map(|a| a.member.as_str()).collect();
        assert_eq!(members, vec!["Ana", "", "Cleo"]);
        assert!(row.assignments.iter().all(|a| !a.done));
    }
}

#[test]
fn sprints_are_contiguous_and_the_last_absorbs_the_remainder() {
    let template = three_sprint_template();
    let roster = Roster::new(["Ana"]);
    let schedule = generate(&weekdays(7), &roster, &ManualTasks::new(), &template).unwrap();

    let sprints: Vec<&str> = schedule.rows().iter().map(|r| r.sprint.as_str()).collect();
    assert_eq!(sprints, vec!["S1", "S1", "S1", "S2", "S2", "S2", "S3"]);
    // S3 has no pool.
    assert_eq!(schedule.rows()[6].assignments[0].task, GENERAL_TASK);

    let partition = SprintPartition::new(7, 3).unwrap();
    assert_eq!(partition.chunk_size(), 3);
    let indices: Vec<usize> = (0..7).map(|i| partition.sprint_index(i)).collect();
    assert!(indices.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(SprintPartition::new(2, 5).unwrap().sprint_index(1), 1);
    assert!(SprintPartition::new(4, 0).is_none());
}

#[test]
fn fewer_days_than_sprints_skips_later_sprints() {
    let template = three_sprint_template();
    let roster = Roster::new(["Ana"]);
    let schedule = generate(&weekdays(2), &roster, &ManualTasks::new(), &template).unwrap();
    let sprints: Vec<&str> = schedule.rows().iter().map(|r| r.sprint.as_str()).collect();
    assert_eq!(sprints, vec!["S1", "S2"]);
}

#[test]
fn empty_selection_starts_today_with_one_day_per_sprint() {
    let catalog = Catalog::builtin();
    let web = catalog.find("web").unwrap();
    let roster = Roster::new(["Ana"]);
    let schedule = ScheduleGenerator::new(web)
        .with_today(d(2025, 6, 1))
        .generate(&[], &roster, &ManualTasks::new())
        .unwrap();

    assert_eq!(schedule.len(), 6);
    assert_eq!(schedule.rows()[0].date, d(2025, 6, 1));
    assert_eq!(schedule.rows()[5].date, d(2025, 6, 6));
    let sprints: Vec<&str> = schedule.rows().iter().map(|r| r.sprint.as_str()).collect();
    assert_eq!(sprints, web.sprints().iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(
        schedule.rows()[0].assignments[0].task,
        "Reunión inicial y definición de alcance"
    );
}

#[test]
fn roster_without_names_is_rejected() {
    let template = single_sprint_template();
    let err = generate(
        &weekdays(3),
        &Roster::new(["", "   "]),
        &ManualTasks::new(),
        &template,
    )
    .unwrap_err();
    assert_eq!(err, GenerateError::NoValidMembers);
    assert_eq!(err.to_string(), "no valid team member");

    let err = generate(&weekdays(3), &Roster::default(), &ManualTasks::new(), &template).unwrap_err();
    assert_eq!(err, GenerateError::NoValidMembers);
}

#[test]
fn template_without_sprints_has_no_days() {
    let template = ProjectTemplate::unchecked("bare", Vec::new(), Default::default());
    let err = generate(
        &weekdays(3),
        &Roster::new(["Ana"]),
        &ManualTasks::new(),
        &template,
    )
    .unwrap_err();
    assert_eq!(err, GenerateError::NoDaysAvailable);
}

#[test]
fn generation_is_idempotent() {
    let template = three_sprint_template();
    let roster = Roster::new(["Ana", "Bob"]);
    let manual: ManualTasks = [(1, "review|deploy")].into_iter().collect();
    let first = generate(&weekdays(5), &roster, &manual, &template).unwrap();
    let second = generate(&weekdays(5), &roster, &manual, &template).unwrap();
    assert_eq!(first, second);
}
