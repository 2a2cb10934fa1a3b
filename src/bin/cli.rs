use cronograma::{
    AppConfig, AssignmentField, Catalog, Day, JsonProjectStore, ProjectStore, Schedule, StoreKind,
    Workspace, calendar, save_schedule_to_csv,
};
use std::io::{self, Write};

fn render_text_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(ci) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_line = |cells: &[String]| {
        let mut line = String::from("|");
        for (ci, w) in widths.iter().enumerate() {
            let cell = cells.get(ci).map(String::as_str).unwrap_or("");
            let pad = w.saturating_sub(cell.chars().count());
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_line(headers));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        out.push_str(&render_line(row));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn render_schedule(schedule: &Schedule) -> String {
    let Some(first) = schedule.rows().first() else {
        return "No schedule generated yet.".to_string();
    };
    let mut headers = vec!["#".to_string(), "date".to_string(), "sprint".to_string()];
    headers.extend(first.assignments.iter().enumerate().map(|(i, a)| {
        if a.member.trim().is_empty() {
            format!("[{i}]")
        } else {
            format!("[{i}] {}", a.member)
        }
    }));
    let rows: Vec<Vec<String>> = schedule
        .rows()
        .iter()
        .enumerate()
        .map(|(di, row)| {
            let date = if row.is_complete() {
                format!("{} ✓", row.date)
            } else {
                row.date.to_string()
            };
            let mut cells = vec![di.to_string(), date, row.sprint.clone()];
            cells.extend(row.assignments.iter().map(|a| {
                let mark = if a.done { "x" } else { " " };
                format!("[{mark}] {}", a.task)
            }));
            cells
        })
        .collect();
    render_text_table(&headers, &rows)
}

fn render_progress(schedule: &Schedule) -> String {
    let headers = vec!["sprint".to_string(), "days".to_string(), "progress".to_string()];
    let rows: Vec<Vec<String>> = schedule
        .sprint_progress()
        .into_iter()
        .map(|p| vec![p.sprint, p.days.to_string(), format!("{}%", p.percent)])
        .collect();
    render_text_table(&headers, &rows)
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show the project being edited\n  types                              List project types\n  type <id|next|prev>                Select the project type\n  name <text...>                     Set the project name\n  day add <YYYY-MM-DD>...            Select days\n  day toggle <YYYY-MM-DD>            Select or unselect a day\n  day range <start> <end>            Select every day in an inclusive range\n  day clear                          Unselect every day\n  days                               List selected days\n  member add <name...>               Add a team member\n  member set <index> <name...>       Rename a team member\n  member rm <index>                  Remove a team member\n  tasks <index> <text...>            Set manual tasks for a member (split on , ; |)\n  generate                           Generate the schedule\n  schedule                           Show the schedule\n  edit <day> <member> <text...>      Replace one assignment's task\n  editmode                           Toggle schedule edit mode\n  done <day> <member>                Toggle one assignment's done flag\n  progress                           Show progress per sprint\n  save                               Save the project\n  projects                           List saved projects\n  open <id>                          Open a saved project\n  duplicate <id>                     Copy a saved project\n  delete <id>                        Delete a saved project\n  new                                Start a blank project\n  export <path>                      Write the schedule to CSV\n  quit|exit                          Exit"
    );
}

fn print_draft(workspace: &Workspace) {
    let draft = workspace.draft();
    let title = workspace
        .selected_template()
        .map(|t| t.title())
        .unwrap_or("?");
    println!(
        "Project : {}",
        if draft.name.is_empty() { "(unnamed)" } else { draft.name.as_str() }
    );
    println!(
        "Id      : {}",
        workspace.current_project_id().unwrap_or("(unsaved)")
    );
    println!("Type    : {} ({})", draft.project_type, title);
    println!("Days    : {}", draft.selected_days.len());
    for (i, member) in draft.team_members.members().iter().enumerate() {
        match draft.manual_tasks.get(i).filter(|t| !t.trim().is_empty()) {
            Some(tasks) => println!("Member {i}: {member} [{tasks}]"),
            None => println!("Member {i}: {member}"),
        }
    }
    println!("{}", render_schedule(&draft.schedule));
}

fn parse_index(value: Option<&str>) -> Option<usize> {
    value.and_then(|v| v.parse::<usize>().ok())
}

fn rest_of_line<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(" ")
}

fn open_store(config: &AppConfig) -> Box<dyn ProjectStore> {
    match config.store {
        StoreKind::Json => Box::new(JsonProjectStore::new(&config.data_dir)),
        #[cfg(feature = "sqlite")]
        StoreKind::Sqlite => {
            let path = config.sqlite_path();
            let opened = std::fs::create_dir_all(&config.data_dir)
                .map_err(cronograma::PersistenceError::from)
                .and_then(|_| cronograma::SqliteProjectStore::new(&path));
            match opened {
                Ok(store) => Box::new(store),
                Err(e) => {
                    log::warn!("cannot open {}: {e}; using JSON files", path.display());
                    Box::new(JsonProjectStore::new(&config.data_dir))
                }
            }
        }
        #[cfg(not(feature = "sqlite"))]
        StoreKind::Sqlite => {
            log::warn!("built without the `sqlite` feature; using JSON files");
            Box::new(JsonProjectStore::new(&config.data_dir))
        }
    }
}

fn main() {
    env_logger::Builder::default()
        .filter_level(if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };
    let store = open_store(&config);
    let mut workspace = match Workspace::restore(Catalog::builtin(), store.as_ref()) {
        Ok(workspace) => workspace,
        Err(e) => {
            println!("Could not load saved projects: {e}");
            Workspace::default()
        }
    };

    println!("Cronograma (CLI) - type 'help' for commands\n");
    print_draft(&workspace);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let mut changed = true;

        match cmd {
            "help" => {
                print_help();
                changed = false;
            }
            "quit" | "exit" => break,
            "show" => {
                print_draft(&workspace);
                changed = false;
            }
            "types" => {
                for (i, template) in workspace.catalog().iter().enumerate() {
                    let marker = if i == workspace.template_index() { "*" } else { " " };
                    println!(
                        "{marker} {:<10} {} ({} sprints)",
                        template.id(),
                        template.title(),
                        template.sprints().len()
                    );
                }
                changed = false;
            }
            "type" => match parts.next() {
                Some("next") => workspace.next_project_type(),
                Some("prev") => workspace.prev_project_type(),
                Some(id) => {
                    if let Err(e) = workspace.select_project_type(id) {
                        println!("Error: {e}");
                        changed = false;
                    }
                }
                None => {
                    println!("Usage: type <id|next|prev>");
                    changed = false;
                }
            },
            "name" => {
                let name = rest_of_line(parts);
                workspace.set_name(name.clone());
                println!("Project name set to '{name}'.");
            }
            "day" => match (parts.next(), parts.next(), parts.next()) {
                (Some("add"), Some(first), _) => {
                    let mut days = Vec::new();
                    for value in std::iter::once(first).chain(input.split_whitespace().skip(3)) {
                        match Day::parse(value) {
                            Ok(day) => days.push(day),
                            Err(e) => println!("Skipping {value}: {e}"),
                        }
                    }
                    let count = days.len();
                    workspace.select_days(days);
                    println!("Selected {count} day(s).");
                }
                (Some("toggle"), Some(value), _) => match Day::parse(value) {
                    Ok(day) => {
                        workspace.toggle_day(day);
                        let selected = workspace.draft().selected_days.contains(&day);
                        println!(
                            "Day {day} {}.",
                            if selected { "selected" } else { "unselected" }
                        );
                    }
                    Err(e) => {
                        println!("Error: {e}");
                        changed = false;
                    }
                },
                (Some("range"), Some(start), Some(end)) => {
                    match (Day::parse(start), Day::parse(end)) {
                        (Ok(start), Ok(end)) => {
                            match calendar::days_in_range(start, end) {
                                Some(days) => {
                                    let count = days.len();
                                    workspace.select_days(days);
                                    println!("Selected {count} day(s).");
                                }
                                None => {
                                    println!(
                                        "Range too long (max {} days).",
                                        calendar::MAX_RANGE_DAYS
                                    );
                                    changed = false;
                                }
                            }
                        }
                        _ => {
                            println!("Invalid date (YYYY-MM-DD)");
                            changed = false;
                        }
                    }
                }
                (Some("clear"), _, _) => {
                    workspace.clear_days();
                    println!("Day selection cleared.");
                }
                _ => {
                    println!("Usage: day <add|toggle|range|clear> ...");
                    changed = false;
                }
            },
            "days" => {
                let days = calendar::sort_unique_days(workspace.draft().selected_days.iter().copied());
                if days.is_empty() {
                    println!("No days selected.");
                }
                for day in days {
                    println!("  {day}");
                }
                changed = false;
            }
            "member" => match parts.next() {
                Some("add") => {
                    let name = rest_of_line(parts);
                    let blank = workspace
                        .draft()
                        .team_members
                        .members()
                        .iter()
                        .position(|m| m.trim().is_empty());
                    let index = match blank {
                        Some(index) => {
                            workspace.set_member(index, name.clone());
                            index
                        }
                        None => workspace.add_member(name.clone()),
                    };
                    println!("Member {index}: {name}");
                }
                Some("set") => {
                    let index = parse_index(parts.next());
                    let name = rest_of_line(parts);
                    match index {
                        Some(index) if workspace.set_member(index, name.clone()) => {
                            println!("Member {index}: {name}");
                        }
                        _ => {
                            println!("Invalid member index");
                            changed = false;
                        }
                    }
                }
                Some("rm") => match parse_index(parts.next()).and_then(|i| workspace.remove_member(i)) {
                    Some(name) => println!("Removed member '{name}'."),
                    None => {
                        println!("Invalid member index");
                        changed = false;
                    }
                },
                _ => {
                    println!("Usage: member <add|set|rm> ...");
                    changed = false;
                }
            },
            "tasks" => match parse_index(parts.next()) {
                Some(index) if index < workspace.draft().team_members.len() => {
                    let text = rest_of_line(parts);
                    workspace.set_manual_tasks(index, text);
                    let parsed = workspace.draft().manual_tasks.parsed(index);
                    println!("Member {index} tasks: {}", parsed.join(", "));
                }
                _ => {
                    println!("Usage: tasks <member index> <task, task, ...>");
                    changed = false;
                }
            },
            "generate" => match workspace.generate() {
                Ok(()) => {
                    println!("Schedule generated.");
                    println!("{}", render_schedule(&workspace.draft().schedule));
                }
                Err(e) => {
                    println!("Error: {e}");
                    changed = false;
                }
            },
            "schedule" => {
                println!("{}", render_schedule(&workspace.draft().schedule));
                changed = false;
            }
            "edit" => {
                let day = parse_index(parts.next());
                let member = parse_index(parts.next());
                let text = rest_of_line(parts);
                match (day, member) {
                    _ if !workspace.is_editing() => {
                        println!("Edit mode is off. Run 'editmode' first.");
                        changed = false;
                    }
                    (Some(d), Some(m))
                        if workspace.set_assignment_field(d, m, AssignmentField::Task(text.clone())) =>
                    {
                        println!("Task updated.");
                    }
                    _ => {
                        println!("Usage: edit <day> <member> <text...> (indices from 'schedule')");
                        changed = false;
                    }
                }
            }
            "done" => match (parse_index(parts.next()), parse_index(parts.next())) {
                (Some(d), Some(m)) if workspace.toggle_done(d, m) => {
                    let done = workspace
                        .draft()
                        .schedule
                        .assignment(d, m)
                        .map(|a| a.done)
                        .unwrap_or(false);
                    println!("Marked {}.", if done { "done" } else { "pending" });
                }
                _ => {
                    println!("Usage: done <day> <member> (indices from 'schedule')");
                    changed = false;
                }
            },
            "editmode" => {
                let on = workspace.toggle_editing();
                println!("Edit mode {}.", if on { "on" } else { "off" });
                changed = false;
            }
            "progress" => {
                println!("{}", render_progress(&workspace.draft().schedule));
                changed = false;
            }
            "save" => match workspace.save_current() {
                Ok(id) => println!("Project saved ({id})."),
                Err(e) => {
                    println!("Error: {e}");
                    changed = false;
                }
            },
            "projects" => {
                if workspace.projects().is_empty() {
                    println!("No saved projects.");
                }
                for project in workspace.projects() {
                    let marker = if workspace.current_project_id() == Some(project.id.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    println!(
                        "{marker} {}  {}  ({}, {} day(s))",
                        project.id,
                        project.name,
                        project.project_type,
                        project.schedule.len()
                    );
                }
                changed = false;
            }
            "open" | "duplicate" | "delete" => {
                let Some(id) = parts.next() else {
                    println!("Usage: {cmd} <id>");
                    continue;
                };
                let result = match cmd {
                    "open" => workspace.load_project(id).map(|_| format!("Opened project {id}.")),
                    "duplicate" => workspace
                        .duplicate_project(id)
                        .map(|new_id| format!("Duplicated project {id} as {new_id}.")),
                    _ => workspace
                        .delete_project(id)
                        .map(|p| format!("Deleted project '{}'.", p.name)),
                };
                match result {
                    Ok(message) => println!("{message}"),
                    Err(e) => {
                        println!("Error: {e}");
                        changed = false;
                    }
                }
            }
            "new" => {
                workspace.clear();
                println!("Started a new project.");
            }
            "export" => {
                changed = false;
                match parts.next() {
                    Some(path) => match save_schedule_to_csv(&workspace.draft().schedule, path) {
                        Ok(()) => println!("Schedule exported to {path}"),
                        Err(e) => println!("Export error: {e}"),
                    },
                    None => println!("Usage: export <path>"),
                }
            }
            _ => {
                println!("Unknown command. Type 'help'.");
                changed = false;
            }
        }

        if changed {
            workspace.sync_current();
            if let Err(e) = workspace.persist(store.as_ref()) {
                println!("Could not persist projects: {e}");
            }
        }
    }
}
