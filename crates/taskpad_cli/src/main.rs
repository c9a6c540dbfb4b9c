//! Interactive CLI over the taskpad core store.
//!
//! # Responsibility
//! - Drive `taskpad_core` through a line-based command loop.
//! - Keep rendering plain and deterministic for terminal use.
//!
//! # Invariants
//! - Every command runs to completion before the next line is read.
//! - Unknown or ambiguous id prefixes are notices, never errors.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use taskpad_core::db::{open_db, open_db_in_memory};
use taskpad_core::{
    core_version, default_log_level, init_logging, FilterKind, Sections, SqliteSlotStorage,
    StoreConfig, Task, TaskCounts, TaskId, TodoStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Add(String),
    Toggle(String),
    Remove(String),
    Clear,
    Filter(FilterKind),
    List,
    Help,
    Quit,
}

fn main() {
    let mut collapse_completed = false;
    let mut db_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--sections" => collapse_completed = true,
            other => db_path = Some(PathBuf::from(other)),
        }
    }

    if let Err(err) = run(db_path, collapse_completed) {
        eprintln!("taskpad: {err}");
        std::process::exit(1);
    }
}

fn run(db_path: Option<PathBuf>, collapse_completed: bool) -> Result<(), String> {
    let conn = match &db_path {
        Some(path) => {
            setup_logging(path);
            open_db(path).map_err(|err| err.to_string())?
        }
        None => open_db_in_memory().map_err(|err| err.to_string())?,
    };

    let config = StoreConfig {
        collapse_completed,
        ..StoreConfig::persistent()
    };
    let storage = SqliteSlotStorage::new(&conn);
    let mut store = TodoStore::with_system_sources(config, storage);
    log::info!(
        "event=cli_start module=cli status=ok version={} persistent={}",
        core_version(),
        db_path.is_some()
    );

    println!("taskpad v{} (type `help` for commands)", core_version());
    render_view(&store);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().map_err(|err| err.to_string())?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|err| err.to_string())?;
        if read == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => print_help(),
            Ok(command) => {
                apply(&mut store, command);
                render_view(&store);
            }
            Err(message) => println!("{message}"),
        }
    }

    Ok(())
}

fn setup_logging(db_path: &std::path::Path) {
    let log_dir = std::env::current_dir()
        .map(|cwd| cwd.join(db_path))
        .ok()
        .and_then(|abs| abs.parent().map(|dir| dir.join("logs")));
    let Some(log_dir) = log_dir.and_then(|dir| dir.to_str().map(str::to_string)) else {
        return;
    };
    if let Err(err) = init_logging(default_log_level(), &log_dir) {
        eprintln!("taskpad: logging disabled: {err}");
    }
}

fn parse_command(line: &str) -> Result<Command, String> {
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "add" => Ok(Command::Add(rest.to_string())),
        "toggle" => require_arg(rest, "toggle <id>").map(Command::Toggle),
        "rm" | "delete" => require_arg(rest, "rm <id>").map(Command::Remove),
        "clear" => Ok(Command::Clear),
        "filter" => match FilterKind::parse(rest) {
            Some(kind) => Ok(Command::Filter(kind)),
            None => Err("usage: filter all|active|completed".to_string()),
        },
        "list" | "ls" => Ok(Command::List),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command `{other}`; type `help`")),
    }
}

fn require_arg(rest: &str, usage: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(rest.to_string())
    }
}

fn apply<S, I, C>(store: &mut TodoStore<S, I, C>, command: Command)
where
    S: taskpad_core::SlotStorage,
    I: taskpad_core::IdSource,
    C: taskpad_core::Clock,
{
    match command {
        Command::Add(text) => {
            if store.add(&text).is_none() {
                println!("nothing to add");
            }
        }
        Command::Toggle(prefix) => match resolve_id(store.tasks(), &prefix) {
            IdMatch::One(id) => {
                store.toggle(id);
            }
            IdMatch::None => println!("no task matches `{prefix}`"),
            IdMatch::Ambiguous => println!("`{prefix}` matches more than one task"),
        },
        Command::Remove(prefix) => match resolve_id(store.tasks(), &prefix) {
            IdMatch::One(id) => {
                store.remove(id);
            }
            IdMatch::None => println!("no task matches `{prefix}`"),
            IdMatch::Ambiguous => println!("`{prefix}` matches more than one task"),
        },
        Command::Clear => {
            let removed = store.clear_completed();
            println!("cleared {removed} completed task{}", plural(removed));
        }
        Command::Filter(kind) => store.set_filter(kind),
        Command::List => {}
        // Handled before apply; listed to keep the match exhaustive.
        Command::Help | Command::Quit => {}
    }
}

#[derive(Debug, PartialEq, Eq)]
enum IdMatch {
    One(TaskId),
    None,
    Ambiguous,
}

/// Resolves a (possibly partial) id entered by the user.
///
/// Ids are only ever shown from the current list, so prefix matching is a
/// convenience, not an integrity boundary.
fn resolve_id(tasks: &[Task], prefix: &str) -> IdMatch {
    let prefix = prefix.trim().to_ascii_lowercase();
    let mut matched = None;
    for task in tasks {
        if task.id.to_string().starts_with(&prefix) {
            if matched.is_some() {
                return IdMatch::Ambiguous;
            }
            matched = Some(task.id);
        }
    }
    match matched {
        Some(id) => IdMatch::One(id),
        None => IdMatch::None,
    }
}

fn render_view<S, I, C>(store: &TodoStore<S, I, C>)
where
    S: taskpad_core::SlotStorage,
    I: taskpad_core::IdSource,
    C: taskpad_core::Clock,
{
    if store.config().collapse_completed {
        render_sections(&store.sections(), store.counts());
    } else {
        render(&store.visible(), store.active_filter(), store.counts());
    }
}

fn render(visible: &[Task], filter: FilterKind, counts: TaskCounts) {
    if visible.is_empty() {
        println!("{}", empty_state(filter));
    } else {
        for task in visible {
            println!("{}", format_task(task));
        }
    }
    if counts.total > 0 {
        println!("{}", summary(counts));
    }
}

fn render_sections(sections: &Sections, counts: TaskCounts) {
    if counts.total == 0 {
        println!("{}", empty_state(FilterKind::All));
        return;
    }
    if !sections.active.is_empty() {
        println!("Active Tasks");
        for task in &sections.active {
            println!("{}", format_task(task));
        }
    }
    if !sections.completed.is_empty() {
        println!("Completed Tasks");
        for task in &sections.completed {
            println!("{}", format_task(task));
        }
    }
    println!("{}", summary(counts));
}

fn format_task(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    let id = task.id.to_string();
    format!("[{mark}] {}  {}", &id[..8], task.text)
}

fn empty_state(filter: FilterKind) -> &'static str {
    match filter {
        FilterKind::All => "No tasks yet. Add one to get started!",
        FilterKind::Active => "No active tasks. Great job!",
        FilterKind::Completed => "No completed tasks yet.",
    }
}

fn summary(counts: TaskCounts) -> String {
    if counts.active == 0 && counts.completed > 0 {
        "All tasks completed!".to_string()
    } else {
        format!(
            "{} task{} remaining ({} total)",
            counts.active,
            plural(counts.active),
            counts.total
        )
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn print_help() {
    println!("commands:");
    println!("  add <text>                    add a task");
    println!("  toggle <id>                   flip completion (id prefix ok)");
    println!("  rm <id>                       delete a task (id prefix ok)");
    println!("  clear                         remove all completed tasks");
    println!("  filter all|active|completed   select the visible subset");
    println!("  list                          redraw the current list");
    println!("  quit                          exit");
}
