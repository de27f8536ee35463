//! Command implementations for the CLI interface.
//!
//! Each handler works on an already hydrated `Database` whose actor has been
//! set from the global flags. Rejected mutations are reported on stderr and
//! end the process with status 1.

use clap::Subcommand;
use clap_complete::{generate, Shell};
use serde::Serialize;

use crate::db::*;
use crate::fields::*;
use crate::gate::can_mutate_tasks;
use crate::task::{NewTask, Task};
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI interface.
    Ui,

    /// Manage projects.
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
        /// Project name. Not checked against registered projects.
        #[arg(long)]
        project: Option<String>,
        /// Task type: SAL | PERIZIE | ALTRO.
        #[arg(long = "type", value_enum, ignore_case = true, default_value_t = TaskType::Altro)]
        kind: TaskType,
        /// Priority: alta | media | bassa.
        #[arg(long, value_enum, ignore_case = true, default_value_t = Priority::Media)]
        priority: Priority,
        /// Status: todo | doing | done.
        #[arg(long, value_enum, ignore_case = true, default_value_t = Status::Todo)]
        status: Status,
    },

    /// List tasks in insertion order with optional filters.
    List {
        /// Filter by status.
        #[arg(long, value_enum, ignore_case = true)]
        status: Option<Status>,
        /// Filter by project name (exact match).
        #[arg(long)]
        project: Option<String>,
        /// Filter by type.
        #[arg(long = "type", value_enum, ignore_case = true)]
        kind: Option<TaskType>,
        /// Print the tasks as JSON.
        #[arg(long)]
        json: bool,
    },

    /// View a single task by ID.
    View {
        id: u64,
    },

    /// Change the status of a task.
    Status {
        id: u64,
        #[arg(value_enum, ignore_case = true)]
        status: Status,
    },

    /// Delete a task by ID.
    Delete {
        id: u64,
    },

    /// Per-project progress report.
    Stats {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the current user and what they may do.
    Whoami,

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Register a project.
    Add {
        name: String,
    },
    /// List projects in creation order.
    List {
        /// Print the projects as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Report a rejected mutation and exit.
fn exit_unless_applied(outcome: Outcome, what: &str) {
    if !outcome.is_applied() {
        eprintln!("Cannot {what}: {}", outcome.describe());
        std::process::exit(1);
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Failed to encode JSON: {e}");
            std::process::exit(1);
        }
    }
}

pub fn cmd_ui(db: Database) {
    if let Err(e) = run_tui(db) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

pub fn cmd_project(db: &mut Database, action: ProjectAction) {
    match action {
        ProjectAction::Add { name } => {
            exit_unless_applied(db.add_project(&name), "add project");
            if let Some(p) = db.projects().last() {
                println!("Added project {} ({})", p.name, p.id);
            }
        }
        ProjectAction::List { json } => {
            if json {
                print_json(db.projects());
                return;
            }
            println!("{:<14} {}", "ID", "Name");
            for p in db.projects() {
                println!("{:<14} {}", p.id, p.name);
            }
        }
    }
}

pub fn cmd_add(
    db: &mut Database,
    title: String,
    desc: Option<String>,
    project: Option<String>,
    kind: TaskType,
    priority: Priority,
    status: Status,
) {
    let new = NewTask::new(title)
        .description(desc.unwrap_or_default())
        .project(project.unwrap_or_default())
        .kind(kind)
        .priority(priority)
        .status(status);
    exit_unless_applied(db.add_task(new), "add task");
    if let Some(t) = db.tasks().last() {
        println!("Added task {}", t.id);
    }
}

/// Select tasks matching every given filter, keeping insertion order.
pub fn filter_tasks<'a>(
    tasks: &'a [Task],
    status: Option<Status>,
    project: Option<&str>,
    kind: Option<TaskType>,
) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| status.map_or(true, |s| t.status == s))
        .filter(|t| project.map_or(true, |p| t.project == p))
        .filter(|t| kind.map_or(true, |k| t.kind == k))
        .collect()
}

pub fn cmd_list(
    db: &Database,
    status: Option<Status>,
    project: Option<String>,
    kind: Option<TaskType>,
    json: bool,
) {
    let rows = filter_tasks(db.tasks(), status, project.as_deref(), kind);
    if json {
        print_json(&rows);
    } else {
        print_table(&rows);
    }
}

pub fn cmd_view(db: &Database, id: u64) {
    let Some(t) = db.get(id) else {
        eprintln!("Task with ID {id} not found");
        std::process::exit(1);
    };
    println!("ID:          {}", t.id);
    println!("Title:       {}", t.title);
    println!("Description: {}", if t.description.is_empty() { "-" } else { t.description.as_str() });
    println!("Project:     {}", if t.project.is_empty() { "-" } else { t.project.as_str() });
    println!("Type:        {}", format_type(t.kind));
    println!("Status:      {}", format_status(t.status));
    println!("Priority:    {}", format_priority(t.priority));
}

pub fn cmd_status(db: &mut Database, id: u64, status: Status) {
    exit_unless_applied(db.update_status(id, status), "update status");
    println!("Task {id} is now {}", format_status(status));
}

pub fn cmd_delete(db: &mut Database, id: u64) {
    exit_unless_applied(db.delete_task(id), "delete task");
    println!("Deleted task {id}");
}

pub fn cmd_stats(db: &Database, json: bool) {
    let stats = db.stats();
    if json {
        print_json(&stats);
    } else {
        print_stats(&stats);
    }
}

pub fn cmd_whoami(db: &Database) {
    let actor = db.actor();
    let access = if can_mutate_tasks(actor) { "full control" } else { "read-only" };
    println!("{} ({}): {access}", actor.name, format_role(actor.role));
}

pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, project: &str, kind: TaskType, status: Status) -> Task {
        Task {
            id,
            title: format!("t{id}"),
            description: String::new(),
            project: project.to_string(),
            kind,
            status,
            priority: Priority::Media,
        }
    }

    #[test]
    fn filters_combine_and_keep_order() {
        let tasks = vec![
            task(3, "A", TaskType::Sal, Status::Todo),
            task(1, "B", TaskType::Sal, Status::Done),
            task(2, "A", TaskType::Altro, Status::Todo),
            task(4, "A", TaskType::Sal, Status::Todo),
        ];
        let ids = |v: Vec<&Task>| v.iter().map(|t| t.id).collect::<Vec<_>>();

        assert_eq!(ids(filter_tasks(&tasks, None, None, None)), vec![3, 1, 2, 4]);
        assert_eq!(ids(filter_tasks(&tasks, None, Some("A"), None)), vec![3, 2, 4]);
        assert_eq!(
            ids(filter_tasks(&tasks, Some(Status::Todo), Some("A"), Some(TaskType::Sal))),
            vec![3, 4]
        );
        assert!(filter_tasks(&tasks, None, Some("a"), None).is_empty());
    }
}
