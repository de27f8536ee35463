//! The session database and display helpers.
//!
//! `Database` owns the project and task registries, the current actor and the
//! persistence adapter. Every mutator runs the permission gate, validates its
//! input and reports an `Outcome`; only `Outcome::Applied` changes state and
//! triggers a snapshot write of the affected registry.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::fields::*;
use crate::gate::{authorize, Mutation};
use crate::identity::Actor;
use crate::project::{normalise_project_name, Project};
use crate::stats::{compute_stats, ProjectStats};
use crate::storage::{self, KeyValueStore, LEGACY_PROJECTS_KEY, LEGACY_TASKS_KEY, PROJECTS_KEY, TASKS_KEY};
use crate::task::{NewTask, Task};

/// Result of a mutation attempt. Everything except `Applied` leaves the
/// database untouched.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Title or project name was empty after trimming.
    RejectedEmpty,
    /// The current actor may not mutate.
    RejectedPermission,
    /// No task with the given id.
    RejectedNotFound,
    /// A project with the same name already exists.
    RejectedDuplicate,
    /// The id space is used up; no further record can be created.
    RejectedIdsExhausted,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }

    /// Human readable reason, for surfaces that report rejections.
    pub fn describe(self) -> &'static str {
        match self {
            Outcome::Applied => "applied",
            Outcome::RejectedEmpty => "name or title is empty",
            Outcome::RejectedPermission => "permission denied: the OPERAIO role is required",
            Outcome::RejectedNotFound => "no such task",
            Outcome::RejectedDuplicate => "a project with this name already exists",
            Outcome::RejectedIdsExhausted => "no ids left to assign",
        }
    }
}

/// Hands out ids that are time-derived but strictly increasing.
#[derive(Debug)]
struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    fn seeded(last: u64) -> Self {
        IdAllocator { last }
    }

    /// Next id, or `None` once `u64::MAX` has been handed out.
    fn next(&mut self) -> Option<u64> {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last.checked_add(1)?);
        self.last = id;
        Some(id)
    }
}

/// In-memory registries for one session, mirrored into a key-value store.
pub struct Database {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    actor: Actor,
    ids: IdAllocator,
    store: Box<dyn KeyValueStore>,
}

impl Database {
    /// Hydrate from `store`. Missing or malformed snapshots start empty. The
    /// session begins with the default, read-only actor.
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        let projects = storage::decode_projects(
            storage::load_with_fallback(store.as_ref(), PROJECTS_KEY, LEGACY_PROJECTS_KEY).as_deref(),
        );
        let tasks = storage::decode_tasks(
            storage::load_with_fallback(store.as_ref(), TASKS_KEY, LEGACY_TASKS_KEY).as_deref(),
        );
        let last = projects
            .iter()
            .map(|p| p.id)
            .chain(tasks.iter().map(|t| t.id))
            .max()
            .unwrap_or(0);
        debug!(projects = projects.len(), tasks = tasks.len(), "hydrated database");
        Database {
            projects,
            tasks,
            actor: Actor::default(),
            ids: IdAllocator::seeded(last),
            store,
        }
    }

    /// Replace the session actor wholesale.
    pub fn set_actor(&mut self, actor: Actor) {
        debug!(name = %actor.name, role = ?actor.role, "actor changed");
        self.actor = actor;
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn is_privileged(&self) -> bool {
        self.actor.is_privileged()
    }

    /// Projects in creation order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Tasks in creation order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Per-project statistics over the current registries.
    pub fn stats(&self) -> Vec<ProjectStats> {
        compute_stats(&self.projects, &self.tasks)
    }

    /// The backing store.
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    fn gate(&self, mutation: Mutation) -> bool {
        authorize(&self.actor, mutation)
    }

    fn reject(&self, mutation: Mutation, outcome: Outcome) -> Outcome {
        debug!(%mutation, ?outcome, actor = %self.actor.name, "mutation rejected");
        outcome
    }

    /// Register a new project. The name is trimmed; empty or already used
    /// names are rejected.
    pub fn add_project(&mut self, name: &str) -> Outcome {
        if !self.gate(Mutation::AddProject) {
            return self.reject(Mutation::AddProject, Outcome::RejectedPermission);
        }
        let Some(name) = normalise_project_name(name) else {
            return self.reject(Mutation::AddProject, Outcome::RejectedEmpty);
        };
        if self.projects.iter().any(|p| p.name == name) {
            return self.reject(Mutation::AddProject, Outcome::RejectedDuplicate);
        }
        let Some(id) = self.ids.next() else {
            return self.reject(Mutation::AddProject, Outcome::RejectedIdsExhausted);
        };
        let project = Project::new(id, name);
        info!(id = project.id, name = %project.name, "project added");
        self.projects.push(project);
        self.persist_projects();
        Outcome::Applied
    }

    /// Append a new task. The title is trimmed and must not be empty. The
    /// project name is stored as given, registered or not.
    pub fn add_task(&mut self, new: NewTask) -> Outcome {
        if !self.gate(Mutation::AddTask) {
            return self.reject(Mutation::AddTask, Outcome::RejectedPermission);
        }
        if new.title.trim().is_empty() {
            return self.reject(Mutation::AddTask, Outcome::RejectedEmpty);
        }
        let Some(id) = self.ids.next() else {
            return self.reject(Mutation::AddTask, Outcome::RejectedIdsExhausted);
        };
        let task = new.into_task(id);
        info!(id = task.id, title = %task.title, project = %task.project, "task added");
        self.tasks.push(task);
        self.persist_tasks();
        Outcome::Applied
    }

    /// Set the status of a task, keeping its other fields and position.
    /// Snapshots from older sessions may repeat an id; every task carrying
    /// it is updated.
    pub fn update_status(&mut self, id: u64, status: Status) -> Outcome {
        if !self.gate(Mutation::UpdateStatus) {
            return self.reject(Mutation::UpdateStatus, Outcome::RejectedPermission);
        }
        let mut updated = 0;
        for task in self.tasks.iter_mut().filter(|t| t.id == id) {
            task.status = status;
            updated += 1;
        }
        if updated == 0 {
            return self.reject(Mutation::UpdateStatus, Outcome::RejectedNotFound);
        }
        info!(id, ?status, updated, "task status updated");
        self.persist_tasks();
        Outcome::Applied
    }

    /// Remove every task with the given id.
    pub fn delete_task(&mut self, id: u64) -> Outcome {
        if !self.gate(Mutation::DeleteTask) {
            return self.reject(Mutation::DeleteTask, Outcome::RejectedPermission);
        }
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = before - self.tasks.len();
        if removed == 0 {
            return self.reject(Mutation::DeleteTask, Outcome::RejectedNotFound);
        }
        info!(id, removed, "task deleted");
        self.persist_tasks();
        Outcome::Applied
    }

    fn persist_projects(&mut self) {
        let result =
            storage::encode_projects(&self.projects).and_then(|raw| self.store.save(PROJECTS_KEY, &raw));
        if let Err(e) = result {
            warn!(error = %e, "failed to persist projects");
        }
    }

    fn persist_tasks(&mut self) {
        let result = storage::encode_tasks(&self.tasks).and_then(|raw| self.store.save(TASKS_KEY, &raw));
        if let Err(e) = result {
            warn!(error = %e, "failed to persist tasks");
        }
    }
}

/// Format a task status for display.
pub fn format_status(s: Status) -> &'static str {
    match s {
        Status::Todo => "Da fare",
        Status::Doing => "In corso",
        Status::Done => "Completata",
    }
}

/// Format a priority level for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Alta => "Alta",
        Priority::Media => "Media",
        Priority::Bassa => "Bassa",
    }
}

/// Format a task type for display.
pub fn format_type(k: TaskType) -> &'static str {
    match k {
        TaskType::Sal => "SAL",
        TaskType::Perizie => "PERIZIE",
        TaskType::Altro => "ALTRO",
    }
}

/// Format a role for display.
pub fn format_role(r: Role) -> &'static str {
    match r {
        Role::Operaio => "Operaio",
        Role::Umarell => "Umarell",
    }
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[&Task]) {
    println!(
        "{:<14} {:<8} {:<11} {:<6} {:<16} {}",
        "ID", "Type", "Status", "Pri", "Project", "Title"
    );
    for t in tasks {
        let project = if t.project.is_empty() { "-" } else { t.project.as_str() };
        println!(
            "{:<14} {:<8} {:<11} {:<6} {:<16} {}",
            t.id,
            format_type(t.kind),
            format_status(t.status),
            format_priority(t.priority),
            truncate(project, 16),
            t.title
        );
    }
}

/// Print the per-project report.
pub fn print_stats(stats: &[ProjectStats]) {
    println!("{:<20} {:>9} {:>11} {:>6}", "Project", "In corso", "Completate", "Totale");
    for s in stats {
        println!(
            "{:<20} {:>9} {:>11} {:>6}",
            truncate(&s.project_name, 20),
            s.in_progress,
            s.done,
            s.total
        );
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}
