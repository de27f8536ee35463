//! Add-task form for the terminal user interface.
//!
//! Mirrors the add form of the work plan: title, description, type, project,
//! priority and status, with the same defaults as a freshly opened form.

use crate::fields::{Priority, Status, TaskType};
use crate::project::Project;
use crate::task::NewTask;
use crate::tui::input::InputField;

/// Field order in the form.
pub const TITLE_ORDER: usize = 0;
pub const DESCRIPTION_ORDER: usize = 1;
pub const TYPE_ORDER: usize = 2;
pub const PROJECT_ORDER: usize = 3;
pub const PRIORITY_ORDER: usize = 4;
pub const STATUS_ORDER: usize = 5;
const FIELD_COUNT: usize = 6;

/// Label for "no project" in the project selector.
pub const NO_PROJECT: &str = "(nessuno)";

pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub kind: usize,
    pub project: usize,
    pub priority: usize,
    pub status: usize,
    pub current_field: usize,
    /// Selectable project names; index 0 is the empty project.
    pub projects: Vec<String>,
}

impl TaskForm {
    /// Fresh form offering the registered projects, in registry order.
    pub fn new(projects: &[Project]) -> Self {
        let mut names = vec![String::new()];
        names.extend(projects.iter().map(|p| p.name.clone()));
        Self {
            title: InputField::new(),
            description: InputField::new(),
            kind: index_of(&TaskType::ALL, TaskType::default()),
            project: 0,
            priority: index_of(&Priority::ALL, Priority::default()),
            status: index_of(&Status::ALL, Status::default()),
            current_field: TITLE_ORDER,
            projects: names,
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
    }

    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
    }

    /// The text input under focus, if the focused field is textual.
    pub fn active_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_ORDER => Some(&mut self.title),
            DESCRIPTION_ORDER => Some(&mut self.description),
            _ => None,
        }
    }

    /// Move the focused selector by one option, wrapping around.
    pub fn cycle(&mut self, forward: bool) {
        let (slot, len) = match self.current_field {
            TYPE_ORDER => (&mut self.kind, TaskType::ALL.len()),
            PROJECT_ORDER => (&mut self.project, self.projects.len()),
            PRIORITY_ORDER => (&mut self.priority, Priority::ALL.len()),
            STATUS_ORDER => (&mut self.status, Status::ALL.len()),
            _ => return,
        };
        *slot = if forward { (*slot + 1) % len } else { (*slot + len - 1) % len };
    }

    pub fn selected_kind(&self) -> TaskType {
        TaskType::ALL[self.kind]
    }

    pub fn selected_priority(&self) -> Priority {
        Priority::ALL[self.priority]
    }

    pub fn selected_status(&self) -> Status {
        Status::ALL[self.status]
    }

    pub fn selected_project(&self) -> &str {
        self.projects.get(self.project).map_or("", String::as_str)
    }

    /// Project label for display.
    pub fn project_label(&self) -> &str {
        match self.selected_project() {
            "" => NO_PROJECT,
            name => name,
        }
    }

    /// Creation input built from the current form contents.
    pub fn to_new_task(&self) -> NewTask {
        NewTask::new(self.title.value.clone())
            .description(self.description.value.clone())
            .project(self.selected_project())
            .kind(self.selected_kind())
            .priority(self.selected_priority())
            .status(self.selected_status())
    }
}

fn index_of<T: PartialEq + Copy>(all: &[T], value: T) -> usize {
    all.iter().position(|v| *v == value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projects() -> Vec<Project> {
        vec![
            Project { id: 1, name: "Cantiere A".into() },
            Project { id: 2, name: "Cantiere B".into() },
        ]
    }

    #[test]
    fn fresh_form_has_add_defaults() {
        let form = TaskForm::new(&projects());
        let new = form.to_new_task();
        assert_eq!(new, NewTask::new(""));
        assert_eq!(form.project_label(), NO_PROJECT);
        assert_eq!(form.projects.len(), 3);
    }

    #[test]
    fn selectors_cycle_and_wrap() {
        let mut form = TaskForm::new(&projects());
        form.current_field = PROJECT_ORDER;
        form.cycle(true);
        assert_eq!(form.selected_project(), "Cantiere A");
        form.cycle(false);
        form.cycle(false);
        assert_eq!(form.selected_project(), "Cantiere B");

        form.current_field = TYPE_ORDER;
        form.cycle(true);
        assert_eq!(form.selected_kind(), TaskType::Sal);

        form.current_field = TITLE_ORDER;
        form.cycle(true);
        assert_eq!(form.selected_kind(), TaskType::Sal);
    }

    #[test]
    fn field_focus_wraps() {
        let mut form = TaskForm::new(&[]);
        form.prev_field();
        assert_eq!(form.current_field, STATUS_ORDER);
        form.next_field();
        assert_eq!(form.current_field, TITLE_ORDER);
        assert!(form.active_input().is_some());
        form.current_field = PRIORITY_ORDER;
        assert!(form.active_input().is_none());
    }

    #[test]
    fn builds_new_task_from_inputs() {
        let mut form = TaskForm::new(&projects());
        form.title = InputField::with_value("Scavo");
        form.description = InputField::with_value("fondazioni");
        form.current_field = PROJECT_ORDER;
        form.cycle(true);
        form.current_field = PRIORITY_ORDER;
        form.cycle(false);
        let new = form.to_new_task();
        assert_eq!(new.title, "Scavo");
        assert_eq!(new.description, "fondazioni");
        assert_eq!(new.project, "Cantiere A");
        assert_eq!(new.priority, Priority::Alta);
    }
}
