//! Task data structure and creation input.
//!
//! A `Task` is a flat record. Its `project` field holds a copy of a project
//! name taken at creation time; it is never checked against the project
//! registry and is never rewritten afterwards.

use serde::{Deserialize, Serialize};

use crate::fields::*;

/// A unit of work on a site.
///
/// Legacy snapshots used Italian field names; they are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    #[serde(alias = "titolo")]
    pub title: String,
    #[serde(default, alias = "descrizione")]
    pub description: String,
    #[serde(default, alias = "progetto")]
    pub project: String,
    #[serde(rename = "type", default, alias = "tipo")]
    pub kind: TaskType,
    #[serde(default, alias = "stato")]
    pub status: Status,
    #[serde(default, alias = "priorità")]
    pub priority: Priority,
}

/// Fields supplied when creating a task. The id is assigned by the database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub project: String,
    pub kind: TaskType,
    pub priority: Priority,
    pub status: Status,
}

impl NewTask {
    /// Start a task with the form defaults: no description or project,
    /// type ALTRO, priority media, status todo.
    pub fn new(title: impl Into<String>) -> Self {
        NewTask {
            title: title.into(),
            ..NewTask::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn kind(mut self, kind: TaskType) -> Self {
        self.kind = kind;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Build the stored record. The title is trimmed; every other field is
    /// kept verbatim.
    pub(crate) fn into_task(self, id: u64) -> Task {
        Task {
            id,
            title: self.title.trim().to_string(),
            description: self.description,
            project: self.project,
            kind: self.kind,
            status: self.status,
            priority: self.priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_uses_form_defaults() {
        let t = NewTask::new("Scavo").into_task(7);
        assert_eq!(t.id, 7);
        assert_eq!(t.title, "Scavo");
        assert_eq!(t.description, "");
        assert_eq!(t.project, "");
        assert_eq!(t.kind, TaskType::Altro);
        assert_eq!(t.priority, Priority::Media);
        assert_eq!(t.status, Status::Todo);
    }

    #[test]
    fn only_title_is_trimmed() {
        let t = NewTask::new("  Getto  ")
            .description("  solaio ")
            .project(" Cantiere A")
            .into_task(1);
        assert_eq!(t.title, "Getto");
        assert_eq!(t.description, "  solaio ");
        assert_eq!(t.project, " Cantiere A");
    }

    #[test]
    fn serialises_with_flat_english_field_names() {
        let t = NewTask::new("Scavo")
            .project("Cantiere A")
            .kind(TaskType::Sal)
            .priority(Priority::Alta)
            .into_task(3);
        let v: serde_json::Value = serde_json::to_value(&t).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "id": 3,
                "title": "Scavo",
                "description": "",
                "project": "Cantiere A",
                "type": "SAL",
                "status": "todo",
                "priority": "alta"
            })
        );
    }

    #[test]
    fn accepts_legacy_field_names() {
        let raw = r#"{"id":1,"titolo":"Perizia","descrizione":"x","progetto":"B",
                      "tipo":"PERIZIE","stato":"doing","priorità":"bassa"}"#;
        let t: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(t.title, "Perizia");
        assert_eq!(t.project, "B");
        assert_eq!(t.kind, TaskType::Perizie);
        assert_eq!(t.status, Status::Doing);
        assert_eq!(t.priority, Priority::Bassa);
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let t: Task = serde_json::from_str(r#"{"id":9,"title":"Solo titolo"}"#).unwrap();
        assert_eq!(t.description, "");
        assert_eq!(t.project, "");
        assert_eq!(t.kind, TaskType::Altro);
        assert_eq!(t.status, Status::Todo);
        assert_eq!(t.priority, Priority::Media);
    }
}
