//! Enumerations and field types for tasks and session identity.
//!
//! The serde names are the wire format of the persisted snapshots and must not
//! change: `SAL`/`PERIZIE`/`ALTRO`, `todo`/`doing`/`done`, `alta`/`media`/`bassa`
//! and `OPERAIO`/`UMARELL`.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Kind of paperwork or site activity a task belongs to.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
pub enum TaskType {
    /// Stato avanzamento lavori.
    #[serde(rename = "SAL")]
    #[value(name = "SAL")]
    Sal,
    #[serde(rename = "PERIZIE")]
    #[value(name = "PERIZIE")]
    Perizie,
    #[default]
    #[serde(rename = "ALTRO")]
    #[value(name = "ALTRO")]
    Altro,
}

impl TaskType {
    pub const ALL: [TaskType; 3] = [TaskType::Sal, TaskType::Perizie, TaskType::Altro];
}

/// Task progress. Any status can follow any other.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Todo,
    Doing,
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::Doing, Status::Done];

    /// Next status in display order, wrapping around.
    pub fn next(self) -> Status {
        match self {
            Status::Todo => Status::Doing,
            Status::Doing => Status::Done,
            Status::Done => Status::Todo,
        }
    }

    /// Previous status in display order, wrapping around.
    pub fn prev(self) -> Status {
        match self {
            Status::Todo => Status::Done,
            Status::Doing => Status::Todo,
            Status::Done => Status::Doing,
        }
    }
}

/// Task priority: high, medium, low.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Alta,
    #[default]
    Media,
    Bassa,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Alta, Priority::Media, Priority::Bassa];
}

/// Session role. `Operaio` has full control, `Umarell` only watches.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[value(name = "OPERAIO")]
    Operaio,
    #[default]
    #[value(name = "UMARELL")]
    Umarell,
}

impl Role {
    /// The other role; used by the role switch in the UI.
    pub fn toggled(self) -> Role {
        match self {
            Role::Operaio => Role::Umarell,
            Role::Umarell => Role::Operaio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_snapshot_format() {
        assert_eq!(serde_json::to_string(&TaskType::Perizie).unwrap(), "\"PERIZIE\"");
        assert_eq!(serde_json::to_string(&Status::Doing).unwrap(), "\"doing\"");
        assert_eq!(serde_json::to_string(&Priority::Bassa).unwrap(), "\"bassa\"");
        assert_eq!(serde_json::to_string(&Role::Umarell).unwrap(), "\"UMARELL\"");
        assert!(serde_json::from_str::<Status>("\"DONE\"").is_err());
    }

    #[test]
    fn defaults_follow_the_add_form() {
        assert_eq!(TaskType::default(), TaskType::Altro);
        assert_eq!(Status::default(), Status::Todo);
        assert_eq!(Priority::default(), Priority::Media);
        assert_eq!(Role::default(), Role::Umarell);
    }

    #[test]
    fn status_cycle_visits_every_state() {
        let mut s = Status::Todo;
        for expected in [Status::Doing, Status::Done, Status::Todo] {
            s = s.next();
            assert_eq!(s, expected);
        }
        assert_eq!(Status::Todo.prev(), Status::Done);
        assert_eq!(Status::Done.next().prev(), Status::Done);
    }

    #[test]
    fn cli_accepts_wire_literals() {
        assert_eq!(TaskType::from_str("SAL", true).unwrap(), TaskType::Sal);
        assert_eq!(TaskType::from_str("perizie", true).unwrap(), TaskType::Perizie);
        assert_eq!(Role::from_str("operaio", true).unwrap(), Role::Operaio);
        assert_eq!(Status::from_str("doing", false).unwrap(), Status::Doing);
    }
}
