//! # Contea - work-crew task tracker
//!
//! Records construction projects, the tasks that belong to them and each
//! task's type, status and priority, and derives per-project progress.
//!
//! ## Roles
//!
//! - **OPERAIO**: full control; may add projects and tasks, change task status
//!   and delete tasks.
//! - **UMARELL**: read-only observer; every mutation is refused.
//!
//! The current user is self-asserted. Roles gate what the session may do, they
//! do not authenticate anybody.
//!
//! ## Storage
//!
//! The registries live in memory in a [`db::Database`] and are mirrored into a
//! [`storage::KeyValueStore`] after every change, one JSON snapshot per
//! registry. The command-line binary uses a [`storage::FileStore`] under
//! `~/.contea/`.
//!
//! ```
//! use contea::db::{Database, Outcome};
//! use contea::fields::{Role, Status};
//! use contea::identity::Actor;
//! use contea::storage::MemoryStore;
//! use contea::task::NewTask;
//!
//! let mut db = Database::open(Box::new(MemoryStore::new()));
//! db.set_actor(Actor::new("Gino", Role::Operaio));
//! assert_eq!(db.add_project("Cantiere A"), Outcome::Applied);
//! assert_eq!(db.add_task(NewTask::new("Scavo").project("Cantiere A")), Outcome::Applied);
//!
//! let id = db.tasks()[0].id;
//! assert_eq!(db.update_status(id, Status::Done), Outcome::Applied);
//! assert_eq!(db.stats()[0].done, 1);
//! ```

pub mod cli;
pub mod cmd;
pub mod db;
pub mod fields;
pub mod gate;
pub mod identity;
pub mod project;
pub mod stats;
pub mod storage;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}
