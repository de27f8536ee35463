use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::fields::Role;
use crate::identity::{Actor, DEFAULT_ACTOR_NAME};

/// Work-crew task tracker.
/// Snapshots live in ~/.contea or the directory passed via --data-dir.
#[derive(Parser)]
#[command(name = "contea", version, about = "Gestione attività for a small work crew")]
pub struct Cli {
    /// Directory holding the JSON snapshots.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Display name of the current user.
    #[arg(long, global = true, default_value = DEFAULT_ACTOR_NAME)]
    pub user: String,

    /// Role of the current user: OPERAIO (full control) or UMARELL (read-only).
    #[arg(long, global = true, value_enum, ignore_case = true, default_value_t = Role::Umarell)]
    pub role: Role,

    /// Log debug events to stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The session actor asserted on the command line.
    pub fn actor(&self) -> Actor {
        Actor::new(self.user.clone(), self.role)
    }
}
