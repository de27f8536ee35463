//! # Contea - Gestione attività
//!
//! Command-line and terminal UI front end for the crew task tracker.
//!
//! ## Quick Start
//!
//! ```bash
//! # Register a site and plan some work (requires the OPERAIO role)
//! contea --role operaio project add "Cantiere A"
//! contea --role operaio add "Scavo" --project "Cantiere A" --type SAL --priority alta
//!
//! # Anyone may look
//! contea list
//! contea stats
//!
//! # Interactive UI
//! contea ui --user Gino --role operaio
//! ```
//!
//! Data is stored in `~/.contea/` as `projects.json` and `tasks.json`.
//! Set `CONTEA_LOG` (e.g. `contea=debug`) to see what the core is doing.

use std::env;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use contea::cli::Cli;
use contea::cmd::*;
use contea::db::Database;
use contea::storage::FileStore;

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("CONTEA_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "contea=debug,warn" } else { "contea=warn" })
    });

    let format = env::var("CONTEA_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// `--data-dir`, or `~/.contea` (`./.contea` without a home directory).
fn resolve_data_dir(cli: &Cli) -> PathBuf {
    if let Some(dir) = cli.data_dir.as_ref() {
        return dir.clone();
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".contea")
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Handle commands that don't need any data first
    if let Commands::Completions { shell } = &cli.command {
        cmd_completions(*shell);
        return;
    }

    let data_dir = resolve_data_dir(&cli);
    let store = match FileStore::open(&data_dir) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open data directory {}: {}", data_dir.display(), e);
            std::process::exit(1);
        }
    };

    let mut db = Database::open(Box::new(store));
    db.set_actor(cli.actor());

    match cli.command {
        Commands::Ui => cmd_ui(db),

        Commands::Project { action } => cmd_project(&mut db, action),

        Commands::Add { title, desc, project, kind, priority, status } =>
            cmd_add(&mut db, title, desc, project, kind, priority, status),

        Commands::List { status, project, kind, json } =>
            cmd_list(&db, status, project, kind, json),

        Commands::View { id } => cmd_view(&db, id),

        Commands::Status { id, status } => cmd_status(&mut db, id, status),

        Commands::Delete { id } => cmd_delete(&mut db, id),

        Commands::Stats { json } => cmd_stats(&db, json),

        Commands::Whoami => cmd_whoami(&db),

        Commands::Completions { .. } => unreachable!("completions handled above"),
    }
}
