//! BookLedger command shell.
//!
//! # Responsibility
//! - Open the book database, load the catalog, and run the command loop on
//!   stdin/stdout.
//! - Keep all inventory rules inside `bookledger_core`.
//!
//! # Configuration
//! - Database path: positional argument, else `BOOKLEDGER_DB`, else
//!   `bookledger.sqlite3` in the working directory.
//! - `--log-dir` / `BOOKLEDGER_LOG_DIR`: absolute directory enabling file logs.

mod command;
mod shell;

use bookledger_core::db::open_db;
use bookledger_core::{
    core_version, default_log_level, init_logging, LibraryService, SqliteBookRepository,
};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Library catalog and loan ledger shell
#[derive(Parser, Debug)]
#[command(name = "bookledger")]
#[command(version = core_version(), long_about = None)]
struct Cli {
    /// Path to the book database
    #[arg(value_name = "DB", env = "BOOKLEDGER_DB", default_value = "bookledger.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rotated log files; logging is off when unset
    #[arg(long, value_name = "DIR", env = "BOOKLEDGER_LOG_DIR")]
    log_dir: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = init_logging(default_log_level(), log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let db_path = cli.db.display();
    let conn = match open_db(&cli.db) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open `{db_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    let service = LibraryService::new(SqliteBookRepository::new(&conn));
    match service.load() {
        Ok(summary) => println!(
            "bookledger {} db={db_path} books={}",
            core_version(),
            summary.loaded
        ),
        Err(err) => {
            eprintln!("failed to load books from `{db_path}`: {err}");
            return ExitCode::FAILURE;
        }
    }

    match shell::run(&service, io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("shell i/o error: {err}");
            ExitCode::FAILURE
        }
    }
}
