//! Core domain logic for BookLedger.
//! This crate is the single source of truth for inventory invariants: every
//! known book is either available in the catalog or on loan in the ledger,
//! never both and never neither.

pub mod db;
pub mod inventory;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use inventory::catalog::Catalog;
pub use inventory::error::{InventoryError, InventoryResult};
pub use inventory::ledger::Ledger;
pub use inventory::state::{BookState, InventorySnapshot, ReplaceSummary};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{parse_book_id, BookId, BookRecord, BookValidationError};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use service::library_service::{LibraryService, LibraryServiceError, LibraryServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
