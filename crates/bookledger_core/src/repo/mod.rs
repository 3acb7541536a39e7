//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the save/reload contract an external store offers the service.
//! - Isolate SQLite query details from inventory state.
//!
//! # Invariants
//! - Repository writes validate records before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod book_repo;
