//! Book domain model.
//!
//! # Responsibility
//! - Define the record shape shared by the catalog, the loan ledger and the
//!   persistence adapter.
//!
//! # Invariants
//! - Every book is identified by its title; ids are a secondary unique key.

pub mod book;
