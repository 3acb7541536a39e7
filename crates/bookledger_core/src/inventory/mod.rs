//! In-memory consistency core for available and borrowed books.
//!
//! # Responsibility
//! - Keep every known title in exactly one of two collections.
//! - Make borrow/return atomic with respect to concurrent callers.
//!
//! # Invariants
//! - `title ∈ Catalog XOR title ∈ Ledger` for every known title.
//! - Only `Ledger::borrow` and `Ledger::return_book` move records across.
//! - The core performs no I/O; persistence goes through snapshots.

pub mod catalog;
pub mod error;
pub mod ledger;
mod shelves;
pub mod state;
