//! Loan ledger: books currently lent out.
//!
//! # Responsibility
//! - Perform the only transitions that cross the catalog/ledger boundary.
//! - Answer loan queries.
//!
//! # Invariants
//! - `borrow` and `return_book` each run under one lock scope; no observer
//!   sees a title in both collections or in neither.
//! - A rejected transition leaves both collections untouched.

use crate::inventory::catalog::{log_outcome, Catalog, TransferHandle};
use crate::inventory::error::{InventoryError, InventoryResult};
use crate::model::book::BookRecord;

/// Books on loan, bound to the catalog it transfers with.
#[derive(Debug, Clone)]
pub struct Ledger {
    desk: TransferHandle,
}

impl Ledger {
    /// Binds a ledger to `catalog`.
    ///
    /// Every ledger created from the same catalog (or its clones) shares one
    /// set of loans.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            desk: catalog.transfer_handle(),
        }
    }

    /// Moves an available book onto the ledger.
    ///
    /// # Errors
    /// - `InvalidTransition` with `current: None` when the title is unknown.
    /// - `InvalidTransition` with `current: Some(Borrowed)` when already lent.
    pub fn borrow(&self, title: &str) -> InventoryResult<BookRecord> {
        let result = self.desk.checkout(title);
        log_outcome("book_borrow", &result);
        result
    }

    /// Moves a borrowed book back to the catalog.
    ///
    /// # Errors
    /// - `InvalidTransition` when the title is unknown or not on loan.
    pub fn return_book(&self, title: &str) -> InventoryResult<BookRecord> {
        let result = self.desk.checkin(title);
        log_outcome("book_return", &result);
        result
    }

    pub fn is_borrowed(&self, title: &str) -> bool {
        self.desk.on_loan(title).is_some()
    }

    /// Alias of [`Ledger::is_borrowed`].
    pub fn contains(&self, title: &str) -> bool {
        self.is_borrowed(title)
    }

    pub fn get(&self, title: &str) -> InventoryResult<BookRecord> {
        self.desk
            .on_loan(title)
            .ok_or_else(|| InventoryError::NotFound(title.to_string()))
    }

    /// Lists borrowed books in unspecified order.
    pub fn list(&self) -> Vec<BookRecord> {
        self.desk.on_loan_records()
    }

    pub fn len(&self) -> usize {
        self.desk.on_loan_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
