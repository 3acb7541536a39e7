//! Catalog of books currently available to borrow.
//!
//! # Responsibility
//! - Own add/remove/update/list commands for available books.
//! - Grant the ledger a transfer-only capability over the same state.
//! - Provide the snapshot/refresh contract used by persistence layers.
//!
//! # Invariants
//! - `add` rejects titles held by either collection.
//! - `remove`/`update`/`get` only ever target available books.
//! - `replace_all` replaces, never merges; titles on loan stay on loan.

use crate::inventory::error::{InventoryError, InventoryResult};
use crate::inventory::shelves::{lock_shelves, SharedShelves, Shelves};
use crate::inventory::state::{BookState, InventorySnapshot, ReplaceSummary};
use crate::model::book::{BookId, BookRecord};
use log::{debug, info, warn};

/// Available-books collection.
///
/// Cloning yields another handle to the same state.
#[derive(Debug, Clone)]
pub struct Catalog {
    shelves: SharedShelves,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Creates an empty catalog with an empty loan ledger behind it.
    pub fn new() -> Self {
        Self {
            shelves: Shelves::shared(),
        }
    }

    /// Creates a catalog pre-loaded with `records`.
    ///
    /// # Errors
    /// - Same as [`Catalog::replace_all`].
    pub fn with_records(records: impl IntoIterator<Item = BookRecord>) -> InventoryResult<Self> {
        let catalog = Self::new();
        catalog.replace_all(records)?;
        Ok(catalog)
    }

    /// Inserts a new available book.
    ///
    /// # Errors
    /// - `DuplicateTitle` when the title is available or on loan.
    /// - `DuplicateId` when another record already uses `id`.
    /// - `InvalidInput` when the title is blank.
    pub fn add(
        &self,
        title: impl Into<String>,
        author: impl Into<String>,
        id: BookId,
    ) -> InventoryResult<BookRecord> {
        let record = BookRecord::new(title, author, id);
        let result = lock_shelves(&self.shelves).insert_available(record.clone());
        log_outcome("book_add", &result);
        result.map(|()| record)
    }

    /// Deletes an available book and returns it.
    ///
    /// A borrowed title is reported as `NotFound`.
    pub fn remove(&self, title: &str) -> InventoryResult<BookRecord> {
        let result = lock_shelves(&self.shelves).remove_available(title);
        log_outcome("book_remove", &result);
        result
    }

    /// Replaces author and id of the available book keyed by `title`.
    ///
    /// Returns the record as it was before the update.
    ///
    /// # Errors
    /// - `NotFound` when `title` is not available.
    /// - `DuplicateId` when `id` belongs to another record.
    pub fn update(
        &self,
        title: &str,
        author: impl Into<String>,
        id: BookId,
    ) -> InventoryResult<BookRecord> {
        let result =
            lock_shelves(&self.shelves).update_available(BookRecord::new(title, author, id));
        log_outcome("book_update", &result);
        result
    }

    pub fn contains(&self, title: &str) -> bool {
        lock_shelves(&self.shelves).available(title).is_some()
    }

    /// Returns a copy of the available book keyed by `title`.
    pub fn get(&self, title: &str) -> InventoryResult<BookRecord> {
        lock_shelves(&self.shelves)
            .available(title)
            .cloned()
            .ok_or_else(|| InventoryError::NotFound(title.to_string()))
    }

    /// Finds `title` in either collection under one lock.
    pub fn find(&self, title: &str) -> Option<(BookRecord, BookState)> {
        lock_shelves(&self.shelves).lookup(title)
    }

    /// Lists available books in unspecified order.
    pub fn list(&self) -> Vec<BookRecord> {
        lock_shelves(&self.shelves).available_records()
    }

    pub fn len(&self) -> usize {
        lock_shelves(&self.shelves).available_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the whole available set with `records`.
    ///
    /// Records whose title is currently on loan are skipped and counted in
    /// the returned summary. The call is all-or-nothing.
    ///
    /// # Errors
    /// - `InvalidInput` for a blank title.
    /// - `DuplicateTitle`/`DuplicateId` for collisions inside the batch or
    ///   with books on loan.
    pub fn replace_all(
        &self,
        records: impl IntoIterator<Item = BookRecord>,
    ) -> InventoryResult<ReplaceSummary> {
        let result = lock_shelves(&self.shelves).replace_available(records);
        match &result {
            Ok(summary) => info!(
                "event=catalog_replace module=catalog status=ok loaded={} skipped_on_loan={}",
                summary.loaded, summary.skipped_on_loan
            ),
            Err(err) => warn!(
                "event=catalog_replace module=catalog status=rejected error_code={}",
                err.code()
            ),
        }
        result
    }

    /// Reports which collection currently holds `title`.
    pub fn state_of(&self, title: &str) -> Option<BookState> {
        lock_shelves(&self.shelves).state_of(title)
    }

    /// Copies both collections under one lock.
    pub fn snapshot(&self) -> InventorySnapshot {
        lock_shelves(&self.shelves).snapshot()
    }

    /// Replaces both collections with `snapshot`.
    ///
    /// # Errors
    /// - `InvalidInput`, `DuplicateTitle` or `DuplicateId` when the snapshot
    ///   would break inventory invariants; state is left unchanged.
    pub fn restore(&self, snapshot: InventorySnapshot) -> InventoryResult<()> {
        let total = snapshot.len();
        let result = lock_shelves(&self.shelves).restore(snapshot);
        match &result {
            Ok(()) => info!("event=inventory_restore module=catalog status=ok records={total}"),
            Err(err) => warn!(
                "event=inventory_restore module=catalog status=rejected error_code={}",
                err.code()
            ),
        }
        result
    }

    /// Undoes an add, remove or update unless the title moved since.
    ///
    /// # Errors
    /// - `Conflict` when the entry no longer equals `expected`.
    /// - `DuplicateId` when the id of `previous` was taken meanwhile.
    pub(crate) fn revert(
        &self,
        title: &str,
        expected: Option<&BookRecord>,
        previous: Option<BookRecord>,
    ) -> InventoryResult<()> {
        let result = lock_shelves(&self.shelves).revert_available(title, expected, previous);
        log_outcome("book_revert", &result);
        result
    }

    pub(crate) fn transfer_handle(&self) -> TransferHandle {
        TransferHandle {
            shelves: self.shelves.clone(),
        }
    }
}

/// Capability handed to the ledger.
///
/// Exposes the two transfers plus read access to books on loan; it offers
/// no way to iterate or edit available books.
#[derive(Debug, Clone)]
pub(crate) struct TransferHandle {
    shelves: SharedShelves,
}

impl TransferHandle {
    pub(crate) fn checkout(&self, title: &str) -> InventoryResult<BookRecord> {
        lock_shelves(&self.shelves).checkout(title)
    }

    pub(crate) fn checkin(&self, title: &str) -> InventoryResult<BookRecord> {
        lock_shelves(&self.shelves).checkin(title)
    }

    pub(crate) fn on_loan(&self, title: &str) -> Option<BookRecord> {
        lock_shelves(&self.shelves).on_loan(title).cloned()
    }

    pub(crate) fn on_loan_records(&self) -> Vec<BookRecord> {
        lock_shelves(&self.shelves).on_loan_records()
    }

    pub(crate) fn on_loan_len(&self) -> usize {
        lock_shelves(&self.shelves).on_loan_len()
    }
}

pub(crate) fn log_outcome<T>(event: &str, result: &InventoryResult<T>) {
    match result {
        Ok(_) => debug!("event={event} module=inventory status=ok"),
        Err(err) => info!(
            "event={event} module=inventory status=rejected error_code={}",
            err.code()
        ),
    }
}
