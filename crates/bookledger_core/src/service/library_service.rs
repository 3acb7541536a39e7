//! Library use-case service.
//!
//! # Responsibility
//! - Combine the inventory core with a book repository.
//! - Provide the full command surface used by presentation layers.
//!
//! # Invariants
//! - Catalog edits are applied to the core first and persisted second; a
//!   failed persist rolls the core edit back unless another handle moved the
//!   title in between, which is reported as `RollbackConflict`.
//! - Loans live only in memory and are never written to the repository.
//! - Listings returned here are sorted by title.

use crate::inventory::catalog::Catalog;
use crate::inventory::error::InventoryError;
use crate::inventory::ledger::Ledger;
use crate::inventory::state::{BookState, ReplaceSummary};
use crate::model::book::{BookId, BookRecord};
use crate::repo::book_repo::{BookRepository, RepoError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type LibraryServiceResult<T> = Result<T, LibraryServiceError>;

/// Service error for library use-cases.
#[derive(Debug)]
pub enum LibraryServiceError {
    /// Command rejected by the inventory core; nothing changed.
    Inventory(InventoryError),
    /// Persistence failure; any core edit has been rolled back.
    Repo(RepoError),
    /// Persistence failure whose core edit could not be rolled back because
    /// the title changed meanwhile; `conflict` describes where it sits now.
    RollbackConflict {
        persist: RepoError,
        conflict: InventoryError,
    },
}

impl Display for LibraryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inventory(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::RollbackConflict { persist, conflict } => {
                write!(f, "{persist}; rollback skipped: {conflict}")
            }
        }
    }
}

impl Error for LibraryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Inventory(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::RollbackConflict { persist, .. } => Some(persist),
        }
    }
}

impl From<InventoryError> for LibraryServiceError {
    fn from(value: InventoryError) -> Self {
        Self::Inventory(value)
    }
}

impl From<RepoError> for LibraryServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service over a catalog, its ledger and a repository.
pub struct LibraryService<R: BookRepository> {
    repo: R,
    catalog: Catalog,
    ledger: Ledger,
}

impl<R: BookRepository> LibraryService<R> {
    /// Creates a service with an empty inventory.
    ///
    /// Call [`LibraryService::load`] to pull persisted books in.
    pub fn new(repo: R) -> Self {
        Self::with_catalog(repo, Catalog::new())
    }

    /// Creates a service over an existing catalog and its loans.
    pub fn with_catalog(repo: R, catalog: Catalog) -> Self {
        let ledger = Ledger::new(&catalog);
        Self {
            repo,
            catalog,
            ledger,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Reloads the catalog from the repository.
    ///
    /// Persisted books that are currently on loan stay on the ledger.
    pub fn load(&self) -> LibraryServiceResult<ReplaceSummary> {
        let books = self.repo.list_books()?;
        Ok(self.catalog.replace_all(books)?)
    }

    /// Adds a book and persists it.
    pub fn add_book(
        &self,
        title: &str,
        author: &str,
        id: BookId,
    ) -> LibraryServiceResult<BookRecord> {
        let record = self.catalog.add(title, author, id)?;
        if let Err(err) = self.repo.create_book(&record) {
            return Err(self.roll_back("book_add", &record.title, Some(&record), None, err));
        }
        info!("event=book_add module=service status=ok");
        Ok(record)
    }

    /// Removes an available book and deletes its row.
    pub fn remove_book(&self, title: &str) -> LibraryServiceResult<BookRecord> {
        let removed = self.catalog.remove(title)?;
        if let Err(err) = self.repo.delete_book(title) {
            return Err(self.roll_back("book_remove", title, None, Some(removed), err));
        }
        info!("event=book_remove module=service status=ok");
        Ok(removed)
    }

    /// Replaces author and id of an available book; returns the new record.
    pub fn update_book(
        &self,
        title: &str,
        author: &str,
        id: BookId,
    ) -> LibraryServiceResult<BookRecord> {
        let previous = self.catalog.update(title, author, id)?;
        let updated = BookRecord::new(title, author, id);
        if let Err(err) = self.repo.update_book(&updated) {
            return Err(self.roll_back("book_update", title, Some(&updated), Some(previous), err));
        }
        info!("event=book_update module=service status=ok");
        Ok(updated)
    }

    fn roll_back(
        &self,
        event: &str,
        title: &str,
        expected: Option<&BookRecord>,
        previous: Option<BookRecord>,
        persist: RepoError,
    ) -> LibraryServiceError {
        error!(
            "event={event} module=service status=persist_failed error_code={}",
            persist.code()
        );
        match self.catalog.revert(title, expected, previous) {
            Ok(()) => {
                info!("event={event} module=service status=rolled_back");
                LibraryServiceError::Repo(persist)
            }
            Err(conflict) => {
                error!(
                    "event={event} module=service status=rollback_failed error_code={}",
                    conflict.code()
                );
                LibraryServiceError::RollbackConflict { persist, conflict }
            }
        }
    }

    pub fn borrow_book(&self, title: &str) -> LibraryServiceResult<BookRecord> {
        Ok(self.ledger.borrow(title)?)
    }

    pub fn return_book(&self, title: &str) -> LibraryServiceResult<BookRecord> {
        Ok(self.ledger.return_book(title)?)
    }

    /// Finds a book in either collection.
    pub fn find_book(&self, title: &str) -> Option<(BookRecord, BookState)> {
        self.catalog.find(title)
    }

    /// Available books sorted by title.
    pub fn available_books(&self) -> Vec<BookRecord> {
        sorted_by_title(self.catalog.list())
    }

    /// Borrowed books sorted by title.
    pub fn borrowed_books(&self) -> Vec<BookRecord> {
        sorted_by_title(self.ledger.list())
    }
}

fn sorted_by_title(mut books: Vec<BookRecord>) -> Vec<BookRecord> {
    books.sort_by(|left, right| left.title.cmp(&right.title));
    books
}
