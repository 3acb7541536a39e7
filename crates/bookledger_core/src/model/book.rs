//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical record held by the catalog and the loan ledger.
//! - Validate caller-provided fields before they reach inventory state.
//!
//! # Invariants
//! - `title` is non-empty after trimming and is the unique lookup key.
//! - `id` is unique across every record known to the inventory.
//! - `title` never changes for the lifetime of a record.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Numeric catalog identifier for a book.
///
/// Kept as a type alias so signatures read as domain intent.
pub type BookId = i64;

/// One physical/catalog book entry.
///
/// Field names match the persisted row shape `{title, author, id}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookRecord {
    /// Unique key within the inventory.
    pub title: String,
    pub author: String,
    /// Unique across the union of available and borrowed books.
    pub id: BookId,
}

impl BookRecord {
    /// Creates a record without validating it.
    ///
    /// Inventory write paths call [`BookRecord::validate`] before storing.
    pub fn new(title: impl Into<String>, author: impl Into<String>, id: BookId) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            id,
        }
    }

    /// Validates record invariants that do not depend on other records.
    ///
    /// # Errors
    /// - Returns [`BookValidationError::EmptyTitle`] for blank titles.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.trim().is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Field-level validation failures for book input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    EmptyTitle,
    /// Caller supplied a non-numeric or out-of-range id.
    InvalidId(String),
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "book title must not be empty"),
            Self::InvalidId(value) => {
                write!(f, "invalid book id `{value}`; expected a whole number")
            }
        }
    }
}

impl Error for BookValidationError {}

/// Parses a caller-provided id string.
///
/// Presentation layers call this before issuing commands so that malformed
/// ids never reach inventory state.
///
/// # Errors
/// - Returns [`BookValidationError::InvalidId`] when `value` is not an `i64`.
pub fn parse_book_id(value: &str) -> Result<BookId, BookValidationError> {
    let trimmed = value.trim();
    trimmed
        .parse::<BookId>()
        .map_err(|_| BookValidationError::InvalidId(trimmed.to_string()))
}
