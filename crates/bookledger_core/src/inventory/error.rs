//! Inventory error taxonomy.

use crate::inventory::state::BookState;
use crate::model::book::{BookId, BookValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Structured outcome for every rejected inventory command.
///
/// None of these are fatal; state is left unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// Title already held by the catalog or the ledger.
    DuplicateTitle(String),
    /// Id already used by another record.
    DuplicateId(BookId),
    /// Title is not present in the collection the command targets.
    NotFound(String),
    InvalidInput(BookValidationError),
    /// Borrow/return requested from a state that does not allow it.
    ///
    /// `current` is `None` when the title is unknown to the inventory.
    InvalidTransition {
        title: String,
        current: Option<BookState>,
    },
    /// Title changed hands while an edit was being reverted.
    ///
    /// `current` is where the title sits now.
    Conflict {
        title: String,
        current: Option<BookState>,
    },
}

impl InventoryError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateTitle(_) => "duplicate_title",
            Self::DuplicateId(_) => "duplicate_id",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::Conflict { .. } => "conflict",
        }
    }
}

impl Display for InventoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateTitle(title) => write!(f, "book already exists: {title}"),
            Self::DuplicateId(id) => write!(f, "book id already in use: {id}"),
            Self::NotFound(title) => write!(f, "book not found: {title}"),
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::InvalidTransition {
                title,
                current: None,
            } => write!(f, "book does not exist: {title}"),
            Self::InvalidTransition {
                title,
                current: Some(BookState::Available),
            } => write!(f, "book is not borrowed: {title}"),
            Self::InvalidTransition {
                title,
                current: Some(BookState::Borrowed),
            } => write!(f, "book is already borrowed: {title}"),
            Self::Conflict { title, .. } => write!(f, "book changed concurrently: {title}"),
        }
    }
}

impl Error for InventoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BookValidationError> for InventoryError {
    fn from(value: BookValidationError) -> Self {
        Self::InvalidInput(value)
    }
}
