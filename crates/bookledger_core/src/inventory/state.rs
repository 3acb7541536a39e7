//! Per-title lifecycle state and the consistent inventory snapshot.

use crate::model::book::BookRecord;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Where a known title currently lives.
///
/// An unknown title (never added, or removed) is modelled as
/// `Option<BookState>::None` by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookState {
    /// Held by the catalog.
    Available,
    /// Held by the loan ledger.
    Borrowed,
}

impl BookState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Borrowed => "borrowed",
        }
    }
}

impl Display for BookState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Copy of both collections taken under one lock.
///
/// Used by persistence layers to save state and by `Catalog::restore` to
/// reload it. Record order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub available: Vec<BookRecord>,
    pub on_loan: Vec<BookRecord>,
}

impl InventorySnapshot {
    /// Total number of records across both collections.
    pub fn len(&self) -> usize {
        self.available.len() + self.on_loan.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty() && self.on_loan.is_empty()
    }
}

/// Result of a bulk catalog reload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceSummary {
    /// Records now held by the catalog.
    pub loaded: usize,
    /// Records ignored because their title is currently on loan.
    pub skipped_on_loan: usize,
}
