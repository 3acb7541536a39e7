//! Shared backing state for the catalog and the loan ledger.
//!
//! # Responsibility
//! - Hold both title-keyed collections behind one mutex.
//! - Implement every mutation as a single check-then-apply step so callers
//!   holding the guard observe the XOR invariant before and after.
//!
//! # Invariants
//! - A title is a key of `available` or of `on_loan`, never both.
//! - Record ids are unique across both collections.
//! - No method returns an error after it has started mutating.

use crate::inventory::error::{InventoryError, InventoryResult};
use crate::inventory::state::{BookState, InventorySnapshot, ReplaceSummary};
use crate::model::book::{BookId, BookRecord};
use log::warn;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

pub(crate) type SharedShelves = Arc<Mutex<Shelves>>;

#[derive(Debug, Default)]
pub(crate) struct Shelves {
    available: HashMap<String, BookRecord>,
    on_loan: HashMap<String, BookRecord>,
}

/// Locks the shared shelves.
///
/// A poisoned lock is recovered: mutations only touch the maps after all
/// checks pass, so a panicking holder cannot leave a half-applied transfer.
pub(crate) fn lock_shelves(shelves: &Mutex<Shelves>) -> MutexGuard<'_, Shelves> {
    shelves.lock().unwrap_or_else(|poisoned| {
        warn!("event=lock_recover module=inventory status=poisoned");
        poisoned.into_inner()
    })
}

impl Shelves {
    pub(crate) fn shared() -> SharedShelves {
        Arc::new(Mutex::new(Self::default()))
    }

    pub(crate) fn state_of(&self, title: &str) -> Option<BookState> {
        if self.available.contains_key(title) {
            Some(BookState::Available)
        } else if self.on_loan.contains_key(title) {
            Some(BookState::Borrowed)
        } else {
            None
        }
    }

    /// Finds `title` in whichever collection holds it.
    pub(crate) fn lookup(&self, title: &str) -> Option<(BookRecord, BookState)> {
        if let Some(record) = self.available.get(title) {
            return Some((record.clone(), BookState::Available));
        }
        self.on_loan
            .get(title)
            .map(|record| (record.clone(), BookState::Borrowed))
    }

    fn id_in_use_by_other(&self, id: BookId, title: &str) -> bool {
        self.available
            .values()
            .chain(self.on_loan.values())
            .any(|record| record.id == id && record.title != title)
    }

    pub(crate) fn insert_available(&mut self, record: BookRecord) -> InventoryResult<()> {
        record.validate()?;
        if self.state_of(&record.title).is_some() {
            return Err(InventoryError::DuplicateTitle(record.title));
        }
        if self.id_in_use_by_other(record.id, &record.title) {
            return Err(InventoryError::DuplicateId(record.id));
        }
        self.available.insert(record.title.clone(), record);
        Ok(())
    }

    pub(crate) fn remove_available(&mut self, title: &str) -> InventoryResult<BookRecord> {
        self.available
            .remove(title)
            .ok_or_else(|| InventoryError::NotFound(title.to_string()))
    }

    /// Replaces author and id of an available record; returns the previous one.
    pub(crate) fn update_available(&mut self, record: BookRecord) -> InventoryResult<BookRecord> {
        record.validate()?;
        if !self.available.contains_key(&record.title) {
            return Err(InventoryError::NotFound(record.title));
        }
        if self.id_in_use_by_other(record.id, &record.title) {
            return Err(InventoryError::DuplicateId(record.id));
        }
        let title = record.title.clone();
        self.available
            .insert(title.clone(), record)
            .ok_or(InventoryError::NotFound(title))
    }

    /// Puts `previous` back in place of the available entry for `title`.
    ///
    /// Applies only while the entry still equals `expected` (`None`: the
    /// title is held by neither collection). `previous: None` drops the entry.
    pub(crate) fn revert_available(
        &mut self,
        title: &str,
        expected: Option<&BookRecord>,
        previous: Option<BookRecord>,
    ) -> InventoryResult<()> {
        let untouched = match expected {
            Some(record) => self.available.get(title) == Some(record),
            None => self.state_of(title).is_none(),
        };
        if !untouched {
            return Err(InventoryError::Conflict {
                title: title.to_string(),
                current: self.state_of(title),
            });
        }
        match previous {
            Some(record) => {
                if self.id_in_use_by_other(record.id, title) {
                    return Err(InventoryError::DuplicateId(record.id));
                }
                self.available.insert(title.to_string(), record);
            }
            None => {
                self.available.remove(title);
            }
        }
        Ok(())
    }

    pub(crate) fn available(&self, title: &str) -> Option<&BookRecord> {
        self.available.get(title)
    }

    pub(crate) fn available_records(&self) -> Vec<BookRecord> {
        self.available.values().cloned().collect()
    }

    pub(crate) fn available_len(&self) -> usize {
        self.available.len()
    }

    /// Swaps in a new available set; titles currently on loan are skipped.
    pub(crate) fn replace_available(
        &mut self,
        records: impl IntoIterator<Item = BookRecord>,
    ) -> InventoryResult<ReplaceSummary> {
        let loaned_ids: HashSet<BookId> = self.on_loan.values().map(|record| record.id).collect();
        let mut next = HashMap::new();
        let mut titles = HashSet::new();
        let mut ids = HashSet::new();
        let mut summary = ReplaceSummary::default();

        for record in records {
            record.validate()?;
            if !titles.insert(record.title.clone()) {
                return Err(InventoryError::DuplicateTitle(record.title));
            }
            if self.on_loan.contains_key(&record.title) {
                summary.skipped_on_loan += 1;
                continue;
            }
            if loaned_ids.contains(&record.id) || !ids.insert(record.id) {
                return Err(InventoryError::DuplicateId(record.id));
            }
            next.insert(record.title.clone(), record);
        }

        summary.loaded = next.len();
        self.available = next;
        Ok(summary)
    }

    /// Moves one record from `available` to `on_loan`.
    pub(crate) fn checkout(&mut self, title: &str) -> InventoryResult<BookRecord> {
        match self.available.remove(title) {
            Some(record) => {
                self.on_loan.insert(record.title.clone(), record.clone());
                Ok(record)
            }
            None => Err(InventoryError::InvalidTransition {
                title: title.to_string(),
                current: self.state_of(title),
            }),
        }
    }

    /// Moves one record from `on_loan` back to `available`.
    pub(crate) fn checkin(&mut self, title: &str) -> InventoryResult<BookRecord> {
        match self.on_loan.remove(title) {
            Some(record) => {
                self.available.insert(record.title.clone(), record.clone());
                Ok(record)
            }
            None => Err(InventoryError::InvalidTransition {
                title: title.to_string(),
                current: self.state_of(title),
            }),
        }
    }

    pub(crate) fn on_loan(&self, title: &str) -> Option<&BookRecord> {
        self.on_loan.get(title)
    }

    pub(crate) fn on_loan_records(&self) -> Vec<BookRecord> {
        self.on_loan.values().cloned().collect()
    }

    pub(crate) fn on_loan_len(&self) -> usize {
        self.on_loan.len()
    }

    pub(crate) fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            available: self.available_records(),
            on_loan: self.on_loan_records(),
        }
    }

    /// Replaces both collections after validating the whole snapshot.
    pub(crate) fn restore(&mut self, snapshot: InventorySnapshot) -> InventoryResult<()> {
        let mut ids = HashSet::new();
        let mut titles = HashSet::new();
        for record in snapshot.available.iter().chain(snapshot.on_loan.iter()) {
            record.validate()?;
            if !titles.insert(record.title.as_str()) {
                return Err(InventoryError::DuplicateTitle(record.title.clone()));
            }
            if !ids.insert(record.id) {
                return Err(InventoryError::DuplicateId(record.id));
            }
        }

        self.available = keyed_by_title(snapshot.available);
        self.on_loan = keyed_by_title(snapshot.on_loan);
        Ok(())
    }
}

fn keyed_by_title(records: Vec<BookRecord>) -> HashMap<String, BookRecord> {
    records
        .into_iter()
        .map(|record| (record.title.clone(), record))
        .collect()
}
