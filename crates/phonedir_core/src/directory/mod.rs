//! In-memory contact directory.
//!
//! # Responsibility
//! - Keep exactly one contact per normalized name key.
//! - Provide lookup, removal, replacement, listing and substring search.
//! - Signal duplicates and explicit not-found conditions as typed errors.
//!
//! # Invariants
//! - Uniqueness is enforced on `normalize_key(name)`, never on raw names.
//! - A failed `add`/`replace` leaves the directory unchanged.
//! - Enumerations are sorted by case-insensitive name; storage order is
//!   never observable.
//! - No internal locking; hosts with several threads must serialize calls.

mod filter;

pub use filter::{ContactFilter, DirectoryStats};

use crate::model::contact::{normalize_key, Contact};
use crate::store::snapshot::{self, StoreResult};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Directory operation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// A live entry already uses the normalized key of `name`.
    DuplicateContact { name: String },
    /// Explicit lookup found no entry for `name`.
    ContactNotFound { name: String },
    /// Explicit search matched nothing.
    NoContactsFound { query: String },
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateContact { name } => write!(f, "duplicate contact: {name}"),
            Self::ContactNotFound { name } => write!(f, "no contact found named: {name}"),
            Self::NoContactsFound { query } => write!(f, "no contacts found for: {query}"),
        }
    }
}

impl Error for DirectoryError {}

/// Keyed contact collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    entries: HashMap<String, Contact>,
}

impl Directory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a directory snapshot from `path`.
    ///
    /// See [`snapshot::load_directory`] for the error contract.
    pub fn load_from_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        snapshot::load_directory(path)
    }

    /// Writes this directory as one snapshot to `path`, replacing any
    /// previous file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        snapshot::save_directory(self, path)
    }

    /// Inserts `contact` under its normalized key.
    ///
    /// # Errors
    /// - `DuplicateContact` when the key is taken. The stored entry is kept
    ///   and `contact` is dropped.
    pub fn add(&mut self, contact: Contact) -> DirectoryResult<()> {
        let key = contact.normalized_key();
        if self.entries.contains_key(&key) {
            return Err(DirectoryError::DuplicateContact {
                name: contact.name().to_string(),
            });
        }
        self.entries.insert(key, contact);
        Ok(())
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Contact> {
        self.entries.get(&normalize_key(name))
    }

    /// Mutable handle to a stored contact.
    ///
    /// Only flags are reachable through it, so the entry key stays valid.
    pub fn get_by_name_mut(&mut self, name: &str) -> Option<&mut Contact> {
        self.entries.get_mut(&normalize_key(name))
    }

    /// Like [`Directory::get_by_name`], but absence is an error naming the
    /// lookup input.
    pub fn get_by_name_or_err(&self, name: &str) -> DirectoryResult<&Contact> {
        self.get_by_name(name)
            .ok_or_else(|| DirectoryError::ContactNotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize_key(name))
    }

    pub fn set_favorite(&mut self, name: &str, favorite: bool) -> DirectoryResult<()> {
        self.contact_mut_or_err(name)?.set_favorite(favorite);
        Ok(())
    }

    pub fn set_blocked(&mut self, name: &str, blocked: bool) -> DirectoryResult<()> {
        self.contact_mut_or_err(name)?.set_blocked(blocked);
        Ok(())
    }

    /// Removes the entry for `name`; returns whether one existed.
    pub fn remove_by_name(&mut self, name: &str) -> bool {
        self.take_by_name(name).is_some()
    }

    /// Removes and returns the entry for `name`.
    pub fn take_by_name(&mut self, name: &str) -> Option<Contact> {
        self.entries.remove(&normalize_key(name))
    }

    /// Swaps the entry stored under `old_name` for `contact`.
    ///
    /// `contact` may keep the old key or move to a new one.
    ///
    /// # Errors
    /// - `ContactNotFound` when `old_name` has no entry.
    /// - `DuplicateContact` when `contact` moves onto a key held by another
    ///   entry.
    ///
    /// Both errors leave the directory unchanged. The remove/insert pair is
    /// not atomic with respect to other threads.
    pub fn replace(&mut self, old_name: &str, contact: Contact) -> DirectoryResult<()> {
        let old_key = normalize_key(old_name);
        if !self.entries.contains_key(&old_key) {
            return Err(DirectoryError::ContactNotFound {
                name: old_name.to_string(),
            });
        }

        let new_key = contact.normalized_key();
        if new_key != old_key && self.entries.contains_key(&new_key) {
            return Err(DirectoryError::DuplicateContact {
                name: contact.name().to_string(),
            });
        }

        self.entries.remove(&old_key);
        self.entries.insert(new_key, contact);
        Ok(())
    }

    /// All contacts sorted by case-insensitive name.
    pub fn list_all(&self) -> Vec<&Contact> {
        sorted(self.entries.values().collect())
    }

    /// Contacts whose name, phone or email contains `query` ignoring case,
    /// sorted like [`Directory::list_all`].
    ///
    /// No trimming is applied; an empty query matches every contact.
    pub fn search(&self, query: &str) -> Vec<&Contact> {
        sorted(
            self.entries
                .values()
                .filter(|contact| contact.matches(query))
                .collect(),
        )
    }

    /// Like [`Directory::search`], but an empty result is an error carrying
    /// the query text.
    pub fn search_or_err(&self, query: &str) -> DirectoryResult<Vec<&Contact>> {
        let results = self.search(query);
        if results.is_empty() {
            return Err(DirectoryError::NoContactsFound {
                query: query.to_string(),
            });
        }
        Ok(results)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unordered iteration over stored contacts.
    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.entries.values()
    }

    fn contact_mut_or_err(&mut self, name: &str) -> DirectoryResult<&mut Contact> {
        self.entries
            .get_mut(&normalize_key(name))
            .ok_or_else(|| DirectoryError::ContactNotFound {
                name: name.to_string(),
            })
    }
}

/// Case-insensitive name order with raw name as tie-breaker.
pub(crate) fn compare_names(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

fn sorted(mut contacts: Vec<&Contact>) -> Vec<&Contact> {
    contacts.sort_by(|left, right| compare_names(left.name(), right.name()));
    contacts
}
