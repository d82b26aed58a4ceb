//! Directory use-case service.
//!
//! # Responsibility
//! - Open a directory from a store, starting fresh when nothing was saved.
//! - Normalize form input before it reaches `Contact::new`.
//! - Flag unusual email input as a hint without blocking the save.
//! - Provide edit, toggle and delete-with-undo flows over `Directory`.
//!
//! # Invariants
//! - Every mutation goes through `Directory` operations, so key uniqueness
//!   is never bypassed.
//! - Editing a contact keeps its favorite/blocked flags.
//! - Only a missing snapshot is treated as "start fresh"; other load errors
//!   are returned.

use crate::directory::{Directory, DirectoryError};
use crate::model::contact::{Contact, ContactValidationError};
use crate::store::file_store::ContactStore;
use crate::store::snapshot::StoreError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for directory use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Contact input failed model validation.
    Validation(ContactValidationError),
    /// Directory rejected the operation.
    Directory(DirectoryError),
    /// Snapshot load/save failure.
    Store(StoreError),
    /// `undo_delete` called with no pending deletion.
    NothingToUndo,
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Directory(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::NothingToUndo => write!(f, "nothing to undo"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Directory(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NothingToUndo => None,
        }
    }
}

impl From<ContactValidationError> for ServiceError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DirectoryError> for ServiceError {
    fn from(value: DirectoryError) -> Self {
        Self::Directory(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Raw contact form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns whether a present email lacks an `@`.
    ///
    /// This is a hint for the caller to show; the email is still saved as
    /// given.
    pub fn email_looks_unusual(&self) -> bool {
        self.email
            .as_deref()
            .map(str::trim)
            .is_some_and(|email| !email.is_empty() && !email.contains('@'))
    }

    /// Builds a contact from trimmed input.
    ///
    /// Blank phone/email become `None`. No format checks are applied.
    ///
    /// # Errors
    /// - `Validation` when the name is blank.
    pub fn into_contact(self) -> ServiceResult<Contact> {
        let phone = normalize_optional_field(self.phone);
        let email = normalize_optional_field(self.email);
        Ok(Contact::new(self.name.trim(), phone, email)?)
    }
}

fn normalize_optional_field(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Directory facade bound to one store.
pub struct DirectoryService<S: ContactStore> {
    store: S,
    directory: Directory,
    last_deleted: Option<Contact>,
}

impl<S: ContactStore> DirectoryService<S> {
    /// Loads the stored directory, or starts empty when none was saved.
    ///
    /// # Errors
    /// - Any store error other than `StoreError::NotFound`.
    pub fn open(store: S) -> ServiceResult<Self> {
        let directory = match store.load() {
            Ok(directory) => directory,
            Err(err) if err.is_not_found() => {
                info!("event=directory_open module=service status=fresh");
                Directory::new()
            }
            Err(err) => return Err(err.into()),
        };
        info!(
            "event=directory_open module=service status=ok contacts={}",
            directory.len()
        );
        Ok(Self::with_directory(store, directory))
    }

    /// Wraps an already loaded directory.
    pub fn with_directory(store: S, directory: Directory) -> Self {
        Self {
            store,
            directory,
            last_deleted: None,
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn directory_mut(&mut self) -> &mut Directory {
        &mut self.directory
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Contact that `undo_delete` would restore.
    pub fn last_deleted(&self) -> Option<&Contact> {
        self.last_deleted.as_ref()
    }

    pub fn add_contact(&mut self, draft: ContactDraft) -> ServiceResult<()> {
        let contact = draft.into_contact()?;
        self.directory.add(contact)?;
        Ok(())
    }

    /// Replaces the entry for `old_name` with `draft`, keeping its flags.
    ///
    /// Renames are allowed as long as the new name is free.
    pub fn edit_contact(&mut self, old_name: &str, draft: ContactDraft) -> ServiceResult<()> {
        let existing = self.directory.get_by_name_or_err(old_name)?;
        let (favorite, blocked) = (existing.is_favorite(), existing.is_blocked());
        let contact = draft.into_contact()?.with_flags(favorite, blocked);
        self.directory.replace(old_name, contact)?;
        Ok(())
    }

    /// Removes `name` and remembers it for `undo_delete`.
    ///
    /// Returns whether an entry existed. A miss keeps the previous undo
    /// target.
    pub fn delete_contact(&mut self, name: &str) -> bool {
        match self.directory.take_by_name(name) {
            Some(contact) => {
                self.last_deleted = Some(contact);
                true
            }
            None => false,
        }
    }

    /// Re-adds the most recently deleted contact.
    ///
    /// # Errors
    /// - `NothingToUndo` when no deletion is pending.
    /// - `Directory(DuplicateContact)` when the name was taken meanwhile;
    ///   the undo target is kept.
    pub fn undo_delete(&mut self) -> ServiceResult<()> {
        let contact = self.last_deleted.take().ok_or(ServiceError::NothingToUndo)?;
        if let Err(err) = self.directory.add(contact.clone()) {
            self.last_deleted = Some(contact);
            return Err(err.into());
        }
        Ok(())
    }

    /// Flips the favorite flag and returns the new value.
    pub fn toggle_favorite(&mut self, name: &str) -> ServiceResult<bool> {
        let favorite = !self.directory.get_by_name_or_err(name)?.is_favorite();
        self.directory.set_favorite(name, favorite)?;
        Ok(favorite)
    }

    /// Flips the blocked flag and returns the new value.
    pub fn toggle_blocked(&mut self, name: &str) -> ServiceResult<bool> {
        let blocked = !self.directory.get_by_name_or_err(name)?.is_blocked();
        self.directory.set_blocked(name, blocked)?;
        Ok(blocked)
    }

    /// Persists the whole directory through the store.
    pub fn save(&self) -> ServiceResult<()> {
        self.store.save(&self.directory)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_optional_field, ContactDraft};

    #[test]
    fn optional_fields_are_trimmed_and_blank_becomes_none() {
        assert_eq!(
            normalize_optional_field(Some("  555-0101 ".to_string())).as_deref(),
            Some("555-0101")
        );
        assert_eq!(normalize_optional_field(Some("   ".to_string())), None);
        assert_eq!(normalize_optional_field(None), None);
    }

    #[test]
    fn draft_keeps_unusual_emails_and_only_hints() {
        for email in ["alice smith@example.com", "a@b@c", "alice.example.com"] {
            let draft = ContactDraft::new("Alice").email(email);
            assert_eq!(draft.email_looks_unusual(), !email.contains('@'));

            let contact = draft.into_contact().unwrap();
            assert_eq!(contact.email(), Some(email));
        }
    }

    #[test]
    fn email_hint_ignores_missing_or_blank_email() {
        assert!(!ContactDraft::new("Alice").email_looks_unusual());
        assert!(!ContactDraft::new("Alice").email("  ").email_looks_unusual());
        assert!(ContactDraft::new("Alice").email(" alice ").email_looks_unusual());
    }

    #[test]
    fn draft_trims_name() {
        let contact = ContactDraft::new("  Alice  ").phone(" ").into_contact().unwrap();
        assert_eq!(contact.name(), "Alice");
        assert_eq!(contact.phone_number(), None);
    }
}
