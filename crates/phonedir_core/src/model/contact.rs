//! Contact domain model.
//!
//! # Responsibility
//! - Define the contact record: immutable identity and contact fields plus
//!   mutable presentation flags.
//! - Provide the case-insensitive substring match used by directory search.
//!
//! # Invariants
//! - `name` is validated non-blank at construction and has no setter.
//! - `phone_number`/`email` are stored as given; format checks belong to
//!   input layers.
//! - Flag setters never touch identity, so they cannot re-key a directory.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation error for contact construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// Name is empty or whitespace only.
    BlankName,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "contact name must not be blank"),
        }
    }
}

impl Error for ContactValidationError {}

/// Returns the directory key for a contact name.
///
/// Lower-cases without locale rules, then trims surrounding whitespace, so
/// `"Alice Smith"` and `" alice smith "` share one key.
pub fn normalize_key(name: &str) -> String {
    name.to_lowercase().trim().to_string()
}

/// One directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    name: String,
    phone_number: Option<String>,
    email: Option<String>,
    favorite: bool,
    blocked: bool,
}

impl Contact {
    /// Creates a contact with both flags cleared.
    ///
    /// # Errors
    /// - Returns `BlankName` when `name` is empty after trimming.
    pub fn new(
        name: impl Into<String>,
        phone_number: Option<String>,
        email: Option<String>,
    ) -> Result<Self, ContactValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ContactValidationError::BlankName);
        }

        Ok(Self {
            name,
            phone_number,
            email,
            favorite: false,
            blocked: false,
        })
    }

    /// Returns this contact with the given flag values.
    pub fn with_flags(mut self, favorite: bool, blocked: bool) -> Self {
        self.favorite = favorite;
        self.blocked = blocked;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite
    }

    pub fn set_favorite(&mut self, favorite: bool) {
        self.favorite = favorite;
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    /// Key this contact is stored under in a directory.
    pub fn normalized_key(&self) -> String {
        normalize_key(&self.name)
    }

    /// Returns whether `query` occurs, ignoring case, in the name, phone
    /// number or email.
    ///
    /// An empty query is a substring of everything and always matches.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        let contains = |value: &str| value.to_lowercase().contains(query.as_str());

        contains(self.name.as_str())
            || self.phone_number.as_deref().is_some_and(contains)
            || self.email.as_deref().is_some_and(contains)
    }
}

impl Display for Contact {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(phone) = &self.phone_number {
            write!(f, " phone: {phone}")?;
        }
        if let Some(email) = &self.email {
            write!(f, " email: {email}")?;
        }
        if self.favorite {
            write!(f, " [favorite]")?;
        }
        if self.blocked {
            write!(f, " [blocked]")?;
        }
        Ok(())
    }
}
