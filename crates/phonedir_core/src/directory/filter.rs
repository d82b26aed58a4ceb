//! Flag-based listing views and directory statistics.
//!
//! # Invariants
//! - A missing or blank query means "no text filter" and lists everything.
//! - Flag filters run after the text filter and keep the name ordering.

use super::Directory;
use crate::model::contact::Contact;

/// Flag filter applied on top of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContactFilter {
    #[default]
    All,
    /// Only contacts marked favorite.
    Favorites,
    /// Only blocked contacts.
    Blocked,
    /// Everything except blocked contacts.
    HideBlocked,
}

impl ContactFilter {
    pub fn accepts(self, contact: &Contact) -> bool {
        match self {
            Self::All => true,
            Self::Favorites => contact.is_favorite(),
            Self::Blocked => contact.is_blocked(),
            Self::HideBlocked => !contact.is_blocked(),
        }
    }
}

/// Entry counts by flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryStats {
    pub total: usize,
    pub favorites: usize,
    pub blocked: usize,
}

impl DirectoryStats {
    /// Share of favorites in percent, rounded half up; 0 when empty.
    pub fn favorite_percent(&self) -> u32 {
        percent(self.favorites, self.total)
    }

    /// Share of blocked contacts in percent, rounded half up; 0 when empty.
    pub fn blocked_percent(&self) -> u32 {
        percent(self.blocked, self.total)
    }
}

impl Directory {
    /// Lists contacts for a caller-facing view.
    ///
    /// The query is trimmed; `None` or a blank query is the same as
    /// [`Directory::list_all`], anything else goes through
    /// [`Directory::search`].
    pub fn list_filtered(&self, query: Option<&str>, filter: ContactFilter) -> Vec<&Contact> {
        let base = match query.map(str::trim).filter(|query| !query.is_empty()) {
            Some(query) => self.search(query),
            None => self.list_all(),
        };
        base.into_iter()
            .filter(|contact| filter.accepts(contact))
            .collect()
    }

    pub fn stats(&self) -> DirectoryStats {
        self.iter().fold(
            DirectoryStats {
                total: self.len(),
                ..DirectoryStats::default()
            },
            |mut stats, contact| {
                if contact.is_favorite() {
                    stats.favorites += 1;
                }
                if contact.is_blocked() {
                    stats.blocked += 1;
                }
                stats
            },
        )
    }
}

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (part * 200 + total) / (total * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
