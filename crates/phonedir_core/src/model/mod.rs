//! Domain model for directory entries.
//!
//! # Responsibility
//! - Define the canonical contact record shared by directory, store and
//!   service layers.
//! - Own the key normalization rule used for contact identity.
//!
//! # Invariants
//! - A contact name is never blank and never changes after construction.
//! - Identity is the normalized key, not the raw name text.

pub mod contact;
