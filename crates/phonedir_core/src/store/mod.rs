//! Directory persistence.
//!
//! # Responsibility
//! - Define the on-disk snapshot schema, independent of in-memory types.
//! - Save and load whole directories as single files.
//! - Expose a store contract so service code stays storage-agnostic.
//!
//! # Invariants
//! - Loading distinguishes "no snapshot yet" from every other failure.
//! - Loaded snapshots pass the same validation as interactive input.

pub mod file_store;
pub mod snapshot;

pub use file_store::{ContactStore, JsonFileStore};
pub use snapshot::{
    ContactRecord, DirectorySnapshot, StoreError, StoreResult, SNAPSHOT_VERSION,
};
