//! Core logic for the personal contact directory.
//! This crate is the single source of truth for directory invariants; UI and
//! CLI hosts call into it and never mutate entries behind its back.

pub mod directory;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use directory::{ContactFilter, Directory, DirectoryError, DirectoryResult, DirectoryStats};
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::contact::{normalize_key, Contact, ContactValidationError};
pub use service::directory_service::{
    ContactDraft, DirectoryService, ServiceError, ServiceResult,
};
pub use store::{
    ContactRecord, ContactStore, DirectorySnapshot, JsonFileStore, StoreError, StoreResult,
    SNAPSHOT_VERSION,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
