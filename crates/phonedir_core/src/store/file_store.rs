//! Store contract and the JSON file implementation.

use super::snapshot::{load_directory, save_directory, StoreResult};
use crate::directory::Directory;
use std::path::{Path, PathBuf};

/// Whole-directory persistence contract.
pub trait ContactStore {
    /// Loads the stored directory; `StoreError::NotFound` when nothing was
    /// saved yet.
    fn load(&self) -> StoreResult<Directory>;
    /// Replaces stored state with `directory`.
    fn save(&self, directory: &Directory) -> StoreResult<()>;
}

/// Snapshot file at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContactStore for JsonFileStore {
    fn load(&self) -> StoreResult<Directory> {
        load_directory(&self.path)
    }

    fn save(&self, directory: &Directory) -> StoreResult<()> {
        save_directory(directory, &self.path)
    }
}
