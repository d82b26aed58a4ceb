//! Versioned JSON snapshot format and whole-file save/load.
//!
//! # Responsibility
//! - Map `Directory` to and from explicit wire records.
//! - Replace the target file in one step on save.
//! - Reject corrupt or newer-format snapshots instead of masking them.
//!
//! # Invariants
//! - Records are written in `Directory::list_all` order.
//! - Missing flag fields decode as `false`; unknown fields are ignored.
//! - Log events carry paths and counts only, never contact data.

use crate::directory::Directory;
use crate::model::contact::{Contact, ContactValidationError};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error for snapshot save/load.
#[derive(Debug)]
pub enum StoreError {
    /// No snapshot exists at the path. Callers usually start fresh.
    NotFound(PathBuf),
    /// Parent directory could not be created.
    CreateDir { path: PathBuf, source: io::Error },
    /// Reading or writing the snapshot failed.
    Io { path: PathBuf, source: io::Error },
    /// Snapshot bytes are not valid snapshot JSON.
    Decode { path: PathBuf, source: serde_json::Error },
    /// Snapshot could not be encoded.
    Encode(serde_json::Error),
    /// Snapshot version is 0 or newer than this build understands.
    UnsupportedVersion { version: u32, latest_supported: u32 },
    /// Snapshot decoded but violates directory invariants.
    InvalidData(String),
}

impl StoreError {
    /// Returns whether this is the "no snapshot yet" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "snapshot not found: {}", path.display()),
            Self::CreateDir { path, source } => {
                write!(f, "failed to create directory `{}`: {source}", path.display())
            }
            Self::Io { path, source } => write!(f, "snapshot io error at `{}`: {source}", path.display()),
            Self::Decode { path, source } => {
                write!(f, "invalid snapshot at `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
            Self::UnsupportedVersion {
                version,
                latest_supported,
            } => write!(
                f,
                "snapshot version {version} is not supported (expected 1..={latest_supported})"
            ),
            Self::InvalidData(message) => write!(f, "invalid snapshot data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } | Self::Io { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::NotFound(_) | Self::UnsupportedVersion { .. } | Self::InvalidData(_) => None,
        }
    }
}

/// Wire record for one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub blocked: bool,
}

impl From<&Contact> for ContactRecord {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name().to_string(),
            phone_number: contact.phone_number().map(str::to_string),
            email: contact.email().map(str::to_string),
            favorite: contact.is_favorite(),
            blocked: contact.is_blocked(),
        }
    }
}

impl TryFrom<ContactRecord> for Contact {
    type Error = ContactValidationError;

    fn try_from(record: ContactRecord) -> Result<Self, Self::Error> {
        Ok(Contact::new(record.name, record.phone_number, record.email)?
            .with_flags(record.favorite, record.blocked))
    }
}

/// Complete persisted directory state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySnapshot {
    pub version: u32,
    pub contacts: Vec<ContactRecord>,
}

#[derive(Deserialize)]
struct SnapshotHeader {
    version: u32,
}

impl DirectorySnapshot {
    /// Captures `directory` in name order.
    pub fn capture(directory: &Directory) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            contacts: directory
                .list_all()
                .into_iter()
                .map(ContactRecord::from)
                .collect(),
        }
    }

    /// Rebuilds a directory, applying the same checks as `Contact::new` and
    /// `Directory::add`.
    pub fn restore(self) -> StoreResult<Directory> {
        let mut directory = Directory::new();
        for (index, record) in self.contacts.into_iter().enumerate() {
            let contact = Contact::try_from(record).map_err(|err| {
                StoreError::InvalidData(format!("contacts[{index}]: {err}"))
            })?;
            directory
                .add(contact)
                .map_err(|err| StoreError::InvalidData(format!("contacts[{index}]: {err}")))?;
        }
        Ok(directory)
    }
}

/// Writes `directory` to `path` as one snapshot.
///
/// # Side effects
/// - Creates missing parent directories.
/// - Writes a temp file next to `path`, then renames it over `path`.
/// - Emits `snapshot_save` logging events with duration and status.
///
/// # Errors
/// - `CreateDir` when a parent directory cannot be created.
/// - `Io` when writing or replacing the file fails.
pub fn save_directory(directory: &Directory, path: impl AsRef<Path>) -> StoreResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=snapshot_save module=store status=start contacts={}",
        directory.len()
    );

    match write_snapshot(&DirectorySnapshot::capture(directory), path) {
        Ok(()) => {
            info!(
                "event=snapshot_save module=store status=ok duration_ms={} contacts={} path={}",
                started_at.elapsed().as_millis(),
                directory.len(),
                path.display()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=snapshot_save module=store status=error duration_ms={} error_code={} path={}",
                started_at.elapsed().as_millis(),
                error_code(&err),
                path.display()
            );
            Err(err)
        }
    }
}

/// Reads the snapshot at `path` into a new directory.
///
/// # Errors
/// - `NotFound` when `path` does not exist.
/// - `Io` for any other read failure.
/// - `Decode` for malformed JSON or a wrong shape.
/// - `UnsupportedVersion` for version 0 or versions newer than
///   [`SNAPSHOT_VERSION`].
/// - `InvalidData` for blank names or duplicate keys.
pub fn load_directory(path: impl AsRef<Path>) -> StoreResult<Directory> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=snapshot_load module=store status=start");

    match read_snapshot(path).and_then(DirectorySnapshot::restore) {
        Ok(directory) => {
            info!(
                "event=snapshot_load module=store status=ok duration_ms={} contacts={} path={}",
                started_at.elapsed().as_millis(),
                directory.len(),
                path.display()
            );
            Ok(directory)
        }
        Err(err) if err.is_not_found() => {
            info!(
                "event=snapshot_load module=store status=missing duration_ms={} path={}",
                started_at.elapsed().as_millis(),
                path.display()
            );
            Err(err)
        }
        Err(err) => {
            error!(
                "event=snapshot_load module=store status=error duration_ms={} error_code={} path={}",
                started_at.elapsed().as_millis(),
                error_code(&err),
                path.display()
            );
            Err(err)
        }
    }
}

fn write_snapshot(snapshot: &DirectorySnapshot, path: &Path) -> StoreResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })?;

    let bytes = serde_json::to_vec_pretty(snapshot).map_err(StoreError::Encode)?;
    let io_err = |source: io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = NamedTempFile::new_in(parent).map_err(io_err)?;
    file.write_all(&bytes).map_err(io_err)?;
    file.as_file().sync_all().map_err(io_err)?;
    file.persist(path).map_err(|err| io_err(err.error))?;
    Ok(())
}

fn read_snapshot(path: &Path) -> StoreResult<DirectorySnapshot> {
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            StoreError::NotFound(path.to_path_buf())
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let decode_err = |source: serde_json::Error| StoreError::Decode {
        path: path.to_path_buf(),
        source,
    };
    let header: SnapshotHeader = serde_json::from_slice(&bytes).map_err(decode_err)?;
    if header.version == 0 || header.version > SNAPSHOT_VERSION {
        return Err(StoreError::UnsupportedVersion {
            version: header.version,
            latest_supported: SNAPSHOT_VERSION,
        });
    }

    serde_json::from_slice(&bytes).map_err(decode_err)
}

fn error_code(err: &StoreError) -> &'static str {
    match err {
        StoreError::NotFound(_) => "snapshot_missing",
        StoreError::CreateDir { .. } => "create_dir_failed",
        StoreError::Io { .. } => "io_failed",
        StoreError::Decode { .. } => "decode_failed",
        StoreError::Encode(_) => "encode_failed",
        StoreError::UnsupportedVersion { .. } => "unsupported_version",
        StoreError::InvalidData(_) => "invalid_data",
    }
}
