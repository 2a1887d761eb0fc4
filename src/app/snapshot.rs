// StaffLedger - app/snapshot.rs
//
// Snapshot persistence: save and restore the employee collection between
// runs.
//
// - Saved atomically (write temp, rename) so an interrupted save never
//   corrupts the previous good snapshot.
// - Load problems are not errors: a missing, malformed or foreign snapshot
//   just means the application starts from the seed dataset.
// - The data directory is created on first save.

use crate::core::model::Employee;
use crate::platform::fs;
use crate::util::constants::{STORE_FILE_NAME, STORE_NAME, STORE_VERSION};
use crate::util::error::SnapshotError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk snapshot document.
///
/// `name` and `version` must equal `STORE_NAME` / `STORE_VERSION` for the
/// snapshot to be accepted. There is no migration between versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub name: String,
    pub version: u32,
    #[serde(default)]
    pub records: Vec<Employee>,
}

impl StoreSnapshot {
    /// Wrap `records` with the current store name and version.
    pub fn new(records: Vec<Employee>) -> Self {
        Self {
            name: STORE_NAME.to_string(),
            version: STORE_VERSION,
            records,
        }
    }
}

/// Resolve the snapshot file path from the platform data directory.
pub fn snapshot_path(data_dir: &Path) -> PathBuf {
    data_dir.join(STORE_FILE_NAME)
}

/// Save `snapshot` to `path` atomically.
pub fn save(snapshot: &StoreSnapshot, path: &Path) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| SnapshotError::Serialise { source: e })?;

    fs::write_atomic(path, json.as_bytes()).map_err(|e| SnapshotError::Io {
        path: path.to_path_buf(),
        operation: "write snapshot",
        source: e,
    })?;

    tracing::info!(
        path = %path.display(),
        records = snapshot.records.len(),
        "Snapshot saved"
    );
    Ok(())
}

/// Load and validate a snapshot from `path`.
///
/// Returns `None` when the file does not exist, cannot be parsed, or carries
/// another store name or version. The caller treats `None` as "start fresh".
pub fn load(path: &Path) -> Option<StoreSnapshot> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            // "Not found" is the normal first run.
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "Cannot read snapshot file");
            }
        })
        .ok()?;

    let snapshot: StoreSnapshot = serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Snapshot file is malformed, starting from seed"
            );
        })
        .ok()?;

    if snapshot.name != STORE_NAME || snapshot.version != STORE_VERSION {
        tracing::warn!(
            found_name = %snapshot.name,
            found_version = snapshot.version,
            expected_name = STORE_NAME,
            expected_version = STORE_VERSION,
            "Snapshot belongs to another store or version, starting from seed"
        );
        return None;
    }

    tracing::info!(
        path = %path.display(),
        records = snapshot.records.len(),
        "Snapshot loaded"
    );
    Some(snapshot)
}
