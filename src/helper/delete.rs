//! Recursive deletion of a directory-like prefix in a flat key space
//!
//! The store has no directories to remove, only keys sharing a prefix plus
//! an optional zero-byte marker blob named like the directory itself. The
//! whole subtree is captured in one exhaustive listing and drained
//! deepest-first, so nested markers are deleted after their contents and a
//! single bounded pass suffices.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::storage::{StorageError, StorageProvider, StorageResult};

/// One key that could not be deleted, with the error that stopped it.
#[derive(Debug)]
pub struct DeleteFailure {
    pub key: String,
    pub error: StorageError,
}

/// Outcome of a recursive directory deletion.
///
/// Deletion is best-effort: keys that could not be removed are collected in
/// `failed` instead of aborting the pass, so callers decide their own
/// escalation policy.
#[derive(Debug, Default)]
pub struct DeleteReport {
    /// Keys removed by this call, including the directory marker if one
    /// existed.
    pub deleted: Vec<String>,

    /// Keys that remain because their deletion failed.
    pub failed: Vec<DeleteFailure>,

    /// Whether a directory marker blob was found and removed.
    pub marker_removed: bool,
}

impl DeleteReport {
    /// True when every targeted key was removed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Delete every blob under the separator-bounded prefix of `directory_path`,
/// then the directory marker blob itself.
///
/// Prefixes are evaluated per path segment, so a sibling key that merely
/// shares a string prefix (`ab` next to directory `a`) is never touched.
/// `NotFound` on an individual key means a concurrent deleter got there
/// first and is skipped silently; every other per-key failure is recorded
/// and logged. Only a failure of the initial listing is escalated, since
/// then nothing is known to delete.
pub(crate) async fn delete_directory(
    store: &Arc<dyn StorageProvider>,
    directory_path: &str,
) -> StorageResult<DeleteReport> {
    let bare = directory_path.trim_end_matches('/');
    if bare.is_empty() {
        return Err(StorageError::ConfigError(
            "directory path must be non-empty".to_string(),
        ));
    }

    let mut entries = store.list_blobs(bare).await?;
    info!(
        "Deleting directory, prefix={}, count={}",
        bare,
        entries.len()
    );

    // Deepest keys first, so nested directory markers go after their
    // contents.
    entries.sort_by(|a, b| {
        let depth = |key: &str| key.matches('/').count();
        depth(&b.key)
            .cmp(&depth(&a.key))
            .then_with(|| b.key.cmp(&a.key))
    });

    let mut report = DeleteReport::default();
    for entry in entries {
        match store.delete_blob(&entry.key).await {
            Ok(()) => {
                debug!("Deleted key={}", entry.key);
                report.deleted.push(entry.key);
            }
            Err(e) if e.is_not_found() => {
                debug!("Already gone, key={}", entry.key);
            }
            Err(e) => {
                warn!("Could not delete key={}: {}", entry.key, e);
                report.failed.push(DeleteFailure {
                    key: entry.key,
                    error: e,
                });
            }
        }
    }

    // The marker is a blob whose key equals the directory path itself; it is
    // not under the prefix, so it needs its own probe.
    match store.exists(bare).await {
        Ok(true) => match store.delete_blob(bare).await {
            Ok(()) => {
                debug!("Deleted directory marker, key={}", bare);
                report.marker_removed = true;
                report.deleted.push(bare.to_string());
            }
            Err(e) if e.is_not_found() => {
                debug!("Directory marker already gone, key={}", bare);
            }
            Err(e) => {
                warn!("Could not delete directory marker key={}: {}", bare, e);
                report.failed.push(DeleteFailure {
                    key: bare.to_string(),
                    error: e,
                });
            }
        },
        Ok(false) => {
            debug!("No directory marker found, key={}", bare);
        }
        Err(e) => {
            warn!("Could not check directory marker key={}: {}", bare, e);
            report.failed.push(DeleteFailure {
                key: bare.to_string(),
                error: e,
            });
        }
    }

    info!(
        "Directory delete finished, prefix={}, deleted={}, failed={}, marker_removed={}",
        bare,
        report.deleted.len(),
        report.failed.len(),
        report.marker_removed
    );

    Ok(report)
}
