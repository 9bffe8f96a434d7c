// Copyright 2022 Adobe. All rights reserved.
// This file is licensed to you under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License. You may obtain a copy
// of the License at http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under
// the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR REPRESENTATIONS
// OF ANY KIND, either express or implied. See the License for the specific language
// governing permissions and limitations under the License.

use async_trait::async_trait;
use bytes::Bytes;
use object_store::path::Path as ObjectPath;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use super::error::StorageResult;

/// A blob returned by a prefix listing
#[derive(Debug, Clone)]
pub struct BlobEntry {
    /// Full key of the blob; `/` is a conventional separator, directories are
    /// emergent from shared prefixes rather than a store concept
    pub key: String,

    /// Blob size in bytes
    pub size: u64,

    /// Last modified timestamp (if available)
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
}

/// Generic trait for cloud storage providers
///
/// This trait provides a unified interface for the blob operations the helper
/// layer is built on, across different storage backends (AWS S3, Azure Blob
/// Storage, GCS, local filesystem, in-memory).
///
/// Prefix arguments are evaluated per path segment: listing `"a"` covers
/// `a/b` and `a/c/d` but neither `ab` nor the blob `a` itself.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Get the base path/URL prefix for this storage provider.
    fn base_path(&self) -> &str;

    /// Validate the connection to the storage provider.
    ///
    /// Performs a simple operation to ensure credentials and connectivity
    /// work.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * Credentials are invalid or expired
    /// * Network connectivity issues occur
    /// * The configured base location is not accessible
    async fn validate_connection(&self) -> StorageResult<()>;

    /// List all blobs under the given prefix, recursively.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Key prefix to list under; empty lists the whole container
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(Vec<BlobEntry>)` - All blobs found under the prefix
    /// * `Err(StorageError)` - If listing fails
    async fn list_blobs(&self, prefix: &str) -> StorageResult<Vec<BlobEntry>>;

    /// List the immediate child prefixes ("subdirectories") under a prefix,
    /// using a delimiter listing rather than enumerating every key.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Key prefix to list under; empty lists the container root
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(Vec<String>)` - Child prefix paths, without trailing separator
    /// * `Err(StorageError)` - If listing fails
    async fn list_prefixes(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Read the full contents of a blob.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when the key is absent, or another
    /// `StorageError` on network and storage faults.
    async fn read_blob(&self, path: &str) -> StorageResult<Bytes>;

    /// Write the given bytes to a blob, replacing any existing content.
    async fn write_blob(&self, path: &str, data: Bytes) -> StorageResult<()>;

    /// Server-side copy of a blob to a new key, replacing any existing
    /// destination.
    async fn copy_blob(&self, src: &str, dst: &str) -> StorageResult<()>;

    /// Delete a single blob.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when the key is absent.
    async fn delete_blob(&self, path: &str) -> StorageResult<()>;

    /// Check if a blob exists.
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(true)` - The blob exists
    /// * `Ok(false)` - The blob does not exist
    /// * `Err(StorageError)` - If the existence check fails (not including NotFound)
    async fn exists(&self, path: &str) -> StorageResult<bool>;

    /// Get metadata for a specific blob.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when the key is absent.
    async fn get_metadata(&self, path: &str) -> StorageResult<BlobEntry>;
}

impl Debug for dyn StorageProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "StorageProvider(base_path={})", self.base_path())
    }
}

/// Helper function to create an ObjectPath from a string
pub(crate) fn string_to_path(s: &str) -> ObjectPath {
    ObjectPath::from(s)
}
