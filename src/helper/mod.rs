//! Directory-like conveniences over a flat blob namespace
//!
//! Object stores have no native directory concept: a "folder" is whatever
//! shares a key prefix, plus (for some tools) a zero-byte marker blob named
//! like the folder itself. [`BlobHelper`] wraps a [`StorageProvider`] with
//! the operations that emulate hierarchy on top of that, from subdirectory
//! listing and rename via copy-and-delete to recursive deletion.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};

use crate::storage::{
    BlobEntry, StorageConfig, StorageProvider, StorageProviderFactory, StorageResult,
};

pub mod delete;

pub use delete::{DeleteFailure, DeleteReport};

/// Builder for constructing a `BlobHelper` instance.
///
/// # Examples
///
/// ```no_run
/// use blob_helper::{BlobHelper, StorageConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
/// let storage_config = StorageConfig::azure()
///     .with_option("container", "my-container")
///     .with_option("account_name", "my-account")
///     .with_option("access_key", "ACCOUNT_KEY");
///
/// let helper = BlobHelper::builder(storage_config).build().await?;
/// # Ok(())
/// # }
/// ```
pub struct BlobHelperBuilder {
    config: StorageConfig,
}

impl BlobHelperBuilder {
    /// Creates a new `BlobHelperBuilder` with the given storage configuration.
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Builds the `BlobHelper` instance.
    ///
    /// Performs the async initialization of the storage provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub async fn build(self) -> StorageResult<BlobHelper> {
        let storage_provider = StorageProviderFactory::from_config(self.config).await?;
        Ok(BlobHelper { storage_provider })
    }
}

/// Convenience wrapper exposing directory-like semantics over flat blob
/// storage.
///
/// Every operation delegates to the underlying store with light path
/// massaging; no state is held locally, so each call sees the store's
/// current contents.
///
/// # Examples
///
/// ```no_run
/// use blob_helper::{BlobHelper, StorageConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
/// let config = StorageConfig::local().with_option("path", "./data");
/// let helper = BlobHelper::builder(config).build().await?;
///
/// for folder in helper.list_subdirectories(".").await? {
///     println!("{}", folder);
/// }
///
/// let report = helper.delete_directory("scratch/old-run").await?;
/// println!("removed {} blobs", report.deleted.len());
/// # Ok(())
/// # }
/// ```
pub struct BlobHelper {
    storage_provider: Arc<dyn StorageProvider>,
}

impl BlobHelper {
    /// Creates a new `BlobHelperBuilder` for constructing a `BlobHelper`.
    pub fn builder(config: StorageConfig) -> BlobHelperBuilder {
        BlobHelperBuilder::new(config)
    }

    /// Validate connectivity and credentials against the underlying store.
    pub async fn validate_connection(&self) -> StorageResult<()> {
        self.storage_provider.validate_connection().await
    }

    /// List all blobs under a prefix, recursively.
    ///
    /// An empty prefix lists the entire container.
    pub async fn list_blobs(&self, prefix: &str) -> StorageResult<Vec<BlobEntry>> {
        self.storage_provider.list_blobs(prefix).await
    }

    /// List the folder-like prefixes directly under `folder`.
    ///
    /// `"."` and `""` both mean the container root. Returned paths carry no
    /// trailing separator.
    pub async fn list_subdirectories(&self, folder: &str) -> StorageResult<Vec<String>> {
        let prefix = if folder == "." { "" } else { folder };
        self.storage_provider.list_prefixes(prefix).await
    }

    /// Search for blobs whose key contains `keyword`, optionally limited to
    /// the blobs under `path`.
    pub async fn search_by_name(&self, keyword: &str, path: &str) -> StorageResult<Vec<String>> {
        let entries = self.storage_provider.list_blobs(path).await?;
        Ok(entries
            .into_iter()
            .map(|e| e.key)
            .filter(|key| key.contains(keyword))
            .collect())
    }

    /// Read the full contents of a blob.
    pub async fn read(&self, path: &str) -> StorageResult<Bytes> {
        self.storage_provider.read_blob(path).await
    }

    /// Read a blob and decode it as UTF-8 text.
    pub async fn read_to_string(&self, path: &str) -> StorageResult<String> {
        let data = self.storage_provider.read_blob(path).await?;
        Ok(String::from_utf8(data.to_vec())?)
    }

    /// Download a blob to a local file, replacing any existing file.
    pub async fn download_to_file(
        &self,
        path: &str,
        local_path: impl AsRef<Path>,
    ) -> StorageResult<()> {
        let data = self.storage_provider.read_blob(path).await?;
        tokio::fs::write(local_path.as_ref(), &data).await?;
        debug!(
            "Downloaded key={} to {}",
            path,
            local_path.as_ref().display()
        );
        Ok(())
    }

    /// Upload a local file to the given blob path, replacing any existing
    /// blob.
    pub async fn upload_file(
        &self,
        local_path: impl AsRef<Path>,
        path: &str,
    ) -> StorageResult<()> {
        let data = tokio::fs::read(local_path.as_ref()).await?;
        self.storage_provider
            .write_blob(path, Bytes::from(data))
            .await?;
        debug!(
            "Uploaded {} to key={}",
            local_path.as_ref().display(),
            path
        );
        Ok(())
    }

    /// Write bytes to the given blob path, replacing any existing blob.
    pub async fn write(&self, path: &str, data: Bytes) -> StorageResult<()> {
        self.storage_provider.write_blob(path, data).await
    }

    /// Server-side copy of a blob to a new key.
    pub async fn copy(&self, src: &str, dst: &str) -> StorageResult<()> {
        self.storage_provider.copy_blob(src, dst).await
    }

    /// Rename a blob by copying it to the target key and deleting the
    /// original. Flat stores have no rename primitive, so this is two store
    /// operations and is not atomic: if the delete fails the source remains
    /// alongside the copy.
    pub async fn rename(&self, src: &str, dst: &str) -> StorageResult<()> {
        self.storage_provider.copy_blob(src, dst).await?;
        self.storage_provider.delete_blob(src).await?;
        info!("Renamed key={} to key={}", src, dst);
        Ok(())
    }

    /// Check if a blob exists.
    pub async fn exists(&self, path: &str) -> StorageResult<bool> {
        self.storage_provider.exists(path).await
    }

    /// Delete a single blob.
    ///
    /// Returns `true` if the blob was deleted, `false` if it did not exist.
    /// Other failures propagate as errors.
    pub async fn delete_blob(&self, path: &str) -> StorageResult<bool> {
        match self.storage_provider.delete_blob(path).await {
            Ok(()) => {
                debug!("Deleted key={}", path);
                Ok(true)
            }
            Err(e) if e.is_not_found() => {
                debug!("Blob does not exist, key={}", path);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Recursively delete everything under a directory-like prefix, then the
    /// directory marker blob itself.
    ///
    /// Best-effort: per-key failures are collected in the returned
    /// [`DeleteReport`] rather than aborting the pass. The only escalated
    /// error is a failure of the initial listing, when nothing is known to
    /// delete. There is no atomicity: a concurrent writer can repopulate the
    /// prefix mid-pass, so callers needing certainty should re-list
    /// afterwards.
    pub async fn delete_directory(&self, directory_path: &str) -> StorageResult<DeleteReport> {
        delete::delete_directory(&self.storage_provider, directory_path).await
    }
}
