// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.
//
// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use super::config::{StorageConfig, StorageType};
use super::error::{StorageError, StorageResult};
use super::provider::{string_to_path, BlobEntry, StorageProvider};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use object_store::{
    aws::AmazonS3Builder, azure::MicrosoftAzureBuilder, gcp::GoogleCloudStorageBuilder,
    local::LocalFileSystem, memory::InMemory, ClientOptions, ObjectStore, RetryConfig,
};
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Generic storage provider that works with any object_store backend
pub struct ObjectStoreProvider {
    pub config: StorageConfig,
    pub store: Arc<dyn ObjectStore>,
    pub base_path: String,
}

impl ObjectStoreProvider {
    /// Create a new storage provider from configuration.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The storage configuration is invalid
    /// * Required configuration options are missing
    /// * The storage backend cannot be created (e.g., invalid credentials)
    pub async fn new(config: StorageConfig) -> StorageResult<Self> {
        let (store, base_path) = Self::build_store(&config)?;

        Ok(Self {
            config,
            store: Arc::new(store),
            base_path,
        })
    }

    /// Build the appropriate object store based on configuration.
    fn build_store(config: &StorageConfig) -> StorageResult<(Box<dyn ObjectStore>, String)> {
        match config.storage_type {
            StorageType::Local => Self::build_local_store(config),
            StorageType::Memory => Self::build_memory_store(),
            StorageType::Aws => Self::build_aws_store(config),
            StorageType::Azure => Self::build_azure_store(config),
            StorageType::Gcs => Self::build_gcs_store(config),
        }
    }

    /// Build a local filesystem store rooted at the configured 'path'.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The 'path' option is missing from configuration
    /// * The path cannot be canonicalized (doesn't exist or permission denied)
    /// * The path is not a directory
    fn build_local_store(config: &StorageConfig) -> StorageResult<(Box<dyn ObjectStore>, String)> {
        let path = config.options.get("path").ok_or_else(|| {
            StorageError::ConfigError("Local storage requires 'path' option".to_string())
        })?;
        let base_path = PathBuf::from(path);

        // Canonicalize the path (handles both relative and absolute paths, resolves symlinks)
        let canonical_path = base_path.canonicalize().map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to resolve path '{}': {} (path must exist)",
                path, e
            ))
        })?;

        if !canonical_path.is_dir() {
            return Err(StorageError::ConfigError(format!(
                "Base path is not a directory: {}",
                canonical_path.display()
            )));
        }

        let store = LocalFileSystem::new_with_prefix(&canonical_path).map_err(|e| {
            StorageError::ConfigError(format!("Failed to create local store: {}", e))
        })?;

        let base_path_str = canonical_path.to_string_lossy().to_string();
        Ok((Box::new(store), base_path_str))
    }

    /// Build an in-memory store. Keys form a genuinely flat namespace, so a
    /// blob and a "directory" of the same name can coexist.
    fn build_memory_store() -> StorageResult<(Box<dyn ObjectStore>, String)> {
        Ok((Box::new(InMemory::new()), "memory://".to_string()))
    }

    /// Build connection options from configuration.
    fn build_connection_options(config: &StorageConfig) -> ClientOptions {
        let mut client_options = ClientOptions::default();
        if let Some(timeout_str) = config.options.get("timeout") {
            if timeout_str == "0" || timeout_str == "disabled" {
                client_options = client_options.with_timeout_disabled();
            } else if let Ok(sec) = timeout_str.parse::<u64>() {
                client_options = client_options.with_timeout(Duration::from_secs(sec))
            }
        };
        if let Some(connect_timeout_str) = config.options.get("connect_timeout") {
            if connect_timeout_str == "0" || connect_timeout_str == "disabled" {
                client_options = client_options.with_connect_timeout_disabled();
            } else if let Ok(sec) = connect_timeout_str.parse::<u64>() {
                client_options = client_options.with_connect_timeout(Duration::from_secs(sec))
            }
        }
        if let Some(pool_idle_timeout_str) = config.options.get("pool_idle_timeout") {
            if let Ok(sec) = pool_idle_timeout_str.parse::<u64>() {
                client_options = client_options.with_pool_idle_timeout(Duration::from_secs(sec))
            }
        }
        if let Some(pool_max_idle_per_host_str) = config.options.get("pool_max_idle_per_host") {
            if let Ok(max_idle) = pool_max_idle_per_host_str.parse::<usize>() {
                client_options = client_options.with_pool_max_idle_per_host(max_idle)
            }
        }
        client_options
    }

    /// Build retry options from configuration. Retry stays inside the
    /// object_store client; this crate adds no retry loop of its own.
    fn build_retry_options(config: &StorageConfig) -> RetryConfig {
        let default_retry_config = RetryConfig::default();
        let max_retries = config
            .options
            .get("max_retries")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(default_retry_config.max_retries);
        let retry_timeout = config
            .options
            .get("retry_timeout")
            .and_then(|s| Some(Duration::from_secs(s.parse::<u64>().ok()?)))
            .unwrap_or(default_retry_config.retry_timeout);
        RetryConfig {
            backoff: Default::default(),
            max_retries,
            retry_timeout,
        }
    }

    /// Build an AWS S3 store from the configured options.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * Required S3 configuration options are missing
    /// * The S3 store cannot be initialized
    fn build_aws_store(config: &StorageConfig) -> StorageResult<(Box<dyn ObjectStore>, String)> {
        let mut builder = AmazonS3Builder::new()
            .with_client_options(Self::build_connection_options(config))
            .with_retry(Self::build_retry_options(config));
        let mut bucket: Option<&String> = None;
        let mut endpoint: Option<&String> = None;

        // Apply configuration options
        for (key, value) in &config.options {
            match key.as_str() {
                "bucket" => {
                    bucket = Some(value);
                    builder = builder.with_bucket_name(value);
                }
                "region" => builder = builder.with_region(value),
                "access_key_id" => builder = builder.with_access_key_id(value),
                "secret_access_key" => builder = builder.with_secret_access_key(value),
                "session_token" | "token" => builder = builder.with_token(value),
                "endpoint" => {
                    endpoint = Some(value);
                    builder = builder.with_endpoint(value);
                }
                "allow_http" => {
                    if value.to_lowercase() == "true" {
                        builder = builder.with_allow_http(true);
                    }
                }
                // Already handled by `build_connection_options` and `build_retry_options`
                "timeout"
                | "connect_timeout"
                | "max_retries"
                | "retry_timeout"
                | "pool_idle_timeout"
                | "pool_max_idle_per_host" => (),
                _ => {
                    tracing::warn!("Unknown AWS S3 option: {}", key);
                }
            }
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(format!("Failed to create S3 store: {}", e)))?;

        // Construct base URL
        let base_url = if let Some(endpoint_url) = endpoint {
            endpoint_url.trim_end_matches('/').to_string()
        } else if let Some(bucket_name) = bucket {
            format!("s3://{}", bucket_name)
        } else {
            "s3://".to_string()
        };

        Ok((Box::new(store), base_url))
    }

    /// Build an Azure Blob Storage store from the configured options.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The 'account_name' or 'container' option is missing
    /// * The Azure store cannot be initialized
    fn build_azure_store(config: &StorageConfig) -> StorageResult<(Box<dyn ObjectStore>, String)> {
        let mut builder = MicrosoftAzureBuilder::new()
            .with_client_options(Self::build_connection_options(config))
            .with_retry(Self::build_retry_options(config));

        // Account name and container are required for Azure
        let account_name = config.get_option("account_name").ok_or_else(|| {
            StorageError::ConfigError("Azure requires 'account_name' option".to_string())
        })?;
        let container = config.get_option("container").ok_or_else(|| {
            StorageError::ConfigError("Azure requires 'container' option".to_string())
        })?;

        builder = builder
            .with_account(account_name)
            .with_container_name(container);

        let mut custom_endpoint: Option<&String> = None;

        // Apply configuration options
        for (key, value) in &config.options {
            match key.as_str() {
                // Applied above
                "container" | "account_name" => (),
                "access_key" | "account_key" => builder = builder.with_access_key(value),
                "sas_token" => {
                    // Parse SAS token query parameters
                    let pairs: Vec<(String, String)> = value
                        .trim_start_matches('?')
                        .split('&')
                        .filter_map(|pair| {
                            let mut parts = pair.split('=');
                            match (parts.next(), parts.next()) {
                                (Some(k), Some(v)) => Some((k.to_string(), v.to_string())),
                                _ => None,
                            }
                        })
                        .collect();
                    builder = builder.with_sas_authorization(pairs);
                }
                "tenant_id" => builder = builder.with_tenant_id(value),
                "client_id" => builder = builder.with_client_id(value),
                "client_secret" => builder = builder.with_client_secret(value),
                "endpoint" => {
                    custom_endpoint = Some(value);
                    builder = builder.with_endpoint(value.clone());
                }
                // Already handled by `build_connection_options` and `build_retry_options`
                "timeout"
                | "connect_timeout"
                | "max_retries"
                | "retry_timeout"
                | "pool_idle_timeout"
                | "pool_max_idle_per_host" => (),
                _ => {
                    tracing::info!("Unknown Azure option: {}", key);
                }
            }
        }

        let store = builder.build().map_err(|e| {
            StorageError::ConfigError(format!("Failed to create Azure store: {}", e))
        })?;

        // Construct base URL
        let base_url = if let Some(endpoint) = custom_endpoint {
            endpoint.trim_end_matches('/').to_string()
        } else {
            format!(
                "https://{}.blob.core.windows.net/{}",
                account_name, container
            )
        };

        Ok((Box::new(store), base_url))
    }

    /// Build a GCS store from the configured options.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * Required GCS configuration options are missing
    /// * The GCS store cannot be initialized
    fn build_gcs_store(config: &StorageConfig) -> StorageResult<(Box<dyn ObjectStore>, String)> {
        let mut builder = GoogleCloudStorageBuilder::new()
            .with_client_options(Self::build_connection_options(config))
            .with_retry(Self::build_retry_options(config));
        let mut bucket: Option<&String> = None;

        // Apply configuration options
        for (key, value) in &config.options {
            match key.as_str() {
                "bucket" => {
                    bucket = Some(value);
                    builder = builder.with_bucket_name(value);
                }
                "service_account_key_path" => builder = builder.with_service_account_path(value),
                "service_account_key" => builder = builder.with_service_account_key(value),
                // Already handled by `build_connection_options` and `build_retry_options`
                "timeout"
                | "connect_timeout"
                | "max_retries"
                | "retry_timeout"
                | "pool_idle_timeout"
                | "pool_max_idle_per_host" => (),
                _ => {
                    tracing::warn!("Unknown GCS option: {}", key);
                }
            }
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(format!("Failed to create GCS store: {}", e)))?;

        // Construct base URL
        let base_url = if let Some(bucket_name) = bucket {
            format!("gs://{}", bucket_name)
        } else {
            "gs://".to_string()
        };

        Ok((Box::new(store), base_url))
    }

    fn object_path(path: &str) -> Option<object_store::path::Path> {
        if path.is_empty() {
            None
        } else {
            Some(string_to_path(path))
        }
    }
}

#[async_trait]
impl StorageProvider for ObjectStoreProvider {
    fn base_path(&self) -> &str {
        &self.base_path
    }

    async fn validate_connection(&self) -> StorageResult<()> {
        // For local filesystem, check if the base path is accessible
        if self.config.storage_type == StorageType::Local {
            let path = PathBuf::from(&self.base_path);
            return if path.exists() && path.is_dir() {
                Ok(())
            } else {
                Err(StorageError::ConnectionError(format!(
                    "Base path is not accessible: {}",
                    self.base_path
                )))
            };
        }

        // For other backends, list objects at the root to validate access
        self.store.list_with_delimiter(None).await?;
        Ok(())
    }

    async fn list_blobs(&self, prefix: &str) -> StorageResult<Vec<BlobEntry>> {
        let object_path = Self::object_path(prefix);
        let mut entries = Vec::new();
        let mut stream = self.store.list(object_path.as_ref());

        while let Some(meta) = stream.next().await {
            let meta = meta?;
            entries.push(BlobEntry {
                key: meta.location.to_string(),
                size: meta.size,
                last_modified: Some(meta.last_modified),
            });
        }

        Ok(entries)
    }

    async fn list_prefixes(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let object_path = Self::object_path(prefix);
        let list_result = self.store.list_with_delimiter(object_path.as_ref()).await?;

        Ok(list_result
            .common_prefixes
            .iter()
            .map(|prefix| prefix.to_string())
            .collect())
    }

    async fn read_blob(&self, path: &str) -> StorageResult<Bytes> {
        let object_path = string_to_path(path);
        let result = self.store.get(&object_path).await?;
        Ok(result.bytes().await?)
    }

    async fn write_blob(&self, path: &str, data: Bytes) -> StorageResult<()> {
        let object_path = string_to_path(path);
        self.store.put(&object_path, data.into()).await?;
        Ok(())
    }

    async fn copy_blob(&self, src: &str, dst: &str) -> StorageResult<()> {
        let src_path = string_to_path(src);
        let dst_path = string_to_path(dst);
        self.store.copy(&src_path, &dst_path).await?;
        Ok(())
    }

    async fn delete_blob(&self, path: &str) -> StorageResult<()> {
        let object_path = string_to_path(path);
        self.store.delete(&object_path).await?;
        Ok(())
    }

    async fn exists(&self, path: &str) -> StorageResult<bool> {
        let object_path = string_to_path(path);
        match self.store.head(&object_path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_metadata(&self, path: &str) -> StorageResult<BlobEntry> {
        let object_path = string_to_path(path);
        let meta = self.store.head(&object_path).await?;

        Ok(BlobEntry {
            key: meta.location.to_string(),
            size: meta.size,
            last_modified: Some(meta.last_modified),
        })
    }
}

impl Debug for ObjectStoreProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StorageProvider(type={}, base_path={})",
            self.config.storage_type_str(),
            self.base_path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    async fn local_provider(temp_dir: &TempDir) -> ObjectStoreProvider {
        let config =
            StorageConfig::local().with_option("path", temp_dir.path().to_str().unwrap());
        ObjectStoreProvider::new(config).await.unwrap()
    }

    async fn memory_provider() -> ObjectStoreProvider {
        ObjectStoreProvider::new(StorageConfig::memory())
            .await
            .unwrap()
    }

    #[test]
    fn test_build_connection_options_default() {
        let config = StorageConfig::local();
        let _options = ObjectStoreProvider::build_connection_options(&config);
        // No assertion, just make sure it does not panic
    }

    #[test]
    fn test_build_connection_options_disabled_timeout() {
        let config = StorageConfig::local()
            .with_option("timeout", "disabled")
            .with_option("connect_timeout", "0");

        let _options = ObjectStoreProvider::build_connection_options(&config);
        // No assertion, just make sure it does not panic
    }

    #[test]
    fn test_build_connection_options_invalid_values() {
        let config = StorageConfig::local()
            .with_option("timeout", "invalid")
            .with_option("pool_max_idle_per_host", "not_a_number");

        // Should handle invalid values gracefully
        let _options = ObjectStoreProvider::build_connection_options(&config);
    }

    #[test]
    fn test_build_retry_options_custom() {
        let config = StorageConfig::local()
            .with_option("max_retries", "5")
            .with_option("retry_timeout", "300");

        let retry_config = ObjectStoreProvider::build_retry_options(&config);
        assert_eq!(retry_config.max_retries, 5);
        assert_eq!(retry_config.retry_timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_build_retry_options_invalid_values() {
        let config = StorageConfig::local()
            .with_option("max_retries", "invalid")
            .with_option("retry_timeout", "not_a_number");

        let retry_config = ObjectStoreProvider::build_retry_options(&config);
        // Should fall back to defaults
        assert!(retry_config.max_retries > 0);
    }

    #[tokio::test]
    async fn test_new_local_provider() {
        let temp_dir = TempDir::new().unwrap();
        let provider = local_provider(&temp_dir).await;

        let canonical_temp = temp_dir
            .path()
            .canonicalize()
            .unwrap()
            .to_string_lossy()
            .to_string();
        assert!(
            provider.base_path.contains(&canonical_temp),
            "base_path '{}' should contain '{}'",
            provider.base_path,
            canonical_temp
        );
        assert_eq!(provider.config.storage_type, StorageType::Local);
    }

    #[tokio::test]
    async fn test_new_local_provider_invalid_path() {
        let config = StorageConfig::local().with_option("path", "/nonexistent/invalid/path");
        let provider = ObjectStoreProvider::new(config).await;

        match provider {
            Err(StorageError::ConfigError(msg)) => {
                assert!(msg.contains("Failed to resolve path"));
            }
            _ => panic!("Expected ConfigError"),
        }
    }

    #[tokio::test]
    async fn test_new_local_provider_missing_path() {
        let config = StorageConfig::local();
        let provider = ObjectStoreProvider::new(config).await;

        match provider {
            Err(StorageError::ConfigError(msg)) => {
                assert!(msg.contains("path"));
            }
            _ => panic!("Expected ConfigError for missing path"),
        }
    }

    #[tokio::test]
    async fn test_new_local_provider_file_not_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test_file.txt");
        fs::write(&file_path, "test content").unwrap();

        let config = StorageConfig::local().with_option("path", file_path.to_str().unwrap());
        let provider = ObjectStoreProvider::new(config).await;

        match provider {
            Err(StorageError::ConfigError(msg)) => {
                assert!(msg.contains("not a directory"));
            }
            _ => panic!("Expected ConfigError for file instead of directory"),
        }
    }

    #[tokio::test]
    async fn test_azure_provider_missing_account() {
        let config = StorageConfig::azure().with_option("container", "c");
        let provider = ObjectStoreProvider::new(config).await;

        match provider {
            Err(StorageError::ConfigError(msg)) => {
                assert!(msg.contains("account_name"));
            }
            _ => panic!("Expected ConfigError for missing account_name"),
        }
    }

    #[tokio::test]
    async fn test_azure_provider_missing_container() {
        let config = StorageConfig::azure().with_option("account_name", "acct");
        let provider = ObjectStoreProvider::new(config).await;

        match provider {
            Err(StorageError::ConfigError(msg)) => {
                assert!(msg.contains("container"));
            }
            _ => panic!("Expected ConfigError for missing container"),
        }
    }

    #[tokio::test]
    async fn test_azure_provider_base_url() {
        let config = StorageConfig::azure()
            .with_option("account_name", "acct")
            .with_option("container", "data")
            .with_option("access_key", "a2V5");
        let provider = ObjectStoreProvider::new(config).await.unwrap();

        assert_eq!(
            provider.base_path(),
            "https://acct.blob.core.windows.net/data"
        );
    }

    #[tokio::test]
    async fn test_validate_connection_local() {
        let temp_dir = TempDir::new().unwrap();
        let provider = local_provider(&temp_dir).await;

        assert!(provider.validate_connection().await.is_ok());
    }

    #[tokio::test]
    async fn test_validate_connection_memory() {
        let provider = memory_provider().await;
        assert!(provider.validate_connection().await.is_ok());
    }

    #[tokio::test]
    async fn test_write_then_read_blob() {
        let provider = memory_provider().await;

        provider
            .write_blob("folder/data.txt", Bytes::from("Hello, World!"))
            .await
            .unwrap();

        let content = provider.read_blob("folder/data.txt").await.unwrap();
        assert_eq!(content, Bytes::from("Hello, World!"));
    }

    #[tokio::test]
    async fn test_read_blob_nonexistent() {
        let provider = memory_provider().await;

        let result = provider.read_blob("nonexistent.txt").await;
        match result {
            Err(e) => assert!(e.is_not_found()),
            Ok(_) => panic!("Expected NotFound"),
        }
    }

    #[tokio::test]
    async fn test_local_read_file() {
        let temp_dir = TempDir::new().unwrap();
        let test_content = b"Hello, World!";
        fs::write(temp_dir.path().join("test.txt"), test_content).unwrap();

        let provider = local_provider(&temp_dir).await;

        let content = provider.read_blob("test.txt").await.unwrap();
        assert_eq!(content.as_ref(), test_content);
    }

    #[tokio::test]
    async fn test_exists() {
        let provider = memory_provider().await;
        provider
            .write_blob("exists.txt", Bytes::from("content"))
            .await
            .unwrap();

        assert!(provider.exists("exists.txt").await.unwrap());
        assert!(!provider.exists("nonexistent.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_metadata() {
        let provider = memory_provider().await;
        let content = Bytes::from("Test content for metadata");
        provider
            .write_blob("metadata.txt", content.clone())
            .await
            .unwrap();

        let entry = provider.get_metadata("metadata.txt").await.unwrap();
        assert_eq!(entry.key, "metadata.txt");
        assert_eq!(entry.size, content.len() as u64);
        assert!(entry.last_modified.is_some());
    }

    #[tokio::test]
    async fn test_copy_blob() {
        let provider = memory_provider().await;
        provider
            .write_blob("src.txt", Bytes::from("payload"))
            .await
            .unwrap();

        provider.copy_blob("src.txt", "dst.txt").await.unwrap();

        assert!(provider.exists("src.txt").await.unwrap());
        let copied = provider.read_blob("dst.txt").await.unwrap();
        assert_eq!(copied, Bytes::from("payload"));
    }

    #[tokio::test]
    async fn test_delete_blob() {
        let provider = memory_provider().await;
        provider
            .write_blob("doomed.txt", Bytes::from("x"))
            .await
            .unwrap();

        provider.delete_blob("doomed.txt").await.unwrap();
        assert!(!provider.exists("doomed.txt").await.unwrap());

        let again = provider.delete_blob("doomed.txt").await;
        match again {
            Err(e) => assert!(e.is_not_found()),
            Ok(_) => panic!("Expected NotFound on double delete"),
        }
    }

    #[tokio::test]
    async fn test_list_blobs_is_segment_bounded() {
        let provider = memory_provider().await;
        for key in ["a", "a/b.txt", "a/c/d.txt", "ab"] {
            provider.write_blob(key, Bytes::from("x")).await.unwrap();
        }

        let keys: Vec<String> = provider
            .list_blobs("a")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.key)
            .collect();

        // Neither the sibling "ab" nor the marker blob "a" itself is under
        // the prefix "a".
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"a/b.txt".to_string()));
        assert!(keys.contains(&"a/c/d.txt".to_string()));
    }

    #[tokio::test]
    async fn test_list_blobs_empty_prefix_lists_all() {
        let provider = memory_provider().await;
        for key in ["one.txt", "two/three.txt"] {
            provider.write_blob(key, Bytes::from("x")).await.unwrap();
        }

        let entries = provider.list_blobs("").await.unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn test_list_prefixes() {
        let provider = memory_provider().await;
        for key in ["p1/a.txt", "p2/b.txt", "root.txt", "p1/nested/c.txt"] {
            provider.write_blob(key, Bytes::from("x")).await.unwrap();
        }

        let prefixes = provider.list_prefixes("").await.unwrap();
        assert_eq!(prefixes.len(), 2);
        assert!(prefixes.contains(&"p1".to_string()));
        assert!(prefixes.contains(&"p2".to_string()));

        let nested = provider.list_prefixes("p1").await.unwrap();
        assert_eq!(nested, vec!["p1/nested".to_string()]);
    }

    #[tokio::test]
    async fn test_local_list_prefixes() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("sub1")).unwrap();
        fs::write(temp_dir.path().join("sub1/f.txt"), "x").unwrap();
        fs::create_dir(temp_dir.path().join("sub2")).unwrap();
        fs::write(temp_dir.path().join("sub2/g.txt"), "x").unwrap();

        let provider = local_provider(&temp_dir).await;

        let prefixes = provider.list_prefixes("").await.unwrap();
        assert_eq!(prefixes.len(), 2);
        assert!(prefixes.contains(&"sub1".to_string()));
        assert!(prefixes.contains(&"sub2".to_string()));
    }

    #[tokio::test]
    async fn test_marker_and_descendants_coexist_in_memory() {
        // A flat namespace allows the directory-marker blob "a" next to keys
        // below "a/"; a real filesystem cannot represent this.
        let provider = memory_provider().await;
        provider.write_blob("a", Bytes::new()).await.unwrap();
        provider
            .write_blob("a/b.txt", Bytes::from("x"))
            .await
            .unwrap();

        assert!(provider.exists("a").await.unwrap());
        assert!(provider.exists("a/b.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_provider_debug_format() {
        let provider = memory_provider().await;
        let debug_str = format!("{:?}", provider);
        assert!(debug_str.contains("StorageProvider"));
        assert!(debug_str.contains("memory"));
    }
}
