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

//! # Blob Helper
//!
//! A Rust library exposing directory-like semantics over flat cloud object
//! storage.
//!
//! Object stores have no real directories: a "folder" is whatever shares a
//! key prefix, plus (for folder-emulating tools) a zero-byte marker blob
//! named like the folder itself. Blob Helper wraps the `object_store` crate
//! with the conveniences that emulate hierarchy on top of that (listing
//! "subdirectories", renaming, searching, and recursive directory deletion)
//! across multiple storage backends (AWS S3, Azure Blob Storage, GCS, local
//! filesystem, in-memory).
//!
//! ## Features
//!
//! - **Multi-backend**: one configuration surface for S3, Azure, GCS, local
//!   filesystem, and in-memory stores
//! - **Directory emulation**: subdirectory listing via delimiter queries,
//!   rename via copy-and-delete, recursive prefix deletion with
//!   directory-marker cleanup
//! - **Structured outcomes**: recursive deletion reports removed and failed
//!   keys instead of aborting on the first fault
//!
//! ## Quick Start
//!
//! ### Local Filesystem Example
//!
//! ```rust,no_run
//! use blob_helper::{BlobHelper, StorageConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! // Configure storage for local filesystem
//! let config = StorageConfig::local()
//!     .with_option("path", "./data");
//!
//! let helper = BlobHelper::builder(config).build().await?;
//!
//! // List folder-like prefixes at the root
//! for folder in helper.list_subdirectories(".").await? {
//!     println!("{}", folder);
//! }
//!
//! // Recursively delete a directory and its marker blob
//! let report = helper.delete_directory("scratch/old-run").await?;
//! println!("removed {} blobs", report.deleted.len());
//! # Ok(())
//! # }
//! ```
//!
//! ### Azure Blob Storage Example
//!
//! ```rust,no_run
//! use blob_helper::{BlobHelper, StorageConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = StorageConfig::azure()
//!     .with_option("container", "my-container")
//!     .with_option("account_name", "my-account")
//!     .with_option("access_key", "ACCOUNT_KEY");
//!
//! let helper = BlobHelper::builder(config).build().await?;
//! let found = helper.search_by_name("report", "2026/07").await?;
//! println!("{:?}", found);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`helper`] - Directory-emulation facade and recursive deletion
//! - [`storage`] - Cloud storage abstraction layer

pub mod helper;
pub mod storage;

// Re-export commonly used types
pub use helper::{BlobHelper, DeleteFailure, DeleteReport};
pub use storage::{BlobEntry, StorageConfig, StorageError, StorageResult};
