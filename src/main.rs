use std::error::Error;
use tracing::info;

use blob_helper::{BlobHelper, StorageConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting Blob Helper");

    let container = "";
    let account_name = "";
    let access_key = "";
    let folder = "tmp/scratch";

    let storage_config = StorageConfig::azure()
        .with_option("container", container)
        .with_option("account_name", account_name)
        .with_option("access_key", access_key);
    let helper = BlobHelper::builder(storage_config).build().await?;

    for subdir in helper.list_subdirectories(".").await? {
        println!("{}", subdir);
    }

    let report = helper.delete_directory(folder).await?;
    println!(
        "deleted={}, failed={}, marker_removed={}",
        report.deleted.len(),
        report.failed.len(),
        report.marker_removed
    );
    for failure in &report.failed {
        println!("could not delete {}: {}", failure.key, failure.error);
    }

    Ok(())
}
