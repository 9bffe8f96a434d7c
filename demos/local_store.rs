use blob_helper::{BlobHelper, StorageConfig};
use bytes::Bytes;

#[tokio::main]
async fn main() {
    std::fs::create_dir_all("./demos/data").unwrap();

    let storage_config = StorageConfig::local().with_option("path", "./demos/data");
    let helper = BlobHelper::builder(storage_config).build().await.unwrap();

    // Populate a folder-like prefix
    helper
        .write("scratch/notes/a.txt", Bytes::from("hello"))
        .await
        .unwrap();
    helper
        .write("scratch/notes/b.txt", Bytes::from("world"))
        .await
        .unwrap();

    for folder in helper.list_subdirectories(".").await.unwrap() {
        println!("{}", folder);
    }

    // Recursively delete it again
    let report = helper.delete_directory("scratch").await.unwrap();
    println!(
        "deleted={}, failed={}",
        report.deleted.len(),
        report.failed.len()
    );
}
