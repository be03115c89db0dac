use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tabular_ingest::config::{ProcessingLimits, UploadLimits};
use tabular_ingest::pipeline::Processor;
use tabular_ingest::storage::FsStore;
use tabular_ingest::types::{FileType, ProcessedDataset, Value};

fn tmp_name(ext: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("tabular-ingest-csv-{nanos}.{ext}")
}

fn processor() -> Processor {
    Processor::new(
        Arc::new(FsStore::new(std::env::temp_dir())),
        UploadLimits::default(),
        ProcessingLimits::default(),
    )
}

async fn process_bytes(ext: &str, bytes: &[u8]) -> ProcessedDataset {
    let name = tmp_name(ext);
    let path: PathBuf = std::env::temp_dir().join(&name);
    std::fs::write(&path, bytes).unwrap();
    let dataset = processor().process(Path::new(&name), ext).await.unwrap();
    let _ = std::fs::remove_file(&path);
    dataset
}

#[tokio::test]
async fn csv_happy_path() {
    let dataset = process_bytes("csv", b"Name,Age\nJohn,30\nJane,25").await;

    assert!(dataset.is_processed);
    assert_eq!(dataset.file_type, FileType::Csv);
    assert_eq!(dataset.row_count, 2);
    assert_eq!(dataset.column_count, 2);
    assert_eq!(dataset.schema.columns(), ["Name", "Age"]);
    assert_eq!(dataset.preview_data.len(), 2);
    assert_eq!(dataset.preview_data[0]["Name"], Value::Text("John".to_string()));
    assert_eq!(dataset.preview_data[1]["Age"], Value::Int(25));
    assert!(dataset.data_hash.is_some());
    assert!(dataset.processing_errors.is_none());
    assert!(!dataset.use_separate_table);
    assert!(dataset.processed_data.is_some());
}

#[tokio::test]
async fn csv_header_only_file_yields_zero_rows() {
    let dataset = process_bytes("csv", b"Name,Age\n").await;

    assert!(dataset.is_processed);
    assert_eq!(dataset.row_count, 0);
    assert_eq!(dataset.column_count, 2);
    assert_eq!(dataset.preview_data.len(), 0);
}

#[tokio::test]
async fn csv_fixture_on_disk() {
    let processor = Processor::new(
        Arc::new(FsStore::new("tests")),
        UploadLimits::default(),
        ProcessingLimits::default(),
    );
    let dataset = processor
        .process(Path::new("fixtures/people.csv"), "csv")
        .await
        .unwrap();
    assert_eq!(dataset.row_count, 2);
    assert_eq!(dataset.schema.columns(), ["Name", "Age"]);
}

#[tokio::test]
async fn tsv_extension_selects_the_csv_parser() {
    let dataset = process_bytes("tsv", b"Name\tAge\nJohn\t30\n").await;

    assert!(dataset.is_processed);
    assert_eq!(dataset.file_type, FileType::Csv);
    assert_eq!(dataset.schema.columns(), ["Name", "Age"]);
    assert_eq!(dataset.preview_data[0]["Age"], Value::Int(30));
}

#[tokio::test]
async fn ragged_csv_is_captured_not_thrown() {
    let dataset = process_bytes("csv", b"Name,Age\nJohn,30,extra\n").await;

    assert!(!dataset.is_processed);
    let message = dataset.processing_errors.expect("diagnostic message");
    assert!(message.contains("csv"));
    assert!(dataset.data_hash.is_none());
    assert_eq!(dataset.row_count, 0);
    assert!(dataset.preview_data.is_empty());
}
