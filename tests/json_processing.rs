use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tabular_ingest::config::{ProcessingLimits, UploadLimits};
use tabular_ingest::pipeline::Processor;
use tabular_ingest::storage::FsStore;
use tabular_ingest::types::{ProcessedDataset, Value};

fn tmp_name(ext: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("tabular-ingest-json-{nanos}.{ext}")
}

async fn process_bytes(ext: &str, bytes: &[u8]) -> ProcessedDataset {
    let name = tmp_name(ext);
    let path: PathBuf = std::env::temp_dir().join(&name);
    std::fs::write(&path, bytes).unwrap();
    let processor = Processor::new(
        Arc::new(FsStore::new(std::env::temp_dir())),
        UploadLimits::default(),
        ProcessingLimits::default(),
    );
    let dataset = processor.process(Path::new(&name), ext).await.unwrap();
    let _ = std::fs::remove_file(&path);
    dataset
}

#[tokio::test]
async fn single_object_is_one_row() {
    let dataset = process_bytes("json", br#"{"name":"John","age":30,"city":"NYC"}"#).await;

    assert!(dataset.is_processed);
    assert_eq!(dataset.row_count, 1);
    assert_eq!(dataset.column_count, 3);
    assert_eq!(dataset.schema.columns(), ["name", "age", "city"]);
    assert_eq!(dataset.preview_data[0]["age"], Value::Int(30));
}

#[tokio::test]
async fn array_of_objects_unions_keys() {
    let dataset =
        process_bytes("json", br#"[{"a":1,"b":2},{"b":3,"c":4},{"a":5}]"#).await;

    assert_eq!(dataset.row_count, 3);
    assert_eq!(dataset.schema.columns(), ["a", "b", "c"]);
    // Rows keep only their own keys; the union lives in the schema.
    assert!(!dataset.preview_data[1].contains_key("a"));
}

#[tokio::test]
async fn nested_values_stay_opaque() {
    let dataset =
        process_bytes("json", br#"[{"id":1,"user":{"name":"Ada","tags":["x"]}}]"#).await;

    assert_eq!(dataset.schema.columns(), ["id", "user"]);
    assert!(matches!(dataset.preview_data[0]["user"], Value::Nested(_)));
}

#[tokio::test]
async fn json_fixture_on_disk() {
    let processor = Processor::new(
        Arc::new(FsStore::new("tests")),
        UploadLimits::default(),
        ProcessingLimits::default(),
    );
    let dataset = processor
        .process(Path::new("fixtures/people.json"), "json")
        .await
        .unwrap();
    assert_eq!(dataset.row_count, 2);
    assert_eq!(dataset.schema.columns(), ["name", "age", "city"]);
}

#[tokio::test]
async fn invalid_json_is_captured_not_thrown() {
    let dataset = process_bytes("json", b"{broken").await;

    assert!(!dataset.is_processed);
    assert!(dataset.processing_errors.unwrap().contains("json"));
}

#[tokio::test]
async fn top_level_scalar_is_captured_not_thrown() {
    let dataset = process_bytes("json", b"42").await;

    assert!(!dataset.is_processed);
    assert!(dataset
        .processing_errors
        .unwrap()
        .contains("object or an array of objects"));
}

#[tokio::test]
async fn same_logical_content_hashes_identically_across_key_order() {
    let a = process_bytes("json", br#"[{"a":1,"b":"x"}]"#).await;
    let b = process_bytes("json", br#"[{"b":"x","a":1}]"#).await;

    // Key order is incidental formatting: the canonical hash strips it,
    // while the observed schema order differs.
    assert_eq!(a.data_hash, b.data_hash);
    assert_eq!(a.schema.columns(), ["a", "b"]);
    assert_eq!(b.schema.columns(), ["b", "a"]);
}
