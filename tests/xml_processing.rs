use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tabular_ingest::config::{ProcessingLimits, UploadLimits};
use tabular_ingest::pipeline::Processor;
use tabular_ingest::storage::FsStore;
use tabular_ingest::types::{FileType, ProcessedDataset, Value};

fn tmp_name() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("tabular-ingest-xml-{nanos}.xml")
}

async fn process_bytes(bytes: &[u8]) -> ProcessedDataset {
    let name = tmp_name();
    let path: PathBuf = std::env::temp_dir().join(&name);
    std::fs::write(&path, bytes).unwrap();
    let processor = Processor::new(
        Arc::new(FsStore::new(std::env::temp_dir())),
        UploadLimits::default(),
        ProcessingLimits::default(),
    );
    let dataset = processor.process(Path::new(&name), "xml").await.unwrap();
    let _ = std::fs::remove_file(&path);
    dataset
}

#[tokio::test]
async fn repeating_root_children_become_rows() {
    let dataset = process_bytes(
        b"<people>\
            <person><name>John</name><age>30</age></person>\
            <person><name>Jane</name><age>25</age></person>\
          </people>",
    )
    .await;

    assert!(dataset.is_processed);
    assert_eq!(dataset.file_type, FileType::Xml);
    assert_eq!(dataset.row_count, 2);
    assert_eq!(dataset.schema.columns(), ["name", "age"]);
    assert_eq!(dataset.preview_data[0]["name"], Value::Text("John".to_string()));
    assert_eq!(dataset.preview_data[1]["age"], Value::Int(25));
}

#[tokio::test]
async fn xml_fixture_on_disk() {
    let processor = Processor::new(
        Arc::new(FsStore::new("tests")),
        UploadLimits::default(),
        ProcessingLimits::default(),
    );
    let dataset = processor
        .process(Path::new("fixtures/people.xml"), "xml")
        .await
        .unwrap();
    assert_eq!(dataset.row_count, 2);
    assert_eq!(dataset.schema.columns(), ["name", "age"]);
}

#[tokio::test]
async fn column_set_is_first_seen_union() {
    let dataset = process_bytes(
        b"<items>\
            <item><sku>a1</sku></item>\
            <item><price>2.5</price><sku>b2</sku></item>\
          </items>",
    )
    .await;

    assert_eq!(dataset.schema.columns(), ["sku", "price"]);
    assert_eq!(dataset.preview_data[1]["price"], Value::Float(2.5));
}

#[tokio::test]
async fn malformed_xml_is_captured_not_thrown() {
    let dataset = process_bytes(b"<r><e><a>1</b></e></r>").await;

    assert!(!dataset.is_processed);
    assert!(dataset.processing_errors.unwrap().contains("xml"));
    assert!(dataset.data_hash.is_none());
}
