//! Integration tests for streaming JSON-lines exports.
//!
//! These tests verify that:
//! - Extended JSON wrappers decode into the expected column values
//! - Templates carry defaults and time zone annotations through to batches
//! - The Stream adapter yields the same rows as `next_batch`

use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::sync::Arc;

use arrow::array::{Array, Date32Array, Int32Array, StringArray, TimestampSecondArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use docbatch::{
    DocumentBatchStream, DocumentCursor, JsonLinesCursor, SchemaDescription, StreamConfig,
    TimeZoneSetting,
};
use docbatch_arrow::DEFAULT_METADATA_KEY;
use tempfile::NamedTempFile;

const USERS: &str = r#"{"_id": {"$oid": "65a1f0c2e4b0a1b2c3d4e5f6"}, "id": 1, "name": "ada", "joined": {"$date": "2024-03-15T23:30:00Z"}}
{"id": {"$numberLong": "2"}, "name": "brian", "joined": {"$date": 0}}

{"id": 3, "joined": {"$date": {"$numberLong": "86400000"}}}
{"id": "4", "name": "dee", "joined": {"$date": 1710460800000}}
"#;

fn users_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(USERS.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

fn collect_rows<C: DocumentCursor>(stream: &mut DocumentBatchStream<C>) -> Vec<RecordBatch> {
    let mut batches = Vec::new();
    loop {
        let batch = stream.next_batch().expect("batch should be produced");
        if batch.num_rows() == 0 {
            return batches;
        }
        batches.push(batch);
    }
}

#[test]
fn test_jsonl_file_to_batches() {
    let file = users_file();
    let cursor = JsonLinesCursor::open(file.path(), 2).unwrap();
    let mut stream = DocumentBatchStream::from_description(
        Arc::new(()),
        cursor,
        SchemaDescription::parse("id:UInt64,name:String=?,joined:Date").unwrap(),
        StreamConfig::default().with_batch_size(2),
    )
    .unwrap();

    let batches = collect_rows(&mut stream);
    assert_eq!(batches.len(), 2);
    assert_eq!(stream.cursor().lines_read(), 5);

    let batch = arrow::compute::concat_batches(&stream.schema(), &batches).unwrap();
    assert_eq!(batch.num_rows(), 4);

    let ids = batch.column(0).as_any().downcast_ref::<UInt64Array>().unwrap();
    assert_eq!(ids.values(), &[1, 2, 3, 4]);

    let names = batch.column(1).as_any().downcast_ref::<StringArray>().unwrap();
    assert_eq!(names.value(2), "?");
    assert_eq!(names.value(3), "dee");

    let joined = batch.column(2).as_any().downcast_ref::<Date32Array>().unwrap();
    assert_eq!(joined.values(), &[19_797, 0, 1, 19_797]);
}

#[test]
fn test_identity_names_file() {
    let file = users_file();
    let cursor = JsonLinesCursor::open(file.path(), 10).unwrap();
    let stream = DocumentBatchStream::from_description(
        Arc::new(()),
        cursor,
        SchemaDescription::default(),
        StreamConfig::default(),
    )
    .unwrap();

    let identity = stream.stream_identity();
    assert!(identity.starts_with("DocumentStream(@jsonl("));
    assert!(identity.contains(&file.path().display().to_string()));
}

#[test]
fn test_time_zone_shifts_day() {
    let cursor = JsonLinesCursor::new(
        Cursor::new(r#"{"d": {"$date": "2024-03-15T23:30:00Z"}}"#),
        "inline",
        10,
    );
    let config = StreamConfig::default().with_time_zone("+01:00".parse::<TimeZoneSetting>().unwrap());
    let mut stream =
        DocumentBatchStream::from_description(Arc::new(()), cursor, SchemaDescription::parse("d:Date").unwrap(), config)
            .unwrap();

    let batch = stream.next_batch().unwrap();
    let d = batch.column(0).as_any().downcast_ref::<Date32Array>().unwrap();
    assert_eq!(d.value(0), 19_798);
}

#[test]
fn test_template_metadata_and_zone() {
    let score = Field::new("score", DataType::Int32, false).with_metadata(HashMap::from([(
        DEFAULT_METADATA_KEY.to_string(),
        "-1".to_string(),
    )]));
    let seen = Field::new(
        "seen",
        DataType::Timestamp(TimeUnit::Second, Some("UTC".into())),
        false,
    );
    let template = RecordBatch::new_empty(Arc::new(Schema::new(vec![score, seen])));

    let cursor = JsonLinesCursor::new(
        Cursor::new("{\"seen\": {\"$date\": 1500}}\n{\"score\": 9, \"seen\": {\"$date\": -1}}\n"),
        "inline",
        10,
    );
    let mut stream =
        DocumentBatchStream::new(Arc::new(()), cursor, &template, StreamConfig::default()).unwrap();

    let batch = stream.next_batch().unwrap();
    assert_eq!(batch.schema(), template.schema());

    let score = batch.column(0).as_any().downcast_ref::<Int32Array>().unwrap();
    assert_eq!(score.values(), &[-1, 9]);
    let seen = batch
        .column(1)
        .as_any()
        .downcast_ref::<TimestampSecondArray>()
        .unwrap();
    assert_eq!(seen.values(), &[1, 0]);
}

#[test]
fn test_unsupported_template_rejected() {
    let template = RecordBatch::new_empty(Arc::new(Schema::new(vec![Field::new(
        "flag",
        DataType::Boolean,
        false,
    )])));
    let cursor = JsonLinesCursor::new(Cursor::new(""), "inline", 10);

    let result = DocumentBatchStream::new(Arc::new(()), cursor, &template, StreamConfig::default());
    assert!(result.is_err());
}

#[test]
fn test_malformed_line_fails_batch() {
    let cursor = JsonLinesCursor::new(Cursor::new("{\"id\": 1}\n{oops\n"), "inline", 10);
    let mut stream = DocumentBatchStream::from_description(
        Arc::new(()),
        cursor,
        SchemaDescription::parse("id:UInt32").unwrap(),
        StreamConfig::default(),
    )
    .unwrap();

    let err = stream.next_batch().unwrap_err();
    assert!(err.to_string().contains("line 2"), "{err}");
    assert!(stream.is_failed());
}

#[tokio::test]
async fn test_stream_adapter_matches_next_batch() {
    use futures::StreamExt;

    let file = users_file();
    let open = || {
        DocumentBatchStream::from_description(
            Arc::new(()),
            JsonLinesCursor::open(file.path(), 1).unwrap(),
            SchemaDescription::parse("id:UInt64,name:String").unwrap(),
            StreamConfig::default().with_batch_size(3),
        )
        .unwrap()
    };

    let expected = collect_rows(&mut open());
    let actual: Vec<RecordBatch> = StreamExt::map(open(), |b| b.expect("stream batch"))
        .collect()
        .await;

    assert_eq!(actual, expected);
    let rows: usize = actual.iter().map(|b| b.num_rows()).sum();
    assert_eq!(rows, 4);
}
