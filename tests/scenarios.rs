//! Integration tests for batch production over paged cursors.
//!
//! These tests verify that:
//! - Batches are built from whole pages and may overshoot the requested size
//! - The empty sentinel is returned forever once the cursor is exhausted
//! - Missing fields take the column default for every column type
//! - Explicit Null is a default for numbers but an error everywhere else

use std::sync::Arc;

use arrow::array::{
    Array, Date32Array, Int64Array, StringArray, TimestampSecondArray, UInt32Array, UInt8Array,
};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use docbatch::{
    DataKind, DocumentBatchStream, OwnedDocument, PagedCursor, SchemaDescription, StreamConfig,
    WireValue,
};
use docbatch_core::WireTag;

/// Empty template batch with `id: UInt32` and `name: String` columns.
fn id_name_template() -> RecordBatch {
    RecordBatch::new_empty(Arc::new(Schema::new(vec![
        Field::new("id", DataType::UInt32, false),
        Field::new("name", DataType::Utf8, false),
    ])))
}

fn open(pages: Vec<Vec<OwnedDocument>>, batch_size: usize) -> DocumentBatchStream<PagedCursor> {
    DocumentBatchStream::new(
        Arc::new(()),
        PagedCursor::new(pages),
        &id_name_template(),
        StreamConfig::default().with_batch_size(batch_size),
    )
    .expect("template should be valid")
}

fn open_spec(pages: Vec<Vec<OwnedDocument>>, spec: &str) -> DocumentBatchStream<PagedCursor> {
    DocumentBatchStream::from_description(
        Arc::new(()),
        PagedCursor::new(pages),
        SchemaDescription::parse(spec).expect("valid schema"),
        StreamConfig::default().with_batch_size(100),
    )
    .expect("description should be valid")
}

fn person(id: i32, name: &str) -> OwnedDocument {
    OwnedDocument::new().with("id", id).with("name", name)
}

#[test]
fn test_single_page_then_sentinel() {
    let mut stream = open(vec![vec![person(1, "a"), person(2, "b")]], 10);

    let batch = stream.next_batch().unwrap();
    assert_eq!(batch.num_rows(), 2);

    let ids = batch.column(0).as_any().downcast_ref::<UInt32Array>().unwrap();
    let names = batch.column(1).as_any().downcast_ref::<StringArray>().unwrap();
    assert_eq!(ids.values(), &[1, 2]);
    assert_eq!(names.value(0), "a");
    assert_eq!(names.value(1), "b");

    let sentinel = stream.next_batch().unwrap();
    assert_eq!(sentinel.num_rows(), 0);
    assert_eq!(sentinel.schema(), batch.schema());
}

#[test]
fn test_missing_name_is_empty_string() {
    let docs = vec![person(1, "a"), OwnedDocument::new().with("id", 2i32)];
    let mut stream = open(vec![docs], 10);

    let batch = stream.next_batch().unwrap();
    let names = batch.column(1).as_any().downcast_ref::<StringArray>().unwrap();
    assert_eq!(names.value(1), "");
    assert_eq!(names.null_count(), 0);
}

#[test]
fn test_float_truncates_into_uint8() {
    let docs = vec![OwnedDocument::new().with("level", 3.9)];
    let mut stream = open_spec(vec![docs], "level:UInt8");

    let batch = stream.next_batch().unwrap();
    let level = batch.column(0).as_any().downcast_ref::<UInt8Array>().unwrap();
    assert_eq!(level.value(0), 3);
}

#[test]
fn test_null_string_is_type_mismatch() {
    let docs = vec![person(1, "a"), OwnedDocument::new().with("id", 2i32).with("name", WireValue::Null)];
    let mut stream = open(vec![docs], 10);

    let err = stream.next_batch().unwrap_err();
    let mismatch = err.as_type_mismatch().expect("should be a type mismatch");
    assert_eq!(mismatch.field, "name");
    assert_eq!(mismatch.observed, WireTag::Null);
    assert!(err.to_string().contains("Null"));
}

#[test]
fn test_overshoot_by_one_page() {
    let first: Vec<_> = (1..=3).map(|i| person(i, "x")).collect();
    let second: Vec<_> = (4..=7).map(|i| person(i, "y")).collect();
    let mut stream = open(vec![first, second], 5);

    let batch = stream.next_batch().unwrap();
    assert_eq!(batch.num_rows(), 7);
    assert!(stream.is_finished());

    assert_eq!(stream.next_batch().unwrap().num_rows(), 0);
    assert_eq!(stream.cursor().fetches(), 2);
}

#[test]
fn test_terminal_state_makes_no_more_fetches() {
    let mut stream = open(vec![vec![person(1, "a")]], 10);

    assert_eq!(stream.next_batch().unwrap().num_rows(), 1);
    for _ in 0..5 {
        assert_eq!(stream.next_batch().unwrap().num_rows(), 0);
    }
    assert_eq!(stream.cursor().fetches(), 1);
}

#[test]
fn test_batches_have_schema_width_and_equal_columns() {
    for spec in ["", "a:Int64", "a:Int64,b:String,c:Date,d:DateTime,e:Float32"] {
        let width = SchemaDescription::parse(spec).unwrap().len();
        let pages = vec![
            vec![OwnedDocument::new().with("a", 1i64); 3],
            vec![OwnedDocument::new().with("b", "x"); 2],
        ];
        let mut stream = open_spec(pages, spec);

        let batch = stream.next_batch().unwrap();
        assert_eq!(batch.num_columns(), width, "schema {spec:?}");
        assert_eq!(batch.num_rows(), 5, "schema {spec:?}");
        for column in batch.columns() {
            assert_eq!(column.len(), 5);
        }
    }
}

#[test]
fn test_non_terminal_batches_reach_requested_size() {
    let pages: Vec<Vec<_>> = (0..10)
        .map(|p| (0..3).map(|i| person(p * 3 + i, "n")).collect())
        .collect();
    let stream = open(pages, 4);

    let sizes: Vec<usize> = stream.map(|b| b.unwrap().num_rows()).collect();
    assert_eq!(sizes, vec![6, 6, 6, 6, 6]);
}

#[test]
fn test_missing_field_defaults_for_every_kind() {
    let spec: Vec<String> = DataKind::ALL
        .iter()
        .map(|k| format!("c_{}:{}", k.type_name().to_lowercase(), k.type_name()))
        .collect();
    let mut stream = open_spec(vec![vec![OwnedDocument::new()]], &spec.join(","));

    let batch = stream.next_batch().unwrap();
    assert_eq!(batch.num_columns(), DataKind::ALL.len());
    assert_eq!(batch.num_rows(), 1);
    for column in batch.columns() {
        assert_eq!(column.null_count(), 0);
    }
}

#[test]
fn test_null_accepted_for_numbers_rejected_for_dates() {
    let numeric = vec![OwnedDocument::new().with("n", WireValue::Null)];
    let batch = open_spec(vec![numeric], "n:Int64=42").next_batch().unwrap();
    let n = batch.column(0).as_any().downcast_ref::<Int64Array>().unwrap();
    assert_eq!(n.value(0), 42);

    for kind in ["Date", "DateTime", "String"] {
        let docs = vec![OwnedDocument::new().with("t", WireValue::Null)];
        let err = open_spec(vec![docs], &format!("t:{kind}"))
            .next_batch()
            .unwrap_err();
        assert!(err.is_type_mismatch(), "{kind} should reject Null");

        let missing = open_spec(vec![vec![OwnedDocument::new()]], &format!("t:{kind}"))
            .next_batch()
            .unwrap();
        assert_eq!(missing.num_rows(), 1, "{kind} should default a missing field");
    }
}

#[test]
fn test_numeric_sources() {
    let docs = vec![
        OwnedDocument::new().with("n", 7i32),
        OwnedDocument::new().with("n", 8i64),
        OwnedDocument::new().with("n", 9.75),
        OwnedDocument::new().with("n", true),
        OwnedDocument::new().with("n", "11"),
    ];
    let batch = open_spec(vec![docs], "n:Int64").next_batch().unwrap();
    let n = batch.column(0).as_any().downcast_ref::<Int64Array>().unwrap();
    assert_eq!(n.values(), &[7, 8, 9, 1, 11]);

    for bad in [WireValue::string("eleven"), WireValue::ObjectId([1; 12]), WireValue::timestamp_millis(0)] {
        let err = open_spec(vec![vec![OwnedDocument::new().with("n", bad)]], "n:Int64")
            .next_batch()
            .unwrap_err();
        assert_eq!(err.as_type_mismatch().unwrap().expected, "a number");
    }
}

#[test]
fn test_date_and_datetime() {
    // 2024-03-15T23:30:00Z
    let instant = WireValue::timestamp_millis(1_710_545_400_000);
    let docs = vec![OwnedDocument::new().with("day", instant.clone()).with("at", instant)];

    let batch = open_spec(vec![docs], "day:Date,at:DateTime").next_batch().unwrap();
    let day = batch.column(0).as_any().downcast_ref::<Date32Array>().unwrap();
    let at = batch
        .column(1)
        .as_any()
        .downcast_ref::<TimestampSecondArray>()
        .unwrap();
    assert_eq!(day.value(0), 19_797);
    assert_eq!(at.value(0), 1_710_545_400);
    assert_eq!(
        batch.schema().field(1).data_type(),
        &DataType::Timestamp(TimeUnit::Second, None)
    );
}

#[test]
fn test_error_leaves_stream_unusable() {
    let pages = vec![vec![person(1, "a")], vec![OwnedDocument::new().with("id", "x")]];
    let mut stream = open(pages, 2);

    assert!(stream.next_batch().unwrap_err().is_type_mismatch());
    assert!(stream.is_failed());
    assert!(stream.next_batch().is_err());
    assert_eq!(stream.cursor().fetches(), 2);
}
