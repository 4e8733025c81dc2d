//! Decoding JSON (with extended-JSON wrappers) into wire documents.
//!
//! Plain JSON has no way to express timestamps, ObjectIds or the 32/64-bit
//! integer distinction, so the store's canonical wrappers are recognized:
//!
//! | JSON                                   | Wire value  |
//! |----------------------------------------|-------------|
//! | integer in `i32` range                 | `Int32`     |
//! | other integer                          | `Int64`     |
//! | fractional number                      | `Float64`   |
//! | `{"$date": 1700000000000}`             | `Timestamp` |
//! | `{"$date": "2023-11-14T22:13:20Z"}`    | `Timestamp` |
//! | `{"$date": {"$numberLong": "..."}}`    | `Timestamp` |
//! | `{"$oid": "<24 hex digits>"}`          | `ObjectId`  |
//! | `{"$numberInt": "7"}`                  | `Int32`     |
//! | `{"$numberLong": "7"}`                 | `Int64`     |
//! | `{"$numberDouble": "7.5"}`             | `Float64`   |
//! | `{"$minKey": 1}` / `{"$maxKey": 1}`    | `MinKey` / `MaxKey` |

use chrono::DateTime;
use compact_str::CompactString;
use serde_json::{Map, Value};

use crate::document::OwnedDocument;
use crate::error::DocumentError;
use crate::value::{WireTimestamp, WireValue};

/// Decode one line of JSON into a document.
///
/// `line` is only used for error reporting.
pub fn parse_document(text: &str, line: u64) -> Result<OwnedDocument, DocumentError> {
    let value: Value =
        serde_json::from_str(text).map_err(|source| DocumentError::Json { line, source })?;
    match value {
        Value::Object(map) => document_from_map(map),
        _ => Err(DocumentError::NotAnObject { line }),
    }
}

/// Convert a JSON object into a document. Fields are inserted in the map's
/// iteration order, which is sorted by key rather than the order in the text.
pub fn document_from_map(map: Map<String, Value>) -> Result<OwnedDocument, DocumentError> {
    let mut doc = OwnedDocument::with_capacity(map.len());
    for (key, value) in map {
        doc.insert(&key, wire_value_from_json(value)?);
    }
    Ok(doc)
}

/// Convert a single JSON value into a wire value.
pub fn wire_value_from_json(value: Value) -> Result<WireValue, DocumentError> {
    let wire = match value {
        Value::Null => WireValue::Null,
        Value::Bool(b) => WireValue::Bool(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                match i32::try_from(i) {
                    Ok(small) => WireValue::Int32(small),
                    Err(_) => WireValue::Int64(i),
                }
            } else {
                // u64 beyond i64::MAX and fractional values
                WireValue::Float64(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => WireValue::String(CompactString::from(s)),
        Value::Array(items) => WireValue::Array(
            items
                .into_iter()
                .map(wire_value_from_json)
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(map) => match extended(&map)? {
            Some(wire) => wire,
            None => WireValue::Document(document_from_map(map)?),
        },
    };
    Ok(wire)
}

/// Recognize single-key extended-JSON wrappers.
fn extended(map: &Map<String, Value>) -> Result<Option<WireValue>, DocumentError> {
    if map.len() != 1 {
        return Ok(None);
    }
    let Some((key, inner)) = map.iter().next() else {
        return Ok(None);
    };

    let wire = match key.as_str() {
        "$date" => WireValue::Timestamp(parse_date(inner)?),
        "$oid" => WireValue::ObjectId(parse_object_id(inner)?),
        "$numberInt" => WireValue::Int32(parse_wrapped("$numberInt", inner)?),
        "$numberLong" => WireValue::Int64(parse_wrapped("$numberLong", inner)?),
        "$numberDouble" => WireValue::Float64(parse_wrapped("$numberDouble", inner)?),
        "$minKey" => WireValue::MinKey,
        "$maxKey" => WireValue::MaxKey,
        _ => return Ok(None),
    };
    Ok(Some(wire))
}

fn invalid(wrapper: &'static str, value: &Value) -> DocumentError {
    DocumentError::InvalidExtended {
        wrapper,
        value: value.to_string(),
    }
}

fn parse_wrapped<T: std::str::FromStr>(
    wrapper: &'static str,
    value: &Value,
) -> Result<T, DocumentError> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| invalid(wrapper, value))
}

fn parse_date(value: &Value) -> Result<WireTimestamp, DocumentError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(WireTimestamp::from_millis)
            .ok_or_else(|| invalid("$date", value)),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| WireTimestamp::from_millis(dt.timestamp_millis()))
            .map_err(|_| invalid("$date", value)),
        Value::Object(inner) => match inner.get("$numberLong") {
            Some(long) if inner.len() == 1 => {
                parse_wrapped::<i64>("$date", long).map(WireTimestamp::from_millis)
            }
            _ => Err(invalid("$date", value)),
        },
        _ => Err(invalid("$date", value)),
    }
}

fn parse_object_id(value: &Value) -> Result<[u8; 12], DocumentError> {
    let hex = value.as_str().ok_or_else(|| invalid("$oid", value))?;
    if hex.len() != 24 || !hex.is_ascii() {
        return Err(invalid("$oid", value));
    }
    let mut id = [0u8; 12];
    for (i, byte) in id.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| invalid("$oid", value))?;
    }
    Ok(id)
}
