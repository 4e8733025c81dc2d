//! Column-typed values ready to append to an output column.
//!
//! A `StoredValue` is what the coercion engine hands to the batch builder:
//! exactly one variant per [`DataKind`]. String values borrow from the wire
//! document where possible (`Str`) and own their data only when they were
//! built independently of a document, such as schema defaults (`OwnedString`).

use chrono::{DateTime, Datelike, NaiveDate};
use compact_str::CompactString;

use crate::error::SchemaError;
use crate::schema::DataKind;
use crate::time::UNIX_EPOCH_DAY;

/// A value already converted to its column's storage type.
#[derive(Debug, Clone)]
pub enum StoredValue<'a> {
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    /// Borrowed from the source document.
    Str(&'a str),
    /// Owned text (defaults, decoded values).
    OwnedString(CompactString),
    /// Days since 1970-01-01.
    Date(i32),
    /// Seconds since the Unix epoch.
    DateTime(i64),
}

/// A stored value that owns all its data.
pub type OwnedStoredValue = StoredValue<'static>;

impl<'a> StoredValue<'a> {
    /// The type's "empty" value: zero for numerics, empty string for text,
    /// day 0 and epoch 0 for dates.
    pub fn empty(kind: DataKind) -> OwnedStoredValue {
        match kind {
            DataKind::UInt8 => StoredValue::UInt8(0),
            DataKind::UInt16 => StoredValue::UInt16(0),
            DataKind::UInt32 => StoredValue::UInt32(0),
            DataKind::UInt64 => StoredValue::UInt64(0),
            DataKind::Int8 => StoredValue::Int8(0),
            DataKind::Int16 => StoredValue::Int16(0),
            DataKind::Int32 => StoredValue::Int32(0),
            DataKind::Int64 => StoredValue::Int64(0),
            DataKind::Float32 => StoredValue::Float32(0.0),
            DataKind::Float64 => StoredValue::Float64(0.0),
            DataKind::String => StoredValue::OwnedString(CompactString::default()),
            DataKind::Date => StoredValue::Date(0),
            DataKind::DateTime => StoredValue::DateTime(0),
        }
    }

    /// Parse a default literal for a column of the given kind.
    ///
    /// Numbers use the target's own grammar (`"300"` is not a valid UInt8).
    /// Dates accept `YYYY-MM-DD`; date-times accept integer epoch seconds or
    /// RFC 3339. Text is taken verbatim.
    pub fn parse_literal(kind: DataKind, text: &str) -> Result<OwnedStoredValue, SchemaError> {
        let invalid = || SchemaError::InvalidDefault {
            kind,
            literal: text.to_string(),
        };

        let value = match kind {
            DataKind::UInt8 => StoredValue::UInt8(text.parse().map_err(|_| invalid())?),
            DataKind::UInt16 => StoredValue::UInt16(text.parse().map_err(|_| invalid())?),
            DataKind::UInt32 => StoredValue::UInt32(text.parse().map_err(|_| invalid())?),
            DataKind::UInt64 => StoredValue::UInt64(text.parse().map_err(|_| invalid())?),
            DataKind::Int8 => StoredValue::Int8(text.parse().map_err(|_| invalid())?),
            DataKind::Int16 => StoredValue::Int16(text.parse().map_err(|_| invalid())?),
            DataKind::Int32 => StoredValue::Int32(text.parse().map_err(|_| invalid())?),
            DataKind::Int64 => StoredValue::Int64(text.parse().map_err(|_| invalid())?),
            DataKind::Float32 => StoredValue::Float32(text.parse().map_err(|_| invalid())?),
            DataKind::Float64 => StoredValue::Float64(text.parse().map_err(|_| invalid())?),
            DataKind::String => StoredValue::OwnedString(CompactString::new(text)),
            DataKind::Date => {
                let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| invalid())?;
                let days = i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAY;
                StoredValue::Date(i32::try_from(days).map_err(|_| invalid())?)
            }
            DataKind::DateTime => match text.parse::<i64>() {
                Ok(seconds) => StoredValue::DateTime(seconds),
                Err(_) => {
                    let parsed = DateTime::parse_from_rfc3339(text).map_err(|_| invalid())?;
                    StoredValue::DateTime(parsed.timestamp())
                }
            },
        };
        Ok(value)
    }

    /// The column kind this value belongs to.
    pub fn kind(&self) -> DataKind {
        match self {
            StoredValue::UInt8(_) => DataKind::UInt8,
            StoredValue::UInt16(_) => DataKind::UInt16,
            StoredValue::UInt32(_) => DataKind::UInt32,
            StoredValue::UInt64(_) => DataKind::UInt64,
            StoredValue::Int8(_) => DataKind::Int8,
            StoredValue::Int16(_) => DataKind::Int16,
            StoredValue::Int32(_) => DataKind::Int32,
            StoredValue::Int64(_) => DataKind::Int64,
            StoredValue::Float32(_) => DataKind::Float32,
            StoredValue::Float64(_) => DataKind::Float64,
            StoredValue::Str(_) | StoredValue::OwnedString(_) => DataKind::String,
            StoredValue::Date(_) => DataKind::Date,
            StoredValue::DateTime(_) => DataKind::DateTime,
        }
    }

    /// Try to get as str reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StoredValue::Str(s) => Some(s),
            StoredValue::OwnedString(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Render as a literal that [`StoredValue::parse_literal`] reads back.
    pub fn to_literal(&self) -> String {
        match self {
            StoredValue::Date(days) => {
                let ce = i64::from(*days) + UNIX_EPOCH_DAY;
                i32::try_from(ce)
                    .ok()
                    .and_then(NaiveDate::from_num_days_from_ce_opt)
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| days.to_string())
            }
            StoredValue::DateTime(secs) => secs.to_string(),
            other => other.to_string(),
        }
    }
}

impl<'a> std::fmt::Display for StoredValue<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoredValue::UInt8(v) => write!(f, "{v}"),
            StoredValue::UInt16(v) => write!(f, "{v}"),
            StoredValue::UInt32(v) => write!(f, "{v}"),
            StoredValue::UInt64(v) => write!(f, "{v}"),
            StoredValue::Int8(v) => write!(f, "{v}"),
            StoredValue::Int16(v) => write!(f, "{v}"),
            StoredValue::Int32(v) => write!(f, "{v}"),
            StoredValue::Int64(v) => write!(f, "{v}"),
            StoredValue::Float32(v) => write!(f, "{v}"),
            StoredValue::Float64(v) => write!(f, "{v}"),
            StoredValue::Str(s) => write!(f, "{s}"),
            StoredValue::OwnedString(s) => write!(f, "{s}"),
            StoredValue::Date(days) => write!(f, "day {days}"),
            StoredValue::DateTime(secs) => write!(f, "{secs}s"),
        }
    }
}

// Borrowed and owned strings compare equal by content.
impl<'a, 'b> PartialEq<StoredValue<'b>> for StoredValue<'a> {
    fn eq(&self, other: &StoredValue<'b>) -> bool {
        match (self, other) {
            (StoredValue::UInt8(a), StoredValue::UInt8(b)) => a == b,
            (StoredValue::UInt16(a), StoredValue::UInt16(b)) => a == b,
            (StoredValue::UInt32(a), StoredValue::UInt32(b)) => a == b,
            (StoredValue::UInt64(a), StoredValue::UInt64(b)) => a == b,
            (StoredValue::Int8(a), StoredValue::Int8(b)) => a == b,
            (StoredValue::Int16(a), StoredValue::Int16(b)) => a == b,
            (StoredValue::Int32(a), StoredValue::Int32(b)) => a == b,
            (StoredValue::Int64(a), StoredValue::Int64(b)) => a == b,
            (StoredValue::Float32(a), StoredValue::Float32(b)) => a == b,
            (StoredValue::Float64(a), StoredValue::Float64(b)) => a == b,
            (StoredValue::Date(a), StoredValue::Date(b)) => a == b,
            (StoredValue::DateTime(a), StoredValue::DateTime(b)) => a == b,
            (a, b) => match (a.as_str(), b.as_str()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }
}
