//! Wire values as delivered by the document store.
//!
//! The set of tags is closed and mirrors the store's element types. Only a
//! handful are coercible (see [`crate::coerce`]); the rest exist so a
//! mismatch can name what was actually received.

use compact_str::CompactString;

use crate::document::OwnedDocument;

/// Instant carried by a `Timestamp` wire value, in milliseconds since the
/// Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WireTimestamp(pub i64);

impl WireTimestamp {
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn from_seconds(seconds: i64) -> Self {
        Self(seconds.saturating_mul(1000))
    }

    pub const fn millis(&self) -> i64 {
        self.0
    }

    /// Whole seconds since the epoch. The sub-second part is dropped, so
    /// instants before 1970 round toward the epoch.
    pub const fn epoch_seconds(&self) -> i64 {
        self.0 / 1000
    }
}

/// One field value in a document.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Int32(i32),
    Int64(i64),
    Float64(f64),
    Bool(bool),
    Null,
    String(CompactString),
    Timestamp(WireTimestamp),
    ObjectId([u8; 12]),
    Binary(Vec<u8>),
    Decimal128([u8; 16]),
    Array(Vec<WireValue>),
    Document(OwnedDocument),
    MinKey,
    MaxKey,
}

/// Type tag of a [`WireValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireTag {
    Int32,
    Int64,
    Float64,
    Bool,
    Null,
    String,
    Timestamp,
    ObjectId,
    Binary,
    Decimal128,
    Array,
    Document,
    MinKey,
    MaxKey,
}

impl WireTag {
    pub fn name(&self) -> &'static str {
        match self {
            WireTag::Int32 => "Int32",
            WireTag::Int64 => "Int64",
            WireTag::Float64 => "Float64",
            WireTag::Bool => "Bool",
            WireTag::Null => "Null",
            WireTag::String => "String",
            WireTag::Timestamp => "Timestamp",
            WireTag::ObjectId => "ObjectId",
            WireTag::Binary => "Binary",
            WireTag::Decimal128 => "Decimal128",
            WireTag::Array => "Array",
            WireTag::Document => "Document",
            WireTag::MinKey => "MinKey",
            WireTag::MaxKey => "MaxKey",
        }
    }
}

impl std::fmt::Display for WireTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl WireValue {
    pub fn tag(&self) -> WireTag {
        match self {
            WireValue::Int32(_) => WireTag::Int32,
            WireValue::Int64(_) => WireTag::Int64,
            WireValue::Float64(_) => WireTag::Float64,
            WireValue::Bool(_) => WireTag::Bool,
            WireValue::Null => WireTag::Null,
            WireValue::String(_) => WireTag::String,
            WireValue::Timestamp(_) => WireTag::Timestamp,
            WireValue::ObjectId(_) => WireTag::ObjectId,
            WireValue::Binary(_) => WireTag::Binary,
            WireValue::Decimal128(_) => WireTag::Decimal128,
            WireValue::Array(_) => WireTag::Array,
            WireValue::Document(_) => WireTag::Document,
            WireValue::MinKey => WireTag::MinKey,
            WireValue::MaxKey => WireTag::MaxKey,
        }
    }

    pub fn string(s: &str) -> Self {
        WireValue::String(CompactString::new(s))
    }

    pub fn timestamp_millis(millis: i64) -> Self {
        WireValue::Timestamp(WireTimestamp::from_millis(millis))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, WireValue::Null)
    }
}

impl From<i32> for WireValue {
    fn from(v: i32) -> Self {
        WireValue::Int32(v)
    }
}

impl From<i64> for WireValue {
    fn from(v: i64) -> Self {
        WireValue::Int64(v)
    }
}

impl From<f64> for WireValue {
    fn from(v: f64) -> Self {
        WireValue::Float64(v)
    }
}

impl From<bool> for WireValue {
    fn from(v: bool) -> Self {
        WireValue::Bool(v)
    }
}

impl From<&str> for WireValue {
    fn from(v: &str) -> Self {
        WireValue::string(v)
    }
}

impl From<WireTimestamp> for WireValue {
    fn from(v: WireTimestamp) -> Self {
        WireValue::Timestamp(v)
    }
}
