//! Value coercion: one wire value into one column-typed value.
//!
//! The legal conversions form a closed table keyed by (target kind, wire tag):
//!
//! | Target            | Int32/Int64/Float64/Bool | Null    | String | Timestamp  | other  |
//! |-------------------|--------------------------|---------|--------|------------|--------|
//! | UInt*/Int*/Float* | narrowing cast           | default | parse  | mismatch   | mismatch |
//! | String            | mismatch                 | mismatch| copy   | mismatch   | mismatch |
//! | Date              | mismatch                 | mismatch| mismatch | day number | mismatch |
//! | DateTime          | mismatch                 | mismatch| mismatch | epoch seconds | mismatch |
//!
//! Explicit Null is accepted for numeric columns only. A *missing* field is
//! handled before coercion and always yields the column default; the two
//! null-like cases are deliberately not unified.
//!
//! Narrowing follows `as` casts: integers wrap, floats truncate toward zero
//! and saturate at the target's bounds (NaN becomes 0). Numeric text is read
//! as the widest integer or float it spells and then narrowed the same way,
//! so `"300"` stores as `44` in a UInt8 column just like `Int32(300)`.

use crate::error::TypeMismatch;
use crate::schema::{DataKind, FieldDescriptor};
use crate::stored::StoredValue;
use crate::time::DayNumbering;
use crate::value::{WireTag, WireValue};

const EXPECTED_NUMBER: &str = "a number";
const EXPECTED_STRING: &str = "String";
const EXPECTED_TIMESTAMP: &str = "Timestamp";

/// How a (target kind, wire tag) pair is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Numeric cast into the target width
    Narrow,
    /// Store the column's pre-built default
    Default,
    /// Parse numeric text, then narrow like a wire number
    Parse,
    /// Copy text verbatim
    CopyText,
    /// Reduce a timestamp to its calendar day
    DayNumber,
    /// Keep a timestamp's epoch seconds
    EpochSeconds,
    /// Type mismatch
    Reject,
}

/// Look up the conversion rule for a target kind and wire tag.
pub fn rule(kind: DataKind, tag: WireTag) -> Rule {
    match (kind, tag) {
        (DataKind::String, WireTag::String) => Rule::CopyText,
        (DataKind::String, _) => Rule::Reject,
        (DataKind::Date, WireTag::Timestamp) => Rule::DayNumber,
        (DataKind::Date, _) => Rule::Reject,
        (DataKind::DateTime, WireTag::Timestamp) => Rule::EpochSeconds,
        (DataKind::DateTime, _) => Rule::Reject,
        (_, WireTag::Int32 | WireTag::Int64 | WireTag::Float64 | WireTag::Bool) => Rule::Narrow,
        (_, WireTag::Null) => Rule::Default,
        (_, WireTag::String) => Rule::Parse,
        (_, _) => Rule::Reject,
    }
}

/// Human-readable description of what a column kind accepts.
pub fn expected_for(kind: DataKind) -> &'static str {
    match kind {
        DataKind::String => EXPECTED_STRING,
        DataKind::Date | DataKind::DateTime => EXPECTED_TIMESTAMP,
        _ => EXPECTED_NUMBER,
    }
}

/// Convert `value` into the storage type of `field`.
///
/// Returns the stored value, borrowing text from `value` where possible, or
/// a [`TypeMismatch`] naming the field, what it expects, and the tag seen.
/// Nothing is written anywhere on failure.
pub fn coerce<'a>(
    value: &'a WireValue,
    field: &FieldDescriptor,
    days: &DayNumbering,
) -> Result<StoredValue<'a>, TypeMismatch> {
    let stored = match (rule(field.kind, value.tag()), value) {
        (Rule::Narrow, WireValue::Int32(v)) => narrow(field.kind, Number::Int(i64::from(*v))),
        (Rule::Narrow, WireValue::Int64(v)) => narrow(field.kind, Number::Int(*v)),
        (Rule::Narrow, WireValue::Float64(v)) => narrow(field.kind, Number::Float(*v)),
        (Rule::Narrow, WireValue::Bool(v)) => narrow(field.kind, Number::Int(i64::from(*v))),
        (Rule::Default, _) => Some(field.default.clone()),
        (Rule::Parse, WireValue::String(s)) => {
            let n = parse_number(s).ok_or_else(|| TypeMismatch {
                text: Some(s.to_string()),
                ..mismatch(field, WireTag::String)
            })?;
            narrow(field.kind, n)
        }
        (Rule::CopyText, WireValue::String(s)) => Some(StoredValue::Str(s.as_str())),
        (Rule::DayNumber, WireValue::Timestamp(ts)) => {
            Some(StoredValue::Date(days.to_day_num(ts.epoch_seconds())))
        }
        (Rule::EpochSeconds, WireValue::Timestamp(ts)) => {
            Some(StoredValue::DateTime(ts.epoch_seconds()))
        }
        _ => None,
    };
    stored.ok_or_else(|| mismatch(field, value.tag()))
}

fn mismatch(field: &FieldDescriptor, observed: WireTag) -> TypeMismatch {
    TypeMismatch {
        field: field.name.clone(),
        expected: expected_for(field.kind),
        observed,
        text: None,
    }
}

/// A number read from the wire before it is cast into a column's width.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

/// Read numeric text as the widest matching type. Surrounding whitespace is
/// ignored; anything else that is not a whole number or a float is `None`.
fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    if let Ok(v) = text.parse::<i64>() {
        return Some(Number::Int(v));
    }
    if let Ok(v) = text.parse::<u64>() {
        return Some(Number::UInt(v));
    }
    text.parse::<f64>().ok().map(Number::Float)
}

/// Primitive types a numeric column can store.
trait NumericTarget: Copy {
    fn from_number(n: Number) -> Self;
    fn store(self) -> StoredValue<'static>;
}

macro_rules! numeric_target {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl NumericTarget for $ty {
                #[inline]
                fn from_number(n: Number) -> Self {
                    match n {
                        Number::Int(v) => v as $ty,
                        Number::UInt(v) => v as $ty,
                        Number::Float(v) => v as $ty,
                    }
                }

                #[inline]
                fn store(self) -> StoredValue<'static> {
                    StoredValue::$variant(self)
                }
            }
        )*
    };
}

numeric_target! {
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
}

/// Cast `n` into the width of `kind`. `None` for non-numeric kinds.
fn narrow(kind: DataKind, n: Number) -> Option<StoredValue<'static>> {
    fn cast<T: NumericTarget>(n: Number) -> Option<StoredValue<'static>> {
        Some(T::from_number(n).store())
    }

    match kind {
        DataKind::UInt8 => cast::<u8>(n),
        DataKind::UInt16 => cast::<u16>(n),
        DataKind::UInt32 => cast::<u32>(n),
        DataKind::UInt64 => cast::<u64>(n),
        DataKind::Int8 => cast::<i8>(n),
        DataKind::Int16 => cast::<i16>(n),
        DataKind::Int32 => cast::<i32>(n),
        DataKind::Int64 => cast::<i64>(n),
        DataKind::Float32 => cast::<f32>(n),
        DataKind::Float64 => cast::<f64>(n),
        DataKind::String | DataKind::Date | DataKind::DateTime => None,
    }
}
