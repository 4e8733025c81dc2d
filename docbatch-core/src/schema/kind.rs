//! Target column types.

/// Closed set of types a stream column may declare.
///
/// These map to:
/// - Arrow: `DataType::*` (Date as `Date32`, DateTime as `Timestamp(Second)`)
/// - Storage: the append-only buffer element type of the output column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// Unsigned 8-bit integer
    UInt8,

    /// Unsigned 16-bit integer
    UInt16,

    /// Unsigned 32-bit integer
    UInt32,

    /// Unsigned 64-bit integer
    UInt64,

    /// Signed 8-bit integer
    Int8,

    /// Signed 16-bit integer
    Int16,

    /// Signed 32-bit integer
    Int32,

    /// Signed 64-bit integer
    Int64,

    /// 32-bit floating point
    Float32,

    /// 64-bit floating point
    Float64,

    /// UTF-8 string
    String,

    /// Calendar day, stored as days since 1970-01-01
    Date,

    /// Instant, stored as whole seconds since the Unix epoch
    DateTime,
}

impl DataKind {
    /// Every member, in declaration order.
    pub const ALL: [DataKind; 13] = [
        DataKind::UInt8,
        DataKind::UInt16,
        DataKind::UInt32,
        DataKind::UInt64,
        DataKind::Int8,
        DataKind::Int16,
        DataKind::Int32,
        DataKind::Int64,
        DataKind::Float32,
        DataKind::Float64,
        DataKind::String,
        DataKind::Date,
        DataKind::DateTime,
    ];

    /// Human-readable type name for display.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataKind::UInt8 => "UInt8",
            DataKind::UInt16 => "UInt16",
            DataKind::UInt32 => "UInt32",
            DataKind::UInt64 => "UInt64",
            DataKind::Int8 => "Int8",
            DataKind::Int16 => "Int16",
            DataKind::Int32 => "Int32",
            DataKind::Int64 => "Int64",
            DataKind::Float32 => "Float32",
            DataKind::Float64 => "Float64",
            DataKind::String => "String",
            DataKind::Date => "Date",
            DataKind::DateTime => "DateTime",
        }
    }

    /// Look up a kind by its type name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.type_name().eq_ignore_ascii_case(name))
    }

}

impl std::fmt::Display for DataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

impl std::str::FromStr for DataKind {
    type Err = crate::error::SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| crate::error::SchemaError::UnknownType {
            name: s.to_string(),
        })
    }
}
