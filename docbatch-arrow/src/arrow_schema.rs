//! Convert between docbatch-core schema types and Arrow types.
//!
//! A stream's schema can come from either side: a caller-supplied Arrow
//! template (an empty `RecordBatch` or its `Schema`) or a
//! [`SchemaDescription`] built in code. Either way the result is the same
//! pair: the Arrow schema stamped on every output batch and the description
//! that drives field lookup and coercion.

use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use arrow::record_batch::RecordBatch;
use docbatch_core::schema::{DataKind, FieldDescriptor, SchemaDescription};
use docbatch_core::{SchemaError, StoredValue};

/// Field metadata key holding a column's default literal.
pub const DEFAULT_METADATA_KEY: &str = "docbatch.default";

/// Convert a DataKind to an Arrow DataType.
pub fn to_arrow_type(kind: DataKind) -> DataType {
    match kind {
        DataKind::UInt8 => DataType::UInt8,
        DataKind::UInt16 => DataType::UInt16,
        DataKind::UInt32 => DataType::UInt32,
        DataKind::UInt64 => DataType::UInt64,
        DataKind::Int8 => DataType::Int8,
        DataKind::Int16 => DataType::Int16,
        DataKind::Int32 => DataType::Int32,
        DataKind::Int64 => DataType::Int64,
        DataKind::Float32 => DataType::Float32,
        DataKind::Float64 => DataType::Float64,
        DataKind::String => DataType::Utf8,
        DataKind::Date => DataType::Date32,
        DataKind::DateTime => DataType::Timestamp(TimeUnit::Second, None),
    }
}

/// Convert an Arrow DataType to a DataKind, if it is one a stream can fill.
///
/// Second-resolution timestamps are accepted with any time zone annotation;
/// the stored value is always raw epoch seconds.
pub fn from_arrow_type(data_type: &DataType) -> Option<DataKind> {
    let kind = match data_type {
        DataType::UInt8 => DataKind::UInt8,
        DataType::UInt16 => DataKind::UInt16,
        DataType::UInt32 => DataKind::UInt32,
        DataType::UInt64 => DataKind::UInt64,
        DataType::Int8 => DataKind::Int8,
        DataType::Int16 => DataKind::Int16,
        DataType::Int32 => DataKind::Int32,
        DataType::Int64 => DataKind::Int64,
        DataType::Float32 => DataKind::Float32,
        DataType::Float64 => DataKind::Float64,
        DataType::Utf8 => DataKind::String,
        DataType::Date32 => DataKind::Date,
        DataType::Timestamp(TimeUnit::Second, _) => DataKind::DateTime,
        _ => return None,
    };
    Some(kind)
}

/// Convert a FieldDescriptor to an Arrow Field.
///
/// Output columns never contain nulls, so fields are non-nullable. A
/// default that differs from the type's empty value is carried in the
/// field metadata so the schema round-trips.
pub fn to_arrow_field(fd: &FieldDescriptor) -> Field {
    let field = Field::new(fd.name.clone(), to_arrow_type(fd.kind), false);
    if fd.default == StoredValue::empty(fd.kind) {
        return field;
    }
    field.with_metadata(HashMap::from([(
        DEFAULT_METADATA_KEY.to_string(),
        fd.default.to_literal(),
    )]))
}

/// Convert a SchemaDescription to an Arrow Schema.
pub fn description_to_arrow_schema(description: &SchemaDescription) -> Schema {
    let fields: Vec<Field> = description.iter().map(to_arrow_field).collect();
    Schema::new(fields)
}

/// Build the SchemaDescription for an Arrow template schema.
///
/// Each field contributes, in order, its name, its DataKind, and its
/// default: the `docbatch.default` metadata literal when present, the
/// type's empty value otherwise.
pub fn description_from_schema(schema: &Schema) -> Result<SchemaDescription, SchemaError> {
    let fields = schema
        .fields()
        .iter()
        .map(|field| {
            let kind = from_arrow_type(field.data_type()).ok_or_else(|| {
                SchemaError::UnsupportedType {
                    column: field.name().clone(),
                    data_type: field.data_type().to_string(),
                }
            })?;
            let descriptor = FieldDescriptor::new(field.name().clone(), kind);
            match field.metadata().get(DEFAULT_METADATA_KEY) {
                Some(literal) => descriptor.with_default_literal(literal),
                None => Ok(descriptor),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SchemaDescription::new(fields))
}

/// A template resolved into the schema stamped on output batches plus the
/// description driving lookup and coercion.
#[derive(Debug, Clone)]
pub struct SchemaTemplate {
    pub schema: SchemaRef,
    pub description: SchemaDescription,
}

impl SchemaTemplate {
    /// From an (empty) template batch. Any rows in the template are ignored.
    pub fn from_batch(template: &RecordBatch) -> Result<Self, SchemaError> {
        Self::from_schema(template.schema())
    }

    /// From an Arrow schema. The schema is kept as given, metadata and
    /// timestamp zones included.
    pub fn from_schema(schema: SchemaRef) -> Result<Self, SchemaError> {
        let description = description_from_schema(&schema)?;
        Ok(Self {
            schema,
            description,
        })
    }

    /// From a description built in code.
    pub fn from_description(description: SchemaDescription) -> Self {
        let schema = Arc::new(description_to_arrow_schema(&description));
        Self {
            schema,
            description,
        }
    }
}
