//! Column builders that assemble coerced document fields into RecordBatches.

use std::sync::Arc;

use arrow::array::*;
use arrow::datatypes::{DataType, TimeUnit};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use docbatch_core::{coerce, DataKind, DayNumbering, Document, SchemaError, StoredValue};

use crate::arrow_schema::SchemaTemplate;
use crate::error::{Error, Result};

/// Rows preallocated per column, regardless of how large a batch may grow.
const MAX_PREALLOCATED_ROWS: usize = 8_192;

/// Growable column of one of the supported storage types.
enum ColumnBuilder {
    UInt8(UInt8Builder),
    UInt16(UInt16Builder),
    UInt32(UInt32Builder),
    UInt64(UInt64Builder),
    Int8(Int8Builder),
    Int16(Int16Builder),
    Int32(Int32Builder),
    Int64(Int64Builder),
    Float32(Float32Builder),
    Float64(Float64Builder),
    Utf8(StringBuilder),
    Date32(Date32Builder),
    TimestampSecond(TimestampSecondBuilder),
}

impl ColumnBuilder {
    /// Create a new builder for the given data type, or `None` if no
    /// document value can be stored in it.
    fn new(data_type: &DataType, capacity: usize) -> Option<Self> {
        let builder = match data_type {
            DataType::UInt8 => ColumnBuilder::UInt8(UInt8Builder::with_capacity(capacity)),
            DataType::UInt16 => ColumnBuilder::UInt16(UInt16Builder::with_capacity(capacity)),
            DataType::UInt32 => ColumnBuilder::UInt32(UInt32Builder::with_capacity(capacity)),
            DataType::UInt64 => ColumnBuilder::UInt64(UInt64Builder::with_capacity(capacity)),
            DataType::Int8 => ColumnBuilder::Int8(Int8Builder::with_capacity(capacity)),
            DataType::Int16 => ColumnBuilder::Int16(Int16Builder::with_capacity(capacity)),
            DataType::Int32 => ColumnBuilder::Int32(Int32Builder::with_capacity(capacity)),
            DataType::Int64 => ColumnBuilder::Int64(Int64Builder::with_capacity(capacity)),
            DataType::Float32 => ColumnBuilder::Float32(Float32Builder::with_capacity(capacity)),
            DataType::Float64 => ColumnBuilder::Float64(Float64Builder::with_capacity(capacity)),
            DataType::Utf8 => {
                ColumnBuilder::Utf8(StringBuilder::with_capacity(capacity, capacity * 32))
            }
            DataType::Date32 => ColumnBuilder::Date32(Date32Builder::with_capacity(capacity)),
            // Keep the template's zone annotation so the array type matches the schema
            DataType::Timestamp(TimeUnit::Second, tz) => ColumnBuilder::TimestampSecond(
                TimestampSecondBuilder::with_capacity(capacity).with_timezone_opt(tz.clone()),
            ),
            _ => return None,
        };
        Some(builder)
    }

    fn kind(&self) -> DataKind {
        match self {
            ColumnBuilder::UInt8(_) => DataKind::UInt8,
            ColumnBuilder::UInt16(_) => DataKind::UInt16,
            ColumnBuilder::UInt32(_) => DataKind::UInt32,
            ColumnBuilder::UInt64(_) => DataKind::UInt64,
            ColumnBuilder::Int8(_) => DataKind::Int8,
            ColumnBuilder::Int16(_) => DataKind::Int16,
            ColumnBuilder::Int32(_) => DataKind::Int32,
            ColumnBuilder::Int64(_) => DataKind::Int64,
            ColumnBuilder::Float32(_) => DataKind::Float32,
            ColumnBuilder::Float64(_) => DataKind::Float64,
            ColumnBuilder::Utf8(_) => DataKind::String,
            ColumnBuilder::Date32(_) => DataKind::Date,
            ColumnBuilder::TimestampSecond(_) => DataKind::DateTime,
        }
    }

    /// Append a stored value. The value's kind must match the column's.
    fn append(&mut self, column: &str, value: &StoredValue<'_>) -> Result<()> {
        let expected = self.kind();
        match (self, value) {
            (ColumnBuilder::UInt8(b), StoredValue::UInt8(v)) => b.append_value(*v),
            (ColumnBuilder::UInt16(b), StoredValue::UInt16(v)) => b.append_value(*v),
            (ColumnBuilder::UInt32(b), StoredValue::UInt32(v)) => b.append_value(*v),
            (ColumnBuilder::UInt64(b), StoredValue::UInt64(v)) => b.append_value(*v),
            (ColumnBuilder::Int8(b), StoredValue::Int8(v)) => b.append_value(*v),
            (ColumnBuilder::Int16(b), StoredValue::Int16(v)) => b.append_value(*v),
            (ColumnBuilder::Int32(b), StoredValue::Int32(v)) => b.append_value(*v),
            (ColumnBuilder::Int64(b), StoredValue::Int64(v)) => b.append_value(*v),
            (ColumnBuilder::Float32(b), StoredValue::Float32(v)) => b.append_value(*v),
            (ColumnBuilder::Float64(b), StoredValue::Float64(v)) => b.append_value(*v),
            (ColumnBuilder::Utf8(b), StoredValue::Str(s)) => b.append_value(s),
            (ColumnBuilder::Utf8(b), StoredValue::OwnedString(s)) => b.append_value(s.as_str()),
            (ColumnBuilder::Date32(b), StoredValue::Date(days)) => b.append_value(*days),
            (ColumnBuilder::TimestampSecond(b), StoredValue::DateTime(secs)) => {
                b.append_value(*secs)
            }
            (_, other) => {
                return Err(Error::ColumnType {
                    column: column.to_string(),
                    expected,
                    actual: other.kind(),
                })
            }
        }
        Ok(())
    }

    /// Finish building and return the array. The builder is left empty.
    fn finish(&mut self) -> ArrayRef {
        match self {
            ColumnBuilder::UInt8(b) => Arc::new(b.finish()),
            ColumnBuilder::UInt16(b) => Arc::new(b.finish()),
            ColumnBuilder::UInt32(b) => Arc::new(b.finish()),
            ColumnBuilder::UInt64(b) => Arc::new(b.finish()),
            ColumnBuilder::Int8(b) => Arc::new(b.finish()),
            ColumnBuilder::Int16(b) => Arc::new(b.finish()),
            ColumnBuilder::Int32(b) => Arc::new(b.finish()),
            ColumnBuilder::Int64(b) => Arc::new(b.finish()),
            ColumnBuilder::Float32(b) => Arc::new(b.finish()),
            ColumnBuilder::Float64(b) => Arc::new(b.finish()),
            ColumnBuilder::Utf8(b) => Arc::new(b.finish()),
            ColumnBuilder::Date32(b) => Arc::new(b.finish()),
            ColumnBuilder::TimestampSecond(b) => Arc::new(b.finish()),
        }
    }

    fn len(&self) -> usize {
        match self {
            ColumnBuilder::UInt8(b) => b.len(),
            ColumnBuilder::UInt16(b) => b.len(),
            ColumnBuilder::UInt32(b) => b.len(),
            ColumnBuilder::UInt64(b) => b.len(),
            ColumnBuilder::Int8(b) => b.len(),
            ColumnBuilder::Int16(b) => b.len(),
            ColumnBuilder::Int32(b) => b.len(),
            ColumnBuilder::Int64(b) => b.len(),
            ColumnBuilder::Float32(b) => b.len(),
            ColumnBuilder::Float64(b) => b.len(),
            ColumnBuilder::Utf8(b) => b.len(),
            ColumnBuilder::Date32(b) => b.len(),
            ColumnBuilder::TimestampSecond(b) => b.len(),
        }
    }
}

/// Builds RecordBatches with a fixed schema, one document per row.
///
/// For every column, in schema order, the document field of the same name is
/// looked up. An absent field stores the column default; a present one is
/// coerced to the column type. A coercion failure leaves the builder
/// mid-row, so callers must [`reset`](Self::reset) before reuse.
pub struct DocumentBatchBuilder {
    template: SchemaTemplate,
    capacity: usize,
    rows: usize,
    builders: Vec<ColumnBuilder>,
}

impl DocumentBatchBuilder {
    /// Create a builder sized for batches of about `batch_size` rows.
    pub fn new(template: SchemaTemplate, batch_size: usize) -> Result<Self> {
        let capacity = batch_size.clamp(1, MAX_PREALLOCATED_ROWS);
        let builders = Self::column_builders(&template, capacity)?;
        Ok(Self {
            template,
            capacity,
            rows: 0,
            builders,
        })
    }

    fn column_builders(template: &SchemaTemplate, capacity: usize) -> Result<Vec<ColumnBuilder>> {
        template
            .schema
            .fields()
            .iter()
            .map(|field| {
                ColumnBuilder::new(field.data_type(), capacity).ok_or_else(|| {
                    Error::from(SchemaError::UnsupportedType {
                        column: field.name().clone(),
                        data_type: field.data_type().to_string(),
                    })
                })
            })
            .collect()
    }

    pub fn template(&self) -> &SchemaTemplate {
        &self.template
    }

    /// Get the current row count.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Append one document as a row.
    pub fn append_document<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        days: &DayNumbering,
    ) -> Result<()> {
        let fields = self.template.description.iter();
        for (builder, field) in self.builders.iter_mut().zip(fields) {
            match doc.get(&field.name) {
                None => builder.append(&field.name, &field.default)?,
                Some(value) => {
                    let stored = coerce(value, field, days)?;
                    builder.append(&field.name, &stored)?;
                }
            }
        }
        self.rows += 1;
        Ok(())
    }

    /// Build a batch from the accumulated rows and start a new one.
    ///
    /// The row count is carried explicitly so that a schema with no columns
    /// still yields batches of the right length.
    pub fn finish(&mut self) -> Result<RecordBatch> {
        let arrays: Vec<ArrayRef> = self.builders.iter_mut().map(|b| b.finish()).collect();
        let options = RecordBatchOptions::new().with_row_count(Some(self.rows));
        self.rows = 0;

        let batch =
            RecordBatch::try_new_with_options(self.template.schema.clone(), arrays, &options)?;
        Ok(batch)
    }

    /// Discard any accumulated rows, including a partially appended one.
    pub fn reset(&mut self) {
        self.rows = 0;
        for (builder, field) in self.builders.iter_mut().zip(self.template.schema.fields()) {
            if builder.len() > 0 {
                if let Some(fresh) = ColumnBuilder::new(field.data_type(), self.capacity) {
                    *builder = fresh;
                }
            }
        }
    }
}
