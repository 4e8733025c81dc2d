//! Output formatting for record batches.
//!
//! Batches are written as they arrive, in table, CSV, or JSON format.

use std::io::Write;

use arrow::array::{Array, ArrayRef, RecordBatch};
use arrow::datatypes::{DataType, Schema};
use clap::ValueEnum;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table (default)
    Table,
    /// Comma-separated values
    Csv,
    /// JSON Lines (one JSON object per row)
    Json,
}

/// Formats record batches for output.
///
/// CSV output writes its header once, before the first batch.
pub struct OutputFormatter {
    format: OutputFormat,
    header_written: bool,
}

impl OutputFormatter {
    /// Create a new formatter with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            header_written: false,
        }
    }

    /// Format a RecordBatch and write to the given writer.
    pub fn write<W: Write>(&mut self, batch: &RecordBatch, writer: &mut W) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Table => self.write_table(batch, writer),
            OutputFormat::Csv => self.write_csv(batch, writer),
            OutputFormat::Json => self.write_json(batch, writer),
        }
    }

    /// Write a schema as a table of column name, Arrow type, and default.
    pub fn write_schema<W: Write>(schema: &Schema, writer: &mut W) -> std::io::Result<()> {
        use comfy_table::Table;

        let mut table = Table::new();
        table.set_header(vec!["column", "type", "default"]);
        for field in schema.fields() {
            let default = field
                .metadata()
                .get(docbatch_arrow::DEFAULT_METADATA_KEY)
                .cloned()
                .unwrap_or_default();
            table.add_row(vec![
                field.name().clone(),
                field.data_type().to_string(),
                default,
            ]);
        }
        writeln!(writer, "{table}")
    }

    fn format_value(col: &ArrayRef, row_idx: usize) -> String {
        if col.is_null(row_idx) {
            return String::new();
        }
        arrow::util::display::array_value_to_string(col, row_idx)
            .unwrap_or_else(|_| "?".to_string())
    }

    fn write_table<W: Write>(&self, batch: &RecordBatch, writer: &mut W) -> std::io::Result<()> {
        use comfy_table::{Cell, Table};

        let mut table = Table::new();

        // Add header row
        let headers: Vec<Cell> = batch
            .schema()
            .fields()
            .iter()
            .map(|f| Cell::new(f.name()))
            .collect();
        table.set_header(headers);

        // Add data rows
        for row_idx in 0..batch.num_rows() {
            let row: Vec<Cell> = batch
                .columns()
                .iter()
                .map(|col| Cell::new(Self::format_value(col, row_idx)))
                .collect();
            table.add_row(row);
        }

        writeln!(writer, "{table}")
    }

    fn write_csv<W: Write>(&mut self, batch: &RecordBatch, writer: &mut W) -> std::io::Result<()> {
        if !self.header_written {
            let schema = batch.schema();
            let headers: Vec<String> = schema
                .fields()
                .iter()
                .map(|f| Self::escape_csv(f.name()))
                .collect();
            writeln!(writer, "{}", headers.join(","))?;
            self.header_written = true;
        }

        for row_idx in 0..batch.num_rows() {
            let values: Vec<String> = batch
                .columns()
                .iter()
                .map(|col| Self::escape_csv(&Self::format_value(col, row_idx)))
                .collect();
            writeln!(writer, "{}", values.join(","))?;
        }

        Ok(())
    }

    fn escape_csv(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }

    fn write_json<W: Write>(&self, batch: &RecordBatch, writer: &mut W) -> std::io::Result<()> {
        let schema = batch.schema();

        for row_idx in 0..batch.num_rows() {
            let mut obj = serde_json::Map::new();
            for (col_idx, field) in schema.fields().iter().enumerate() {
                let col = batch.column(col_idx);
                obj.insert(field.name().clone(), Self::json_value(col, row_idx));
            }
            writeln!(writer, "{}", serde_json::Value::Object(obj))?;
        }

        Ok(())
    }

    /// Numbers stay numbers; text, dates, and timestamps become strings.
    fn json_value(col: &ArrayRef, row_idx: usize) -> serde_json::Value {
        use serde_json::Value;

        if col.is_null(row_idx) {
            return Value::Null;
        }
        let text = Self::format_value(col, row_idx);
        match col.data_type() {
            DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
                text.parse::<u64>().map(Value::from).unwrap_or(Value::String(text))
            }
            DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
                text.parse::<i64>().map(Value::from).unwrap_or(Value::String(text))
            }
            DataType::Float32 | DataType::Float64 => text
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::String(text)),
            _ => Value::String(text),
        }
    }
}
