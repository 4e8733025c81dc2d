//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

use docbatch_core::cursor::DEFAULT_PAGE_SIZE;
use docbatch_core::{FieldDescriptor, SchemaDescription, SchemaError, StreamConfig, TimeZoneSetting};
use docbatch_core::DEFAULT_BATCH_SIZE;

use super::OutputFormat;

/// Convert a JSON-lines document export into typed columnar batches.
#[derive(Parser, Debug)]
#[command(name = "docbatch")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON-lines file, one document per line (stdin when omitted or "-")
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output columns as name:Type[=default] (comma-separated or repeated)
    #[arg(short = 's', long = "schema", value_name = "COLUMNS", value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Requested rows per batch (pages are never split)
    #[arg(long = "batch-size", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Documents read per cursor round trip
    #[arg(long = "page-size", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Time zone for Date columns: UTC, local, or an offset like +02:00
    #[arg(long = "time-zone", default_value = "UTC")]
    pub time_zone: TimeZoneSetting,

    /// Output format for stdout
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Show the output schema and exit
    #[arg(long = "show-schema")]
    pub show_schema: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Build the schema description from the `--schema` columns, in order.
    pub fn description(&self) -> Result<SchemaDescription, SchemaError> {
        let fields = self
            .columns
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(FieldDescriptor::parse_spec)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SchemaDescription::new(fields))
    }

    pub fn stream_config(&self) -> StreamConfig {
        StreamConfig::default()
            .with_batch_size(self.batch_size)
            .with_time_zone(self.time_zone)
    }

    /// Whether input comes from stdin.
    pub fn reads_stdin(&self) -> bool {
        match &self.file {
            None => true,
            Some(path) => path.as_os_str() == "-",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docbatch_core::DataKind;

    #[test]
    fn test_schema_columns() {
        let args = Args::parse_from([
            "docbatch",
            "-s",
            "id:UInt32,name:String=anon",
            "--schema",
            "born:Date",
            "docs.jsonl",
        ]);

        let description = args.description().unwrap();
        let names: Vec<_> = description.names().collect();
        assert_eq!(names, vec!["id", "name", "born"]);
        assert_eq!(description.fields()[2].kind, DataKind::Date);
        assert!(!args.reads_stdin());
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["docbatch"]);

        assert!(args.reads_stdin());
        assert!(args.description().unwrap().is_empty());
        assert_eq!(args.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(args.stream_config(), StreamConfig::default());
        assert_eq!(args.format, OutputFormat::Table);
    }

    #[test]
    fn test_config_flags() {
        let args = Args::parse_from([
            "docbatch",
            "--batch-size",
            "0",
            "--time-zone",
            "+02:00",
            "-vv",
            "-",
        ]);

        let config = args.stream_config();
        assert_eq!(config.batch_size, 1);
        assert_eq!(config.time_zone.to_string(), "+02:00");
        assert_eq!(args.verbose, 2);
        assert!(args.reads_stdin());
    }

    #[test]
    fn test_bad_time_zone_rejected() {
        assert!(Args::try_parse_from(["docbatch", "--time-zone", "Mars/Olympus"]).is_err());
    }

    #[test]
    fn test_bad_column_reported() {
        let args = Args::parse_from(["docbatch", "-s", "id:Uint128"]);
        assert!(matches!(
            args.description(),
            Err(SchemaError::UnknownType { .. })
        ));
    }
}
