//! docbatch CLI entry point.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use docbatch::cli::{Args, OutputFormatter};
use docbatch::{DocumentBatchStream, DocumentCursor, JsonLinesCursor, SchemaTemplate};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();

    let description = args.description().context("Invalid --schema")?;
    let template = SchemaTemplate::from_description(description);

    if args.show_schema {
        let mut stdout = io::stdout();
        OutputFormatter::write_schema(&template.schema, &mut stdout)?;
        return Ok(());
    }

    if args.reads_stdin() {
        let cursor = JsonLinesCursor::new(io::stdin().lock(), "stdin", args.page_size);
        run(cursor, template, &args)
    } else {
        let path = args.file.as_deref().context("Input file required")?;
        let cursor = JsonLinesCursor::open(path, args.page_size)
            .with_context(|| format!("Failed to open input file: {}", path.display()))?;
        run(cursor, template, &args)
    }
}

/// Drain the stream, writing each batch as it arrives.
fn run<C: DocumentCursor<Session = ()>>(cursor: C, template: SchemaTemplate, args: &Args) -> Result<()> {
    let mut stream =
        DocumentBatchStream::with_template(Arc::new(()), cursor, template, args.stream_config())?;
    info!(stream = %stream.stream_identity(), batch_size = stream.batch_size(), "stream_opened");

    let mut formatter = OutputFormatter::new(args.format);
    let mut stdout = io::stdout().lock();
    let mut batches = 0usize;

    loop {
        let batch = stream
            .next_batch()
            .with_context(|| format!("Failed reading {}", stream.stream_identity()))?;
        if batch.num_rows() == 0 {
            break;
        }
        formatter.write(&batch, &mut stdout)?;
        batches += 1;
    }
    stdout.flush()?;

    info!(
        stream = %stream.stream_identity(),
        batches = batches,
        rows = stream.rows_emitted(),
        "stream_complete"
    );
    Ok(())
}
