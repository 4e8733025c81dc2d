//! Command-line interface module.
//!
//! This module handles:
//! - Argument parsing via clap
//! - Output formatting (table, CSV, JSON)

mod args;
mod output;

pub use args::Args;
pub use output::{OutputFormat, OutputFormatter};
