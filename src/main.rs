//! fileeq - Logical equality for files

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use fileeq::config::{CompareOptions, CrossFormat, MissingCapability, OutputFormat};
use fileeq::output::render_to_stdout;
use fileeq::LogicalComparator;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Text,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Text => OutputFormat::Text,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Check whether two files are logically equal (CSV and Parquet compared as tables)
#[derive(Parser, Debug)]
#[command(name = "fileeq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// First file
    left: PathBuf,

    /// Second file
    right: PathBuf,

    /// Ignore column names and compare columns by position
    #[arg(long)]
    ignore_headers: bool,

    /// Never compare different tabular formats (e.g. CSV against Parquet)
    #[arg(long)]
    same_format_only: bool,

    /// Compare bytes when a tabular format is not supported by this build
    #[arg(long)]
    binary_fallback: bool,

    /// Treat .tsv files as tab-separated tables
    #[arg(long)]
    tsv: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: CliOutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --verbose
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let options = CompareOptions::new()
        .with_ignore_headers(cli.ignore_headers)
        .with_cross_format(if cli.same_format_only {
            CrossFormat::Disabled
        } else {
            CrossFormat::Enabled
        })
        .with_missing_capability(if cli.binary_fallback {
            MissingCapability::BinaryFallback
        } else {
            MissingCapability::Fail
        })
        .with_recognize_tsv(cli.tsv);

    let comparator = LogicalComparator::new(options);
    let verdict = comparator.compare(&cli.left, &cli.right)?;

    render_to_stdout(&verdict, &cli.left, &cli.right, cli.format.into())?;

    Ok(verdict.equal)
}
