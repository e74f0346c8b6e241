//! # facscore
//!
//! Computes FAC scores from a peak area table and writes the normalized
//! score table.
//!
//! ```bash
//! facscore peaks.csv scores.csv
//! facscore peaks.tsv scores.tsv --normalization fixed-offset -v
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;

use facscore::{io, FacConfig, FacScore, Normalization};

/// CLI-friendly normalization choice
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliNormalization {
    /// Subtract the max score of the dST control group
    Dst,
    /// Subtract the fixed baseline of 3.4
    FixedOffset,
    /// Write the raw scores
    None,
}

impl From<CliNormalization> for Normalization {
    fn from(choice: CliNormalization) -> Self {
        match choice {
            CliNormalization::Dst => Normalization::ReferenceMax,
            CliNormalization::FixedOffset => Normalization::fixed_offset(),
            CliNormalization::None => Normalization::Unnormalized,
        }
    }
}

/// FAC scoring of ion peak areas across groups of replicates
#[derive(Parser)]
#[command(name = "facscore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Peak area table (CSV, or TSV by extension) with a `group` column
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output score table
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Normalization applied to the written scores
    #[arg(short, long, value_enum, default_value = "dst")]
    normalization: CliNormalization,

    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = FacConfig::builder()
        .normalization(cli.normalization.into())
        .build();

    let table = io::read_peak_table(&cli.input, &config.group_column, None)
        .with_context(|| format!("Failed to load peak table {}", cli.input.display()))?;

    let results = FacScore::new(&table, config)
        .run()
        .context("FAC scoring failed")?;
    results.log_summary();

    io::write_score_table(&cli.output, &results.normalized)
        .with_context(|| format!("Failed to write scores to {}", cli.output.display()))?;
    info!("Done");
    Ok(())
}
