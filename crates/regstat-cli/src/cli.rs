//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use regstat::DemographicFilter;
use std::path::PathBuf;

/// Regstat: aggregate civil-registration extracts into dashboard statistics
#[derive(Parser)]
#[command(name = "regstat")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate one or more extracts into a processed dataset
    Process {
        /// Input files (.csv, .tsv, .txt, .json or .zip)
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Output path for the processed dataset
        #[arg(short, long, default_value = regstat::DEFAULT_OUTPUT_FILE)]
        output: PathBuf,

        /// Field delimiter (auto-detected when omitted)
        #[arg(short, long, value_parser = parse_delimiter)]
        delimiter: Option<u8>,

        /// Rows aggregated between yield points
        #[arg(long, default_value_t = regstat::aggregate::DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        /// Treat text inputs as extracted document text
        #[arg(long)]
        document: bool,

        /// Seed for the synthetic timeline
        #[arg(long)]
        seed: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the summary of a processed dataset
    Summary {
        /// Path to a processed dataset
        #[arg(value_name = "DATASET")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show state values, or the district grid of one state
    Drilldown {
        /// Path to a processed dataset
        #[arg(value_name = "DATASET")]
        file: PathBuf,

        /// State to drill into
        #[arg(short, long)]
        state: Option<String>,

        /// Timeline slot (0-based)
        #[arg(short, long, default_value = "0")]
        month: usize,

        /// Demographic slice: all, 0-5, 5-18 or 18+
        #[arg(long, default_value = "all")]
        demographic: DemographicFilter,
    },
}

/// Accept a single ASCII character, or `\t` / `tab` for tabs.
fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!(
            "Invalid delimiter: {}. Use a single character such as ',' or ';'.",
            s
        )),
    }
}
