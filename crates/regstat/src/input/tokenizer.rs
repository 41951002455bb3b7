//! Delimited-text tokenizer with delimiter detection.
//!
//! Fields are split on the delimiter only. Quotes are ordinary characters, so
//! a delimiter inside a field always splits it.

use std::io::{BufRead, BufReader};

use tracing::debug;

use super::table::{HeaderIndex, RowSet};
use crate::error::Result;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b',', b'\t', b';', b'|'];

/// Tokenizer configuration.
#[derive(Debug, Clone, Default)]
pub struct TokenizerConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum data rows to read (None = all).
    pub max_rows: Option<usize>,
}

/// Output of a tokenizer pass.
#[derive(Debug, Clone)]
pub struct Tokenized {
    pub table: RowSet,
    pub delimiter: u8,
}

/// Splits raw delimited text into a header index and data rows.
pub struct Tokenizer {
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a new tokenizer with default configuration.
    pub fn new() -> Self {
        Self {
            config: TokenizerConfig::default(),
        }
    }

    /// Create a tokenizer with custom configuration.
    pub fn with_config(config: TokenizerConfig) -> Self {
        Self { config }
    }

    /// Tokenize a text blob.
    ///
    /// The first non-empty line is the header. Data rows with fewer than two
    /// fields are dropped without being reported.
    pub fn tokenize(&self, bytes: &[u8]) -> Result<Tokenized> {
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes),
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(bytes);

        let mut records = reader.byte_records();

        let headers = match records.next() {
            Some(record) => {
                let record = record?;
                HeaderIndex::new(record.iter().map(|f| String::from_utf8_lossy(f)))
            }
            None => {
                return Ok(Tokenized {
                    table: RowSet::default(),
                    delimiter,
                });
            }
        };

        let mut rows = Vec::new();
        let mut skipped = 0usize;

        for result in records {
            if let Some(max) = self.config.max_rows {
                if rows.len() >= max {
                    break;
                }
            }

            let record = result?;
            if record.len() < 2 {
                skipped += 1;
                continue;
            }

            rows.push(
                record
                    .iter()
                    .map(|f| String::from_utf8_lossy(f).into_owned())
                    .collect(),
            );
        }

        debug!(
            columns = headers.len(),
            rows = rows.len(),
            skipped,
            delimiter = %(delimiter as char).escape_default(),
            "tokenized"
        );

        Ok(Tokenized {
            table: RowSet::new(headers, rows),
            delimiter,
        })
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Short format name for a delimiter.
pub fn format_name(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}

/// Detect the delimiter by analyzing the first few lines.
///
/// Falls back to a comma when no candidate appears at all.
pub fn detect_delimiter(bytes: &[u8]) -> u8 {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| line.bytes().filter(|&b| b == delim).count())
            .collect();

        let Some(&first_count) = counts.first() else {
            continue;
        };
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; ties keep the earlier candidate.
        let score = if consistent {
            first_count * 1000
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    best_delimiter
}
