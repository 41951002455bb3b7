//! Process command - aggregate extracts and save the processed dataset.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use regstat::aggregate::{AggregatorConfig, ClosureProgressReporter, ProgressUpdate};
use regstat::{
    CancellationToken, ProcessedDataset, Regstat, RegstatConfig, RegstatError, TimelineConfig,
    TokenizerConfig,
};

pub struct ProcessArgs {
    pub files: Vec<PathBuf>,
    pub output: PathBuf,
    pub delimiter: Option<u8>,
    pub batch_size: usize,
    pub document: bool,
    pub seed: Option<u64>,
    pub json: bool,
    pub verbose: bool,
}

pub fn run(args: ProcessArgs) -> Result<(), Box<dyn std::error::Error>> {
    for file in &args.files {
        if !file.exists() {
            return Err(format!("File not found: {}", file.display()).into());
        }
    }

    let config = RegstatConfig {
        tokenizer: TokenizerConfig {
            delimiter: args.delimiter,
            ..TokenizerConfig::default()
        },
        aggregator: AggregatorConfig {
            batch_size: args.batch_size,
        },
        timeline: TimelineConfig {
            seed: args.seed,
            ..TimelineConfig::default()
        },
    };
    config.validate()?;

    if !args.json {
        let names: Vec<String> = args.files.iter().map(|f| f.display().to_string()).collect();
        println!("{} {}", "Processing".cyan().bold(), names.join(", ").white());
    }

    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())?;

    let mut regstat = Regstat::with_config(config);
    if args.verbose && !args.json {
        regstat = regstat.with_progress(Arc::new(ClosureProgressReporter::new(
            |update: ProgressUpdate| {
                eprintln!(
                    "  {} {}/{} rows ({:.0}%)",
                    update.source.dimmed(),
                    update.rows_processed,
                    update.rows_total,
                    update.fraction() * 100.0
                );
            },
        )));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let report = match runtime.block_on(regstat.process_paths(&args.files, args.document, &cancel))
    {
        Ok(report) => report,
        Err(RegstatError::Cancelled) => {
            return Err("Processing cancelled; nothing was saved".into());
        }
        Err(e) => return Err(e.into()),
    };

    let dataset = ProcessedDataset::from_report(&report);
    dataset.save(&args.output)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.verbose {
        println!();
        println!("{}", "Sources:".yellow().bold());
        for (meta, classified) in report.sources.iter().zip(&report.classifications) {
            println!(
                "  {:30} {:8} {:>8} rows  {}",
                meta.name,
                meta.format,
                meta.row_count,
                classified.classification.kind.to_string().cyan()
            );
        }
    }

    println!();
    super::print_stats(&report.stats);

    if report.reconciliation.shortfall_added > 0 {
        println!();
        println!(
            "{} {} rows without activity counted as enrolments",
            "Note:".yellow(),
            report.reconciliation.shortfall_added
        );
    }

    if report.no_usable_data() {
        println!();
        println!(
            "{}",
            "Warning: no usable data found. Check that the file has state and age columns."
                .yellow()
                .bold()
        );
    }

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        args.output.display().to_string().white()
    );

    Ok(())
}
