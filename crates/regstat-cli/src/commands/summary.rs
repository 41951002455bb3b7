//! Summary command - print a processed dataset.

use std::path::PathBuf;

use chrono::Utc;
use colored::Colorize;
use regstat::ProcessedDataset;

pub fn run(
    file: PathBuf,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!(
            "Dataset not found: {}\nRun 'regstat process <FILES>' first.",
            file.display()
        )
        .into());
    }

    let dataset = ProcessedDataset::load(&file)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&dataset)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Summary for".cyan().bold(),
        dataset.file.white()
    );
    let age = Utc::now().signed_duration_since(dataset.processed_at);
    println!(
        "Processed at {} ({} hours ago)",
        dataset.processed_at.format("%Y-%m-%d %H:%M:%S UTC"),
        age.num_hours().max(0)
    );
    if verbose && dataset.sources.len() > 1 {
        for source in &dataset.sources {
            println!("  {}", source.dimmed());
        }
    }
    println!();

    super::print_stats(&dataset.stats);

    println!();
    let kind = if dataset.timeline.synthetic {
        "synthetic".dimmed().to_string()
    } else {
        "from dates".to_string()
    };
    println!("{} ({})", "Timeline:".yellow().bold(), kind);
    for slot in &dataset.timeline.slots {
        let bar = "█".repeat((slot.weight * 20.0).round() as usize);
        println!("  {:8} {:5.2} {}", slot.label, slot.weight, bar.cyan());
    }

    Ok(())
}
