//! Drilldown command - state values, or the district grid of one state.

use std::path::PathBuf;

use colored::Colorize;
use regstat::{DemographicFilter, ProcessedDataset};

pub fn run(
    file: PathBuf,
    state: Option<String>,
    month: usize,
    demographic: DemographicFilter,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("Dataset not found: {}", file.display()).into());
    }

    let dataset = ProcessedDataset::load(&file)?;
    let label = dataset
        .timeline
        .slots
        .get(month)
        .map(|s| s.label.clone())
        .unwrap_or_else(|| format!("slot {}", month));
    let geo = dataset.geo_summary();

    if geo.is_sample() {
        println!(
            "{}",
            "No regional counts in this dataset; showing sample values.".yellow()
        );
    }

    match state {
        None => {
            println!(
                "{} {} / {}",
                "States for".cyan().bold(),
                label.white(),
                demographic.to_string().white()
            );
            println!();

            let values = geo.state_values(month, demographic);
            let max = values.iter().map(|v| v.value).max().unwrap_or(0).max(1);
            for value in values {
                let bar = "█".repeat((value.value as f64 / max as f64 * 30.0).round() as usize);
                println!("  {:24} {:>12} {}", value.name, value.value, bar.cyan());
            }
        }
        Some(state) => {
            let grid = geo.district_grid(&state, month, demographic);
            println!(
                "{} {} ({} / {})",
                "Districts of".cyan().bold(),
                grid.state.white(),
                label,
                demographic
            );

            if grid.cells.is_empty() {
                println!("{}", "No district data for this state.".yellow());
                return Ok(());
            }
            if grid.sample {
                println!("{}", "Sample district layout".dimmed());
            }
            println!("Grid: {} x {}", grid.columns, grid.rows);
            println!();

            for row in 0..grid.rows {
                let line: Vec<String> = grid
                    .cells
                    .iter()
                    .filter(|c| c.row == row)
                    .map(|c| format!("{:>18}", format!("{} {}", c.name, c.value)))
                    .collect();
                println!("  {}", line.join(" "));
            }

            if verbose {
                println!();
                for cell in &grid.cells {
                    println!(
                        "  {:20} x={:.1} y={:.1} w={:.1} h={:.1}",
                        cell.name, cell.rect.x, cell.rect.y, cell.rect.width, cell.rect.height
                    );
                }
            }
        }
    }

    Ok(())
}
