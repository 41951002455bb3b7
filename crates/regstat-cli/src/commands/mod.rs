//! CLI command implementations.

pub mod drilldown;
pub mod process;
pub mod summary;

use colored::Colorize;
use regstat::Stats;
use regstat::schema::Gender;

/// Print the headline counters of a dataset.
pub fn print_stats(stats: &Stats) {
    println!("{}", "Totals:".yellow().bold());
    println!(
        "  Enrolments:          {}",
        stats.total_enrolments.to_string().white().bold()
    );
    println!(
        "  Updates:             {}",
        stats.total_updates.to_string().white().bold()
    );
    println!("    biometric:         {}", stats.biometric_updates);
    println!("    demographic:       {}", stats.demographic_updates);
    println!("  Rows:                {}", stats.total_rows);

    let kinds: Vec<&str> = stats.data_types.iter().map(|k| k.label()).collect();
    if !kinds.is_empty() {
        println!("  Dataset types:       {}", kinds.join(", ").cyan());
    }

    println!();
    println!("{}", "Age:".yellow().bold());
    for bucket in regstat::AgeBucket::ALL {
        println!("  {:8} {}", bucket.label(), stats.age_counts.get(bucket));
    }

    if stats.gender_counts.total() > 0 {
        println!();
        println!("{}", "Gender:".yellow().bold());
        for (label, gender) in [
            ("Male", Gender::Male),
            ("Female", Gender::Female),
            ("Other", Gender::Other),
        ] {
            println!("  {:8} {}", label, stats.gender_counts.get(gender));
        }
    }

    if !stats.state_counts.is_empty() {
        let mut states: Vec<_> = stats.state_counts.iter().collect();
        states.sort_by(|a, b| b.1.total.cmp(&a.1.total));

        println!();
        println!(
            "{} ({} total)",
            "Top states:".yellow().bold(),
            stats.state_counts.len()
        );
        for (name, counts) in states.iter().take(10) {
            let districts = stats.district_counts.get(*name).map(|d| d.len()).unwrap_or(0);
            if districts > 0 {
                println!("  {:24} {:>12}  ({} districts)", name, counts.total, districts);
            } else {
                println!("  {:24} {:>12}", name, counts.total);
            }
        }
    }
}
