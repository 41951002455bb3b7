//! Save and load processed datasets as JSON files.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::FinalizedStats;
use crate::engine::ProcessingReport;
use crate::error::{RegstatError, Result};
use crate::input::SourceMetadata;
use crate::summary::{GeoSummary, Timeline};

/// File written when no output path is given.
pub const DEFAULT_OUTPUT_FILE: &str = "dashboard_data.json";

/// The stored result of one processing job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedDataset {
    /// Name of the input, or of the first input when several were combined.
    pub file: String,
    pub processed_at: DateTime<Utc>,
    #[serde(default)]
    pub sources: Vec<String>,
    pub stats: FinalizedStats,
    pub timeline: Timeline,
    /// Regional counters as shown by the drill-down views.
    pub geo: GeoSummary,
}

impl ProcessedDataset {
    /// Capture the persistable parts of a processing report.
    pub fn from_report(report: &ProcessingReport) -> Self {
        let sources: Vec<String> = report.sources.iter().map(|s| s.name.clone()).collect();
        let file = match sources.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [first, rest @ ..] => format!("{} (+{} more)", first, rest.len()),
        };

        Self {
            file,
            processed_at: Utc::now(),
            sources,
            stats: report.stats.clone(),
            timeline: report.timeline.clone(),
            geo: report.geo.clone(),
        }
    }

    /// Regional view scaled by the stored timeline.
    pub fn geo_summary(&self) -> GeoSummary {
        self.geo.clone().with_timeline(self.timeline.clone())
    }

    /// Save the dataset to a JSON file, creating parent directories.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use regstat::persistence::ProcessedDataset;
    /// # fn example(dataset: &ProcessedDataset) -> regstat::Result<()> {
    /// dataset.save("out/dashboard_data.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    RegstatError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            RegstatError::Persistence(format!(
                "Failed to create file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(|e| {
            RegstatError::Persistence(format!("Failed to serialize dataset: {}", e))
        })?;

        Ok(())
    }

    /// Load a dataset saved by [`ProcessedDataset::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            RegstatError::Persistence(format!("Failed to open file '{}': {}", path.display(), e))
        })?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| {
            RegstatError::Persistence(format!(
                "Failed to parse dataset '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{Stats, reconcile};
    use crate::summary::{DemographicFilter, TimelineConfig};
    use tempfile::TempDir;

    fn dataset() -> ProcessedDataset {
        let mut stats = Stats::new();
        stats.total_rows = 3;
        let (stats, _) = reconcile(stats);
        let timeline = Timeline::synthetic(&TimelineConfig {
            seed: Some(1),
            ..Default::default()
        });
        ProcessedDataset {
            file: "enrolment.csv".to_string(),
            processed_at: Utc::now(),
            sources: vec!["enrolment.csv".to_string()],
            geo: GeoSummary::from_stats(&stats, timeline.clone()),
            stats,
            timeline,
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("dashboard_data.json");

        let original = dataset();
        original.save(&path).unwrap();
        let loaded = ProcessedDataset::load(&path).unwrap();

        assert_eq!(loaded.file, original.file);
        assert_eq!(loaded.stats, original.stats);
        assert_eq!(loaded.timeline.slots.len(), 12);
        assert!(loaded.timeline.synthetic);
    }

    #[test]
    fn test_saved_json_uses_dashboard_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        dataset().save(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(json.get("processedAt").is_some());
        assert_eq!(json["stats"]["totalEnrolments"], 3);
        assert!(json["timeline"]["slots"][0].get("monthIndex").is_some());
    }

    #[test]
    fn test_geo_summary_survives_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("geo.json");
        let original = dataset();
        original.save(&path).unwrap();

        let loaded = ProcessedDataset::load(&path).unwrap();
        assert!(loaded.geo.is_sample());
        assert_eq!(loaded.geo_summary().timeline(), &original.timeline);
        assert_eq!(
            loaded.geo_summary().state_values(3, DemographicFilter::All),
            original.geo_summary().state_values(3, DemographicFilter::All)
        );
    }

    #[test]
    fn test_load_missing_file() {
        let result = ProcessedDataset::load("/nonexistent/dashboard_data.json");
        assert!(matches!(result, Err(RegstatError::Persistence(_))));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let result = ProcessedDataset::load(&path);
        assert!(matches!(result, Err(RegstatError::Persistence(_))));
    }
}
