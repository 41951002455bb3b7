//! Batch-at-a-time aggregation that yields to the runtime between batches.

use std::sync::Arc;

use tracing::debug;

use super::control::{CancellationToken, ProgressReporter, ProgressUpdate};
use super::numeric::parse_count;
use super::stats::{AgeSplit, Stats};
use crate::error::{RegstatError, Result};
use crate::input::{RawRow, RowSet};
use crate::schema::{Classification, DatasetKind, Gender};

/// Default number of rows per batch.
pub const DEFAULT_BATCH_SIZE: usize = 5000;

/// Aggregator configuration.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Rows processed between yield points.
    pub batch_size: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// How rows without activity are attributed to regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionAttribution {
    /// Rows of an unclassified dataset count 1 toward their region.
    ActivityOrRow,
    /// Only rows with positive activity touch region counters.
    ActivityOnly,
}

/// Accumulates rows into [`Stats`] in bounded batches.
#[derive(Clone, Default)]
pub struct ChunkedAggregator {
    config: AggregatorConfig,
    progress: Option<Arc<dyn ProgressReporter>>,
}

impl ChunkedAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AggregatorConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Report progress after every batch.
    pub fn with_progress(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress = Some(reporter);
        self
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Aggregate every row of `table` into `stats`.
    ///
    /// The token is checked before each batch. On cancellation `stats` holds a
    /// partial, unreconciled aggregate and must be discarded.
    pub async fn aggregate(
        &self,
        source: &str,
        table: &RowSet,
        plan: &Classification,
        stats: &mut Stats,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(RegstatError::Cancelled);
        }

        stats.record_kinds(&plan.matched_kinds);

        let batch_size = self.config.batch_size.max(1);
        let total = table.len();
        let mut processed = 0usize;

        for (batch, rows) in table.rows().chunks(batch_size).enumerate() {
            if cancel.is_cancelled() {
                debug!(source, batch, processed, "cancelled");
                return Err(RegstatError::Cancelled);
            }

            for fields in rows {
                accumulate_row(
                    RawRow::new(fields),
                    plan,
                    stats,
                    RegionAttribution::ActivityOrRow,
                );
            }
            processed += rows.len();

            debug!(source, batch, processed, total, "batch aggregated");
            if let Some(reporter) = &self.progress {
                reporter.report(ProgressUpdate {
                    source: source.to_string(),
                    rows_processed: processed,
                    rows_total: total,
                });
            }

            if processed < total {
                tokio::task::yield_now().await;
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for ChunkedAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkedAggregator")
            .field("config", &self.config)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// Fold one row into `stats`.
pub fn accumulate_row(
    row: RawRow<'_>,
    plan: &Classification,
    stats: &mut Stats,
    attribution: RegionAttribution,
) {
    let mut activity = 0u64;
    let mut split = AgeSplit::default();

    for column in &plan.activity_columns {
        let value = parse_count(row.get(column.index));
        activity = activity.saturating_add(value);
        if let Some(bucket) = column.bucket {
            stats.age_counts.add(bucket, value);
            split.add(bucket, value);
        }
    }
    stats.add_activity(plan.kind, activity);

    if let Some(column) = &plan.gender {
        if let Some(gender) = Gender::classify(row.get(column.index)) {
            stats.gender_counts.increment(gender);
        }
    }

    if let Some(column) = &plan.region {
        let state = row.get(column.index).trim();
        let increment = if activity > 0 {
            Some((activity, split))
        } else if plan.kind == DatasetKind::Unknown
            && attribution == RegionAttribution::ActivityOrRow
        {
            Some((1, AgeSplit::default()))
        } else {
            None
        };

        if let (false, Some((amount, split))) = (state.is_empty(), increment) {
            let district = plan
                .district
                .as_ref()
                .map(|d| row.get(d.index).trim())
                .filter(|d| !d.is_empty());
            stats.add_region(state, district, amount, split);
        }
    }

    stats.total_rows = stats.total_rows.saturating_add(1);
}
