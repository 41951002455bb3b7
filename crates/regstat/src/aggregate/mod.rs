//! Counting: the statistics model, the batch aggregator and reconciliation.
//!
//! Rows flow through [`ChunkedAggregator::aggregate`] into a mutable [`Stats`],
//! which [`reconcile`] turns into read-only [`FinalizedStats`].

mod chunked;
mod control;
mod numeric;
mod reconcile;
mod stats;

pub use chunked::{
    AggregatorConfig, ChunkedAggregator, DEFAULT_BATCH_SIZE, RegionAttribution, accumulate_row,
};
pub use control::{CancellationToken, ClosureProgressReporter, ProgressReporter, ProgressUpdate};
pub use numeric::{is_numeric_field, parse_count};
pub use reconcile::{FinalizedStats, ReconciliationReport, reconcile};
pub use stats::{
    AgeCounts, AgeSplit, DistrictCounter, GenderCounts, RegionAggregate, RegionCounter, Stats,
};
