//! Final pass over the aggregated counters.

use std::ops::Deref;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::stats::Stats;

/// What the reconciliation pass found and changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Nothing was counted: no activity and no rows.
    pub no_usable_data: bool,
    /// Rows added to `totalEnrolments` so that every row is counted.
    pub shortfall_added: u64,
}

/// Stats after reconciliation. Read-only through `Deref`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinalizedStats(Stats);

impl FinalizedStats {
    pub fn into_inner(self) -> Stats {
        self.0
    }
}

impl Deref for FinalizedStats {
    type Target = Stats;

    fn deref(&self) -> &Stats {
        &self.0
    }
}

/// Finalize `stats`.
///
/// When fewer activity units than rows were counted, the difference is
/// credited to enrolments. Dataset kinds are de-duplicated in first-seen order.
pub fn reconcile(mut stats: Stats) -> (FinalizedStats, ReconciliationReport) {
    let mut report = ReconciliationReport::default();

    if stats.is_empty() {
        warn!("no usable data found");
        report.no_usable_data = true;
    }

    let counted = stats.total_activity();
    if counted < stats.total_rows {
        let shortfall = stats.total_rows - counted;
        info!(
            counted,
            rows = stats.total_rows,
            shortfall,
            "adjusting counts"
        );
        stats.total_enrolments = stats.total_enrolments.saturating_add(shortfall);
        report.shortfall_added = shortfall;
    }

    let kinds: IndexSet<_> = stats.data_types.drain(..).collect();
    stats.data_types = kinds.into_iter().collect();

    (FinalizedStats(stats), report)
}
