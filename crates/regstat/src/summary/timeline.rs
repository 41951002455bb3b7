//! Monthly timeline weights, derived from a date column or synthesized.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{is_numeric_field, parse_count};
use crate::input::{ColumnLookup, RowSet};
use crate::schema::{AGE_FRAGMENT, Classification};

/// Default number of timeline slots.
pub const DEFAULT_MAX_SLOTS: usize = 12;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// Timeline configuration.
#[derive(Debug, Clone)]
pub struct TimelineConfig {
    /// Maximum number of months kept.
    pub max_slots: usize,
    /// Seed for the synthetic timeline. Unseeded timelines differ per run.
    pub seed: Option<u64>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            max_slots: DEFAULT_MAX_SLOTS,
            seed: None,
        }
    }
}

/// One month of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSlot {
    /// Calendar month, 0 for January through 11 for December.
    pub month_index: usize,
    /// Relative activity, in `(0, 1]` for date-derived slots.
    pub weight: f64,
    pub label: String,
}

/// Ordered monthly weights used to scale geographic values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub slots: Vec<TimelineSlot>,
    /// True when the weights are random rather than derived from dates.
    pub synthetic: bool,
}

impl Timeline {
    /// Twelve calendar months with weights in `[0.8, 1.2)`.
    pub fn synthetic(config: &TimelineConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        let slots = MONTH_LABELS
            .iter()
            .enumerate()
            .map(|(month_index, label)| TimelineSlot {
                month_index,
                weight: 0.8 + rng.f64() * 0.4,
                label: label.to_string(),
            })
            .collect();

        Self {
            slots,
            synthetic: true,
        }
    }

    /// Weight of slot `index`, or 1.0 when there is no such slot.
    pub fn multiplier(&self, index: usize) -> f64 {
        self.slots.get(index).map(|s| s.weight).unwrap_or(1.0)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Accumulates per-month activity across one or more row sets.
#[derive(Debug, Clone, Default)]
pub struct TimelineBuilder {
    months: BTreeMap<(i32, u32), u64>,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every row of `table` under the month of its date column.
    ///
    /// Tables without a resolved date column are ignored, as are rows whose
    /// date does not parse.
    pub fn observe(&mut self, table: &RowSet, plan: &Classification) {
        let Some(date) = &plan.date else {
            return;
        };
        let age_columns = table.headers().find_columns(AGE_FRAGMENT);

        let mut skipped = 0usize;
        for row in table.iter() {
            let Some(day) = parse_date(row.get(date.index)) else {
                skipped += 1;
                continue;
            };

            let count = age_columns
                .iter()
                .map(|&idx| row.get(idx))
                .filter(|value| is_numeric_field(value))
                .fold(0u64, |acc, value| acc.saturating_add(parse_count(value)));

            let slot = self.months.entry((day.year(), day.month())).or_default();
            *slot = slot.saturating_add(count);
        }

        if skipped > 0 {
            debug!(column = %date.name, skipped, "rows with unparseable dates");
        }
    }

    /// Returns true if no dated row has been observed.
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Build the timeline, falling back to a synthetic one without dates.
    pub fn finish(self, config: &TimelineConfig) -> Timeline {
        if self.months.is_empty() {
            return Timeline::synthetic(config);
        }

        let max = self.months.values().copied().max().unwrap_or(0);

        let slots = self
            .months
            .into_iter()
            .filter(|&(_, count)| max == 0 || count > 0)
            .take(config.max_slots)
            .map(|((year, month), count)| TimelineSlot {
                month_index: month.saturating_sub(1) as usize,
                weight: if max == 0 {
                    1.0
                } else {
                    count as f64 / max as f64
                },
                label: format!("{:04}-{:02}", year, month),
            })
            .collect();

        Timeline {
            slots,
            synthetic: false,
        }
    }
}

/// Parse a date field in any of the accepted layouts.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }

    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.date());
    }

    // Date prefix of a longer timestamp
    value
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}
