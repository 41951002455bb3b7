//! Geographic drill-down: state values, district values and the district grid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::timeline::Timeline;
use crate::aggregate::{
    DistrictCounter, RegionAggregate, RegionAttribution, RegionCounter, Stats, accumulate_row,
};
use crate::error::RegstatError;
use crate::input::RowSet;
use crate::schema::Classification;

/// Drawing area of the district grid, in pixels.
pub const CANVAS_WIDTH: f64 = 700.0;
pub const CANVAS_HEIGHT: f64 = 500.0;
pub const CANVAS_ORIGIN: f64 = 50.0;
pub const CELL_GUTTER: f64 = 10.0;

/// Shown when no regional counts exist.
const SAMPLE_STATES: [(&str, u64); 10] = [
    ("Uttar Pradesh", 854_000),
    ("Maharashtra", 721_000),
    ("Bihar", 640_000),
    ("West Bengal", 580_000),
    ("Madhya Pradesh", 520_000),
    ("Tamil Nadu", 485_000),
    ("Rajasthan", 450_000),
    ("Karnataka", 420_000),
    ("Gujarat", 376_000),
    ("Andhra Pradesh", 320_000),
];

const SAMPLE_DISTRICTS: [(&str, &[&str]); 2] = [
    (
        "Uttar Pradesh",
        &["Lucknow", "Kanpur", "Agra", "Varanasi", "Allahabad", "Meerut"],
    ),
    ("Maharashtra", &["Mumbai", "Pune", "Nagpur", "Nashik"]),
];

const SAMPLE_DISTRICT_BASE: f64 = 50_000.0;
const SAMPLE_DISTRICT_STEP: f64 = 5_000.0;

/// Which slice of a region's counts to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DemographicFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "0-5")]
    Age0To5,
    #[serde(rename = "5-18")]
    Age5To18,
    #[serde(rename = "18+")]
    Age18Plus,
}

impl DemographicFilter {
    pub fn label(&self) -> &'static str {
        match self {
            DemographicFilter::All => "all",
            DemographicFilter::Age0To5 => "0-5",
            DemographicFilter::Age5To18 => "5-18",
            DemographicFilter::Age18Plus => "18+",
        }
    }

    /// Select the matching counter of a region.
    pub fn select(&self, region: &RegionAggregate) -> u64 {
        match self {
            DemographicFilter::All => region.total,
            DemographicFilter::Age0To5 => region.age_0_5,
            DemographicFilter::Age5To18 => region.age_5_18,
            DemographicFilter::Age18Plus => region.age_18_plus,
        }
    }

    /// Share of a sample value attributed to this slice.
    pub fn sample_share(&self) -> f64 {
        match self {
            DemographicFilter::All => 1.0,
            DemographicFilter::Age0To5 => 0.15,
            DemographicFilter::Age5To18 => 0.30,
            DemographicFilter::Age18Plus => 0.55,
        }
    }
}

impl fmt::Display for DemographicFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DemographicFilter {
    type Err = RegstatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(DemographicFilter::All),
            "0-5" => Ok(DemographicFilter::Age0To5),
            "5-18" => Ok(DemographicFilter::Age5To18),
            "18+" => Ok(DemographicFilter::Age18Plus),
            other => Err(RegstatError::Config(format!(
                "unknown demographic '{}', expected all, 0-5, 5-18 or 18+",
                other
            ))),
        }
    }
}

/// A region name with its scaled value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionValue {
    pub name: String,
    pub value: u64,
}

/// Pixel rectangle of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One district placed on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub name: String,
    pub column: usize,
    pub row: usize,
    pub value: u64,
    pub rect: CellRect,
}

/// Districts of one state laid out row-major on a near-square grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictGrid {
    pub state: String,
    pub columns: usize,
    pub rows: usize,
    pub cells: Vec<GridCell>,
    /// True when the cells come from the built-in sample layout.
    pub sample: bool,
}

/// Columns and rows of a grid holding `n` cells.
pub fn grid_dimensions(n: usize) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }

    let mut columns = (n as f64).sqrt().ceil() as usize;
    while columns * columns < n {
        columns += 1;
    }
    while columns > 1 && (columns - 1) * (columns - 1) >= n {
        columns -= 1;
    }

    (columns, n.div_ceil(columns))
}

/// Regional counters plus the timeline used to scale them.
///
/// The timeline is not serialized; reattach it with
/// [`GeoSummary::with_timeline`] after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoSummary {
    states: RegionCounter,
    districts: DistrictCounter,
    /// True when no regional counts exist and sample values are shown.
    sample: bool,
    #[serde(skip)]
    timeline: Timeline,
}

impl GeoSummary {
    /// Use the regional counters of finalized stats.
    pub fn from_stats(stats: &Stats, timeline: Timeline) -> Self {
        if stats.state_counts.is_empty() {
            return Self::sample(timeline);
        }

        Self {
            states: stats.state_counts.clone(),
            districts: stats.district_counts.clone(),
            sample: false,
            timeline,
        }
    }

    /// Re-derive regional counters from rows, counting only rows with activity.
    pub fn from_rows(table: &RowSet, plan: &Classification, timeline: Timeline) -> Self {
        let mut stats = Stats::new();
        for row in table.iter() {
            accumulate_row(row, plan, &mut stats, RegionAttribution::ActivityOnly);
        }
        Self::from_stats(&stats, timeline)
    }

    /// Built-in sample of ten states.
    pub fn sample(timeline: Timeline) -> Self {
        Self {
            states: RegionCounter::new(),
            districts: DistrictCounter::new(),
            sample: true,
            timeline,
        }
    }

    /// Replace the timeline used for scaling.
    pub fn with_timeline(mut self, timeline: Timeline) -> Self {
        self.timeline = timeline;
        self
    }

    pub fn is_sample(&self) -> bool {
        self.sample
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// State names in display order.
    pub fn state_names(&self) -> Vec<&str> {
        if self.sample {
            SAMPLE_STATES.iter().map(|(name, _)| *name).collect()
        } else {
            self.states.keys().map(|k| k.as_str()).collect()
        }
    }

    /// Every state's value for one timeline slot.
    pub fn state_values(&self, time_index: usize, filter: DemographicFilter) -> Vec<RegionValue> {
        let multiplier = self.timeline.multiplier(time_index);

        if self.sample {
            return SAMPLE_STATES
                .iter()
                .map(|(name, base)| RegionValue {
                    name: name.to_string(),
                    value: scale(*base as f64 * filter.sample_share(), multiplier),
                })
                .collect();
        }

        self.states
            .iter()
            .map(|(name, counts)| RegionValue {
                name: name.clone(),
                value: scale(filter.select(counts) as f64, multiplier),
            })
            .collect()
    }

    /// District values of one state. Falls back to sample districts when the
    /// state has no district counts.
    pub fn district_values(
        &self,
        state: &str,
        time_index: usize,
        filter: DemographicFilter,
    ) -> Vec<RegionValue> {
        let multiplier = self.timeline.multiplier(time_index);

        if let Some(districts) = self.real_districts(state) {
            return districts
                .iter()
                .map(|(name, counts)| RegionValue {
                    name: name.clone(),
                    value: scale(filter.select(counts) as f64, multiplier),
                })
                .collect();
        }

        sample_districts(state)
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let base = SAMPLE_DISTRICT_BASE - idx as f64 * SAMPLE_DISTRICT_STEP;
                RegionValue {
                    name: name.to_string(),
                    value: scale(base * filter.sample_share(), multiplier),
                }
            })
            .collect()
    }

    /// Lay the districts of `state` out on a grid.
    pub fn district_grid(
        &self,
        state: &str,
        time_index: usize,
        filter: DemographicFilter,
    ) -> DistrictGrid {
        let sample = self.real_districts(state).is_none();
        let values = self.district_values(state, time_index, filter);
        let (columns, rows) = grid_dimensions(values.len());

        let cells = values
            .into_iter()
            .enumerate()
            .map(|(i, district)| {
                let column = i % columns;
                let row = i / columns;
                GridCell {
                    name: district.name,
                    column,
                    row,
                    value: district.value,
                    rect: cell_rect(column, row, columns, rows),
                }
            })
            .collect();

        DistrictGrid {
            state: state.to_string(),
            columns,
            rows,
            cells,
            sample,
        }
    }

    fn real_districts(&self, state: &str) -> Option<&RegionCounter> {
        self.districts.get(state).filter(|d| !d.is_empty())
    }
}

fn sample_districts(state: &str) -> &'static [&'static str] {
    SAMPLE_DISTRICTS
        .iter()
        .find(|(name, _)| *name == state)
        .map(|(_, districts)| *districts)
        .unwrap_or(&[])
}

fn cell_rect(column: usize, row: usize, columns: usize, rows: usize) -> CellRect {
    let cell_width = CANVAS_WIDTH / columns as f64;
    let cell_height = CANVAS_HEIGHT / rows as f64;
    CellRect {
        x: CANVAS_ORIGIN + column as f64 * cell_width,
        y: CANVAS_ORIGIN + row as f64 * cell_height,
        width: cell_width - CELL_GUTTER,
        height: cell_height - CELL_GUTTER,
    }
}

fn scale(value: f64, multiplier: f64) -> u64 {
    let scaled = (value * multiplier).round();
    if scaled <= 0.0 { 0 } else { scaled as u64 }
}
