//! Aggregated statistics for one processing job.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::{AgeBucket, DatasetKind, Gender};

/// Counts per gender category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCounts {
    #[serde(rename = "Male")]
    pub male: u64,
    #[serde(rename = "Female")]
    pub female: u64,
    #[serde(rename = "Other")]
    pub other: u64,
}

impl GenderCounts {
    pub fn increment(&mut self, gender: Gender) {
        let slot = match gender {
            Gender::Male => &mut self.male,
            Gender::Female => &mut self.female,
            Gender::Other => &mut self.other,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn get(&self, gender: Gender) -> u64 {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
            Gender::Other => self.other,
        }
    }

    pub fn total(&self) -> u64 {
        self.male.saturating_add(self.female).saturating_add(self.other)
    }
}

/// Counts per age bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeCounts {
    #[serde(rename = "0-5")]
    pub age_0_5: u64,
    #[serde(rename = "5-18")]
    pub age_5_18: u64,
    #[serde(rename = "18-45")]
    pub age_18_45: u64,
    #[serde(rename = "45-60")]
    pub age_45_60: u64,
    #[serde(rename = "60+")]
    pub age_60_plus: u64,
}

impl AgeCounts {
    pub fn add(&mut self, bucket: AgeBucket, amount: u64) {
        let slot = self.slot_mut(bucket);
        *slot = slot.saturating_add(amount);
    }

    pub fn get(&self, bucket: AgeBucket) -> u64 {
        match bucket {
            AgeBucket::Age0To5 => self.age_0_5,
            AgeBucket::Age5To18 => self.age_5_18,
            AgeBucket::Age18To45 => self.age_18_45,
            AgeBucket::Age45To60 => self.age_45_60,
            AgeBucket::Age60Plus => self.age_60_plus,
        }
    }

    fn slot_mut(&mut self, bucket: AgeBucket) -> &mut u64 {
        match bucket {
            AgeBucket::Age0To5 => &mut self.age_0_5,
            AgeBucket::Age5To18 => &mut self.age_5_18,
            AgeBucket::Age18To45 => &mut self.age_18_45,
            AgeBucket::Age45To60 => &mut self.age_45_60,
            AgeBucket::Age60Plus => &mut self.age_60_plus,
        }
    }
}

/// Age split of one row's activity, at region granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgeSplit {
    pub age_0_5: u64,
    pub age_5_18: u64,
    pub age_18_plus: u64,
}

impl AgeSplit {
    pub fn add(&mut self, bucket: AgeBucket, amount: u64) {
        let slot = match bucket {
            AgeBucket::Age0To5 => &mut self.age_0_5,
            AgeBucket::Age5To18 => &mut self.age_5_18,
            AgeBucket::Age18To45 | AgeBucket::Age45To60 | AgeBucket::Age60Plus => {
                &mut self.age_18_plus
            }
        };
        *slot = slot.saturating_add(amount);
    }
}

/// Aggregate for one state or district.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionAggregate {
    pub total: u64,
    pub age_0_5: u64,
    pub age_5_18: u64,
    pub age_18_plus: u64,
}

impl RegionAggregate {
    pub fn add(&mut self, amount: u64, split: AgeSplit) {
        self.total = self.total.saturating_add(amount);
        self.age_0_5 = self.age_0_5.saturating_add(split.age_0_5);
        self.age_5_18 = self.age_5_18.saturating_add(split.age_5_18);
        self.age_18_plus = self.age_18_plus.saturating_add(split.age_18_plus);
    }
}

/// Region name → aggregate, in first-seen order. Names are kept verbatim.
pub type RegionCounter = IndexMap<String, RegionAggregate>;

/// State name → district counter.
pub type DistrictCounter = IndexMap<String, RegionCounter>;

/// Counters accumulated over every row of a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_enrolments: u64,
    pub total_updates: u64,
    pub biometric_updates: u64,
    pub demographic_updates: u64,
    pub gender_counts: GenderCounts,
    pub age_counts: AgeCounts,
    pub state_counts: RegionCounter,
    pub district_counts: DistrictCounter,
    pub data_types: Vec<DatasetKind>,
    pub total_rows: u64,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one row's activity to the top-level bucket for `kind`.
    pub fn add_activity(&mut self, kind: DatasetKind, amount: u64) {
        if kind.is_update() {
            self.total_updates = self.total_updates.saturating_add(amount);
        }
        match kind {
            DatasetKind::Biometric => {
                self.biometric_updates = self.biometric_updates.saturating_add(amount);
            }
            DatasetKind::Demographic => {
                self.demographic_updates = self.demographic_updates.saturating_add(amount);
            }
            DatasetKind::Enrolment => {
                self.total_enrolments = self.total_enrolments.saturating_add(amount);
            }
            DatasetKind::Unknown => {}
        }
    }

    /// Add to a state, and to one of its districts when given.
    pub fn add_region(&mut self, state: &str, district: Option<&str>, amount: u64, split: AgeSplit) {
        self.state_counts
            .entry(state.to_string())
            .or_default()
            .add(amount, split);

        if let Some(district) = district {
            self.district_counts
                .entry(state.to_string())
                .or_default()
                .entry(district.to_string())
                .or_default()
                .add(amount, split);
        }
    }

    pub fn record_kinds(&mut self, kinds: &[DatasetKind]) {
        self.data_types.extend_from_slice(kinds);
    }

    /// Enrolments plus updates.
    pub fn total_activity(&self) -> u64 {
        self.total_enrolments.saturating_add(self.total_updates)
    }

    /// Returns true when nothing at all was counted.
    pub fn is_empty(&self) -> bool {
        self.total_enrolments == 0 && self.total_updates == 0 && self.total_rows == 0
    }
}
