//! Core type definitions for dataset classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inferred category of a dataset's activity columns.
///
/// Variants are declared in classification priority order, so the derived
/// ordering sorts by priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    /// Biometric update counts.
    Biometric,
    /// Demographic update counts.
    Demographic,
    /// New enrolment counts.
    Enrolment,
    /// No recognized activity columns.
    Unknown,
}

impl DatasetKind {
    /// Known kinds in priority order.
    pub const PRIORITY: [DatasetKind; 3] = [
        DatasetKind::Biometric,
        DatasetKind::Demographic,
        DatasetKind::Enrolment,
    ];

    /// Returns true for the two update kinds.
    pub fn is_update(&self) -> bool {
        matches!(self, DatasetKind::Biometric | DatasetKind::Demographic)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DatasetKind::Biometric => "biometric",
            DatasetKind::Demographic => "demographic",
            DatasetKind::Enrolment => "enrolment",
            DatasetKind::Unknown => "unknown",
        }
    }
}

impl Default for DatasetKind {
    fn default() -> Self {
        DatasetKind::Unknown
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed age ranges counted across a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBucket {
    #[serde(rename = "0-5")]
    Age0To5,
    #[serde(rename = "5-18")]
    Age5To18,
    #[serde(rename = "18-45")]
    Age18To45,
    /// Never filled by any recognized header.
    #[serde(rename = "45-60")]
    Age45To60,
    /// Never filled by any recognized header.
    #[serde(rename = "60+")]
    Age60Plus,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::Age0To5,
        AgeBucket::Age5To18,
        AgeBucket::Age18To45,
        AgeBucket::Age45To60,
        AgeBucket::Age60Plus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::Age0To5 => "0-5",
            AgeBucket::Age5To18 => "5-18",
            AgeBucket::Age18To45 => "18-45",
            AgeBucket::Age45To60 => "45-60",
            AgeBucket::Age60Plus => "60+",
        }
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gender category of a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Classify a raw gender field by first letter or numeric code.
    ///
    /// `m…` or `1` is male, `f…` or `2` is female, any other non-empty value
    /// is other. Empty values are not classified.
    pub fn classify(raw: &str) -> Option<Gender> {
        let value = raw.trim().to_lowercase();
        if value.is_empty() {
            None
        } else if value.starts_with('m') || value == "1" {
            Some(Gender::Male)
        } else if value.starts_with('f') || value == "2" {
            Some(Gender::Female)
        } else {
            Some(Gender::Other)
        }
    }
}
