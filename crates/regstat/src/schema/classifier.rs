//! Column classifier: dataset kind and role columns from header names.

use serde::{Deserialize, Serialize};

use super::fragments::{
    DATE_FRAGMENTS, DISTRICT_FRAGMENTS, FragmentRule, GENDER_FRAGMENTS, KIND_RULES,
    REGION_FRAGMENTS, age_bucket_for,
};
use super::kind::{AgeBucket, DatasetKind};
use crate::input::{ColumnLookup, HeaderIndex};

/// A header resolved to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedColumn {
    pub index: usize,
    pub name: String,
}

/// A column counted toward row activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityColumn {
    pub index: usize,
    pub name: String,
    /// Age bucket the column's values are distributed into.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<AgeBucket>,
}

/// Result of classifying one dataset's headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Winning kind; drives counting for every row.
    pub kind: DatasetKind,
    /// Columns of the winning kind.
    pub activity_columns: Vec<ActivityColumn>,
    /// Every known kind with at least one matching header, in priority order.
    pub matched_kinds: Vec<DatasetKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<ResolvedColumn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<ResolvedColumn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<ResolvedColumn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<ResolvedColumn>,
}

impl Classification {
    /// Returns true when no activity columns were recognized.
    pub fn is_unknown(&self) -> bool {
        self.kind == DatasetKind::Unknown
    }
}

/// Classifies datasets against an ordered fragment rule table.
#[derive(Debug, Clone)]
pub struct ColumnClassifier {
    rules: Vec<FragmentRule>,
}

impl ColumnClassifier {
    /// Classifier over the built-in rule table.
    pub fn new() -> Self {
        Self {
            rules: KIND_RULES.to_vec(),
        }
    }

    /// Classify a dataset by its normalized headers.
    pub fn classify(&self, headers: &HeaderIndex) -> Classification {
        let mut winner: Option<(DatasetKind, Vec<usize>)> = None;
        let mut matched_kinds = Vec::new();

        for rule in &self.rules {
            let columns: Vec<usize> = headers
                .names()
                .iter()
                .enumerate()
                .filter(|(_, h)| rule.matches(h))
                .map(|(i, _)| i)
                .collect();

            if columns.is_empty() {
                continue;
            }
            if !matched_kinds.contains(&rule.kind) {
                matched_kinds.push(rule.kind);
            }
            if winner.is_none() {
                winner = Some((rule.kind, columns));
            }
        }

        let (kind, indices) = winner.unwrap_or((DatasetKind::Unknown, Vec::new()));
        let activity_columns = indices
            .into_iter()
            .map(|index| {
                let name = headers.name(index).unwrap_or_default().to_string();
                ActivityColumn {
                    index,
                    bucket: age_bucket_for(&name),
                    name,
                }
            })
            .collect();

        Classification {
            kind,
            activity_columns,
            matched_kinds,
            gender: resolve(headers, GENDER_FRAGMENTS),
            region: resolve(headers, REGION_FRAGMENTS),
            district: resolve(headers, DISTRICT_FRAGMENTS),
            date: resolve(headers, DATE_FRAGMENTS),
        }
    }
}

impl Default for ColumnClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// First header matching the earliest fragment that matches anything.
fn resolve(headers: &HeaderIndex, fragments: &[&str]) -> Option<ResolvedColumn> {
    fragments.iter().find_map(|fragment| {
        headers.find_column(fragment).map(|index| ResolvedColumn {
            index,
            name: headers.name(index).unwrap_or_default().to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(headers: &[&str]) -> Classification {
        ColumnClassifier::new().classify(&HeaderIndex::new(headers))
    }

    #[test]
    fn test_biometric_dataset() {
        let c = classify(&["date", "state", "district", "bio_age_5_17", "bio_age_17_"]);

        assert_eq!(c.kind, DatasetKind::Biometric);
        let names: Vec<&str> = c.activity_columns.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["bio_age_5_17", "bio_age_17_"]);
        assert_eq!(c.activity_columns[0].bucket, Some(AgeBucket::Age5To18));
        assert_eq!(c.activity_columns[1].bucket, Some(AgeBucket::Age18To45));
        assert_eq!(c.region.as_ref().map(|r| r.index), Some(1));
        assert_eq!(c.district.as_ref().map(|r| r.index), Some(2));
        assert_eq!(c.date.as_ref().map(|r| r.index), Some(0));
    }

    #[test]
    fn test_priority_beats_column_order() {
        let c = classify(&["age_0_5", "age_5_17", "bio_age_5_17"]);

        assert_eq!(c.kind, DatasetKind::Biometric);
        assert_eq!(c.activity_columns.len(), 1);
        assert_eq!(
            c.matched_kinds,
            vec![DatasetKind::Biometric, DatasetKind::Enrolment]
        );
    }

    #[test]
    fn test_enrolment_dataset() {
        let c = classify(&["state", "age_0_5", "age_5_17", "age_18_greater"]);

        assert_eq!(c.kind, DatasetKind::Enrolment);
        assert_eq!(c.activity_columns.len(), 3);
    }

    #[test]
    fn test_unknown_dataset() {
        let c = classify(&["name", "state", "pincode"]);

        assert!(c.is_unknown());
        assert!(c.activity_columns.is_empty());
        assert!(c.matched_kinds.is_empty());
        assert!(c.region.is_some());
    }

    #[test]
    fn test_region_prefers_state_over_earlier_region() {
        let c = classify(&["region_code", "state_name"]);
        assert_eq!(c.region.map(|r| r.name), Some("state_name".to_string()));

        let c = classify(&["region", "pincode"]);
        assert_eq!(c.region.map(|r| r.name), Some("region".to_string()));
    }

    #[test]
    fn test_gender_prefers_gender_over_sex() {
        let c = classify(&["sex", "gender"]);
        assert_eq!(c.gender.map(|g| g.index), Some(1));

        let c = classify(&["sex", "state"]);
        assert_eq!(c.gender.map(|g| g.index), Some(0));
    }

    #[test]
    fn test_rejected_counters_are_ignored() {
        let c = classify(&["state", "biometric_rejected", "enrolment_generated"]);

        assert_eq!(c.kind, DatasetKind::Enrolment);
        assert_eq!(c.activity_columns[0].name, "enrolment_generated");
    }
}
