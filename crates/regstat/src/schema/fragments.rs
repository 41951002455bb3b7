//! Declarative header-fragment tables.
//!
//! All fragments are lowercase and matched as substrings of normalized
//! header names.

use super::kind::{AgeBucket, DatasetKind};

/// Fragments that mark a header as belonging to one dataset kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentRule {
    pub kind: DatasetKind,
    /// A header matches if it contains any of these.
    pub fragments: &'static [&'static str],
    /// A matching header is dropped if it also contains any of these.
    pub exclusions: &'static [&'static str],
}

impl FragmentRule {
    /// Returns true if `header` belongs to this rule's kind.
    pub fn matches(&self, header: &str) -> bool {
        self.fragments.iter().any(|f| header.contains(f))
            && !self.exclusions.iter().any(|e| header.contains(e))
    }
}

/// Kind rules in priority order. The first rule with any matching header
/// decides the dataset kind.
pub const KIND_RULES: &[FragmentRule] = &[
    FragmentRule {
        kind: DatasetKind::Biometric,
        fragments: &["bio_age", "biometric", "bio_update", "bio_metric"],
        exclusions: &["reject"],
    },
    FragmentRule {
        kind: DatasetKind::Demographic,
        fragments: &["demo_age", "demographic", "demo_update"],
        exclusions: &["reject"],
    },
    FragmentRule {
        kind: DatasetKind::Enrolment,
        fragments: &["age_0_5", "age_5", "age_18", "enrolment", "generated"],
        exclusions: &["bio", "demo", "update", "reject"],
    },
];

/// Gender column fragments, most preferred first.
pub const GENDER_FRAGMENTS: &[&str] = &["gender", "sex", "gender_category"];

/// Region column fragments, most preferred first.
pub const REGION_FRAGMENTS: &[&str] = &["state", "region"];

/// Sub-region column fragments.
pub const DISTRICT_FRAGMENTS: &[&str] = &["district"];

/// Date column fragments.
pub const DATE_FRAGMENTS: &[&str] = &["date"];

/// Fragment marking a column as an age-bracket count for timelines.
pub const AGE_FRAGMENT: &str = "age";

/// Column-name fragments mapped to age buckets, checked in order.
///
/// `17_` is the "17 and over" column of update extracts (`bio_age_17_`).
/// No fragment maps to `45-60` or `60+`.
pub const AGE_BUCKET_RULES: &[(&[&str], AgeBucket)] = &[
    (&["0_5", "0-5"], AgeBucket::Age0To5),
    (&["5_17", "5-18"], AgeBucket::Age5To18),
    (&["18_", "18+", "17_"], AgeBucket::Age18To45),
];

/// Age bucket for an activity column name, if any rule matches.
pub fn age_bucket_for(column: &str) -> Option<AgeBucket> {
    AGE_BUCKET_RULES
        .iter()
        .find(|(fragments, _)| fragments.iter().any(|f| column.contains(f)))
        .map(|(_, bucket)| *bucket)
}
