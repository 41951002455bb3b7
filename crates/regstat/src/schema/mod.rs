//! Dataset classification: record kinds, header fragments and the classifier.

mod classifier;
mod fragments;
mod kind;

pub use classifier::{ActivityColumn, Classification, ColumnClassifier, ResolvedColumn};
pub use fragments::{
    AGE_BUCKET_RULES, AGE_FRAGMENT, DATE_FRAGMENTS, DISTRICT_FRAGMENTS, FragmentRule,
    GENDER_FRAGMENTS, KIND_RULES, REGION_FRAGMENTS, age_bucket_for,
};
pub use kind::{AgeBucket, DatasetKind, Gender};
