//! Best-effort row extraction from text pulled out of documents.
//!
//! Document text has no reliable column structure. Each line that starts with
//! a known state or union territory name becomes one enrolment-shaped record,
//! taking the numbers that follow the name as the age-bracket counts.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Region names recognized at the start of a line, matched in this order.
pub const KNOWN_REGIONS: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Andaman",
    "Chandigarh",
    "Dadra",
    "Daman",
    "Delhi",
    "Jammu",
    "Kashmir",
    "Ladakh",
    "Lakshadweep",
    "Puducherry",
];

/// Extract header-keyed records from document text.
///
/// Each record has the keys `state`, `age_0_5`, `age_5_17`, `age_18_greater`
/// and `total`. Missing brackets are `"0"`; `total` sums every number on the
/// line. Lines without a leading region name or without digits are ignored.
pub fn extract_region_rows(text: &str) -> Vec<IndexMap<String, String>> {
    text.lines().filter_map(extract_line).collect()
}

fn extract_line(line: &str) -> Option<IndexMap<String, String>> {
    let trimmed = line.trim();
    let lowered = trimmed.to_lowercase();

    let region = KNOWN_REGIONS
        .iter()
        .find(|name| lowered.starts_with(&name.to_lowercase()))?;

    let remainder = trimmed.get(region.len()..).unwrap_or("").replace(',', "");
    let numbers: Vec<&str> = NUMBER.find_iter(&remainder).map(|m| m.as_str()).collect();
    if numbers.is_empty() {
        return None;
    }

    let total = numbers
        .iter()
        .fold(0u64, |acc, n| acc.saturating_add(n.parse::<u64>().unwrap_or(u64::MAX)));
    let bracket = |i: usize| numbers.get(i).copied().unwrap_or("0").to_string();

    let mut record = IndexMap::new();
    record.insert("state".to_string(), region.to_string());
    record.insert("age_0_5".to_string(), bracket(0));
    record.insert("age_5_17".to_string(), bracket(1));
    record.insert("age_18_greater".to_string(), bracket(2));
    record.insert("total".to_string(), total.to_string());
    Some(record)
}
