//! Shared header index and typed row records.

use indexmap::IndexMap;

/// Capability to resolve columns by a lowercase name fragment.
pub trait ColumnLookup {
    /// First column whose name contains `fragment`.
    fn find_column(&self, fragment: &str) -> Option<usize>;

    /// Every column whose name contains `fragment`, in header order.
    fn find_columns(&self, fragment: &str) -> Vec<usize>;
}

/// Normalized (trimmed, lowercased) header names for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    names: Vec<String>,
}

impl HeaderIndex {
    /// Build an index from raw header names, normalizing each one.
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: raw.into_iter().map(|h| normalize_header(h.as_ref())).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl ColumnLookup for HeaderIndex {
    fn find_column(&self, fragment: &str) -> Option<usize> {
        let fragment = fragment.to_lowercase();
        self.names.iter().position(|h| h.contains(&fragment))
    }

    fn find_columns(&self, fragment: &str) -> Vec<usize> {
        let fragment = fragment.to_lowercase();
        self.names
            .iter()
            .enumerate()
            .filter(|(_, h)| h.contains(&fragment))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Trim and lowercase a header name, dropping a byte-order mark.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// A tokenized dataset: one shared header index plus string rows.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    headers: HeaderIndex,
    rows: Vec<Vec<String>>,
}

impl RowSet {
    pub fn new(headers: HeaderIndex, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Build a row set from header-keyed records.
    ///
    /// Headers are the union of all record keys in first-seen order (after
    /// normalization); a record without a given key gets an empty field.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a IndexMap<String, String>>,
    {
        let records: Vec<&IndexMap<String, String>> = records.into_iter().collect();

        let mut positions: IndexMap<String, usize> = IndexMap::new();
        for record in &records {
            for key in record.keys() {
                let name = normalize_header(key);
                let next = positions.len();
                positions.entry(name).or_insert(next);
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                let mut row = vec![String::new(); positions.len()];
                for (key, value) in record.iter() {
                    if let Some(&idx) = positions.get(&normalize_header(key)) {
                        row[idx] = value.clone();
                    }
                }
                row
            })
            .collect();

        Self::new(HeaderIndex { names: positions.into_keys().collect() }, rows)
    }

    pub fn headers(&self) -> &HeaderIndex {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = RawRow<'_>> {
        self.rows.iter().map(|fields| RawRow::new(fields))
    }
}

/// One data row borrowed from a [`RowSet`].
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    fields: &'a [String],
}

impl<'a> RawRow<'a> {
    pub fn new(fields: &'a [String]) -> Self {
        Self { fields }
    }

    /// Field at `index`, or an empty string when the row is short.
    pub fn get(&self, index: usize) -> &'a str {
        self.fields.get(index).map(|s| s.as_str()).unwrap_or("")
    }
}
