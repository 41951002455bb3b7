//! Input sources and source metadata.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::archive::read_csv_members;
use crate::error::{RegstatError, Result};

/// Metadata about one tokenized input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Display name (file name or archive member name).
    pub name: String,
    /// Path of the file the input came from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// SHA-256 hash of the input contents.
    pub hash: String,
    /// Input size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, records, document, ...).
    pub format: String,
    /// Number of data rows kept after tokenizing.
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the input was processed.
    pub analyzed_at: DateTime<Utc>,
}

impl SourceMetadata {
    pub fn new(
        name: impl Into<String>,
        path: Option<PathBuf>,
        contents: &[u8],
        format: impl Into<String>,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        Self {
            name: name.into(),
            path,
            hash: content_hash(contents),
            size_bytes: contents.len() as u64,
            format: format.into(),
            row_count,
            column_count,
            analyzed_at: Utc::now(),
        }
    }
}

/// `sha256:<hex>` digest of some bytes.
pub fn content_hash(contents: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    format!("sha256:{:x}", hasher.finalize())
}

/// One unit of input handed to the engine.
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Delimited text.
    Text {
        name: String,
        path: Option<PathBuf>,
        text: String,
    },
    /// Rows already keyed by header name.
    Records {
        name: String,
        path: Option<PathBuf>,
        records: Vec<IndexMap<String, String>>,
    },
    /// Plain text extracted from a document.
    DocumentText {
        name: String,
        path: Option<PathBuf>,
        text: String,
    },
}

impl InputSource {
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        InputSource::Text {
            name: name.into(),
            path: None,
            text: text.into(),
        }
    }

    pub fn records(name: impl Into<String>, records: Vec<IndexMap<String, String>>) -> Self {
        InputSource::Records {
            name: name.into(),
            path: None,
            records,
        }
    }

    pub fn document(name: impl Into<String>, text: impl Into<String>) -> Self {
        InputSource::DocumentText {
            name: name.into(),
            path: None,
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            InputSource::Text { name, .. }
            | InputSource::Records { name, .. }
            | InputSource::DocumentText { name, .. } => name,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            InputSource::Text { path, .. }
            | InputSource::Records { path, .. }
            | InputSource::DocumentText { path, .. } => path.as_deref(),
        }
    }

    /// Load the sources contained in a file, chosen by extension.
    ///
    /// `.csv`, `.tsv` and `.txt` are delimited text (or document text when
    /// `as_document` is set), `.json` is an array of row objects and `.zip`
    /// yields one source per CSV member.
    pub fn from_path(path: impl AsRef<Path>, as_document: bool) -> Result<Vec<InputSource>> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if !matches!(extension.as_str(), "csv" | "tsv" | "txt" | "json" | "zip") {
            return Err(RegstatError::UnsupportedFormat(format!(
                "'{}' (expected .csv, .tsv, .txt, .json or .zip)",
                path.display()
            )));
        }

        let bytes = fs::read(path).map_err(|e| RegstatError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let owned_path = Some(path.to_path_buf());

        let sources = match extension.as_str() {
            "zip" => {
                let members = read_csv_members(&bytes)?;
                if members.is_empty() {
                    return Err(RegstatError::EmptyData(format!(
                        "No CSV files found in '{}'",
                        path.display()
                    )));
                }
                members
                    .into_iter()
                    .map(|m| InputSource::Text {
                        name: format!("{}/{}", file_name, m.name),
                        path: owned_path.clone(),
                        text: m.text,
                    })
                    .collect()
            }
            "json" => vec![InputSource::Records {
                name: file_name,
                path: owned_path,
                records: parse_json_records(&bytes)?,
            }],
            _ => {
                let text = String::from_utf8_lossy(&bytes).into_owned();
                if as_document {
                    vec![InputSource::DocumentText {
                        name: file_name,
                        path: owned_path,
                        text,
                    }]
                } else {
                    vec![InputSource::Text {
                        name: file_name,
                        path: owned_path,
                        text,
                    }]
                }
            }
        };

        Ok(sources)
    }
}

/// Parse a JSON array of row objects into string-valued records.
///
/// Numbers and booleans are stringified, `null` becomes an empty field and
/// nested values keep their JSON text.
pub fn parse_json_records(bytes: &[u8]) -> Result<Vec<IndexMap<String, String>>> {
    let value: Value = serde_json::from_slice(bytes)?;
    let Value::Array(items) = value else {
        return Err(RegstatError::UnsupportedFormat(
            "expected a JSON array of row objects".to_string(),
        ));
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => Ok(map
                .into_iter()
                .map(|(k, v)| (k, json_field(v)))
                .collect()),
            other => Err(RegstatError::UnsupportedFormat(format!(
                "expected a row object, found {}",
                json_kind(&other)
            ))),
        })
        .collect()
}

fn json_field(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
