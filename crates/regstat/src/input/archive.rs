//! Reading delimited members out of zip archives.

use std::io::{Cursor, Read};
use std::path::PathBuf;

use tracing::warn;
use zip::ZipArchive;

use crate::error::{RegstatError, Result};

/// An archive member holding delimited text.
#[derive(Debug, Clone)]
pub struct ArchiveMember {
    pub name: String,
    pub text: String,
}

/// Read every `.csv` member of a zip archive, in archive order.
///
/// Directories and macOS resource-fork entries (`__MACOSX/…`) are skipped.
pub fn read_csv_members(bytes: &[u8]) -> Result<Vec<ArchiveMember>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut members = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let name = entry.name().to_string();

        if entry.is_dir() {
            continue;
        }
        if !is_csv_member(&name) {
            warn!(member = %name, "skipping archive member");
            continue;
        }

        let mut buf = Vec::new();
        entry.read_to_end(&mut buf).map_err(|e| RegstatError::Io {
            path: PathBuf::from(&name),
            source: e,
        })?;

        members.push(ArchiveMember {
            name,
            text: String::from_utf8_lossy(&buf).into_owned(),
        });
    }

    Ok(members)
}

fn is_csv_member(name: &str) -> bool {
    name.to_lowercase().ends_with(".csv") && !name.starts_with("__MACOSX")
}
