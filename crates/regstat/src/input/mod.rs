//! Input tokenizing and data source handling.

mod archive;
mod document;
mod source;
mod table;
mod tokenizer;

pub use archive::{ArchiveMember, read_csv_members};
pub use document::{KNOWN_REGIONS, extract_region_rows};
pub use source::{InputSource, SourceMetadata, content_hash, parse_json_records};
pub use table::{ColumnLookup, HeaderIndex, RawRow, RowSet, normalize_header};
pub use tokenizer::{Tokenized, Tokenizer, TokenizerConfig, detect_delimiter, format_name};
