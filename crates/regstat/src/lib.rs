//! Regstat: schema-inferring aggregation for civil-registration extracts.
//!
//! Regstat takes delimited extracts of unknown column layout, works out what
//! kind of activity they record from their header names, and folds every row
//! into national, state and district counters split by age bracket and gender.
//!
//! # Pipeline
//!
//! - **Tokenize**: split raw text into a shared header index and rows
//! - **Classify**: pick the dataset kind and role columns from header fragments
//! - **Aggregate**: count rows in batches, yielding to the runtime in between
//! - **Reconcile**: credit uncounted rows and finalize the statistics
//! - **Summarize**: monthly timeline weights and geographic drill-down values
//!
//! # Example
//!
//! ```no_run
//! use regstat::{CancellationToken, InputSource, Regstat};
//!
//! # async fn example() -> regstat::Result<()> {
//! let sources = InputSource::from_path("enrolment.zip", false)?;
//! let report = Regstat::new()
//!     .process(&sources, &CancellationToken::new())
//!     .await?;
//!
//! println!("Enrolments: {}", report.stats.total_enrolments);
//! println!("Updates: {}", report.stats.total_updates);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod error;
pub mod input;
pub mod persistence;
pub mod schema;
pub mod summary;

mod engine;

pub use crate::engine::{
    ProcessingReport, Regstat, RegstatConfig, SourceClassification,
};
pub use aggregate::{
    AggregatorConfig, CancellationToken, FinalizedStats, ProgressReporter, ProgressUpdate,
    ReconciliationReport, Stats,
};
pub use error::{RegstatError, Result};
pub use input::{InputSource, RowSet, SourceMetadata, TokenizerConfig};
pub use persistence::{DEFAULT_OUTPUT_FILE, ProcessedDataset};
pub use schema::{AgeBucket, Classification, DatasetKind};
pub use summary::{DemographicFilter, GeoSummary, Timeline, TimelineConfig};
