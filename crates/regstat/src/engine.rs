//! Main Regstat struct and public API.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::aggregate::{
    AggregatorConfig, CancellationToken, ChunkedAggregator, FinalizedStats, ProgressReporter,
    ReconciliationReport, Stats, reconcile,
};
use crate::error::{RegstatError, Result};
use crate::input::{
    InputSource, RowSet, SourceMetadata, Tokenizer, TokenizerConfig, extract_region_rows,
    format_name,
};
use crate::schema::{Classification, ColumnClassifier};
use crate::summary::{GeoSummary, Timeline, TimelineBuilder, TimelineConfig};

/// Configuration for a processing job.
#[derive(Debug, Clone, Default)]
pub struct RegstatConfig {
    /// Tokenizer configuration.
    pub tokenizer: TokenizerConfig,
    /// Batch aggregation configuration.
    pub aggregator: AggregatorConfig,
    /// Timeline configuration.
    pub timeline: TimelineConfig,
}

impl RegstatConfig {
    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.aggregator.batch_size == 0 {
            return Err(RegstatError::Config(
                "batch size must be at least 1".to_string(),
            ));
        }
        if self.timeline.max_slots == 0 {
            return Err(RegstatError::Config(
                "timeline must keep at least one month".to_string(),
            ));
        }
        Ok(())
    }
}

/// How one source was classified.
#[derive(Debug, Clone, Serialize)]
pub struct SourceClassification {
    pub source: String,
    pub classification: Classification,
}

/// Result of processing one or more sources into a single dataset.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingReport {
    /// Metadata about each tokenized source, in processing order.
    pub sources: Vec<SourceMetadata>,
    /// Classification of each source.
    pub classifications: Vec<SourceClassification>,
    /// Reconciled statistics.
    pub stats: FinalizedStats,
    /// What reconciliation found.
    pub reconciliation: ReconciliationReport,
    pub timeline: Timeline,
    pub geo: GeoSummary,
}

impl ProcessingReport {
    /// Returns true if nothing usable was found in any source.
    pub fn no_usable_data(&self) -> bool {
        self.reconciliation.no_usable_data
    }
}

/// The main Regstat processing engine.
pub struct Regstat {
    config: RegstatConfig,
    tokenizer: Tokenizer,
    classifier: ColumnClassifier,
    aggregator: ChunkedAggregator,
}

impl Regstat {
    /// Create a new Regstat instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(RegstatConfig::default())
    }

    /// Create a Regstat instance with custom configuration.
    pub fn with_config(config: RegstatConfig) -> Self {
        let tokenizer = Tokenizer::with_config(config.tokenizer.clone());
        let aggregator = ChunkedAggregator::with_config(config.aggregator.clone());

        Self {
            config,
            tokenizer,
            classifier: ColumnClassifier::new(),
            aggregator,
        }
    }

    /// Receive a progress update after every aggregated batch.
    pub fn with_progress(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.aggregator = self.aggregator.with_progress(reporter);
        self
    }

    pub fn config(&self) -> &RegstatConfig {
        &self.config
    }

    /// Turn a source into rows plus metadata.
    pub fn prepare(&self, source: &InputSource) -> Result<(RowSet, SourceMetadata)> {
        match source {
            InputSource::Text { name, path, text } => {
                let tokenized = self.tokenizer.tokenize(text.as_bytes())?;
                let metadata = SourceMetadata::new(
                    name.as_str(),
                    path.clone(),
                    text.as_bytes(),
                    format_name(tokenized.delimiter),
                    tokenized.table.len(),
                    tokenized.table.column_count(),
                );
                Ok((tokenized.table, metadata))
            }
            InputSource::Records {
                name,
                path,
                records,
            } => {
                let table = RowSet::from_records(records);
                let contents = serde_json::to_vec(records)?;
                let metadata = SourceMetadata::new(
                    name.as_str(),
                    path.clone(),
                    &contents,
                    "records",
                    table.len(),
                    table.column_count(),
                );
                Ok((table, metadata))
            }
            InputSource::DocumentText { name, path, text } => {
                let records = extract_region_rows(text);
                let table = RowSet::from_records(&records);
                let metadata = SourceMetadata::new(
                    name.as_str(),
                    path.clone(),
                    text.as_bytes(),
                    "document",
                    table.len(),
                    table.column_count(),
                );
                Ok((table, metadata))
            }
        }
    }

    /// Process every source, in order, into one reconciled dataset.
    ///
    /// Sources are tokenized, classified and aggregated one at a time into a
    /// shared [`Stats`]. On cancellation no partial result is returned.
    pub async fn process(
        &self,
        sources: &[InputSource],
        cancel: &CancellationToken,
    ) -> Result<ProcessingReport> {
        self.config.validate()?;

        if sources.is_empty() {
            return Err(RegstatError::EmptyData("no input sources".to_string()));
        }

        let mut stats = Stats::new();
        let mut timeline = TimelineBuilder::new();
        let mut metadata = Vec::with_capacity(sources.len());
        let mut classifications = Vec::with_capacity(sources.len());
        let mut only_table: Option<(RowSet, Classification)> = None;

        for source in sources {
            let (table, meta) = self.prepare(source)?;
            let plan = self.classifier.classify(table.headers());

            info!(
                source = source.name(),
                format = %meta.format,
                rows = table.len(),
                columns = table.column_count(),
                "processing source"
            );
            info!(
                source = source.name(),
                kind = %plan.kind,
                activity_columns = plan.activity_columns.len(),
                region = plan.region.as_ref().map(|c| c.name.as_str()),
                "classified"
            );
            if plan.is_unknown() && !table.is_empty() {
                warn!(source = source.name(), "no recognized activity columns");
            }

            self.aggregator
                .aggregate(source.name(), &table, &plan, &mut stats, cancel)
                .await?;
            timeline.observe(&table, &plan);

            classifications.push(SourceClassification {
                source: source.name().to_string(),
                classification: plan.clone(),
            });
            metadata.push(meta);

            only_table = if metadata.len() == 1 {
                Some((table, plan))
            } else {
                None
            };
        }

        let (stats, reconciliation) = reconcile(stats);
        let timeline = timeline.finish(&self.config.timeline);
        let geo = match &only_table {
            Some((table, plan)) => GeoSummary::from_rows(table, plan, timeline.clone()),
            None => GeoSummary::from_stats(&stats, timeline.clone()),
        };

        info!(
            sources = metadata.len(),
            rows = stats.total_rows,
            enrolments = stats.total_enrolments,
            updates = stats.total_updates,
            synthetic_timeline = timeline.synthetic,
            "processing complete"
        );

        Ok(ProcessingReport {
            sources: metadata,
            classifications,
            stats,
            reconciliation,
            timeline,
            geo,
        })
    }

    /// Load every file and process them together.
    ///
    /// Every path is resolved before any aggregation starts, so an unsupported
    /// file fails the job without partial work.
    pub async fn process_paths<P: AsRef<Path>>(
        &self,
        paths: &[P],
        as_document: bool,
        cancel: &CancellationToken,
    ) -> Result<ProcessingReport> {
        let mut sources = Vec::new();
        for path in paths {
            sources.extend(InputSource::from_path(path, as_document)?);
        }
        self.process(&sources, cancel).await
    }

    /// Process a single delimited text blob.
    pub async fn process_text(
        &self,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<ProcessingReport> {
        self.process(&[InputSource::text(name, text)], &CancellationToken::new())
            .await
    }
}

impl Default for Regstat {
    fn default() -> Self {
        Self::new()
    }
}
