//! Integration tests for Regstat.

use std::io::Write;

use tempfile::{NamedTempFile, TempDir};
use zip::write::SimpleFileOptions;

use regstat::{
    AgeBucket, AggregatorConfig, CancellationToken, DatasetKind, DemographicFilter, InputSource,
    ProcessedDataset, Regstat, RegstatConfig, RegstatError,
};

/// Helper to create a temporary file with given content and suffix.
fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// Helper to create a zip archive with the given members.
fn create_test_zip(members: &[(&str, &str)]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".zip")
        .tempfile()
        .expect("Failed to create temp file");
    {
        let mut writer = zip::ZipWriter::new(file.as_file_mut());
        for (name, content) in members {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .expect("Failed to start zip member");
            writer
                .write_all(content.as_bytes())
                .expect("Failed to write zip member");
        }
        writer.finish().expect("Failed to finish zip");
    }
    file
}

async fn process_text(text: &str) -> regstat::ProcessingReport {
    Regstat::new()
        .process_text("test.csv", text)
        .await
        .expect("Processing failed")
}

// =============================================================================
// Classification and counting
// =============================================================================

#[tokio::test]
async fn test_biometric_extract() {
    let report = process_text("state,bio_age_5_17,bio_age_17_\nBihar,10,5\n").await;
    let stats = &report.stats;

    assert_eq!(stats.biometric_updates, 15);
    assert_eq!(stats.total_updates, 15);
    assert_eq!(stats.total_enrolments, 0);
    assert_eq!(stats.age_counts.get(AgeBucket::Age5To18), 10);
    assert_eq!(stats.age_counts.get(AgeBucket::Age18To45), 5);
    assert_eq!(stats.state_counts["Bihar"].total, 15);
    assert_eq!(stats.data_types, vec![DatasetKind::Biometric]);
}

#[tokio::test]
async fn test_enrolment_extract() {
    let report =
        process_text("state,age_0_5,age_5_17,age_18_greater\nKerala,3,4,5\n").await;
    let stats = &report.stats;

    assert_eq!(stats.total_enrolments, 12);
    assert_eq!(stats.total_updates, 0);
    assert_eq!(stats.age_counts.get(AgeBucket::Age0To5), 3);
    assert_eq!(stats.age_counts.get(AgeBucket::Age5To18), 4);
    assert_eq!(stats.age_counts.get(AgeBucket::Age18To45), 5);
    assert_eq!(stats.age_counts.get(AgeBucket::Age45To60), 0);
    assert_eq!(stats.age_counts.get(AgeBucket::Age60Plus), 0);
    assert_eq!(stats.state_counts["Kerala"].total, 12);
}

#[tokio::test]
async fn test_demographic_extract_with_districts() {
    let text = "date,state,district,pincode,demo_age_5_17,demo_age_17_\n\
                01-03-2025,Assam,Kamrup,781001,2,8\n\
                01-03-2025,Assam,Cachar,788001,1,1\n\
                02-04-2025,Goa,North Goa,403001,0,0\n";
    let report = process_text(text).await;
    let stats = &report.stats;

    assert_eq!(stats.demographic_updates, 12);
    assert_eq!(stats.total_updates, 12);
    assert_eq!(stats.state_counts["Assam"].total, 12);
    assert_eq!(stats.state_counts["Assam"].age_18_plus, 9);
    assert!(!stats.state_counts.contains_key("Goa"));
    assert_eq!(stats.district_counts["Assam"]["Kamrup"].total, 10);
    assert_eq!(stats.total_rows, 3);

    // Zero-activity April is dropped from the date-derived timeline
    assert!(!report.timeline.synthetic);
    assert_eq!(report.timeline.slots.len(), 1);
    assert_eq!(report.timeline.slots[0].label, "2025-03");
}

#[tokio::test]
async fn test_priority_ignores_header_order() {
    let a = process_text("age_0_5,bio_age_5_17,state\n1,2,Goa\n").await;
    let b = process_text("bio_age_5_17,state,age_0_5\n2,Goa,1\n").await;

    for report in [&a, &b] {
        assert_eq!(report.classifications[0].classification.kind, DatasetKind::Biometric);
        assert_eq!(report.stats.biometric_updates, 2);
        assert_eq!(
            report.stats.data_types,
            vec![DatasetKind::Biometric, DatasetKind::Enrolment]
        );
    }
}

#[tokio::test]
async fn test_reject_columns_are_not_counted() {
    let report = process_text("state,age_0_5,age_5_17_rejected\nGoa,4,100\n").await;
    assert_eq!(report.stats.total_enrolments, 4);
}

#[tokio::test]
async fn test_unrecognized_headers_count_rows_as_enrolments() {
    let mut text = String::from("name,remarks\n");
    for i in 0..100 {
        text.push_str(&format!("person {},none\n", i));
    }
    let report = process_text(&text).await;

    assert_eq!(report.stats.total_enrolments, 100);
    assert_eq!(report.stats.total_updates, 0);
    assert_eq!(report.stats.total_rows, 100);
    assert_eq!(report.reconciliation.shortfall_added, 100);
    assert!(report.stats.data_types.is_empty());
}

#[tokio::test]
async fn test_malformed_fields_and_short_rows() {
    let text = "state,age_0_5,age_5_17\n\
                Goa,'1',--\n\
                lonely\n\
                \n\
                Goa,NaN,-3\n\
                Goa,7\n";
    let report = process_text(text).await;

    assert_eq!(report.stats.total_rows, 3);
    assert_eq!(report.stats.age_counts.get(AgeBucket::Age0To5), 8);
    assert_eq!(report.stats.age_counts.get(AgeBucket::Age5To18), 0);
}

#[tokio::test]
async fn test_quoted_comma_splits_field() {
    // Quotes are not honoured: "1,234" becomes two fields, "1 and 234"
    let report = process_text("state,age_0_5,age_5_17\nGoa,\"1,234\"\n").await;
    assert_eq!(report.stats.age_counts.get(AgeBucket::Age0To5), 1);
    assert_eq!(report.stats.age_counts.get(AgeBucket::Age5To18), 234);
}

#[tokio::test]
async fn test_empty_input_has_no_usable_data() {
    let report = process_text("").await;
    assert!(report.no_usable_data());
    assert_eq!(report.stats.total_rows, 0);
    assert!(report.geo.is_sample());
}

#[tokio::test]
async fn test_crlf_and_semicolons() {
    let report = process_text("State;Age_0_5\r\nGoa;3\r\nGoa;4\r\n").await;
    assert_eq!(report.sources[0].format, "csv-semicolon");
    assert_eq!(report.stats.state_counts["Goa"].total, 7);
}

#[tokio::test]
async fn test_idempotent_aggregation() {
    let text = "state,district,gender,age_0_5,age_18_greater\n\
                Goa,North Goa,M,1,2\n\
                Goa,South Goa,F,3,4\n\
                Kerala,Kollam,x,5,6\n";
    let a = process_text(text).await;
    let b = process_text(text).await;
    assert_eq!(*a.stats, *b.stats);
}

// =============================================================================
// Input sources
// =============================================================================

#[tokio::test]
async fn test_process_zip_archive() {
    let archive = create_test_zip(&[
        ("2025/enrolment_a.csv", "state,age_0_5\nGoa,2\n"),
        ("2025/enrolment_b.csv", "state,age_0_5\nGoa,3\nAssam,1\n"),
        ("readme.txt", "not data"),
        ("__MACOSX/2025/._enrolment_a.csv", "junk"),
    ]);

    let report = Regstat::new()
        .process_paths(&[archive.path()], false, &CancellationToken::new())
        .await
        .expect("Processing failed");

    assert_eq!(report.sources.len(), 2);
    assert!(report.sources[0].name.ends_with("/2025/enrolment_a.csv"));
    assert_eq!(report.stats.total_enrolments, 6);
    assert_eq!(report.stats.state_counts["Goa"].total, 5);
    assert_eq!(report.geo.state_names(), vec!["Goa", "Assam"]);
}

#[tokio::test]
async fn test_zip_without_csv_is_empty_data() {
    let archive = create_test_zip(&[("notes.txt", "hello")]);
    let result = Regstat::new()
        .process_paths(&[archive.path()], false, &CancellationToken::new())
        .await;
    assert!(matches!(result, Err(RegstatError::EmptyData(_))));
}

#[tokio::test]
async fn test_unsupported_extension_fails_before_aggregation() {
    let good = create_test_file("state,age_0_5\nGoa,1\n", ".csv");
    let bad = create_test_file("%PDF-1.4", ".pdf");

    let result = Regstat::new()
        .process_paths(&[good.path(), bad.path()], false, &CancellationToken::new())
        .await;
    assert!(matches!(result, Err(RegstatError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_json_records() {
    let file = create_test_file(
        r#"[{"State": "Goa", "age_0_5": 4, "age_5_17": "1"},
            {"State": "Goa", "age_0_5": null, "extra": true}]"#,
        ".json",
    );

    let report = Regstat::new()
        .process_paths(&[file.path()], false, &CancellationToken::new())
        .await
        .expect("Processing failed");

    assert_eq!(report.sources[0].format, "records");
    assert_eq!(report.stats.total_enrolments, 5);
    assert_eq!(report.stats.total_rows, 2);
    assert_eq!(report.stats.state_counts["Goa"].total, 5);
}

#[tokio::test]
async fn test_invalid_utf8_state_name_is_kept() {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(b"state,age_0_5\nGo\xffa,3\nAssam,1\n")
        .expect("Failed to write to temp file");

    let report = Regstat::new()
        .process_paths(&[file.path()], false, &CancellationToken::new())
        .await
        .expect("Processing failed");

    assert_eq!(report.stats.total_rows, 2);
    assert_eq!(report.stats.total_enrolments, 4);
    assert_eq!(report.stats.state_counts["Go\u{fffd}a"].total, 3);
}

#[tokio::test]
async fn test_document_text() {
    let file = create_test_file(
        "State-wise enrolment\nUttar Pradesh 1,000 2,000 3,000 6,000\nBihar 10 20\n",
        ".txt",
    );

    let report = Regstat::new()
        .process_paths(&[file.path()], true, &CancellationToken::new())
        .await
        .expect("Processing failed");

    assert_eq!(report.sources[0].format, "document");
    assert_eq!(report.stats.state_counts["Uttar Pradesh"].total, 6000);
    assert_eq!(report.stats.state_counts["Bihar"].total, 30);
    assert_eq!(report.stats.total_enrolments, 6030);
}

#[tokio::test]
async fn test_sources_accumulate_into_one_dataset() {
    let sources = vec![
        InputSource::text("bio.csv", "state,bio_age_5_17\nGoa,5\n"),
        InputSource::text("enrol.csv", "state,age_0_5\nGoa,2\n"),
    ];
    let report = Regstat::new()
        .process(&sources, &CancellationToken::new())
        .await
        .expect("Processing failed");

    assert_eq!(report.stats.biometric_updates, 5);
    assert_eq!(report.stats.total_enrolments, 2);
    assert_eq!(report.stats.state_counts["Goa"].total, 7);
    assert_eq!(
        report.stats.data_types,
        vec![DatasetKind::Biometric, DatasetKind::Enrolment]
    );
}

// =============================================================================
// Cancellation
// =============================================================================

#[tokio::test]
async fn test_cancel_before_first_batch() {
    let token = CancellationToken::new();
    token.cancel();

    let result = Regstat::new()
        .process(&[InputSource::text("a.csv", "state,age_0_5\nGoa,1\n")], &token)
        .await;
    assert!(matches!(result, Err(RegstatError::Cancelled)));
}

#[tokio::test]
async fn test_cancel_between_batches() {
    use regstat::aggregate::ClosureProgressReporter;
    use std::sync::Arc;

    let mut text = String::from("state,age_0_5\n");
    for _ in 0..50 {
        text.push_str("Goa,1\n");
    }

    let token = CancellationToken::new();
    let trigger = token.clone();
    let config = RegstatConfig {
        aggregator: AggregatorConfig { batch_size: 10 },
        ..Default::default()
    };
    let regstat = Regstat::with_config(config).with_progress(Arc::new(
        ClosureProgressReporter::new(move |update: regstat::ProgressUpdate| {
            if update.rows_processed >= 20 {
                trigger.cancel();
            }
        }),
    ));

    let result = regstat
        .process(&[InputSource::text("a.csv", text)], &token)
        .await;
    assert!(matches!(result, Err(RegstatError::Cancelled)));
}

// =============================================================================
// Persistence and drill-down
// =============================================================================

#[tokio::test]
async fn test_processed_dataset_round_trip_and_drilldown() {
    let report = process_text(
        "state,district,age_0_5,age_5_17\n\
         Kerala,Kollam,1,1\n\
         Kerala,Idukki,2,2\n\
         Kerala,Wayanad,3,3\n",
    )
    .await;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join(regstat::DEFAULT_OUTPUT_FILE);
    ProcessedDataset::from_report(&report).save(&path).unwrap();

    let loaded = ProcessedDataset::load(&path).unwrap();
    assert_eq!(loaded.file, "test.csv");
    assert_eq!(loaded.stats, report.stats);

    let geo = loaded.geo_summary();
    let grid = geo.district_grid("Kerala", 99, DemographicFilter::Age5To18);
    assert_eq!((grid.columns, grid.rows), (2, 2));
    assert_eq!(grid.cells.len(), 3);
    assert_eq!(grid.cells[2].name, "Wayanad");
    assert_eq!(grid.cells[2].value, 3);
    assert_eq!((grid.cells[2].column, grid.cells[2].row), (0, 1));
}

#[tokio::test]
async fn test_saved_geo_matches_processed_geo() {
    let report = process_text("state,name\nAssam,a\nAssam,b\nGoa,c\n").await;
    assert!(report.geo.is_sample());
    assert_eq!(report.stats.state_counts["Assam"].total, 2);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join(regstat::DEFAULT_OUTPUT_FILE);
    ProcessedDataset::from_report(&report).save(&path).unwrap();

    let geo = ProcessedDataset::load(&path).unwrap().geo_summary();
    assert!(geo.is_sample());
    assert_eq!(geo.state_names(), report.geo.state_names());
    assert_eq!(
        geo.state_values(0, DemographicFilter::All),
        report.geo.state_values(0, DemographicFilter::All)
    );
}
