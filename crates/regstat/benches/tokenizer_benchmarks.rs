//! Tokenizer and classifier performance benchmarks.
//!
//! Measures tokenizing throughput across extract sizes and delimiters.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use regstat::input::Tokenizer;
use regstat::schema::ColumnClassifier;

const STATES: [&str; 6] = ["Uttar Pradesh", "Bihar", "Kerala", "Goa", "Assam", "Punjab"];

/// Generate a synthetic enrolment extract.
fn generate_extract(rows: usize, delimiter: char) -> String {
    let mut data = ["date", "state", "district", "pincode", "age_0_5", "age_5_17", "age_18_greater"]
        .join(&delimiter.to_string());
    data.push('\n');

    for row in 0..rows {
        let fields = [
            format!("{:02}-{:02}-2025", (row % 28) + 1, (row % 12) + 1),
            STATES[row % STATES.len()].to_string(),
            format!("District_{}", row % 40),
            format!("{}", 110_000 + row % 9_000),
            format!("{}", row % 50),
            format!("{}", row % 30),
            format!("{}", row % 7),
        ];
        data.push_str(&fields.join(&delimiter.to_string()));
        data.push('\n');
    }

    data
}

/// Benchmark tokenizing comma-separated extracts of various sizes.
fn bench_tokenize_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize_csv");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_extract(*rows, ',');

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            let tokenizer = Tokenizer::new();
            b.iter(|| black_box(tokenizer.tokenize(data.as_bytes()).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark delimiter auto-detection overhead.
fn bench_tokenize_delimiters(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize_delimiters");

    for delimiter in [',', '\t', ';', '|'] {
        let data = generate_extract(1_000, delimiter);
        let name = format!("{:?}", delimiter);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("delimiter", name), &data, |b, data| {
            let tokenizer = Tokenizer::new();
            b.iter(|| black_box(tokenizer.tokenize(data.as_bytes()).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark classifying wide header rows.
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let classifier = ColumnClassifier::new();

    for extra in [0, 20, 100].iter() {
        let mut text = String::from("state,district,gender,bio_age_5_17,bio_age_17_,age_0_5");
        for i in 0..*extra {
            text.push_str(&format!(",column_{}", i));
        }
        text.push('\n');
        let table = Tokenizer::new().tokenize(text.as_bytes()).unwrap().table;

        group.bench_with_input(BenchmarkId::new("columns", 6 + extra), &table, |b, table| {
            b.iter(|| black_box(classifier.classify(table.headers())))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_tokenize_csv,
    bench_tokenize_delimiters,
    bench_classify,
);
criterion_main!(benches);
