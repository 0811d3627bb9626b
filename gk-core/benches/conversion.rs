//! Benchmarks pour la chaîne de conversion

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gk_core::{convert, parse_table, run, write_table, ColumnNames, Separator, ZoneSelection};

/// Génère un export SurvComp synthétique autour de Kassel (zone 3)
fn synthetic_export(points: usize) -> String {
    let mut text = String::from("punkt_id;gps_latitude;gps_longitude;hoehe;art;bemerkungen\n");
    for i in 0..points {
        let lat = 51.3 + (i % 1000) as f64 * 1e-4;
        let lon = 9.45 + (i / 1000) as f64 * 1e-4;
        text.push_str(&format!(
            "P{};{:.8};{:.8};{:.2};GP;Punkt {}\n",
            i,
            lat,
            lon,
            150.0 + (i % 50) as f64,
            i
        ));
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_table");
    for &points in &[1_000usize, 10_000] {
        let text = synthetic_export(points);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(points), &text, |b, text| {
            b.iter(|| parse_table(black_box(text)).unwrap())
        });
    }
    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let parsed = parse_table(&synthetic_export(10_000)).unwrap();

    let mut group = c.benchmark_group("convert");
    group.throughput(Throughput::Elements(parsed.records.len() as u64));
    group.bench_function("5683", |b| {
        b.iter(|| convert(black_box(&parsed.records), 5683).unwrap())
    });
    group.finish();

    let converted = convert(&parsed.records, 5683).unwrap();
    c.bench_function("write_table", |b| {
        b.iter(|| write_table(black_box(&converted.records), Separator::Semicolon))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let text = synthetic_export(10_000);
    let columns = ColumnNames::default();

    c.bench_function("pipeline_auto_10k", |b| {
        b.iter(|| {
            let result = run(
                black_box(&text),
                ZoneSelection::Auto,
                Separator::Semicolon,
                &columns,
            )
            .unwrap();
            black_box(result)
        })
    });
}

criterion_group!(benches, bench_parse, bench_convert, bench_pipeline);
criterion_main!(benches);
