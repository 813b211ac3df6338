//! Benchmarks for the end-to-end pipeline.
//!
//! Builds synthetic documents of flate-compressed content streams and runs
//! parse, extract, map and collect with varying worker counts.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::hint::black_box;
use std::io::Write;

use pdfsift_core::api::{ExtractOptions, extract_text_from_bytes};
use pdfsift_core::parser::PdfReader;

/// Document with `objects` compressed content streams of a few lines each.
fn generate_document(objects: usize) -> Vec<u8> {
    let mut data = b"%PDF-1.7\n".to_vec();
    for n in 0..objects {
        let content = format!(
            "BT /F1 11 Tf 72 720 Td (Object {n} first line) Tj T* (second-line) Tj ET"
        );
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(content.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();
        data.extend_from_slice(
            format!(
                "{} 0 obj\n<< /Length {} /Filter /FlateDecode >>\nstream\n",
                n + 1,
                compressed.len()
            )
            .as_bytes(),
        );
        data.extend_from_slice(&compressed);
        data.extend_from_slice(b"\nendstream\nendobj\n");
    }
    data.extend_from_slice(b"%%EOF\n");
    data
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_parse");

    for objects in [100usize, 1_000, 10_000] {
        let data = generate_document(objects);
        group.bench_with_input(BenchmarkId::new("read_all", objects), &data, |b, data| {
            b.iter(|| {
                PdfReader::from_reader("bench", black_box(&data[..]), 4096)
                    .read_all()
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_extract");
    let data = generate_document(2_000);

    for workers in [1usize, 2, 4, 8] {
        let options = ExtractOptions::default().with_workers(workers);
        group.bench_with_input(BenchmarkId::new("workers", workers), &data, |b, data| {
            b.iter(|| extract_text_from_bytes("bench", black_box(data), Some(options.clone())).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_extract);
criterion_main!(benches);
