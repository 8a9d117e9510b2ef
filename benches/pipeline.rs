//! Benchmarks for the Bible conversion pipeline.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use lampstand::export::{BlocksExporter, Exporter, TextExporter};
use lampstand::import::{read_usj_from_reader, read_zefania_from_reader};
use lampstand::{Bible, Reference, compile, format_bible};

const USJ_BYTES: &[u8] = include_bytes!("../tests/fixtures/jonah.usj.json");
const ZEFANIA_BYTES: &[u8] = include_bytes!("../tests/fixtures/haggai.zefania.xml");

fn load_sample_bible() -> Bible {
    let usj = read_usj_from_reader(USJ_BYTES).unwrap();
    compile(&usj).unwrap()
}

// ============================================================================
// Import Benchmarks
// ============================================================================

fn bench_read_usj(c: &mut Criterion) {
    c.bench_function("read_usj", |b| {
        b.iter(|| read_usj_from_reader(USJ_BYTES).unwrap());
    });
}

fn bench_read_zefania(c: &mut Criterion) {
    c.bench_function("read_zefania", |b| {
        b.iter(|| read_zefania_from_reader(ZEFANIA_BYTES).unwrap());
    });
}

// ============================================================================
// Compile and Format Benchmarks
// ============================================================================

fn bench_compile(c: &mut Criterion) {
    let usj = read_usj_from_reader(USJ_BYTES).unwrap();

    c.bench_function("compile", |b| {
        b.iter(|| compile(&usj).unwrap());
    });
}

fn bench_format_bible(c: &mut Criterion) {
    let bible = load_sample_bible();

    c.bench_function("format_bible", |b| {
        b.iter(|| format_bible(&bible));
    });
}

// ============================================================================
// Export Benchmarks
// ============================================================================

fn bench_write_text(c: &mut Criterion) {
    let bible = load_sample_bible();

    c.bench_function("write_text", |b| {
        b.iter(|| {
            let mut output = Vec::new();
            TextExporter::new().export(&bible, &mut output).unwrap();
        });
    });
}

fn bench_write_blocks_json(c: &mut Criterion) {
    let bible = load_sample_bible();

    c.bench_function("write_blocks_json", |b| {
        b.iter(|| {
            let mut output = Vec::new();
            BlocksExporter::new().export(&bible, &mut output).unwrap();
        });
    });
}

// ============================================================================
// Reference Benchmarks
// ============================================================================

fn bench_parse_reference(c: &mut Criterion) {
    c.bench_function("parse_reference", |b| {
        b.iter(|| {
            Reference::parse("JON-2-3").unwrap();
            Reference::parse("Song of Solomon 2:4").unwrap();
        });
    });
}

criterion_group!(
    benches,
    // Import
    bench_read_usj,
    bench_read_zefania,
    // Compile and format
    bench_compile,
    bench_format_bible,
    // Export
    bench_write_text,
    bench_write_blocks_json,
    // References
    bench_parse_reference,
);
criterion_main!(benches);
