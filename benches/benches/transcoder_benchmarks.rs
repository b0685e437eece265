use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use deckstate::{CodecConfig, TextTranscoder};

/// JSON-подобные данные заданного размера
fn payload(size: usize) -> Vec<u8> {
    br#"{"Vocabulary":["der Hund","die Katze","das Pferd"],"#.repeat(size / 48 + 1)[..size].to_vec()
}

fn bench_to_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("transcoder_to_text");
    for level in [1, 6, 9] {
        let t = TextTranscoder::new(&CodecConfig {
            compression_level: level,
            ..CodecConfig::default()
        });
        let data = payload(16 * 1024);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("level", level), &data, |b, data| {
            b.iter(|| t.to_text(black_box(data)))
        });
    }
    group.finish();
}

fn bench_from_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("transcoder_from_text");
    let t = TextTranscoder::default();
    for size in [256, 4 * 1024, 64 * 1024] {
        let text = t.to_text(&payload(size));
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| t.from_text(black_box(text)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_to_text, bench_from_text);
criterion_main!(benches);
