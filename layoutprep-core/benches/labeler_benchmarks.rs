//! Labeling and windowing throughput
//!
//! Run with: cargo bench --bench labeler_benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use layoutprep_core::{
    ChunkWindower, ImageSize, NormBox, Page, PieceTokenizer, PixelBox, SectionLabeler, Word,
};
use std::hint::black_box;

/// Page-like word stream with a heading every few hundred words
fn generate_words(count: usize) -> Vec<String> {
    let body = "the proposed model reads scanned pages and predicts layout labels for each token";
    let headings = ["II.", "RELATED", "WORK", "III.4.", "Training", "details.", "Conclusions:"];
    let body: Vec<&str> = body.split(' ').collect();

    (0..count)
        .map(|i| {
            if i % 300 < headings.len() {
                headings[i % 300].to_string()
            } else {
                body[i % body.len()].to_string()
            }
        })
        .collect()
}

fn bench_label(c: &mut Criterion) {
    let mut group = c.benchmark_group("label");
    let labeler = SectionLabeler::default();

    for size in [500, 5_000, 50_000] {
        let words = generate_words(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &words, |b, words| {
            b.iter(|| labeler.label(black_box(words)));
        });
    }

    group.finish();
}

fn bench_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_page");
    let tokenizer = PieceTokenizer::default();
    let windower = ChunkWindower::default();

    for size in [500, 5_000] {
        let words = generate_words(size)
            .into_iter()
            .map(|t| Word::new(t, PixelBox::new(0, 0, 10, 10), NormBox::new(0, 0, 10, 10), 90.0))
            .collect();
        let mut page = Page::new("bench", 0, "bench.png", ImageSize::new(1000, 1000), words);
        SectionLabeler::default().label_page(&mut page);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &page, |b, page| {
            b.iter(|| windower.window_page(black_box(page), &tokenizer).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_label, bench_window);
criterion_main!(benches);
