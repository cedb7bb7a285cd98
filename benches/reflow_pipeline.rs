//! Criterion benchmarks for layout reconstruction and emission.
//!
//! Pages are synthetic: a dense body of short words with a tabular block,
//! shuffled to mimic decoders that emit fragments out of reading order.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pdf_reflow::converters::{emit, OutputKind};
use pdf_reflow::layout::{RawFragment, RawPage};
use pdf_reflow::pipeline::{reconstruct_page, LayoutThresholds};
use pdf_reflow::ReflowPipeline;

/// Build a page with `lines` lines of 12 words each.
fn synthetic_page(lines: usize) -> RawPage {
    let mut items = Vec::with_capacity(lines * 12);
    for line in 0..lines {
        let y = 760.0 - line as f32 * 12.0;
        let mut x = 72.0;
        for word in 0..12 {
            let width = 10.0 + ((line + word) % 5) as f32 * 4.0;
            items.push(RawFragment::new(format!("w{}_{}", line, word), x, y, width, 10.0));
            // Every fourth line is a table row with wide gaps
            x += width + if line % 4 == 0 { 30.0 } else { 3.0 };
        }
    }
    // Deterministic interleave so extraction order differs from reading order
    let (even, odd): (Vec<_>, Vec<_>) =
        items.into_iter().enumerate().partition(|(i, _)| i % 2 == 0);
    let items = odd.into_iter().chain(even).map(|(_, f)| f).collect();
    RawPage::new(612.0, 792.0, items)
}

fn bench_reconstruct_page(c: &mut Criterion) {
    let thresholds = LayoutThresholds::default();
    let mut group = c.benchmark_group("reconstruct_page");
    for lines in [10usize, 50, 200] {
        let page = synthetic_page(lines);
        group.bench_with_input(BenchmarkId::from_parameter(lines), &page, |b, page| {
            b.iter(|| reconstruct_page(0, black_box(page), &thresholds));
        });
    }
    group.finish();
}

fn bench_emitters(c: &mut Criterion) {
    let pages: Vec<RawPage> = (0..10).map(|_| synthetic_page(50)).collect();
    let document = ReflowPipeline::new().reconstruct(&pages).unwrap();

    let mut group = c.benchmark_group("emit");
    for kind in OutputKind::ALL {
        group.bench_function(kind.extension(), |b| {
            b.iter(|| emit(black_box(&document), kind));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reconstruct_page, bench_emitters);
criterion_main!(benches);
