use criterion::{black_box, criterion_group, criterion_main, Criterion};
use folio_core::{generate_outline, OutlineCache};

fn bench_generate(c: &mut Criterion) {
    c.bench_function("generate_outline cover", |b| {
        b.iter(|| generate_outline(black_box(200.0), black_box(268.0), 20.0, 1.0))
    });

    c.bench_function("generate_outline plain arc", |b| {
        b.iter(|| generate_outline(black_box(196.0), black_box(264.0), 16.0, 0.0))
    });
}

fn bench_cache(c: &mut Criterion) {
    let mut cache = OutlineCache::new();
    c.bench_function("outline cache hit", |b| {
        b.iter(|| cache.get_or_generate(black_box(200.0), 268.0, 20.0, 1.0))
    });
}

fn bench_validate(c: &mut Criterion) {
    let outline = generate_outline(200.0, 268.0, 20.0, 1.0);
    c.bench_function("outline is_simple", |b| b.iter(|| black_box(&outline).is_simple()));
}

criterion_group!(benches, bench_generate, bench_cache, bench_validate);
criterion_main!(benches);
