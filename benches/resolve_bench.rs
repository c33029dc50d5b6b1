use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stocking_sizer::{generate_batch, generate_sku, ClassInput, SizeTable, SkuRequest};

fn request(ankle: f64) -> SkuRequest {
    SkuRequest {
        category: "thigh".to_string(),
        color: "bronze".to_string(),
        toe: "open".to_string(),
        compression_class: ClassInput::Number(1),
        ankle,
        calf: 36.0,
        thigh: Some(51.0),
        leg_length: 80.0,
    }
}

fn bench_single(c: &mut Criterion) {
    let table = SizeTable::builtin().expect("builtin table");
    let boundary = request(21.0);
    let interior = request(21.7);

    c.bench_function("generate_sku_boundary_ankle", |b| {
        b.iter(|| generate_sku(black_box(&table), black_box(&boundary)))
    });
    c.bench_function("generate_sku_interior_ankle", |b| {
        b.iter(|| generate_sku(black_box(&table), black_box(&interior)))
    });
}

fn bench_batch(c: &mut Criterion) {
    let table = SizeTable::builtin().expect("builtin table");
    let requests: Vec<SkuRequest> = (0..10_000)
        .map(|i| request(17.0 + (i % 160) as f64 / 10.0))
        .collect();

    c.bench_function("generate_batch_10k", |b| {
        b.iter(|| generate_batch(black_box(&table), black_box(&requests)))
    });
}

criterion_group!(benches, bench_single, bench_batch);
criterion_main!(benches);
