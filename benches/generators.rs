use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use tilemaze::{
    generators,
    units::{ColumnsCount, RowsCount},
};

fn bench_carve_maze_64(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(64);
    c.bench_function("carve_maze_64", move |b| {
        b.iter(|| generators::carve(RowsCount(64), ColumnsCount(64), &mut rng).unwrap())
    });
}

fn bench_carve_maze_255(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(255);
    c.bench_function("carve_maze_255", move |b| {
        b.iter(|| generators::carve(RowsCount(255), ColumnsCount(255), &mut rng).unwrap())
    });
}

criterion_group!(benches, bench_carve_maze_64, bench_carve_maze_255);
criterion_main!(benches);
