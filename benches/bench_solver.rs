use criterion::{criterion_group, criterion_main, Criterion};
use twophase::solver::Solver;
use twophase::{from_moves, random_moves};

fn two_phase() {
    let facelet = from_moves(&random_moves(25));
    let mut solver = Solver::default();
    let s = solver.solve(&facelet, 21, 0);
    assert!(s.is_ok());
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("Two-Phase Solver", |b| b.iter(two_phase));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
