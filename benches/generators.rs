use criterion::{criterion_group, criterion_main, Criterion};
use corridors::{
    generators::{carve, RandomSource},
    units::{Height, Width},
    Maze,
};

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    let mut random = RandomSource::from_seed(0);
    c.bench_function("recursive_backtracker_maze_32", move |b| {
        b.iter(|| carve(Width(32), Height(32), &mut random))
    });
}

fn bench_recursive_backtracker_maze_256(c: &mut Criterion) {
    let mut random = RandomSource::from_seed(0);
    c.bench_function("recursive_backtracker_maze_256", move |b| {
        b.iter(|| carve(Width(256), Height(256), &mut random))
    });
}

fn bench_regenerate_maze_32(c: &mut Criterion) {
    let mut maze = Maze::new();
    maze.generate(Width(32), Height(32), 0);
    c.bench_function("regenerate_maze_32", move |b| {
        b.iter(|| maze.regenerate())
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_32,
    bench_recursive_backtracker_maze_256,
    bench_regenerate_maze_32
);
criterion_main!(benches);
