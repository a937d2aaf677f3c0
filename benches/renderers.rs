use criterion::{criterion_group, criterion_main, Criterion};
use corridors::{
    geometry::{Geometry, NODE_SIZE},
    renderers::ImageTarget,
    units::{Height, Width},
    Maze,
};
use glam::{Affine2, Vec2};

fn bench_geometry_maze_128(c: &mut Criterion) {
    let mut maze = Maze::new();
    maze.generate(Width(128), Height(128), 1);
    let grid = maze.grid().clone();
    c.bench_function("geometry_maze_128", move |b| {
        b.iter(|| Geometry::from_grid(&grid))
    });
}

fn bench_image_render_maze_64(c: &mut Criterion) {
    let mut maze = Maze::new();
    maze.generate(Width(64), Height(64), 1);
    let scale = 8.0 / NODE_SIZE;
    let transform = Affine2::from_scale(Vec2::splat(scale)) *
                    Affine2::from_translation(Vec2::splat(NODE_SIZE / 2.0));
    c.bench_function("image_render_maze_64", move |b| {
        b.iter(|| {
            let mut target = ImageTarget::new(64 * 8, 64 * 8);
            maze.render(&mut target, &transform);
            target
        })
    });
}

criterion_group!(benches, bench_geometry_maze_128, bench_image_render_maze_64);
criterion_main!(benches);
