use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use footfall_core::{CreatureProfile, HeightGrid, Vec3, WalkController};

fn make_walkers(count: usize, grid: &HeightGrid) -> Vec<WalkController<&HeightGrid>> {
    let profile = CreatureProfile::hexapod();
    let side = (count as f32).sqrt().ceil() as usize;
    (0..count)
        .map(|i| {
            let mut walker =
                WalkController::from_profile(grid, &profile).expect("hexapod layout is valid");
            let x = 100.0 + (i % side) as f32 * 150.0;
            let y = 100.0 + (i / side) as f32 * 150.0;
            walker.rest_at(Vec3::new(x, y, 0.0));
            walker
        })
        .collect()
}

fn bench_tick(c: &mut Criterion) {
    let grid = HeightGrid::from_fn(512, 512, 10.0, |x, y| ((x * 7 + y * 13) % 5) as f32);
    let dt = 1.0 / 60.0;
    let velocity = Vec3::new(40.0, 25.0, 0.0);

    let mut group = c.benchmark_group("footfall-core/tick");

    for &n in &[1usize, 100usize, 1_000usize] {
        let mut walkers = make_walkers(n, &grid);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &_n| {
            b.iter(|| {
                for walker in &mut walkers {
                    walker.tick(dt, velocity);
                }
                black_box(walkers[0].pelvis_offset());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
