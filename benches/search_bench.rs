use criterion::{criterion_group, criterion_main, Criterion};
use grid_astar::{find_path, CellGrid, CellState, HeuristicMethod, Point, SearchConfig};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

const N: usize = 64;

fn random_grid(rng: &mut StdRng) -> CellGrid {
    let mut grid = CellGrid::new(N, N);
    for y in 0..N as i32 {
        for x in 0..N as i32 {
            if rng.gen_bool(0.25) {
                grid.set(Point::new(x, y), CellState::Wall);
            }
        }
    }
    grid.generate_components(true);
    grid
}

/// Random reachable start/goal pairs on the grid.
fn scenarios(grid: &CellGrid, rng: &mut StdRng, count: usize) -> Vec<(Point, Point)> {
    let mut scenarios = Vec::with_capacity(count);
    while scenarios.len() < count {
        let mut point = || Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        let (start, goal) = (point(), point());
        if grid.reachable(&start, &goal) {
            scenarios.push((start, goal));
        }
    }
    scenarios
}

fn heuristic_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let grid = random_grid(&mut rng);
    let scenarios = scenarios(&grid, &mut rng, 32);
    for heuristic in HeuristicMethod::ALL {
        let config = SearchConfig::default().with_heuristic(heuristic);
        c.bench_function(format!("{N}x{N}, {heuristic}").as_str(), |b| {
            b.iter(|| {
                for (start, goal) in &scenarios {
                    black_box(find_path(&grid, *start, *goal, config.clone()).ok());
                }
            })
        });
    }
}

fn weighting_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let grid = random_grid(&mut rng);
    let scenarios = scenarios(&grid, &mut rng, 32);
    for w in [1.0, 1.5, 3.0] {
        let config = SearchConfig::default()
            .with_weight(w)
            .expect("valid weight")
            .with_cycle_budget(usize::MAX);
        c.bench_function(format!("{N}x{N}, octile, w = {w}").as_str(), |b| {
            b.iter(|| {
                for (start, goal) in &scenarios {
                    black_box(find_path(&grid, *start, *goal, config.clone()).ok());
                }
            })
        });
    }
}

criterion_group!(benches, heuristic_bench, weighting_bench);
criterion_main!(benches);
