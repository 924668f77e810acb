use std::thread;

use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    problem::{
        cycle::Cycle,
        distance_matrix::{Distance, DistanceMatrix},
        point::Point,
        tsp_problem::{TspProblem, TspProblemBuilder},
    },
    solver::{solve_context::SolveContext, tsp_solver::Solver},
};

pub fn create_points(points: Vec<(f64, f64)>) -> Vec<Point> {
    points.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

pub fn create_point_grid(rows: usize, cols: usize) -> Vec<Point> {
    let mut points = Vec::with_capacity(rows * cols);

    for y in 0..rows {
        for x in 0..cols {
            points.push(Point::new(x as f64, y as f64));
        }
    }

    points
}

pub fn create_random_points(count: usize, seed: u64) -> Vec<Point> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Point::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
        .collect()
}

/// Symmetric matrix with random weights that do not satisfy the triangle inequality.
pub fn create_random_matrix(count: usize, seed: u64) -> DistanceMatrix {
    create_scaled_random_matrix(count, seed, 1.0)
}

/// Same weights as [`create_random_matrix`], multiplied by `scale`.
pub fn create_scaled_random_matrix(count: usize, seed: u64, scale: f64) -> DistanceMatrix {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut rows = vec![vec![0.0; count]; count];

    for i in 0..count {
        for j in i + 1..count {
            let distance = rng.random_range(1.0..50.0) * scale;
            rows[i][j] = distance;
            rows[j][i] = distance;
        }
    }

    DistanceMatrix::from_rows(rows).unwrap()
}

pub fn create_test_problem(points: Vec<(f64, f64)>) -> TspProblem {
    let mut builder = TspProblemBuilder::default();
    builder.set_name("test").set_points(create_points(points));
    builder.build().unwrap()
}

/// A square with a roof, the shortest tour is `50 * 3 + 2 * sqrt(25^2 + 25^2)`.
pub fn create_house_problem() -> TspProblem {
    create_test_problem(vec![
        (0.0, 0.0),
        (50.0, 0.0),
        (50.0, 50.0),
        (0.0, 50.0),
        (25.0, 75.0),
    ])
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Shortest tour found by trying every ordering of the points after the first.
pub fn exhaustive_minimum(matrix: &DistanceMatrix) -> Distance {
    fn visit(
        matrix: &DistanceMatrix,
        tour: &mut Vec<usize>,
        used: &mut [bool],
        best: &mut Distance,
    ) {
        if tour.len() == used.len() {
            *best = best.min(matrix.cycle_distance(tour));
            return;
        }

        for next in 1..used.len() {
            if !used[next] {
                used[next] = true;
                tour.push(next);
                visit(matrix, tour, used, best);
                tour.pop();
                used[next] = false;
            }
        }
    }

    let count = matrix.num_points();
    if count <= 1 {
        return 0.0;
    }

    let mut used = vec![false; count];
    used[0] = true;
    let mut best = Distance::INFINITY;
    visit(matrix, &mut vec![0], &mut used, &mut best);
    best
}

/// Runs `solver` on a separate thread and collects every emitted cycle.
pub fn collect_cycles<S>(solver: &S, matrix: &DistanceMatrix, context: &SolveContext) -> Vec<Cycle>
where
    S: Solver + Sync,
{
    let (sender, mut receiver) = tokio::sync::mpsc::channel(10);

    thread::scope(|scope| {
        scope.spawn(move || solver.solve(matrix, sender, context));

        let mut cycles = vec![];
        while let Some(cycle) = receiver.blocking_recv() {
            cycles.push(cycle);
        }
        cycles
    })
}

pub fn assert_relative_eq(actual: f64, expected: f64) {
    let tolerance = (1e-6 * expected.abs()).max(1e-15);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}
