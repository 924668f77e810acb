use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use tokio::sync::mpsc;
use tsp_optimizer::{
    problem::{distance_matrix::DistanceMatrix, point::Point},
    solver::{
        brute_force::BruteForceSolver, held_karp::HeldKarpSolver, solve_context::SolveContext,
        tsp_solver::Solver,
    },
    utils::{
        power_set::power_set,
        subset_identity::{BitmaskIdentity, PrimeProductIdentity, SubsetIdentity},
    },
};

fn random_matrix(count: usize) -> DistanceMatrix {
    let mut rng = SmallRng::seed_from_u64(7);
    let points = (0..count)
        .map(|_| Point::new(rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
        .collect::<Vec<_>>();

    DistanceMatrix::from_euclidean(&points)
}

fn run<S: Solver>(solver: &S, matrix: &DistanceMatrix) {
    let (sender, receiver) = mpsc::channel(4096);
    solver.solve(matrix, sender, &SolveContext::default());
    black_box(receiver);
}

fn solver_benchmark(c: &mut Criterion) {
    let small = random_matrix(8);
    let medium = random_matrix(12);

    c.bench_function("brute force 8 points", |b| {
        b.iter(|| run(&BruteForceSolver::default(), black_box(&small)))
    });

    c.bench_function("held-karp 12 points (bitmask)", |b| {
        b.iter(|| run(&HeldKarpSolver::<BitmaskIdentity>::default(), black_box(&medium)))
    });

    c.bench_function("held-karp 12 points (prime product)", |b| {
        b.iter(|| run(&HeldKarpSolver::<PrimeProductIdentity>::default(), black_box(&medium)))
    });
}

fn subset_benchmark(c: &mut Criterion) {
    let set = (1..16).collect::<Vec<usize>>();

    c.bench_function("power set of 15 elements", |b| {
        b.iter(|| power_set(black_box(&set)).count())
    });

    let subsets = power_set(&set).collect::<Vec<_>>();
    let bitmask = BitmaskIdentity::for_universe(16).unwrap();
    let primes = PrimeProductIdentity::for_universe(16).unwrap();

    c.bench_function("bitmask identity", |b| {
        b.iter(|| {
            subsets
                .iter()
                .map(|subset| bitmask.identity(black_box(subset)))
                .fold(0, |acc, key| acc ^ key)
        })
    });

    c.bench_function("prime product identity", |b| {
        b.iter(|| {
            subsets
                .iter()
                .map(|subset| primes.identity(black_box(subset)))
                .fold(0, |acc, key| acc ^ key)
        })
    });
}

criterion_group!(benches, solver_benchmark, subset_benchmark);
criterion_main!(benches);
