use tokio::sync::mpsc::Sender;
use tracing::{debug, info, instrument};

use crate::problem::{
    cycle::Cycle,
    distance_matrix::{Distance, DistanceMatrix},
};

use super::{
    solution::{Solution, SolutionError, SolverState, SolverStatus},
    solve_context::SolveContext,
    tsp_solver::Solver,
};

// Relative margin a candidate must beat the best tour by, so the rounding noise
// of the incremental update never passes off an equal tour as an improvement.
// Purely relative: tours of any scale, however short, can still improve.
const IMPROVEMENT_EPSILON: Distance = 1e-9;

/// Exhaustive search over every ordering of the points.
///
/// Permutations are generated with the iterative form of Heap's algorithm.
/// Each step swaps two positions, so the tour length is updated in constant
/// time from the edges around those positions instead of being recomputed.
#[derive(Default)]
pub struct BruteForceSolver {
    state: SolverState,
}

impl BruteForceSolver {
    /// Records `points` as the new best tour and forwards it.
    /// Returns `false` once nobody listens anymore.
    fn publish(&self, points: &[usize], distance: Distance, updates: &Sender<Cycle>) -> bool {
        let cycle = Cycle::from(points);
        self.state.record_best(Solution {
            distance,
            cycle: cycle.clone(),
        });

        updates.blocking_send(cycle).is_ok()
    }
}

/// Sum of the edges joining positions `i` and `j` to their neighbours in the tour.
#[inline(always)]
fn edges_around(matrix: &DistanceMatrix, points: &[usize], i: usize, j: usize) -> Distance {
    let len = points.len();
    let edges = |position: usize| {
        let left = if position == 0 { len - 1 } else { position - 1 };
        let right = if position + 1 == len { 0 } else { position + 1 };
        matrix.distance(points[position], points[left])
            + matrix.distance(points[position], points[right])
    };

    edges(i) + edges(j)
}

impl Solver for BruteForceSolver {
    #[instrument(skip_all, level = "debug", fields(points = matrix.num_points()))]
    fn solve(&self, matrix: &DistanceMatrix, updates: Sender<Cycle>, context: &SolveContext) {
        self.state.begin();

        let num_points = matrix.num_points();
        info!("solving problem with {num_points} points using brute force");

        let mut points = (0..num_points).collect::<Vec<_>>();
        let mut distance = matrix.cycle_distance(&points);
        let mut shortest_distance = distance;

        let mut cancelled = !self.publish(&points, distance, &updates);

        let mut reporter = context.progress_reporter();
        let mut calculations = 0u64;
        let mut counters = vec![0usize; num_points];
        let mut i = 1;

        while i < num_points && !cancelled {
            if context.is_cancelled() {
                cancelled = true;
                break;
            }

            if counters[i] < i {
                let j = if i % 2 == 0 { 0 } else { counters[i] };

                distance -= edges_around(matrix, &points, i, j);
                points.swap(i, j);
                distance += edges_around(matrix, &points, i, j);

                calculations += 1;

                if distance < shortest_distance * (1.0 - IMPROVEMENT_EPSILON) {
                    // Resynchronize with the exact length so drift never accumulates.
                    distance = matrix.cycle_distance(&points);
                    shortest_distance = distance;
                    debug!(distance, calculations, "found shorter cycle");

                    if !self.publish(&points, distance, &updates) {
                        cancelled = true;
                    }
                }

                reporter.tick(calculations);
                counters[i] += 1;
                i = 1;
            } else {
                counters[i] = 0;
                i += 1;
            }
        }

        reporter.finish(calculations);
        self.state.finish(cancelled);

        if cancelled {
            info!(calculations, shortest_distance, "brute force stopped");
        } else {
            info!(calculations, shortest_distance, "brute force finished");
        }

        drop(updates);
    }

    fn status(&self) -> SolverStatus {
        self.state.status()
    }

    fn solution(&self) -> Result<Solution, SolutionError> {
        self.state.solution()
    }
}
