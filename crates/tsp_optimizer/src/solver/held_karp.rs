use std::marker::PhantomData;

use fxhash::FxHashMap;
use tokio::sync::mpsc::Sender;
use tracing::{error, info, instrument};

use crate::{
    problem::{
        cycle::Cycle,
        distance_matrix::{Distance, DistanceMatrix},
    },
    timer_debug,
    utils::{
        power_set::power_set,
        subset_identity::{BitmaskIdentity, SubsetIdentity},
    },
};

use super::{
    solution::{Solution, SolutionError, SolverState, SolverStatus},
    solve_context::SolveContext,
    tsp_solver::Solver,
};

/// Largest problem sessions hand to the Held-Karp solver. The table grows as
/// `n * 2^n`, so problems past this size exhaust memory long before the subset
/// identity runs out of room.
pub const MAX_HELD_KARP_POINTS: usize = 20;

/// Exact solver based on the Held-Karp dynamic program.
///
/// Point `0` is the fixed origin. For every subset `S` of the other points and
/// every point `i` outside of `S`, the table holds the length of the shortest
/// path starting at `i`, visiting all of `S` and ending at the origin. Subsets
/// are keyed with `I`, which bounds the size of the problems the solver accepts.
///
/// Only the optimal cycle is emitted, once the table is complete.
pub struct HeldKarpSolver<I: SubsetIdentity = BitmaskIdentity> {
    state: SolverState,
    identity: PhantomData<fn() -> I>,
}

impl<I: SubsetIdentity> Default for HeldKarpSolver<I> {
    fn default() -> Self {
        Self {
            state: SolverState::default(),
            identity: PhantomData,
        }
    }
}

/// Shortest path from a point through a subset to the origin, with the first
/// point of the subset it visits.
#[derive(Debug, Clone, Copy)]
struct PathToOrigin {
    distance: Distance,
    next: Option<usize>,
}

type PathTable<K> = FxHashMap<(K, usize), PathToOrigin>;

impl<I: SubsetIdentity> HeldKarpSolver<I> {
    /// Fills the table, returns `None` when cancelled.
    fn shortest_paths(
        matrix: &DistanceMatrix,
        identity: &I,
        others: &[usize],
        context: &SolveContext,
    ) -> Option<PathTable<I::Key>> {
        let mut table = PathTable::<I::Key>::default();
        let mut reporter = context.progress_reporter();
        let mut calculations = 0u64;

        for subset in power_set(others) {
            if context.is_cancelled() {
                reporter.finish(calculations);
                return None;
            }

            let key = identity.identity(&subset);

            // The origin only starts the path through every other point.
            let starts = if subset.len() == others.len() {
                vec![0]
            } else {
                others
                    .iter()
                    .copied()
                    .filter(|point| subset.binary_search(point).is_err())
                    .collect()
            };

            for start in starts {
                let mut best = PathToOrigin {
                    distance: Distance::INFINITY,
                    next: None,
                };

                if subset.is_empty() {
                    best.distance = matrix.distance(start, 0);
                }

                for &next in &subset {
                    let rest = identity.without(key, next);
                    let distance =
                        matrix.distance(start, next) + table[&(rest, next)].distance;
                    calculations += 1;

                    if distance < best.distance {
                        best = PathToOrigin {
                            distance,
                            next: Some(next),
                        };
                    }
                }

                table.insert((key, start), best);
            }

            reporter.tick(calculations);
        }

        reporter.finish(calculations);
        Some(table)
    }

    /// Walks the recorded successors from the origin through every other point.
    fn reconstruct(identity: &I, others: &[usize], table: &PathTable<I::Key>) -> Cycle {
        let mut cycle = Vec::with_capacity(others.len() + 1);
        let mut key = identity.identity(others);
        let mut last = 0;
        cycle.push(last);

        while let Some(next) = table.get(&(key, last)).and_then(|path| path.next) {
            cycle.push(next);
            key = identity.without(key, next);
            last = next;
        }

        cycle.into()
    }
}

impl<I: SubsetIdentity> Solver for HeldKarpSolver<I> {
    #[instrument(skip_all, level = "debug", fields(points = matrix.num_points()))]
    fn solve(&self, matrix: &DistanceMatrix, updates: Sender<Cycle>, context: &SolveContext) {
        self.state.begin();

        let num_points = matrix.num_points();
        info!("solving problem with {num_points} points using Held-Karp");

        let identity = match I::for_universe(num_points) {
            Ok(identity) => identity,
            Err(err) => {
                error!("cannot solve problem with {num_points} points: {err}");
                self.state.finish(true);
                return;
            }
        };

        let cycle = if num_points <= 1 {
            Cycle::identity(num_points)
        } else {
            let others = (1..num_points).collect::<Vec<_>>();
            let table = timer_debug!(
                "held-karp table",
                Self::shortest_paths(matrix, &identity, &others, context)
            );

            let Some(table) = table else {
                info!("held-karp stopped");
                self.state.finish(true);
                return;
            };

            timer_debug!(
                "held-karp reconstruction",
                Self::reconstruct(&identity, &others, &table)
            )
        };

        let distance = cycle.distance(matrix);
        self.state.record_best(Solution {
            distance,
            cycle: cycle.clone(),
        });
        self.state.finish(false);

        info!(distance, "held-karp finished");

        // The run is complete, a receiver that went away only misses the result.
        let _ = updates.blocking_send(cycle);
    }

    fn status(&self) -> SolverStatus {
        self.state.status()
    }

    fn solution(&self) -> Result<Solution, SolutionError> {
        self.state.solution()
    }
}
