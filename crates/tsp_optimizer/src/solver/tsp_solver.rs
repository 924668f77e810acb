use tokio::sync::mpsc::Sender;

use crate::problem::{cycle::Cycle, distance_matrix::DistanceMatrix};

use super::{
    algorithm::Algorithm,
    brute_force::BruteForceSolver,
    held_karp::HeldKarpSolver,
    solution::{Solution, SolutionError, SolverStatus},
    solve_context::SolveContext,
};

pub trait Solver {
    /// Solves the problem described by `matrix`, sending every new best cycle
    /// on `updates`.
    ///
    /// Sending blocks while `updates` is full. The sender is dropped when the
    /// run is over, which closes the channel; nothing is sent afterwards.
    /// Must not be called from within an async runtime.
    fn solve(&self, matrix: &DistanceMatrix, updates: Sender<Cycle>, context: &SolveContext);

    fn status(&self) -> SolverStatus;

    fn solution(&self) -> Result<Solution, SolutionError>;
}

pub enum TspSolver {
    BruteForce(BruteForceSolver),
    HeldKarp(HeldKarpSolver),
}

impl TspSolver {
    pub fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::BruteForce => TspSolver::BruteForce(BruteForceSolver::default()),
            Algorithm::HeldKarp => TspSolver::HeldKarp(HeldKarpSolver::default()),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            TspSolver::BruteForce(_) => Algorithm::BruteForce,
            TspSolver::HeldKarp(_) => Algorithm::HeldKarp,
        }
    }
}

impl Solver for TspSolver {
    fn solve(&self, matrix: &DistanceMatrix, updates: Sender<Cycle>, context: &SolveContext) {
        match self {
            TspSolver::BruteForce(solver) => solver.solve(matrix, updates, context),
            TspSolver::HeldKarp(solver) => solver.solve(matrix, updates, context),
        }
    }

    fn status(&self) -> SolverStatus {
        match self {
            TspSolver::BruteForce(solver) => solver.status(),
            TspSolver::HeldKarp(solver) => solver.status(),
        }
    }

    fn solution(&self) -> Result<Solution, SolutionError> {
        match self {
            TspSolver::BruteForce(solver) => solver.solution(),
            TspSolver::HeldKarp(solver) => solver.solution(),
        }
    }
}
