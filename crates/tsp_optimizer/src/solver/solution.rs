use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;

use crate::problem::{cycle::Cycle, distance_matrix::Distance};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SolverStatus {
    Idle,
    Running,
    Solved,
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    pub distance: Distance,
    pub cycle: Cycle,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionError {
    #[error("still running")]
    StillRunning,

    #[error("not solved")]
    NotSolved,
}

struct SolverRun {
    status: SolverStatus,
    best: Option<Solution>,
}

/// Status and best solution of the current or last run of a solver.
pub(crate) struct SolverState {
    run: RwLock<SolverRun>,
}

impl Default for SolverState {
    fn default() -> Self {
        Self {
            run: RwLock::new(SolverRun {
                status: SolverStatus::Idle,
                best: None,
            }),
        }
    }
}

impl SolverState {
    pub fn begin(&self) {
        let mut run = self.run.write();
        run.status = SolverStatus::Running;
        run.best = None;
    }

    pub fn record_best(&self, solution: Solution) {
        self.run.write().best = Some(solution);
    }

    pub fn finish(&self, cancelled: bool) {
        self.run.write().status = if cancelled {
            SolverStatus::Cancelled
        } else {
            SolverStatus::Solved
        };
    }

    pub fn status(&self) -> SolverStatus {
        self.run.read().status
    }

    pub fn solution(&self) -> Result<Solution, SolutionError> {
        let run = self.run.read();
        match run.status {
            SolverStatus::Running => Err(SolutionError::StillRunning),
            SolverStatus::Idle => Err(SolutionError::NotSolved),
            SolverStatus::Solved | SolverStatus::Cancelled => {
                run.best.clone().ok_or(SolutionError::NotSolved)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_by_status() {
        let state = SolverState::default();
        assert_eq!(state.status(), SolverStatus::Idle);
        assert_eq!(state.solution(), Err(SolutionError::NotSolved));

        state.begin();
        let solution = Solution {
            distance: 4.0,
            cycle: Cycle::identity(2),
        };
        state.record_best(solution.clone());
        assert_eq!(state.solution(), Err(SolutionError::StillRunning));

        state.finish(true);
        assert_eq!(state.status(), SolverStatus::Cancelled);
        assert_eq!(state.solution(), Ok(solution));

        state.begin();
        state.finish(true);
        assert_eq!(state.solution(), Err(SolutionError::NotSolved));
    }
}
