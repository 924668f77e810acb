use serde::{Deserialize, Serialize};

use crate::solver::solve_context::DEFAULT_PROGRESS_INTERVAL;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParams {
    /// Cycles the solver may queue before it blocks on the session.
    pub update_capacity: usize,
    /// Routes queued per subscriber before new ones are dropped for it.
    pub subscriber_capacity: usize,
    /// Calculations between two progress reports of the solver.
    pub progress_interval: u64,
}

impl Default for SessionParams {
    fn default() -> Self {
        SessionParams {
            update_capacity: 10,
            subscriber_capacity: 10,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}
