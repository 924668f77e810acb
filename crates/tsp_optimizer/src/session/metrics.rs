use jiff::{SignedDuration, Timestamp};
use serde::Serialize;

use crate::{problem::distance_matrix::Distance, solver::algorithm::Algorithm};

use super::session_state::SessionState;

/// Snapshot of a session, taken by [`super::session::Session::metrics`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionMetrics {
    pub session_id: u64,
    pub problem: String,
    pub num_points: usize,
    pub algorithm: Algorithm,
    pub state: SessionState,
    pub started: Option<Timestamp>,
    pub stopped: Option<Timestamp>,
    pub runtime: Option<SignedDuration>,
    pub calculations: u64,
    pub best_distance: Option<Distance>,
    pub subscribers: usize,
}

impl SessionMetrics {
    pub fn calculations_per_second(&self) -> Option<f64> {
        let seconds = self.runtime?.as_secs_f64();
        (seconds > 0.0).then(|| self.calculations as f64 / seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculations_per_second() {
        let mut metrics = SessionMetrics {
            session_id: 1,
            problem: String::from("house"),
            num_points: 5,
            algorithm: Algorithm::BruteForce,
            state: SessionState::Finished,
            started: None,
            stopped: None,
            runtime: Some(SignedDuration::from_secs(2)),
            calculations: 119,
            best_distance: Some(220.71),
            subscribers: 0,
        };
        assert_eq!(metrics.calculations_per_second(), Some(59.5));

        metrics.runtime = None;
        assert_eq!(metrics.calculations_per_second(), None);
    }
}
