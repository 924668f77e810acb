use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use fxhash::FxHashMap;
use parking_lot::RwLock;

use crate::problem::tsp_problem::TspProblem;

use super::{
    error::SessionError, metrics::SessionMetrics, session::Session,
    session_params::SessionParams,
};

/// Keeps track of the sessions of a process by id.
#[derive(Default)]
pub struct SessionManager {
    sessions: RwLock<FxHashMap<u64, Arc<Session>>>,
    last_id: AtomicU64,
    params: SessionParams,
}

impl SessionManager {
    pub fn new(params: SessionParams) -> Self {
        SessionManager {
            params,
            ..SessionManager::default()
        }
    }

    /// Creates a session, it does not start until [`SessionManager::start`].
    pub fn create(
        &self,
        algorithm: &str,
        problem: Arc<TspProblem>,
    ) -> Result<Arc<Session>, SessionError> {
        let id = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;
        let session = Arc::new(Session::with_params(id, algorithm, problem, self.params)?);

        self.sessions.write().insert(id, Arc::clone(&session));

        Ok(session)
    }

    pub fn get(&self, id: u64) -> Option<Arc<Session>> {
        self.sessions.read().get(&id).cloned()
    }

    pub fn start(&self, id: u64) -> bool {
        let Some(session) = self.get(id) else {
            return false;
        };

        session.start();
        true
    }

    pub fn stop(&self, id: u64) -> bool {
        let Some(session) = self.get(id) else {
            return false;
        };

        session.stop();
        true
    }

    /// Stops the session and forgets about it.
    pub fn remove(&self, id: u64) -> Option<Arc<Session>> {
        let session = self.sessions.write().remove(&id)?;
        session.stop();
        Some(session)
    }

    pub fn metrics(&self, id: u64) -> Option<SessionMetrics> {
        self.get(id).map(|session| session.metrics())
    }

    /// Metrics of every session, ordered by id.
    pub fn all_metrics(&self) -> Vec<SessionMetrics> {
        let mut metrics = self
            .sessions
            .read()
            .values()
            .map(|session| session.metrics())
            .collect::<Vec<_>>();
        metrics.sort_by_key(|metrics| metrics.session_id);
        metrics
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::{session::session_state::SessionState, test_utils};

    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let manager = SessionManager::default();
        let problem = Arc::new(test_utils::create_house_problem());

        let first = manager.create("bruteforce", Arc::clone(&problem)).unwrap();
        let second = manager.create("heldkarp", Arc::clone(&problem)).unwrap();
        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);
        assert_eq!(manager.len(), 2);

        assert!(manager.start(first.id()));
        assert!(!manager.start(42));
        first.wait();

        let metrics = manager.all_metrics();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].state, SessionState::Finished);
        assert_eq!(metrics[1].state, SessionState::Initialized);

        let removed = manager.remove(second.id()).unwrap();
        assert_eq!(removed.id(), 2);
        assert!(manager.get(2).is_none());
        assert!(manager.metrics(2).is_none());
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_create_rejects_unknown_algorithm() {
        let manager = SessionManager::default();
        let problem = Arc::new(test_utils::create_house_problem());

        assert!(manager.create("genetic", problem).is_err());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_stop_through_manager() {
        let manager = SessionManager::new(SessionParams::default());
        let points = test_utils::create_random_points(12, 21)
            .into_iter()
            .map(|point| (point.x(), point.y()))
            .collect();
        let problem = Arc::new(test_utils::create_test_problem(points));

        let session = manager.create("bruteforce", problem).unwrap();
        manager.start(session.id());
        assert!(manager.stop(session.id()));
        session.wait();

        assert_eq!(
            manager.metrics(session.id()).unwrap().state,
            SessionState::StoppedByUser
        );
    }
}
