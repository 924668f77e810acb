use std::{fmt, sync::Arc, thread, time::Instant};

use jiff::{SignedDuration, Timestamp};
use parking_lot::{Condvar, Mutex};
use tokio::sync::mpsc::{self, Receiver};
use tracing::{debug, info, trace};

use crate::{
    problem::{cycle::Cycle, route::Route, tsp_problem::TspProblem},
    solver::{
        algorithm::Algorithm,
        solution::{Solution, SolutionError, SolverStatus},
        solve_context::{CancellationToken, SolveContext},
        tsp_solver::{Solver, TspSolver},
    },
};

use super::{
    error::SessionError,
    metrics::SessionMetrics,
    session_params::SessionParams,
    session_state::SessionState,
    subscribers::{Subscribers, Subscription},
};

/// Runs one solver in the background and streams its improving tours, as
/// [`Route`]s, to any number of subscribers.
///
/// The solver runs on its own thread and queues every new best cycle. A
/// supervisor thread drains that queue and forwards each route to the
/// subscribers without ever waiting on them: a subscriber whose queue is full
/// misses the route. Once the solver is done the session is `Finished` and
/// every subscriber queue is closed.
///
/// Dropping the session stops it.
pub struct Session {
    shared: Arc<Shared>,
}

struct Shared {
    id: u64,
    algorithm: Algorithm,
    problem: Arc<TspProblem>,
    params: SessionParams,
    solver: TspSolver,
    // Always locked before `subscribers` when both are needed.
    lifecycle: Mutex<Lifecycle>,
    subscribers: Mutex<Subscribers>,
    supervisor_done: Condvar,
}

struct Lifecycle {
    state: SessionState,
    started: Option<Timestamp>,
    stopped: Option<Timestamp>,
    context: Option<SolveContext>,
    best_route: Option<Route>,
    supervising: bool,
}

impl Session {
    pub fn new(id: u64, algorithm: &str, problem: Arc<TspProblem>) -> Result<Self, SessionError> {
        Self::with_params(id, algorithm, problem, SessionParams::default())
    }

    pub fn with_params(
        id: u64,
        algorithm: &str,
        problem: Arc<TspProblem>,
        params: SessionParams,
    ) -> Result<Self, SessionError> {
        let algorithm = algorithm.parse::<Algorithm>()?;

        if let Some(max) = algorithm
            .max_points()
            .filter(|&max| problem.num_points() > max)
        {
            return Err(SessionError::ProblemTooLarge {
                algorithm,
                points: problem.num_points(),
                max,
            });
        }

        debug!(session = id, %algorithm, problem = %problem, "session created");

        Ok(Session {
            shared: Arc::new(Shared {
                id,
                algorithm,
                problem,
                params,
                solver: TspSolver::new(algorithm),
                lifecycle: Mutex::new(Lifecycle {
                    state: SessionState::Initialized,
                    started: None,
                    stopped: None,
                    context: None,
                    best_route: None,
                    supervising: false,
                }),
                subscribers: Mutex::new(Subscribers::new(params.subscriber_capacity)),
                supervisor_done: Condvar::new(),
            }),
        })
    }

    pub fn id(&self) -> u64 {
        self.shared.id
    }

    pub fn algorithm(&self) -> Algorithm {
        self.shared.algorithm
    }

    pub fn problem(&self) -> &Arc<TspProblem> {
        &self.shared.problem
    }

    pub fn params(&self) -> &SessionParams {
        &self.shared.params
    }

    /// Starts the solver in the background. Only the first call has an effect.
    pub fn start(&self) {
        let mut lifecycle = self.shared.lifecycle.lock();
        if lifecycle.state != SessionState::Initialized {
            debug!(session = self.id(), state = %lifecycle.state, "session already started");
            return;
        }

        let session_id = self.id();
        let mut context = SolveContext::new(CancellationToken::new())
            .with_progress_interval(self.shared.params.progress_interval);
        context.on_progress(move |progress| {
            debug!(
                session = session_id,
                calculations = progress.calculations,
                "{:.0} calculations/s",
                progress.calculations_per_second()
            );
        });

        let (sender, receiver) = mpsc::channel(self.shared.params.update_capacity.max(1));

        lifecycle.state = SessionState::Running;
        lifecycle.started = Some(Timestamp::now());
        lifecycle.context = Some(context.clone());
        lifecycle.supervising = true;

        info!(
            session = session_id,
            algorithm = %self.shared.algorithm,
            problem = %self.shared.problem,
            "session started"
        );

        let shared = Arc::clone(&self.shared);
        thread::spawn(move || {
            shared
                .solver
                .solve(shared.problem.matrix(), sender, &context)
        });

        let shared = Arc::clone(&self.shared);
        thread::spawn(move || shared.supervise(receiver));
    }

    /// Cancels a running session. No route is published once this returns
    /// and every subscriber queue is closed after its pending routes.
    pub fn stop(&self) {
        let mut lifecycle = self.shared.lifecycle.lock();
        if lifecycle.state != SessionState::Running {
            debug!(session = self.id(), state = %lifecycle.state, "session is not running");
            return;
        }

        lifecycle.state = SessionState::StoppedByUser;
        lifecycle.stopped = Some(Timestamp::now());
        if let Some(context) = &lifecycle.context {
            context.token().cancel();
        }

        self.shared.subscribers.lock().close();

        info!(session = self.id(), "session stopped");
    }

    /// Blocks until the solver is done and every subscriber queue is closed.
    /// Returns immediately if the session never started.
    pub fn wait(&self) {
        let mut lifecycle = self.shared.lifecycle.lock();
        while lifecycle.supervising {
            self.shared.supervisor_done.wait(&mut lifecycle);
        }
    }

    /// Like [`Session::wait`], giving up after `timeout`. Returns whether the
    /// session is over.
    pub fn wait_timeout(&self, timeout: SignedDuration) -> bool {
        let deadline = Instant::now() + timeout.unsigned_abs();
        let mut lifecycle = self.shared.lifecycle.lock();

        while lifecycle.supervising {
            if self
                .shared
                .supervisor_done
                .wait_until(&mut lifecycle, deadline)
                .timed_out()
            {
                return !lifecycle.supervising;
            }
        }

        true
    }

    pub fn state(&self) -> SessionState {
        self.shared.lifecycle.lock().state
    }

    pub fn started(&self) -> Option<Timestamp> {
        self.shared.lifecycle.lock().started
    }

    pub fn stopped(&self) -> Option<Timestamp> {
        self.shared.lifecycle.lock().stopped
    }

    /// Time since the start, up to the stop once there is one.
    pub fn runtime(&self) -> Option<SignedDuration> {
        self.shared.lifecycle.lock().runtime()
    }

    /// The last route received from the solver.
    pub fn best_route(&self) -> Option<Route> {
        self.shared.lifecycle.lock().best_route.clone()
    }

    pub fn calculations(&self) -> u64 {
        self.shared.lifecycle.lock().calculations()
    }

    pub fn solver_status(&self) -> SolverStatus {
        self.shared.solver.status()
    }

    pub fn solution(&self) -> Result<Solution, SolutionError> {
        self.shared.solver.solution()
    }

    /// Opens a queue receiving every route published from now on.
    pub fn subscribe(&self) -> Subscription {
        let subscription = self.shared.subscribers.lock().subscribe();
        debug!(session = self.id(), subscriber = subscription.id(), "subscribed");
        subscription
    }

    /// Closes `subscription`. Returns `false` if it was already closed.
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        self.shared
            .subscribers
            .lock()
            .unsubscribe(subscription.id())
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.subscribers.lock().len()
    }

    pub fn metrics(&self) -> SessionMetrics {
        let lifecycle = self.shared.lifecycle.lock();

        SessionMetrics {
            session_id: self.shared.id,
            problem: self.shared.problem.name().to_owned(),
            num_points: self.shared.problem.num_points(),
            algorithm: self.shared.algorithm,
            state: lifecycle.state,
            started: lifecycle.started,
            stopped: lifecycle.stopped,
            runtime: lifecycle.runtime(),
            calculations: lifecycle.calculations(),
            best_distance: lifecycle.best_route.as_ref().map(Route::distance),
            subscribers: self.shared.subscribers.lock().len(),
        }
    }
}

impl Lifecycle {
    fn runtime(&self) -> Option<SignedDuration> {
        let started = self.started?;
        let until = self.stopped.unwrap_or_else(Timestamp::now);
        Some(until.duration_since(started))
    }

    fn calculations(&self) -> u64 {
        self.context
            .as_ref()
            .map_or(0, |context| context.calculations())
    }
}

impl Shared {
    fn supervise(&self, mut updates: Receiver<Cycle>) {
        let mut received = 0usize;

        while let Some(cycle) = updates.blocking_recv() {
            received += 1;
            let route = Route::from_cycle(&self.problem, cycle);

            let mut lifecycle = self.lifecycle.lock();
            if lifecycle.state == SessionState::Running {
                self.subscribers.lock().publish(&route);
            } else {
                trace!(session = self.id, "route received after stop, not published");
            }
            lifecycle.best_route = Some(route);
        }

        self.teardown(received);
    }

    fn teardown(&self, received: usize) {
        let mut lifecycle = self.lifecycle.lock();
        if lifecycle.state == SessionState::Running {
            lifecycle.state = SessionState::Finished;
            lifecycle.stopped = Some(Timestamp::now());
        }
        lifecycle.supervising = false;

        self.subscribers.lock().close();

        info!(
            session = self.id,
            state = %lifecycle.state,
            routes = received,
            calculations = lifecycle.calculations(),
            best_distance = lifecycle.best_route.as_ref().map(Route::distance),
            "session over"
        );

        self.supervisor_done.notify_all();
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lifecycle = self.shared.lifecycle.lock();

        write!(
            f,
            "session {} [{}] {}: {}",
            self.shared.id, self.shared.algorithm, self.shared.problem, lifecycle.state
        )?;

        if let Some(runtime) = lifecycle.runtime() {
            write!(f, ", runtime {runtime:#}")?;
        }

        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop();
    }
}
