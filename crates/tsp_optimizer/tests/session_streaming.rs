use std::{env, path::PathBuf, sync::Arc};

use jiff::SignedDuration;
use tsp_optimizer::{
    json,
    problem::tsp_problem::TspProblem,
    session::{
        session::Session, session_manager::SessionManager, session_params::SessionParams,
        session_state::SessionState,
    },
    solver::solution::SolverStatus,
};

fn load_fixture(name: &str) -> Arc<TspProblem> {
    let path = env::current_dir()
        .unwrap()
        .join(PathBuf::from("tests/fixtures/problems").join(name));

    Arc::new(json::load_problem(&path).unwrap())
}

#[test]
fn held_karp_solves_germany() {
    let problem = load_fixture("germany13.json");
    let session = Session::new(1, "held-karp", Arc::clone(&problem)).unwrap();
    let mut subscription = session.subscribe();

    session.start();
    let route = subscription.blocking_recv().unwrap();
    assert!(subscription.blocking_recv().is_none());
    session.wait();

    assert_eq!(session.state(), SessionState::Finished);
    assert_eq!(route.len(), 13);
    assert_eq!(route.points()[0].name(), Some("Berlin"));
    assert!(route.cycle().is_tour_of(13));

    // Every other tour is at least as long, the one in file order included.
    let in_file_order = problem
        .matrix()
        .cycle_distance(&(0..13).collect::<Vec<_>>());
    assert!(route.distance() <= in_file_order);
    assert!(route.distance() > 1_000_000.0 && route.distance() < 5_000_000.0);
}

#[test]
fn stopped_brute_force_is_never_better_than_held_karp() {
    let problem = load_fixture("germany13.json");

    let exact = Session::new(1, "heldkarp", Arc::clone(&problem)).unwrap();
    exact.start();
    exact.wait();
    let optimal = exact.best_route().unwrap().distance();

    let search = Session::new(2, "bruteforce", problem).unwrap();
    let mut subscription = search.subscribe();
    search.start();

    assert!(!search.wait_timeout(SignedDuration::from_millis(50)));
    search.stop();
    search.wait();

    let mut received = 0;
    while let Some(route) = subscription.blocking_recv() {
        received += 1;
        assert!(route.distance() >= optimal - 1e-6);
    }

    assert!(received > 0);
    assert_eq!(search.state(), SessionState::StoppedByUser);
    assert_eq!(search.solver_status(), SolverStatus::Cancelled);
    assert!(search.best_route().unwrap().distance() >= optimal - 1e-6);
}

#[test]
fn idle_subscriber_does_not_stall_the_solver() {
    let problem = load_fixture("workpiece.json");
    let params = SessionParams {
        subscriber_capacity: 1,
        ..SessionParams::default()
    };

    let manager = SessionManager::new(params);
    let session = manager.create("bruteforce", problem).unwrap();
    let mut idle = session.subscribe();
    let mut reader = session.subscribe();

    manager.start(session.id());

    // The idle subscriber never reads, the solver keeps improving regardless.
    let first = reader.blocking_recv().unwrap();
    let second = reader.blocking_recv().unwrap();
    assert!(second.distance() < first.distance());

    assert!(manager.stop(session.id()));
    session.wait();

    assert_eq!(idle.len(), 1);
    assert_eq!(idle.blocking_recv(), Some(first));
    assert!(idle.blocking_recv().is_none());

    let metrics = manager.metrics(session.id()).unwrap();
    assert_eq!(metrics.state, SessionState::StoppedByUser);
    assert_eq!(metrics.num_points, 30);
    assert!(metrics.best_distance.is_some());
}
