use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::Args;
use tracing::info;
use tsp_optimizer::{
    json,
    problem::{
        distance_method::DistanceMethod,
        tsp_problem::{TspProblem, TspProblemBuilder},
    },
    session::session::Session,
};

use crate::parsers;

#[derive(Args)]
pub struct SolveArgs {
    /// The JSON problem to solve
    #[arg(short, long)]
    problem: PathBuf,

    /// bruteforce or heldkarp
    #[arg(short, long, default_value = "heldkarp")]
    algorithm: String,

    /// Stop the search after this long (e.g., "30s", "5m", "PT1H30M")
    #[arg(short, long, value_parser = parsers::parse_duration)]
    timeout: Option<jiff::SignedDuration>,

    /// Overrides the distance method of the problem file
    #[arg(long, value_parser = parsers::parse_distance_method)]
    distance: Option<DistanceMethod>,
}

/// Loads `path`, recomputing its distances with `distance` when given.
pub fn load_problem(
    path: &Path,
    distance: Option<DistanceMethod>,
) -> Result<TspProblem, anyhow::Error> {
    let problem = json::load_problem(path)?;

    let Some(distance_method) = distance.filter(|&method| method != problem.distance_method())
    else {
        return Ok(problem);
    };

    let mut builder = TspProblemBuilder::default();
    builder
        .set_name(problem.name())
        .set_points(problem.points().to_vec())
        .set_distance_method(distance_method);
    if let Some(description) = problem.description() {
        builder.set_description(description);
    }

    Ok(builder.build()?)
}

pub async fn run(args: SolveArgs) -> Result<(), anyhow::Error> {
    let problem = Arc::new(load_problem(&args.problem, args.distance)?);
    info!("Solving {problem} with {}", args.algorithm);

    let session = Arc::new(Session::new(1, &args.algorithm, problem)?);
    let mut subscription = session.subscribe();
    session.start();

    if let Some(timeout) = args.timeout {
        let timer_session = Arc::clone(&session);
        tokio::spawn(async move {
            tokio::time::sleep(timeout.unsigned_abs()).await;
            info!("Timeout of {timeout:#} reached");
            timer_session.stop();
        });
    }

    let mut received = 0;
    while let Some(route) = subscription.recv().await {
        received += 1;
        info!("Route #{received}: {:.2}", route.distance());
    }

    let waiting_session = Arc::clone(&session);
    tokio::task::spawn_blocking(move || waiting_session.wait()).await?;

    match session.best_route() {
        Some(route) => {
            println!("{route}");
            println!("Distance: {:.2}", route.distance());
        }
        None => println!("No route found"),
    }

    if let Some(runtime) = session.runtime() {
        println!("Elapsed: {runtime:#}");
    }

    println!("{}", serde_json::to_string_pretty(&session.metrics())?);

    Ok(())
}
