use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Args;
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tsp_optimizer::{
    json,
    session::{error::SessionError, metrics::SessionMetrics, session_manager::SessionManager},
};

use crate::parsers;

#[derive(Args)]
pub struct SolveDatasetArgs {
    /// A JSON problem, or a folder searched recursively for them
    #[arg(short, long)]
    dataset: PathBuf,

    /// bruteforce or heldkarp
    #[arg(short, long, default_value = "heldkarp")]
    algorithm: String,

    /// Time limit for each problem
    #[arg(short, long, value_parser = parsers::parse_duration, default_value = "5s")]
    timeout: jiff::SignedDuration,
}

pub fn run(args: SolveDatasetArgs) -> Result<(), anyhow::Error> {
    info!("Solving dataset {:?}", args.dataset);
    let problems = json::load_problems(&args.dataset)?;
    let manager = SessionManager::default();

    let mut rows = Vec::with_capacity(problems.len());

    for problem in problems {
        let name = problem.name().to_owned();

        let session = match manager.create(&args.algorithm, Arc::new(problem)) {
            Ok(session) => session,
            Err(err @ SessionError::ProblemTooLarge { .. }) => {
                warn!("Skipping {name}: {err}");
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(200));
        bar.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} ({elapsed})")?);
        bar.set_message(name);

        manager.start(session.id());
        if !session.wait_timeout(args.timeout) {
            manager.stop(session.id());
            session.wait();
        }

        bar.finish_and_clear();

        if let Some(metrics) = manager.remove(session.id()).map(|session| session.metrics()) {
            info!("{}", session);
            rows.push(metrics);
        }
    }

    println!("{}", summary_table(&rows));

    Ok(())
}

fn summary_table(rows: &[SessionMetrics]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Problem",
        "Points",
        "Algorithm",
        "State",
        "Distance",
        "Calculations",
        "Runtime",
    ]);

    for metrics in rows {
        table.add_row(vec![
            metrics.problem.clone(),
            metrics.num_points.to_string(),
            metrics.algorithm.to_string(),
            metrics.state.to_string(),
            metrics
                .best_distance
                .map_or_else(|| String::from("-"), |distance| format!("{distance:.2}")),
            metrics.calculations.to_string(),
            metrics
                .runtime
                .map_or_else(|| String::from("-"), |runtime| format!("{runtime:#}")),
        ]);
    }

    table
}
