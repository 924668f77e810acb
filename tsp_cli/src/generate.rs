use std::path::PathBuf;

use clap::Args;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::info;
use tsp_optimizer::{
    json,
    problem::{
        point::Point,
        tsp_problem::{TspProblem, TspProblemBuilder},
    },
};

#[derive(Args)]
pub struct GenerateArgs {
    /// Number of points
    #[arg(short, long)]
    points: usize,

    /// Seed of the generator, random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Points are drawn from the square [0, size) x [0, size)
    #[arg(long, default_value_t = 1000.0)]
    size: f64,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    out: Option<PathBuf>,
}

pub fn random_problem(points: usize, size: f64, seed: u64) -> Result<TspProblem, anyhow::Error> {
    let mut rng = SmallRng::seed_from_u64(seed);

    let points = (0..points)
        .map(|index| {
            Point::named(
                rng.random_range(0.0..size).round(),
                rng.random_range(0.0..size).round(),
                format!("P{index}"),
            )
        })
        .collect::<Vec<_>>();

    let mut builder = TspProblemBuilder::default();
    builder
        .set_name(format!("random-{}-{seed}", points.len()))
        .set_description(format!("{} random points, seed {seed}", points.len()))
        .set_points(points);

    Ok(builder.build()?)
}

pub fn run(args: GenerateArgs) -> Result<(), anyhow::Error> {
    if args.size <= 0.0 {
        anyhow::bail!("size must be positive, got {}", args.size);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let problem = random_problem(args.points, args.size, seed)?;
    let content = json::to_json_string(&problem)?;

    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }

            std::fs::write(&out, content)?;
            info!("Wrote {problem} to {:?}", out);
        }
        None => println!("{content}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_problem_is_reproducible() {
        let first = random_problem(6, 100.0, 42).unwrap();
        let second = random_problem(6, 100.0, 42).unwrap();

        assert_eq!(first.name(), "random-6-42");
        assert_eq!(first.points(), second.points());
        assert!(
            first
                .points()
                .iter()
                .all(|point| (0.0..=100.0).contains(&point.x()) && (0.0..=100.0).contains(&point.y()))
        );
    }

    #[test]
    fn test_run_writes_loadable_problem() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("generated/problem.json");

        run(GenerateArgs {
            points: 7,
            seed: Some(3),
            size: 50.0,
            out: Some(out.clone()),
        })
        .unwrap();

        let problem = json::load_problem(&out).unwrap();
        assert_eq!(problem.num_points(), 7);
        assert_eq!(problem.points()[0].name(), Some("P0"));
    }
}
