use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{generate::GenerateArgs, solve::SolveArgs, solve_dataset::SolveDatasetArgs};

mod generate;
mod parsers;
mod solve;
mod solve_dataset;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single problem, printing every improving route
    Solve {
        #[command(flatten)]
        args: SolveArgs,
    },
    /// Solve every problem of a folder and print a summary table
    SolveDataset {
        #[command(flatten)]
        args: SolveDatasetArgs,
    },
    /// Generate a random problem
    #[command(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Solve { args }) => solve::run(args).await?,
        Some(Commands::SolveDataset { args }) => solve_dataset::run(args)?,
        Some(Commands::Generate { args }) => generate::run(args)?,
        None => {}
    }

    Ok(())
}
