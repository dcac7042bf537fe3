//! catmouse CLI - Q-learning mouse in a maze with cats and cheese
//!
//! Logging goes through `flexi_logger`; set `RUST_LOG` (e.g. `RUST_LOG=debug`)
//! to see per-episode summaries or silence invalid-move warnings.

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "catmouse")]
#[command(version, about = "Q-learning for a mouse chasing cheese and dodging cats", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a learner (tabular or linear Q-learning)
    Train(Box<catmouse::cli::commands::train::TrainArgs>),
}

fn main() -> Result<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")?.start()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => catmouse::cli::commands::train::execute(*args),
    }
}
