//! Train command - Train a maze learner (tabular or linear Q-learning)

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::output::{print_kv, print_result, print_section},
    config::{InvalidMovePolicy, LearningConfig, TabularUpdate},
    linear::LinearAgent,
    maze::Grid,
    pipeline::{
        JsonlObserver, Learner, ProgressObserver, RandomLearner, TrainingConfig, TrainingPipeline,
        TrainingResult,
    },
    q_learning::TabularAgent,
};

#[derive(Debug, Clone, Copy, ValueEnum, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LearnerType {
    /// Table of Q-values indexed by (mouse, cat, cheese) cells
    Tabular,
    /// Linear function approximation over distance features
    Linear,
    /// Uniformly random navigable moves, never learns
    Random,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    learner: LearnerType,
    grid_size: usize,
    training: TrainingResult,
    evaluation: Option<TrainingResult>,
    learning: LearningConfig,
    config: TrainingConfig,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Trailing separator or no file name means a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train a learner", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Type of learner to train
    #[arg(value_enum)]
    pub learner: LearnerType,

    /// Side length of the default open grid
    #[arg(long, default_value_t = 5)]
    pub size: usize,

    /// JSON grid file to use instead of the open grid
    #[arg(long, conflicts_with = "size")]
    pub grid: Option<PathBuf>,

    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 500)]
    pub episodes: usize,

    /// Step limit per episode
    #[arg(long, default_value_t = 200)]
    pub max_steps: usize,

    /// Fraction of moves that exploit current estimates (0.0-1.0)
    #[arg(long, default_value_t = 0.9)]
    pub pct: f64,

    /// Number of cats
    #[arg(long, default_value_t = 1)]
    pub cats: usize,

    /// Number of cheeses
    #[arg(long, default_value_t = 1)]
    pub cheeses: usize,

    /// Probability that a cat steps towards the mouse
    #[arg(long, default_value_t = 0.8)]
    pub cat_smartness: f64,

    /// Learning rate
    #[arg(long, default_value_t = crate::config::DEFAULT_LEARNING_RATE)]
    pub alpha: f64,

    /// Discount factor
    #[arg(long, default_value_t = crate::config::DEFAULT_DISCOUNT_FACTOR)]
    pub gamma: f64,

    /// Include the discounted successor value in tabular updates
    #[arg(long, default_value_t = false)]
    pub bellman: bool,

    /// Abort on wall crossings instead of logging them
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional file for per-episode JSONL records
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Greedy evaluation episodes to run after training
    #[arg(long, default_value_t = 0)]
    pub eval_episodes: usize,

    /// Show progress bar
    #[arg(long, default_value_t = false)]
    pub progress: bool,
}

impl TrainArgs {
    fn learning_config(&self) -> LearningConfig {
        LearningConfig::new()
            .with_learning_rate(self.alpha)
            .with_discount_factor(self.gamma)
            .with_tabular_update(if self.bellman {
                TabularUpdate::Bellman
            } else {
                TabularUpdate::RewardOnly
            })
            .with_invalid_move_policy(if self.fail_fast {
                InvalidMovePolicy::Fail
            } else {
                InvalidMovePolicy::Warn
            })
    }

    fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            episodes: self.episodes,
            max_steps: self.max_steps,
            pct: self.pct,
            cat_smartness: self.cat_smartness,
            num_cats: self.cats,
            num_cheeses: self.cheeses,
            seed: self.seed,
        }
    }

    fn load_grid(&self) -> Result<Grid> {
        match &self.grid {
            Some(path) => Grid::load(path)
                .with_context(|| format!("Failed to load grid from {}", path.display())),
            None => Grid::open(self.size).context("Invalid grid size"),
        }
    }
}

fn build_learner(
    kind: LearnerType,
    grid: &Grid,
    learning: LearningConfig,
    seed: Option<u64>,
) -> Result<Box<dyn Learner>> {
    let learner: Box<dyn Learner> = match kind {
        LearnerType::Tabular => {
            let agent = TabularAgent::new(grid, learning)?;
            Box::new(match seed {
                Some(seed) => agent.with_seed(seed),
                None => agent,
            })
        }
        LearnerType::Linear => {
            let agent = LinearAgent::new(learning)?;
            Box::new(match seed {
                Some(seed) => agent.with_seed(seed),
                None => agent,
            })
        }
        LearnerType::Random => Box::new(match seed {
            Some(seed) => RandomLearner::with_seed("Random".to_string(), seed),
            None => RandomLearner::new("Random".to_string()),
        }),
    };
    Ok(learner)
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let grid = args.load_grid()?;
    let learning = args.learning_config();
    let config = args.training_config();

    let summary_path = args.summary.as_deref().map(sanitize_summary_path);

    let mut learner = build_learner(args.learner, &grid, learning, args.seed)?;

    let mut pipeline = TrainingPipeline::new(config.clone())
        .map_err(|e| anyhow!("Invalid training configuration: {e}"))?;
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        let observer = JsonlObserver::new(path).with_context(|| {
            format!("Failed to create observations file {}", path.display())
        })?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    print_section(&format!("Training {}", learner.name()));
    print_kv("Grid", &format!("{0}x{0}", grid.size()));
    print_kv("Cats / cheeses", &format!("{} / {}", args.cats, args.cheeses));
    print_kv("Episodes", &args.episodes.to_string());

    let training = pipeline.run(&grid, learner.as_mut())?;
    print_section("Training complete");
    print_result(&training);

    let evaluation = if args.eval_episodes > 0 {
        let result = pipeline.evaluate(&grid, learner.as_mut(), args.eval_episodes)?;
        print_section("Greedy evaluation");
        print_result(&result);
        Some(result)
    } else {
        None
    };

    if let Some(path) = summary_path {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let summary = TrainingSummaryFile {
            learner: args.learner,
            grid_size: grid.size(),
            training,
            evaluation,
            learning,
            config,
        };
        let file = File::create(&path)
            .with_context(|| format!("Failed to create summary file {}", path.display()))?;
        to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}
