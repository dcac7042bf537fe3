//! Training pipeline for maze learners

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    config::InvalidMovePolicy,
    maze::{EpisodeOutcome, EpisodeSummary, Game, Grid},
    ports::{Learner, Observer},
    reward::snapshot_reward,
    utils::build_rng,
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Step limit per episode
    pub max_steps: usize,

    /// Fraction of moves that exploit current estimates
    pub pct: f64,

    /// Probability that a cat moves towards the mouse
    pub cat_smartness: f64,

    /// Cats placed at the start of each episode
    pub num_cats: usize,

    /// Cheeses placed at the start of each episode
    pub num_cheeses: usize,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 500,
            max_steps: 200,
            pct: 0.9,
            cat_smartness: 0.8,
            num_cats: 1,
            num_cheeses: 1,
            seed: None,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.pct) {
            return Err(Error::InvalidConfiguration {
                message: format!("pct must be in [0, 1], got {}", self.pct),
            });
        }
        if !(0.0..=1.0).contains(&self.cat_smartness) {
            return Err(Error::InvalidConfiguration {
                message: format!("cat smartness must be in [0, 1], got {}", self.cat_smartness),
            });
        }
        if self.num_cheeses == 0 {
            return Err(Error::InvalidConfiguration {
                message: "at least one cheese is required".to_string(),
            });
        }
        if self.max_steps == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max steps must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Result of a training or evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub total_episodes: usize,

    /// Episodes where the mouse ate every cheese
    pub fed: usize,

    /// Episodes where a cat caught the mouse
    pub caught: usize,

    /// Episodes that hit the step limit
    pub timed_out: usize,

    pub fed_rate: f64,
    pub caught_rate: f64,
    pub timeout_rate: f64,

    /// Mean moves per episode
    pub mean_steps: f64,

    /// Mean summed reward per episode
    pub mean_return: f64,
}

impl TrainingResult {
    /// Aggregate episode summaries
    pub fn from_summaries(summaries: &[EpisodeSummary]) -> Self {
        let total = summaries.len();
        let count = |outcome| summaries.iter().filter(|s| s.outcome == outcome).count();
        let fed = count(EpisodeOutcome::AteAllCheese);
        let caught = count(EpisodeOutcome::Caught);
        let timed_out = count(EpisodeOutcome::TimedOut);

        let mean = |sum: f64| if total > 0 { sum / total as f64 } else { 0.0 };

        Self {
            total_episodes: total,
            fed,
            caught,
            timed_out,
            fed_rate: mean(fed as f64),
            caught_rate: mean(caught as f64),
            timeout_rate: mean(timed_out as f64),
            mean_steps: mean(summaries.iter().map(|s| s.steps as f64).sum()),
            mean_return: mean(summaries.iter().map(|s| s.total_reward).sum()),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Drives episodes for one learner on a fixed grid
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
    rng: StdRng,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        let rng = build_rng(config.seed);
        Ok(Self {
            config,
            observers: Vec::new(),
            rng,
        })
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train `learner` for the configured number of episodes.
    pub fn run(&mut self, grid: &Grid, learner: &mut dyn Learner) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            learner.set_rng_seed(seed.wrapping_add(1))?;
        }

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut summaries = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            let summary = self.play_episode(episode, grid, learner, self.config.pct, true)?;
            log::debug!(
                "episode {episode}: {:?} after {} steps, return {:.2}",
                summary.outcome,
                summary.steps,
                summary.total_reward
            );

            for observer in &mut self.observers {
                observer.on_episode_end(episode, &summary)?;
            }
            summaries.push(summary);
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::from_summaries(&summaries))
    }

    /// Play `episodes` greedy episodes (pct = 1) without learning or observers.
    pub fn evaluate(
        &mut self,
        grid: &Grid,
        learner: &mut dyn Learner,
        episodes: usize,
    ) -> Result<TrainingResult> {
        let mut summaries = Vec::with_capacity(episodes);
        for episode in 0..episodes {
            summaries.push(self.play_episode(episode, grid, learner, 1.0, false)?);
        }
        Ok(TrainingResult::from_summaries(&summaries))
    }

    fn play_episode(
        &mut self,
        episode: usize,
        grid: &Grid,
        learner: &mut dyn Learner,
        pct: f64,
        learn: bool,
    ) -> Result<EpisodeSummary> {
        let start = Game::random_start(
            grid,
            self.config.num_cats,
            self.config.num_cheeses,
            &mut self.rng,
        )?;
        let mut game = Game::new(grid, start, self.config.cat_smartness);

        if learn {
            for observer in &mut self.observers {
                observer.on_episode_start(episode)?;
            }
        }

        let mut total_reward = 0.0;
        let mut outcome = EpisodeOutcome::TimedOut;
        for step in 0..self.config.max_steps {
            let before = *game.snapshot();
            let action = learner.select_action(grid, &before, pct)?;
            let report = game.step(action, &mut self.rng);
            if let Some(anomaly) = report.anomaly {
                if learner.invalid_move_policy() == InvalidMovePolicy::Fail {
                    return Err(Error::InvalidMove {
                        action,
                        cell: grid.cell_index(before.mouse),
                        anomaly,
                    });
                }
            }

            let reward = if learn {
                learner.observe(grid, &before, action, game.snapshot())?
            } else {
                snapshot_reward(grid, &before.with_mouse(game.snapshot().mouse))
            };
            total_reward += reward;

            if learn {
                for observer in &mut self.observers {
                    observer.on_step(episode, step, &before, action, reward)?;
                }
            }

            if let Some(done) = report.outcome {
                outcome = done;
                break;
            }
        }

        Ok(EpisodeSummary {
            outcome,
            steps: game.steps(),
            total_reward,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::baseline::RandomLearner;

    #[test]
    fn test_training_pipeline() {
        let config = TrainingConfig {
            episodes: 10,
            max_steps: 30,
            seed: Some(42),
            ..TrainingConfig::default()
        };
        let grid = Grid::open(4).unwrap();

        let mut pipeline = TrainingPipeline::new(config).unwrap();
        let mut agent = RandomLearner::new("Agent".to_string());

        let result = pipeline.run(&grid, &mut agent).unwrap();

        assert_eq!(result.total_episodes, 10);
        assert_eq!(result.fed + result.caught + result.timed_out, 10);
        assert!(result.mean_steps <= 30.0);
    }

    /// Every edge of a 2x2 grid is closed except those leading off the map.
    fn border_exits_only() -> Grid {
        use crate::maze::Action::{East, North, South, West};
        let mut rows = vec![[0.0; 4]; 4];
        let exits = [
            (0, [North, West]),
            (1, [North, East]),
            (2, [South, West]),
            (3, [South, East]),
        ];
        for (cell, exits) in exits {
            for action in exits {
                rows[cell][action.index()] = 1.0;
            }
        }
        Grid::from_rows(2, rows).unwrap()
    }

    #[test]
    fn test_fail_policy_aborts_on_leaving_the_map() {
        use crate::{
            config::LearningConfig, linear::LinearAgent, maze::MoveAnomaly,
            q_learning::TabularAgent,
        };

        let grid = border_exits_only();
        let config = TrainingConfig {
            episodes: 3,
            max_steps: 5,
            seed: Some(8),
            ..TrainingConfig::default()
        };
        let fail = LearningConfig::new().with_invalid_move_policy(InvalidMovePolicy::Fail);

        let mut tabular = TabularAgent::new(&grid, fail).unwrap();
        let err = TrainingPipeline::new(config.clone())
            .unwrap()
            .run(&grid, &mut tabular)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidMove {
                anomaly: MoveAnomaly::OutOfBounds,
                ..
            }
        ));

        let mut linear = LinearAgent::new(fail).unwrap();
        let err = TrainingPipeline::new(config)
            .unwrap()
            .run(&grid, &mut linear)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidMove { .. }));
    }

    #[test]
    fn test_warn_policy_keeps_training_in_place() {
        use crate::{config::LearningConfig, q_learning::TabularAgent};

        let grid = border_exits_only();
        let config = TrainingConfig {
            episodes: 3,
            max_steps: 5,
            seed: Some(8),
            ..TrainingConfig::default()
        };
        let mut agent = TabularAgent::new(&grid, LearningConfig::default()).unwrap();
        let result = TrainingPipeline::new(config)
            .unwrap()
            .run(&grid, &mut agent)
            .unwrap();

        // Nobody can move, so every episode runs out the clock.
        assert_eq!(result.timed_out, 3);
    }

    #[test]
    fn test_random_learner_scores_landing_cell() {
        use crate::maze::{Entities, Position, Snapshot};

        let grid = Grid::open(3).unwrap();
        let before = Snapshot::new(
            Position::new(0, 0),
            Entities::single(Position::new(2, 2)),
            Entities::single(Position::new(1, 0)),
        );
        // Cheese eaten and cat moved after the mouse stepped east.
        let after = Snapshot::new(
            Position::new(1, 0),
            Entities::single(Position::new(2, 1)),
            Entities::new(),
        );
        let mut learner = RandomLearner::with_seed("random".to_string(), 0);
        let reward = learner
            .observe(&grid, &before, crate::maze::Action::East, &after)
            .unwrap();
        assert_eq!(reward, snapshot_reward(&grid, &before.with_mouse(after.mouse)));
        assert_ne!(reward, snapshot_reward(&grid, &after));
    }

    #[test]
    fn test_invalid_pct_rejected() {
        let config = TrainingConfig {
            pct: 1.5,
            ..TrainingConfig::default()
        };
        assert!(TrainingPipeline::new(config).is_err());
    }

    #[test]
    fn test_result_rates() {
        let summaries = [
            EpisodeSummary {
                outcome: EpisodeOutcome::AteAllCheese,
                steps: 4,
                total_reward: 10.0,
            },
            EpisodeSummary {
                outcome: EpisodeOutcome::Caught,
                steps: 2,
                total_reward: -20.0,
            },
        ];
        let result = TrainingResult::from_summaries(&summaries);
        assert_eq!(result.fed, 1);
        assert_eq!(result.caught_rate, 0.5);
        assert_eq!(result.mean_steps, 3.0);
        assert_eq!(result.mean_return, -5.0);

        let empty = TrainingResult::from_summaries(&[]);
        assert_eq!(empty.fed_rate, 0.0);
    }
}
