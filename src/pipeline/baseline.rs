//! Non-learning baseline agents

use rand::{SeedableRng, random, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    maze::{Action, Grid, Snapshot},
    ports::Learner,
};

/// Random learner - picks a navigable move uniformly and never learns
pub struct RandomLearner {
    name: String,
    rng: StdRng,
}

impl RandomLearner {
    /// Create a new random learner
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random learner with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Learner for RandomLearner {
    fn select_action(&mut self, grid: &Grid, snapshot: &Snapshot, _pct: f64) -> Result<Action> {
        let mouse = snapshot.mouse;
        grid.legal_actions(mouse)
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoNavigableAction {
                x: mouse.x,
                y: mouse.y,
            })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
