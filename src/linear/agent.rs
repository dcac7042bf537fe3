//! Linear function-approximation agent

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::model::LinearModel;
use crate::{
    Error, Result,
    config::{InvalidMovePolicy, LearningConfig},
    maze::{Action, Grid, Snapshot},
    ports::Learner,
    reward::snapshot_reward,
    utils::build_rng,
};

/// Agent that chooses moves from a [`LinearModel`] and learns only when told to.
#[derive(Debug, Clone)]
pub struct LinearAgent {
    model: LinearModel,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl LinearAgent {
    pub fn new(config: LearningConfig) -> Result<Self> {
        Ok(Self {
            model: LinearModel::new(config)?,
            rng: build_rng(None),
            rng_seed: None,
        })
    }

    pub fn from_model(model: LinearModel) -> Self {
        Self {
            model,
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    /// Choose an action; weights are left untouched.
    ///
    /// With probability `1 − pct` a direction is drawn uniformly, redrawing
    /// until it is navigable. Otherwise the [`LinearModel::max_qsa`] action
    /// is taken.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoNavigableAction`] if the mouse is boxed in.
    pub fn select_action(&mut self, grid: &Grid, snapshot: &Snapshot, pct: f64) -> Result<Action> {
        let mouse = snapshot.mouse;
        if grid.legal_move_count(mouse) == 0 {
            return Err(Error::NoNavigableAction {
                x: mouse.x,
                y: mouse.y,
            });
        }

        let draw: f64 = self.rng.random();
        if draw > pct {
            loop {
                let action = Action::ALL[self.rng.random_range(0..Action::COUNT)];
                if grid.is_open(mouse, action) {
                    return Ok(action);
                }
            }
        }

        self.model
            .max_qsa(grid, snapshot)
            .map(|(action, _)| action)
            .ok_or(Error::NoNavigableAction {
                x: mouse.x,
                y: mouse.y,
            })
    }

    /// Score `snapshot` and apply the TD update there. Returns the reward.
    pub fn learn(&mut self, grid: &Grid, snapshot: &Snapshot) -> f64 {
        let reward = snapshot_reward(grid, snapshot);
        self.model.update(grid, snapshot, reward);
        reward
    }
}

impl Learner for LinearAgent {
    fn select_action(&mut self, grid: &Grid, snapshot: &Snapshot, pct: f64) -> Result<Action> {
        LinearAgent::select_action(self, grid, snapshot, pct)
    }

    fn observe(
        &mut self,
        grid: &Grid,
        before: &Snapshot,
        _action: Action,
        after: &Snapshot,
    ) -> Result<f64> {
        let landed = before.with_mouse(after.mouse);
        Ok(self.learn(grid, &landed))
    }

    fn name(&self) -> &str {
        "Linear Q-Learning"
    }

    fn invalid_move_policy(&self) -> InvalidMovePolicy {
        self.model.config().on_invalid_move
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
