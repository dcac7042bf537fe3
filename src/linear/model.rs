//! Linear value model and its TD update

use super::features::{FeatureVector, NUM_FEATURES, evaluate_features, snapshot_features};
use crate::{
    Result,
    config::LearningConfig,
    maze::{Action, Entities, Grid, Position, Snapshot},
};

/// Estimated value of a state: `weights · features`.
pub fn qsa(weights: &FeatureVector, features: &FeatureVector) -> f64 {
    weights.iter().zip(features).map(|(w, f)| w * f).sum()
}

/// Best successor over the navigable moves from `mouse`.
///
/// Each open move is scored by the value of the features at the cell
/// [`Grid::step`] lands on, so an open edge leading off the map scores the
/// mouse's own cell. Ties keep the lowest-indexed action. Returns `None` only
/// when every edge of the cell is closed.
pub fn max_qsa(
    grid: &Grid,
    weights: &FeatureVector,
    mouse: Position,
    cats: &Entities,
    cheeses: &Entities,
) -> Option<(Action, f64)> {
    let mut best: Option<(Action, f64)> = None;
    for action in grid.legal_actions(mouse) {
        let next = grid.step(mouse, action).position;
        let value = qsa(weights, &evaluate_features(grid, next, cats, cheeses));
        if best.is_none_or(|(_, best_value)| value > best_value) {
            best = Some((action, value));
        }
    }
    best
}

/// Weight vector plus the hyperparameters used to update it.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    weights: FeatureVector,
    config: LearningConfig,
}

impl LinearModel {
    /// Zero weights.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if `config` fails validation.
    pub fn new(config: LearningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            weights: [0.0; NUM_FEATURES],
            config,
        })
    }

    pub fn with_weights(mut self, weights: FeatureVector) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> &FeatureVector {
        &self.weights
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    /// Value of the state at `snapshot`
    pub fn value(&self, grid: &Grid, snapshot: &Snapshot) -> f64 {
        qsa(&self.weights, &snapshot_features(grid, snapshot))
    }

    pub fn max_qsa(&self, grid: &Grid, snapshot: &Snapshot) -> Option<(Action, f64)> {
        max_qsa(
            grid,
            &self.weights,
            snapshot.mouse,
            &snapshot.cats,
            &snapshot.cheeses,
        )
    }

    /// Gradient TD update after the mouse reached `snapshot` and earned `reward`.
    ///
    /// For each weight in order,
    /// `w[i] += α (r + γ Q(post) − Q(pre)) f_pre[i]`, where `pre` is the
    /// snapshot's features and `post` the features of its best successor.
    /// Both values are recomputed with the weights as updated so far. With no
    /// successor the continuation value is 0.
    pub fn update(&mut self, grid: &Grid, snapshot: &Snapshot, reward: f64) {
        let pre = snapshot_features(grid, snapshot);
        let post = self
            .max_qsa(grid, snapshot)
            .map(|(action, _)| grid.step(snapshot.mouse, action).position)
            .map(|next| evaluate_features(grid, next, &snapshot.cats, &snapshot.cheeses));

        let alpha = self.config.learning_rate;
        let gamma = self.config.discount_factor;
        for i in 0..NUM_FEATURES {
            let q_pre = qsa(&self.weights, &pre);
            let q_post = post.as_ref().map_or(0.0, |f| qsa(&self.weights, f));
            self.weights[i] += alpha * (reward + gamma * q_post - q_pre) * pre[i];
        }
    }
}
