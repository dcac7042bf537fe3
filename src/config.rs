//! Learning hyperparameters shared by the tabular and linear learners.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default step size α.
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

/// Default discount factor γ.
pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.5;

/// Delta applied by the tabular update rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabularUpdate {
    /// `Q(s,a) ← Q(s,a) + α[r - Q(s,a)]`
    ///
    /// The continuation value of the resulting state is computed but not
    /// applied.
    #[default]
    RewardOnly,
    /// `Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]`
    Bellman,
}

/// What to do when a transition crosses a wall or leaves the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidMovePolicy {
    /// Log a warning and keep training.
    #[default]
    Warn,
    /// Abort with [`Error::InvalidMove`].
    Fail,
}

/// Configuration for the update rules and policies.
///
/// # Examples
///
/// ```
/// use catmouse::{LearningConfig, TabularUpdate};
///
/// let config = LearningConfig::new()
///     .with_learning_rate(0.1)
///     .with_discount_factor(0.9)
///     .with_tabular_update(TabularUpdate::Bellman);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearningConfig {
    /// Step size α
    pub learning_rate: f64,
    /// Discount factor γ applied to the best continuation value
    pub discount_factor: f64,
    /// Tabular update variant
    pub tabular_update: TabularUpdate,
    /// Handling of wall crossings and off-map transitions
    pub on_invalid_move: InvalidMovePolicy,
}

impl LearningConfig {
    pub fn new() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            discount_factor: DEFAULT_DISCOUNT_FACTOR,
            tabular_update: TabularUpdate::default(),
            on_invalid_move: InvalidMovePolicy::default(),
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_tabular_update(mut self, update: TabularUpdate) -> Self {
        self.tabular_update = update;
        self
    }

    pub fn with_invalid_move_policy(mut self, policy: InvalidMovePolicy) -> Self {
        self.on_invalid_move = policy;
        self
    }

    /// Check that α and γ lie in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || !(0.0..=1.0).contains(&self.learning_rate) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "learning rate must be in [0, 1], got {}",
                    self.learning_rate
                ),
            });
        }
        if !self.discount_factor.is_finite() || !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "discount factor must be in [0, 1], got {}",
                    self.discount_factor
                ),
            });
        }
        Ok(())
    }
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LearningConfig::default();
        assert_eq!(config.learning_rate, 0.01);
        assert_eq!(config.discount_factor, 0.5);
        assert_eq!(config.tabular_update, TabularUpdate::RewardOnly);
        assert_eq!(config.on_invalid_move, InvalidMovePolicy::Warn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = LearningConfig::new().with_learning_rate(1.5);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));

        let config = LearningConfig::new().with_discount_factor(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_names() {
        let config = LearningConfig::new()
            .with_tabular_update(TabularUpdate::Bellman)
            .with_invalid_move_policy(InvalidMovePolicy::Fail);
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["tabular_update"], "bellman");
        assert_eq!(json["on_invalid_move"], "fail");
    }
}
