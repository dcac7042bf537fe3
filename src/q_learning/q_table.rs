//! Dense Q-table for tabular learning

use super::state::StateIndex;
use crate::{
    Error, Result,
    config::{LearningConfig, TabularUpdate},
    maze::Action,
};

/// Q-table mapping (state, action) pairs to Q-values
///
/// Stored as one contiguous row of [`Action::COUNT`] values per state. The
/// table is sized at creation and never resized; every access is bounds
/// checked against the state count.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    num_states: usize,
    values: Vec<f64>,
}

impl QTable {
    /// Create a table of `num_states` rows, every entry set to `q_init`.
    pub fn new(num_states: usize, q_init: f64) -> Self {
        Self {
            num_states,
            values: vec![q_init; num_states * Action::COUNT],
        }
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// Total number of entries (`num_states × 4`)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn row_start(&self, state: StateIndex) -> Result<usize> {
        if state.get() >= self.num_states {
            return Err(Error::StateOutOfRange {
                state: state.get(),
                num_states: self.num_states,
            });
        }
        Ok(state.get() * Action::COUNT)
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: StateIndex, action: Action) -> Result<f64> {
        Ok(self.values[self.row_start(state)? + action.index()])
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: StateIndex, action: Action, value: f64) -> Result<()> {
        let idx = self.row_start(state)? + action.index();
        self.values[idx] = value;
        Ok(())
    }

    /// All four action values of a state, in action order
    pub fn row(&self, state: StateIndex) -> Result<&[f64]> {
        let start = self.row_start(state)?;
        Ok(&self.values[start..start + Action::COUNT])
    }

    /// Best action and value over all four actions.
    ///
    /// Action 0 is the initial candidate; a later action replaces it only
    /// with a strictly greater value.
    pub fn max_q(&self, state: StateIndex) -> Result<(Action, f64)> {
        let row = self.row(state)?;
        let mut best = (Action::North, row[0]);
        for action in &Action::ALL[1..] {
            let value = row[action.index()];
            if value > best.1 {
                best = (*action, value);
            }
        }
        Ok(best)
    }

    /// Greedy action among `legal_actions`; the first strictly greatest wins.
    ///
    /// Returns `None` if `legal_actions` is empty.
    pub fn greedy_action(
        &self,
        state: StateIndex,
        legal_actions: &[Action],
    ) -> Result<Option<Action>> {
        let row = self.row(state)?;
        let mut best: Option<(Action, f64)> = None;
        for &action in legal_actions {
            let value = row[action.index()];
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((action, value)),
            }
        }
        Ok(best.map(|(action, _)| action))
    }

    /// Q-learning update toward the one-step target.
    ///
    /// With [`TabularUpdate::RewardOnly`]:
    /// Q(s,a) ← Q(s,a) + α[r - Q(s,a)]
    ///
    /// With [`TabularUpdate::Bellman`]:
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    pub fn q_learning_update(
        &mut self,
        state: StateIndex,
        action: Action,
        reward: f64,
        next_state: StateIndex,
        config: &LearningConfig,
    ) -> Result<()> {
        let current_q = self.get(state, action)?;
        let (_, max_next_q) = self.max_q(next_state)?;
        let td_target = match config.tabular_update {
            TabularUpdate::RewardOnly => reward,
            TabularUpdate::Bellman => reward + config.discount_factor * max_next_q,
        };
        let new_q = current_q + config.learning_rate * (td_target - current_q);
        self.set(state, action, new_q)
    }

    /// Reset all Q-values to `q_init`
    pub fn reset(&mut self, q_init: f64) {
        self.values.fill(q_init);
    }
}
