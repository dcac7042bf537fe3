//! Learner port - abstraction over the maze-playing agents

use crate::{
    Result,
    config::InvalidMovePolicy,
    maze::{Action, Grid, Snapshot},
    reward::snapshot_reward,
};

/// Learner trait - unified interface for tabular, linear and baseline agents
///
/// The training loop calls [`Learner::select_action`] before each
/// environment step and [`Learner::observe`] after it.
///
/// # Examples
///
/// ```no_run
/// use catmouse::{Grid, ports::Learner};
///
/// fn greedy_move<L: Learner>(agent: &mut L, grid: &Grid, snap: &catmouse::Snapshot) {
///     let _ = agent.select_action(grid, snap, 1.0);
/// }
/// ```
pub trait Learner: Send {
    /// Choose the mouse's next move.
    ///
    /// `pct` is the fraction of decisions that exploit the current estimates;
    /// the rest explore uniformly among navigable moves.
    ///
    /// # Errors
    ///
    /// Returns an error if no navigable move exists or the state cannot be encoded.
    fn select_action(&mut self, grid: &Grid, snapshot: &Snapshot, pct: f64) -> Result<Action>;

    /// Learn from one environment step and return the reward credited.
    ///
    /// # Default Implementation
    ///
    /// Scores the cell the mouse landed on, with cats and cheeses as they were
    /// before the move, without learning.
    fn observe(
        &mut self,
        grid: &Grid,
        before: &Snapshot,
        _action: Action,
        after: &Snapshot,
    ) -> Result<f64> {
        Ok(snapshot_reward(grid, &before.with_mouse(after.mouse)))
    }

    /// How the training loop treats a move that crossed a wall or left the map.
    ///
    /// # Default Implementation
    ///
    /// Returns [`InvalidMovePolicy::Warn`].
    fn invalid_move_policy(&self) -> InvalidMovePolicy {
        InvalidMovePolicy::Warn
    }

    /// Get the learner's name.
    fn name(&self) -> &str;

    /// Seed the learner's internal random number generator.
    ///
    /// # Default Implementation
    ///
    /// Does nothing and returns `Ok(())`.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }

    /// Enable downcasting to concrete types.
    fn as_any(&self) -> &dyn std::any::Any;
}
