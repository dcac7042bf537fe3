//! Tabular Q-learning agent
//!
//! The agent exposes selection, transition-and-learn, and the fused
//! [`TabularAgent::act`] that chooses an action and learns from its
//! hypothetical outcome in a single call.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use super::{
    q_table::QTable,
    state::{StateIndex, encode_snapshot, state_count},
};
use crate::{
    Error, Result,
    config::{InvalidMovePolicy, LearningConfig},
    maze::{Action, Grid, Snapshot, StepOutcome},
    ports::Learner,
    reward::snapshot_reward,
    utils::build_rng,
};

/// Q-learning agent backed by a dense [`QTable`].
#[derive(Debug, Clone)]
pub struct TabularAgent {
    q_table: QTable,
    config: LearningConfig,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl TabularAgent {
    /// Create an agent whose table covers every state of `grid`, initialised to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` fails validation.
    pub fn new(grid: &Grid, config: LearningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            q_table: QTable::new(state_count(grid), 0.0),
            config,
            rng: build_rng(None),
            rng_seed: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn q_table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    /// Choose an action without learning.
    ///
    /// With probability `pct` the greedy action among navigable moves is
    /// taken (first strictly greatest value wins); otherwise a navigable move
    /// is drawn uniformly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoNavigableAction`] if the mouse is boxed in.
    pub fn select_action(&mut self, grid: &Grid, snapshot: &Snapshot, pct: f64) -> Result<Action> {
        let state = encode_snapshot(grid, snapshot)?;
        let legal = grid.legal_actions(snapshot.mouse);
        let boxed_in = || Error::NoNavigableAction {
            x: snapshot.mouse.x,
            y: snapshot.mouse.y,
        };

        let draw: f64 = self.rng.random();
        if draw <= pct {
            self.q_table.greedy_action(state, &legal)?.ok_or_else(boxed_in)
        } else {
            legal.choose(&mut self.rng).copied().ok_or_else(boxed_in)
        }
    }

    /// Apply `action` to the mouse, score the landing cell and update Q(s,a).
    ///
    /// Cats and cheeses stay where they are in the resulting state. Returns
    /// the resulting snapshot.
    pub fn apply(&mut self, grid: &Grid, snapshot: &Snapshot, action: Action) -> Result<Snapshot> {
        let state = encode_snapshot(grid, snapshot)?;
        let outcome = grid.step(snapshot.mouse, action);
        self.check_transition(grid, snapshot, state, action, &outcome)?;

        let landed = snapshot.with_mouse(outcome.position);
        self.learn(grid, snapshot, action, &landed)?;
        Ok(landed)
    }

    /// Select, transition, score and update in one call.
    pub fn act(&mut self, grid: &Grid, snapshot: &Snapshot, pct: f64) -> Result<Action> {
        let action = self.select_action(grid, snapshot, pct)?;
        self.apply(grid, snapshot, action)?;
        Ok(action)
    }

    /// Update Q(before, action) using the reward of `after`.
    ///
    /// Returns the reward used.
    pub fn learn(
        &mut self,
        grid: &Grid,
        before: &Snapshot,
        action: Action,
        after: &Snapshot,
    ) -> Result<f64> {
        let state = encode_snapshot(grid, before)?;
        let next_state = encode_snapshot(grid, after)?;
        let reward = snapshot_reward(grid, after);
        self.q_table
            .q_learning_update(state, action, reward, next_state, &self.config)?;
        Ok(reward)
    }

    fn check_transition(
        &self,
        grid: &Grid,
        snapshot: &Snapshot,
        state: StateIndex,
        action: Action,
        outcome: &StepOutcome,
    ) -> Result<()> {
        let Some(anomaly) = outcome.anomaly else {
            return Ok(());
        };
        let cell = grid.cell_index(snapshot.mouse);
        match self.config.on_invalid_move {
            InvalidMovePolicy::Warn => {
                let value = self.q_table.get(state, action)?;
                log::warn!("{anomaly}: action {action}, cell {cell}, Q-value {value}");
                Ok(())
            }
            InvalidMovePolicy::Fail => Err(Error::InvalidMove {
                action,
                cell,
                anomaly,
            }),
        }
    }
}

impl Learner for TabularAgent {
    fn select_action(&mut self, grid: &Grid, snapshot: &Snapshot, pct: f64) -> Result<Action> {
        TabularAgent::select_action(self, grid, snapshot, pct)
    }

    fn observe(
        &mut self,
        grid: &Grid,
        before: &Snapshot,
        action: Action,
        after: &Snapshot,
    ) -> Result<f64> {
        // Learn from where the mouse landed, before the cats responded.
        let landed = before.with_mouse(after.mouse);
        self.learn(grid, before, action, &landed)
    }

    fn name(&self) -> &str {
        "Tabular Q-Learning"
    }

    fn invalid_move_policy(&self) -> InvalidMovePolicy {
        self.config.on_invalid_move
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::TabularUpdate,
        maze::{Entities, MoveAnomaly, Position},
        q_learning::state::encode_state,
    };

    fn snapshot(mouse: (usize, usize), cat: (usize, usize), cheese: (usize, usize)) -> Snapshot {
        Snapshot::new(
            Position::new(mouse.0, mouse.1),
            Entities::single(Position::new(cat.0, cat.1)),
            Entities::single(Position::new(cheese.0, cheese.1)),
        )
    }

    #[test]
    fn test_greedy_skips_blocked_best() {
        let grid = Grid::open(3)
            .unwrap()
            .with_wall(Position::new(1, 1), Action::North);
        let snap = snapshot((1, 1), (0, 0), (2, 2));
        let mut agent = TabularAgent::new(&grid, LearningConfig::default())
            .unwrap()
            .with_seed(1);

        let state = encode_snapshot(&grid, &snap).unwrap();
        agent.q_table_mut().set(state, Action::North, 50.0).unwrap();
        agent.q_table_mut().set(state, Action::West, 3.0).unwrap();

        for _ in 0..20 {
            assert_eq!(agent.select_action(&grid, &snap, 1.0).unwrap(), Action::West);
        }
    }

    #[test]
    fn test_apply_updates_entry_with_landing_reward() {
        let grid = Grid::open(3).unwrap();
        let snap = snapshot((1, 1), (0, 0), (2, 2));
        let config = LearningConfig::new().with_learning_rate(0.5);
        let mut agent = TabularAgent::new(&grid, config).unwrap();

        let landed = agent.apply(&grid, &snap, Action::East).unwrap();
        assert_eq!(landed.mouse, Position::new(2, 1));
        assert_eq!(landed.cats, snap.cats);

        let reward = snapshot_reward(&grid, &landed);
        let state = encode_snapshot(&grid, &snap).unwrap();
        let value = agent.q_table().get(state, Action::East).unwrap();
        assert!((value - 0.5 * reward).abs() < 1e-12);
    }

    #[test]
    fn test_bellman_mode_uses_continuation() {
        let grid = Grid::open(3).unwrap();
        let snap = snapshot((1, 1), (0, 0), (2, 2));
        let config = LearningConfig::new()
            .with_learning_rate(1.0)
            .with_discount_factor(0.5)
            .with_tabular_update(TabularUpdate::Bellman);
        let mut agent = TabularAgent::new(&grid, config).unwrap();

        let next = encode_state(
            &grid,
            Position::new(1, 2),
            Position::new(0, 0),
            Position::new(2, 2),
        )
        .unwrap();
        agent.q_table_mut().set(next, Action::East, 10.0).unwrap();

        let landed = agent.apply(&grid, &snap, Action::South).unwrap();
        let reward = snapshot_reward(&grid, &landed);
        let state = encode_snapshot(&grid, &snap).unwrap();
        let value = agent.q_table().get(state, Action::South).unwrap();
        assert!((value - (reward + 5.0)).abs() < 1e-12);
    }

    #[test]
    fn test_fail_fast_on_wall() {
        let grid = Grid::open(3).unwrap();
        let snap = snapshot((0, 0), (2, 0), (2, 2));
        let config = LearningConfig::new().with_invalid_move_policy(InvalidMovePolicy::Fail);
        let mut agent = TabularAgent::new(&grid, config).unwrap();

        let err = agent.apply(&grid, &snap, Action::North).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidMove {
                action: Action::North,
                cell: 0,
                anomaly: MoveAnomaly::WallCrossing
            }
        ));
    }

    #[test]
    fn test_warn_policy_continues_in_place() {
        let grid = Grid::open(3).unwrap();
        let snap = snapshot((0, 0), (2, 0), (2, 2));
        let mut agent = TabularAgent::new(&grid, LearningConfig::default()).unwrap();

        let landed = agent.apply(&grid, &snap, Action::West).unwrap();
        assert_eq!(landed.mouse, Position::new(0, 0));
    }

    #[test]
    fn test_boxed_in_mouse() {
        let grid = Grid::from_rows(2, vec![[0.0; 4]; 4]).unwrap();
        let snap = snapshot((0, 0), (1, 1), (1, 0));
        let mut agent = TabularAgent::new(&grid, LearningConfig::default())
            .unwrap()
            .with_seed(3);

        for pct in [0.0, 1.0] {
            let err = agent.select_action(&grid, &snap, pct).unwrap_err();
            assert!(matches!(err, Error::NoNavigableAction { x: 0, y: 0 }));
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let grid = Grid::open(2).unwrap();
        let config = LearningConfig::new().with_learning_rate(-0.1);
        assert!(TabularAgent::new(&grid, config).is_err());
    }
}
