//! Episode environment: mouse moves, cheese is eaten, cats give chase

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use super::{
    action::Action,
    entities::{Entities, Snapshot},
    grid::{Grid, MoveAnomaly},
};
use crate::{Error, Result};

/// How an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeOutcome {
    /// A cat reached the mouse
    Caught,
    /// The mouse ate every cheese
    AteAllCheese,
    /// Step limit reached
    TimedOut,
}

/// Per-episode statistics reported to observers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub outcome: EpisodeOutcome,
    pub steps: usize,
    pub total_reward: f64,
}

/// What happened during one call to [`Game::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub anomaly: Option<MoveAnomaly>,
    pub ate_cheese: bool,
    pub outcome: Option<EpisodeOutcome>,
}

/// A running episode over a borrowed grid.
#[derive(Debug, Clone)]
pub struct Game<'g> {
    grid: &'g Grid,
    state: Snapshot,
    cat_smartness: f64,
    steps: usize,
}

impl<'g> Game<'g> {
    /// Start an episode from a given snapshot.
    ///
    /// `cat_smartness` is the probability that a cat takes the move that
    /// brings it closest to the mouse instead of a random open move.
    pub fn new(grid: &'g Grid, state: Snapshot, cat_smartness: f64) -> Self {
        Self {
            grid,
            state,
            cat_smartness,
            steps: 0,
        }
    }

    /// Place the mouse, cats and cheeses on distinct random cells.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the grid has fewer cells than entities.
    pub fn random_start<R: Rng + ?Sized>(
        grid: &Grid,
        num_cats: usize,
        num_cheeses: usize,
        rng: &mut R,
    ) -> Result<Snapshot> {
        let needed = 1 + num_cats + num_cheeses;
        if needed > grid.num_cells() {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "{needed} entities do not fit on a grid with {} cells",
                    grid.num_cells()
                ),
            });
        }

        let cells: Vec<_> = rand::seq::index::sample(rng, grid.num_cells(), needed)
            .into_iter()
            .map(|idx| grid.position_of(idx))
            .collect();

        let cats = Entities::from_positions(&cells[1..1 + num_cats])?;
        let cheeses = Entities::from_positions(&cells[1 + num_cats..])?;
        Ok(Snapshot::new(cells[0], cats, cheeses))
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Move the mouse, resolve eating and capture, then move the cats.
    pub fn step<R: Rng + ?Sized>(&mut self, action: Action, rng: &mut R) -> StepReport {
        self.steps += 1;

        let moved = self.grid.step(self.state.mouse, action);
        if let Some(anomaly) = moved.anomaly {
            log::warn!(
                "{anomaly}: action {action}, cell {}",
                self.grid.cell_index(self.state.mouse)
            );
        }
        self.state.mouse = moved.position;

        let mut report = StepReport {
            anomaly: moved.anomaly,
            ate_cheese: false,
            outcome: None,
        };

        if self.state.is_caught() {
            report.outcome = Some(EpisodeOutcome::Caught);
            return report;
        }

        if self.state.cheeses.remove_at(self.state.mouse) > 0 {
            report.ate_cheese = true;
            if self.state.cheeses.is_empty() {
                report.outcome = Some(EpisodeOutcome::AteAllCheese);
                return report;
            }
        }

        self.move_cats(rng);

        if self.state.is_caught() {
            report.outcome = Some(EpisodeOutcome::Caught);
        }
        report
    }

    fn move_cats<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let grid = self.grid;
        let mouse = self.state.mouse;
        let smartness = self.cat_smartness;

        for cat in self.state.cats.live_mut() {
            let options: Vec<_> = grid
                .legal_actions(*cat)
                .into_iter()
                .filter_map(|a| grid.neighbor(*cat, a))
                .collect();

            let chase = rng.random::<f64>() < smartness;
            let next = if chase {
                options.iter().copied().min_by_key(|p| p.manhattan(mouse))
            } else {
                options.choose(rng).copied()
            };

            if let Some(next) = next {
                *cat = next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::maze::grid::Position;

    fn snapshot(mouse: (usize, usize), cat: (usize, usize), cheese: (usize, usize)) -> Snapshot {
        Snapshot::new(
            Position::new(mouse.0, mouse.1),
            Entities::single(Position::new(cat.0, cat.1)),
            Entities::single(Position::new(cheese.0, cheese.1)),
        )
    }

    #[test]
    fn test_eating_last_cheese_ends_episode() {
        let grid = Grid::open(3).unwrap();
        let mut game = Game::new(&grid, snapshot((1, 1), (0, 0), (2, 1)), 1.0);
        let mut rng = StdRng::seed_from_u64(1);

        let report = game.step(Action::East, &mut rng);
        assert!(report.ate_cheese);
        assert_eq!(report.outcome, Some(EpisodeOutcome::AteAllCheese));
        assert!(game.snapshot().cheeses.is_empty());
    }

    #[test]
    fn test_walking_into_cat_is_caught() {
        let grid = Grid::open(3).unwrap();
        let mut game = Game::new(&grid, snapshot((1, 1), (1, 0), (2, 2)), 0.0);
        let mut rng = StdRng::seed_from_u64(2);

        let report = game.step(Action::North, &mut rng);
        assert_eq!(report.outcome, Some(EpisodeOutcome::Caught));
    }

    #[test]
    fn test_smart_cat_closes_distance() {
        let grid = Grid::open(5).unwrap();
        let mut game = Game::new(&grid, snapshot((4, 4), (0, 0), (4, 0)), 1.0);
        let mut rng = StdRng::seed_from_u64(3);

        let before = Position::new(0, 0).manhattan(Position::new(4, 3));
        let report = game.step(Action::North, &mut rng);
        assert_eq!(report.outcome, None);
        let cat = game.snapshot().cats.first().unwrap();
        assert!(cat.manhattan(game.snapshot().mouse) < before);
        assert_eq!(game.steps(), 1);
    }

    #[test]
    fn test_random_start_distinct_cells() {
        let grid = Grid::open(3).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let snap = Game::random_start(&grid, 2, 3, &mut rng).unwrap();

        let mut cells: Vec<_> = std::iter::once(snap.mouse)
            .chain(snap.cats.live())
            .chain(snap.cheeses.live())
            .collect();
        assert_eq!(cells.len(), 6);
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 6);
    }

    #[test]
    fn test_random_start_too_crowded() {
        let grid = Grid::open(2).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(Game::random_start(&grid, 2, 2, &mut rng).is_err());
    }
}
