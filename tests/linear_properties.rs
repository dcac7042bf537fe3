//! Property tests for the linear function-approximation learner.

mod common;

use catmouse::{
    Entities, LearningConfig, Snapshot,
    linear::{
        LinearAgent, LinearModel, NUM_FEATURES, evaluate_features,
        features::{CAT_DISTANCES, CHEESE_DISTANCES},
    },
    maze::{Action, Grid, MAX_ENTITIES, Position},
};
use common::{cell, entities, walled_grid};
use proptest::prelude::*;

fn is_descending(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] >= w[1])
}

proptest! {
    #[test]
    fn distance_tails_are_sorted(
        mouse in cell(5),
        cats in entities(5),
        cheeses in entities(5),
    ) {
        let grid = walled_grid();
        let f = evaluate_features(&grid, mouse, &cats, &cheeses);

        prop_assert!(is_descending(&f[CAT_DISTANCES..CAT_DISTANCES + MAX_ENTITIES]));
        prop_assert!(is_descending(&f[CHEESE_DISTANCES..CHEESE_DISTANCES + MAX_ENTITIES]));
        prop_assert!(f[CHEESE_DISTANCES + MAX_ENTITIES..].iter().all(|&v| v == 0.0));
        prop_assert!(f.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn greedy_choice_matches_max_qsa(
        mouse in cell(5),
        cats in entities(5),
        cheeses in entities(5),
        weights in prop::array::uniform25(-5.0f64..5.0),
        seed in any::<u64>(),
    ) {
        let grid = walled_grid();
        let snap = Snapshot::new(mouse, cats, cheeses);
        let model = LinearModel::new(LearningConfig::default())
            .unwrap()
            .with_weights(weights);
        let expected = model.max_qsa(&grid, &snap).map(|(action, _)| action);
        let mut agent = LinearAgent::from_model(model).with_seed(seed);

        prop_assert_eq!(agent.select_action(&grid, &snap, 1.0).ok(), expected);
    }

    #[test]
    fn exploration_stays_navigable(
        mouse in cell(5),
        cats in entities(5),
        cheeses in entities(5),
        seed in any::<u64>(),
    ) {
        let grid = walled_grid();
        let snap = Snapshot::new(mouse, cats, cheeses);
        let mut agent = LinearAgent::new(LearningConfig::default())
            .unwrap()
            .with_seed(seed);
        for _ in 0..10 {
            let action = agent.select_action(&grid, &snap, 0.0).unwrap();
            prop_assert!(grid.is_open(mouse, action));
        }
    }
}

#[test]
fn single_exit_is_always_taken() {
    // (0,0) can only move east once the south edge is walled.
    let grid = Grid::open(3)
        .unwrap()
        .with_wall(Position::new(0, 0), Action::South);
    let snap = Snapshot::new(
        Position::new(0, 0),
        Entities::single(Position::new(2, 2)),
        Entities::single(Position::new(0, 2)),
    );
    let mut agent = LinearAgent::new(LearningConfig::default())
        .unwrap()
        .with_seed(21);
    for pct in [0.0, 0.5, 1.0] {
        for _ in 0..10 {
            assert_eq!(agent.select_action(&grid, &snap, pct).unwrap(), Action::East);
        }
    }
}

#[test]
fn learning_moves_weights_towards_reward() {
    let grid = Grid::open(5).unwrap();
    let snap = common::snapshot((0, 0), (4, 4), (0, 1));
    let mut agent = LinearAgent::new(LearningConfig::new().with_learning_rate(0.05)).unwrap();

    let reward = agent.learn(&grid, &snap);
    assert!(reward > 0.0);
    let value = agent.model().value(&grid, &snap);
    assert!(value > 0.0);
    assert_eq!(agent.model().weights().len(), NUM_FEATURES);
}
