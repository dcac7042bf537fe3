//! Feature extraction for the linear value model
//!
//! Layout of the 25-element vector:
//!
//! | Index | Feature |
//! |-------|---------|
//! | 0 | normalised distance to the nearest live cat |
//! | 1 | normalised distance to the nearest live cheese |
//! | 2 | 1 if a wall blocks a move towards the nearest cat |
//! | 3 | 1 if a wall blocks a move towards the nearest cheese |
//! | 4–8 | all cat distances, descending, absent slots as 0 |
//! | 9–13 | all cheese distances, descending, absent slots as 0 |
//! | 14–24 | reserved, always 0 |
//!
//! Distances are Manhattan distances divided by `2 × size`. With no live
//! entity of a kind, its distance and wall flag are 0.

use crate::maze::{Action, Entities, Grid, MAX_ENTITIES, Position, Snapshot};

/// Length of the feature vector
pub const NUM_FEATURES: usize = 25;

pub type FeatureVector = [f64; NUM_FEATURES];

pub const NEAREST_CAT: usize = 0;
pub const NEAREST_CHEESE: usize = 1;
pub const CAT_BLOCKED: usize = 2;
pub const CHEESE_BLOCKED: usize = 3;
pub const CAT_DISTANCES: usize = 4;
pub const CHEESE_DISTANCES: usize = CAT_DISTANCES + MAX_ENTITIES;

/// Evaluate every feature for the given configuration.
pub fn evaluate_features(
    grid: &Grid,
    mouse: Position,
    cats: &Entities,
    cheeses: &Entities,
) -> FeatureVector {
    let mut features = [0.0; NUM_FEATURES];

    if let Some((cat, distance)) = nearest(grid, mouse, cats) {
        features[NEAREST_CAT] = distance;
        features[CAT_BLOCKED] = blocked_towards(grid, mouse, cat).into();
    }
    if let Some((cheese, distance)) = nearest(grid, mouse, cheeses) {
        features[NEAREST_CHEESE] = distance;
        features[CHEESE_BLOCKED] = blocked_towards(grid, mouse, cheese).into();
    }

    features[CAT_DISTANCES..CAT_DISTANCES + MAX_ENTITIES]
        .copy_from_slice(&descending_distances(grid, mouse, cats));
    features[CHEESE_DISTANCES..CHEESE_DISTANCES + MAX_ENTITIES]
        .copy_from_slice(&descending_distances(grid, mouse, cheeses));

    features
}

/// [`evaluate_features`] over a snapshot.
pub fn snapshot_features(grid: &Grid, snapshot: &Snapshot) -> FeatureVector {
    evaluate_features(grid, snapshot.mouse, &snapshot.cats, &snapshot.cheeses)
}

fn normalized_distance(grid: &Grid, a: Position, b: Position) -> f64 {
    a.manhattan(b) as f64 / grid.size() as f64 / 2.0
}

/// Nearest live entity; the lowest slot wins ties.
fn nearest(grid: &Grid, mouse: Position, entities: &Entities) -> Option<(Position, f64)> {
    let mut best: Option<(Position, f64)> = None;
    for pos in entities.live() {
        let d = normalized_distance(grid, mouse, pos);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((pos, d));
        }
    }
    best
}

/// Whether the move in some direction of `target` is walled off.
fn blocked_towards(grid: &Grid, mouse: Position, target: Position) -> bool {
    (target.x > mouse.x && !grid.is_open(mouse, Action::East))
        || (target.x < mouse.x && !grid.is_open(mouse, Action::West))
        || (target.y > mouse.y && !grid.is_open(mouse, Action::South))
        || (target.y < mouse.y && !grid.is_open(mouse, Action::North))
}

/// Live distances by insertion sort, largest first, zero-padded.
fn descending_distances(grid: &Grid, mouse: Position, entities: &Entities) -> [f64; MAX_ENTITIES] {
    let mut sorted = [0.0; MAX_ENTITIES];
    let mut len = 0;
    for pos in entities.live() {
        let d = normalized_distance(grid, mouse, pos);
        let mut j = len;
        while j > 0 && sorted[j - 1] < d {
            sorted[j] = sorted[j - 1];
            j -= 1;
        }
        sorted[j] = d;
        len += 1;
    }
    sorted
}
