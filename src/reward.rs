//! Reward for a hypothetical mouse placement
//!
//! The reward scores the cell the mouse would land in, not the cell it left:
//!
//! ```text
//! r = -cheese_term + cat_term + open_moves - 0.2 * distance_to_centre
//! ```
//!
//! Both distance terms are Manhattan distances to the tracked (slot 0) entity,
//! shifted down sharply on contact so that being caught dominates everything
//! else and reaching cheese is strongly rewarded.

use crate::maze::{Entities, Grid, Position, Snapshot};

/// Weight of the distance-to-centre penalty
pub const CENTER_PENALTY: f64 = 0.2;

/// Reward for the mouse standing at `mouse` with the given cats and cheeses.
///
/// Only slot 0 of each collection is consulted. An absent tracked entity
/// contributes nothing.
pub fn reward(grid: &Grid, mouse: Position, cats: &Entities, cheeses: &Entities) -> f64 {
    let size = grid.size() as i64;

    let open_moves = grid.legal_move_count(mouse) as i64;
    let center_distance = mouse.manhattan(grid.center()) as f64;

    let cat_term = cats
        .first()
        .map_or(0, |cat| adjusted_distance(mouse.manhattan(cat), size.pow(3), size));
    let cheese_term = cheeses
        .first()
        .map_or(0, |cheese| adjusted_distance(mouse.manhattan(cheese), size.pow(2), 2 * size));

    (-cheese_term + cat_term + open_moves) as f64 - CENTER_PENALTY * center_distance
}

/// [`reward`] over a snapshot's positions.
pub fn snapshot_reward(grid: &Grid, snapshot: &Snapshot) -> f64 {
    reward(grid, snapshot.mouse, &snapshot.cats, &snapshot.cheeses)
}

/// Distance with contact penalties applied cumulatively: distance 0 takes
/// both `contact` and `adjacent`, distance 1 takes `adjacent` only.
fn adjusted_distance(distance: usize, contact: i64, adjacent: i64) -> i64 {
    let mut d = distance as i64;
    if d == 0 {
        d -= contact;
    }
    if d <= 1 {
        d -= adjacent;
    }
    d
}
