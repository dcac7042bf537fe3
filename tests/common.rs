//! Common test utilities for the catmouse test suite.

#![allow(dead_code)]

use catmouse::{Entities, Grid, Position, Snapshot, maze::Action};
use proptest::prelude::*;

/// Snapshot with one cat and one cheese.
pub fn snapshot(mouse: (usize, usize), cat: (usize, usize), cheese: (usize, usize)) -> Snapshot {
    Snapshot::new(
        Position::new(mouse.0, mouse.1),
        Entities::single(Position::new(cat.0, cat.1)),
        Entities::single(Position::new(cheese.0, cheese.1)),
    )
}

/// Open 5x5 grid with a short wall segment around the centre.
pub fn walled_grid() -> Grid {
    Grid::open(5)
        .unwrap()
        .with_wall(Position::new(2, 2), Action::North)
        .with_wall(Position::new(2, 2), Action::East)
        .with_wall(Position::new(1, 3), Action::East)
}

/// Strategy for a cell on a `size`x`size` grid.
pub fn cell(size: usize) -> impl Strategy<Value = Position> {
    (0..size, 0..size).prop_map(|(x, y)| Position::new(x, y))
}

/// Strategy for up to five live entities.
pub fn entities(size: usize) -> impl Strategy<Value = Entities> {
    prop::collection::vec(cell(size), 0..=5)
        .prop_map(|cells| Entities::from_positions(&cells).unwrap())
}
