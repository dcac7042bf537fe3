//! Mixed-radix encoding of (mouse, cat, cheese) cell triples

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    maze::{Grid, Position, Snapshot},
};

/// Row index into a [`QTable`](super::QTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateIndex(usize);

impl StateIndex {
    pub fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// Number of distinct states for a grid: `cells³`.
pub fn state_count(grid: &Grid) -> usize {
    grid.num_cells().pow(3)
}

/// Encode a configuration as `mouse + cat·C + cheese·C²` with `C = size²`.
///
/// # Errors
///
/// Returns [`Error::PositionOutOfBounds`] if any position lies off the grid.
pub fn encode_state(
    grid: &Grid,
    mouse: Position,
    cat: Position,
    cheese: Position,
) -> Result<StateIndex> {
    let cells = grid.num_cells();
    let mouse = checked_cell(grid, mouse)?;
    let cat = checked_cell(grid, cat)?;
    let cheese = checked_cell(grid, cheese)?;
    Ok(StateIndex(mouse + cat * cells + cheese * cells * cells))
}

/// Encode a snapshot using its tracked (slot 0) cat and cheese.
///
/// # Errors
///
/// Returns [`Error::MissingEntity`] if slot 0 of either collection is empty.
pub fn encode_snapshot(grid: &Grid, snapshot: &Snapshot) -> Result<StateIndex> {
    let cat = snapshot.cats.first().ok_or_else(|| Error::MissingEntity {
        kind: "cat".to_string(),
    })?;
    let cheese = snapshot.cheeses.first().ok_or_else(|| Error::MissingEntity {
        kind: "cheese".to_string(),
    })?;
    encode_state(grid, snapshot.mouse, cat, cheese)
}

/// Inverse of [`encode_state`]: `(mouse, cat, cheese)`.
pub fn decode_state(grid: &Grid, state: StateIndex) -> (Position, Position, Position) {
    let cells = grid.num_cells();
    let raw = state.get();
    (
        grid.position_of(raw % cells),
        grid.position_of((raw / cells) % cells),
        grid.position_of(raw / (cells * cells)),
    )
}

fn checked_cell(grid: &Grid, pos: Position) -> Result<usize> {
    if !grid.contains(pos) {
        return Err(Error::PositionOutOfBounds {
            x: pos.x,
            y: pos.y,
            size: grid.size(),
        });
    }
    Ok(grid.cell_index(pos))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::maze::Entities;

    #[test]
    fn test_encoding_matches_layout() {
        let grid = Grid::open(3).unwrap();
        let s = encode_state(
            &grid,
            Position::new(1, 1),
            Position::new(0, 0),
            Position::new(2, 2),
        )
        .unwrap();
        // mouse=4, cat=0, cheese=8 -> 4 + 0*9 + 8*81
        assert_eq!(s.get(), 652);
    }

    #[test]
    fn test_encoding_is_bijective_on_small_grid() {
        let grid = Grid::open(3).unwrap();
        let mut seen = HashSet::new();
        for m in 0..9 {
            for c in 0..9 {
                for h in 0..9 {
                    let (mouse, cat, cheese) =
                        (grid.position_of(m), grid.position_of(c), grid.position_of(h));
                    let s = encode_state(&grid, mouse, cat, cheese).unwrap();
                    assert!(s.get() < state_count(&grid));
                    assert!(seen.insert(s));
                    assert_eq!(decode_state(&grid, s), (mouse, cat, cheese));
                }
            }
        }
        assert_eq!(seen.len(), state_count(&grid));
    }

    #[test]
    fn test_off_grid_position_rejected() {
        let grid = Grid::open(3).unwrap();
        let err = encode_state(
            &grid,
            Position::new(3, 0),
            Position::new(0, 0),
            Position::new(1, 1),
        )
        .unwrap_err();
        assert!(matches!(err, Error::PositionOutOfBounds { x: 3, y: 0, size: 3 }));
    }

    #[test]
    fn test_snapshot_requires_tracked_entities() {
        let grid = Grid::open(3).unwrap();
        let snap = Snapshot::new(
            Position::new(0, 0),
            Entities::new(),
            Entities::single(Position::new(1, 1)),
        );
        let err = encode_snapshot(&grid, &snap).unwrap_err();
        assert!(err.to_string().contains("cat"));
    }
}
