//! Navigability table and grid coordinates

use std::{fmt, fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use super::action::Action;
use crate::{Error, Result};

/// A cell coordinate; `x` grows east, `y` grows south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another cell
    pub fn manhattan(self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Apply an action's delta, or `None` if a coordinate would go negative.
    pub fn offset(self, action: Action) -> Option<Position> {
        let (dx, dy) = action.delta();
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Why a transition could not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveAnomaly {
    WallCrossing,
    OutOfBounds,
}

impl fmt::Display for MoveAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveAnomaly::WallCrossing => write!(f, "mouse crossed a wall"),
            MoveAnomaly::OutOfBounds => write!(f, "mouse left the map"),
        }
    }
}

/// Result of applying an action to a position.
///
/// When an anomaly is reported the position is the starting cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub position: Position,
    pub anomaly: Option<MoveAnomaly>,
}

/// Square navigability table.
///
/// Row `x + y * size` holds one weight per [`Action`]; zero means blocked and
/// any other value means open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridSpec")]
pub struct Grid {
    size: usize,
    cells: Vec<[f64; Action::COUNT]>,
}

#[derive(Deserialize)]
struct GridSpec {
    size: usize,
    cells: Vec<[f64; Action::COUNT]>,
}

impl TryFrom<GridSpec> for Grid {
    type Error = Error;

    fn try_from(spec: GridSpec) -> Result<Self> {
        Grid::from_rows(spec.size, spec.cells)
    }
}

impl Grid {
    /// A `size`×`size` grid with every interior edge open and the border closed.
    pub fn open(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidGrid {
                message: "grid size must be positive".to_string(),
            });
        }

        let mut cells = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                let pos = Position::new(x, y);
                let mut row = [0.0; Action::COUNT];
                for action in Action::ALL {
                    let inside = pos
                        .offset(action)
                        .is_some_and(|next| next.x < size && next.y < size);
                    if inside {
                        row[action.index()] = 1.0;
                    }
                }
                cells.push(row);
            }
        }

        Ok(Self { size, cells })
    }

    /// Build a grid from raw navigability rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGrid`] if `size` is zero or the row count is not `size²`.
    pub fn from_rows(size: usize, cells: Vec<[f64; Action::COUNT]>) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidGrid {
                message: "grid size must be positive".to_string(),
            });
        }
        if cells.len() != size * size {
            return Err(Error::InvalidGrid {
                message: format!(
                    "expected {} rows for a {size}x{size} grid, got {}",
                    size * size,
                    cells.len()
                ),
            });
        }
        Ok(Self { size, cells })
    }

    /// Load a grid from a JSON file of the form `{"size": n, "cells": [[n, e, s, w], ...]}`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open grid file {}", path.display()),
            source,
        })?;
        let grid = serde_json::from_reader(BufReader::new(file))?;
        Ok(grid)
    }

    /// Close the edge leaving `pos` through `action`, and its reverse.
    pub fn with_wall(mut self, pos: Position, action: Action) -> Self {
        if self.contains(pos) {
            let idx = self.cell_index(pos);
            self.cells[idx][action.index()] = 0.0;
            if let Some(next) = self.neighbor(pos, action) {
                let next_idx = self.cell_index(next);
                self.cells[next_idx][action.opposite().index()] = 0.0;
            }
        }
        self
    }

    /// Side length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (`size²`)
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    /// Row index of a cell; callers must check [`Grid::contains`] first.
    pub fn cell_index(&self, pos: Position) -> usize {
        pos.x + pos.y * self.size
    }

    /// Inverse of [`Grid::cell_index`]
    pub fn position_of(&self, index: usize) -> Position {
        Position::new(index % self.size, index / self.size)
    }

    /// Whether the edge leaving `pos` through `action` is traversable.
    ///
    /// Cells outside the grid have no open edges.
    pub fn is_open(&self, pos: Position, action: Action) -> bool {
        self.contains(pos) && self.cells[self.cell_index(pos)][action.index()] != 0.0
    }

    /// Navigable actions from `pos`, in index order.
    pub fn legal_actions(&self, pos: Position) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|&action| self.is_open(pos, action))
            .collect()
    }

    pub fn legal_move_count(&self, pos: Position) -> usize {
        Action::ALL
            .into_iter()
            .filter(|&action| self.is_open(pos, action))
            .count()
    }

    /// Cell reached by `action` if it stays on the grid; walls are ignored.
    pub fn neighbor(&self, pos: Position, action: Action) -> Option<Position> {
        pos.offset(action).filter(|&next| self.contains(next))
    }

    /// Centre cell (integer division of the side length)
    pub fn center(&self) -> Position {
        Position::new(self.size / 2, self.size / 2)
    }

    /// Apply `action` at `pos`.
    ///
    /// A blocked edge is reported before the bounds check; either anomaly
    /// leaves the mouse where it was.
    pub fn step(&self, pos: Position, action: Action) -> StepOutcome {
        if !self.is_open(pos, action) {
            let anomaly = if self.contains(pos) {
                MoveAnomaly::WallCrossing
            } else {
                MoveAnomaly::OutOfBounds
            };
            return StepOutcome {
                position: pos,
                anomaly: Some(anomaly),
            };
        }

        match self.neighbor(pos, action) {
            Some(next) => StepOutcome {
                position: next,
                anomaly: None,
            },
            None => StepOutcome {
                position: pos,
                anomaly: Some(MoveAnomaly::OutOfBounds),
            },
        }
    }
}
