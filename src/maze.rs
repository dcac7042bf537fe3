//! Maze model: four-connected grid, entity slots and the episode environment

pub mod action;
pub mod entities;
pub mod game;
pub mod grid;

pub use action::Action;
pub use entities::{Entities, MAX_ENTITIES, Snapshot};
pub use game::{EpisodeOutcome, EpisodeSummary, Game, StepReport};
pub use grid::{Grid, MoveAnomaly, Position, StepOutcome};
