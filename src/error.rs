//! Error types for the catmouse crate

use thiserror::Error;

use crate::maze::{Action, MoveAnomaly};

/// Main error type for the catmouse crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: {anomaly} (action {action}, cell {cell})")]
    InvalidMove {
        action: Action,
        cell: usize,
        anomaly: MoveAnomaly,
    },

    #[error("state index {state} is out of range (table holds {num_states} states)")]
    StateOutOfRange { state: usize, num_states: usize },

    #[error("action index {action} is out of range (must be 0-3)")]
    ActionOutOfRange { action: usize },

    #[error("position ({x}, {y}) is outside the {size}x{size} grid")]
    PositionOutOfBounds { x: usize, y: usize, size: usize },

    #[error("no {kind} in the tracked slot")]
    MissingEntity { kind: String },

    #[error("too many entities: got {count}, at most {max} slots are available")]
    TooManyEntities { count: usize, max: usize },

    #[error("no navigable action from cell ({x}, {y})")]
    NoNavigableAction { x: usize, y: usize },

    #[error("invalid grid: {message}")]
    InvalidGrid { message: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "perform I/O".to_string(),
            source,
        }
    }
}
