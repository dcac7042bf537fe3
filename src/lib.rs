//! Q-learning for the cat/mouse/cheese maze game
//!
//! This crate provides:
//! - Grid model with directional navigability, entity slots and an episode environment
//! - Reward function scoring a hypothetical mouse placement
//! - Tabular Q-learning over the joint (mouse, cat, cheese) configuration
//! - Linear function-approximation Q-learning over a 25-element feature vector
//! - Training pipeline with pluggable observers and a CLI front end

pub mod cli;
pub mod config;
pub mod error;
pub mod linear;
pub mod maze;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod reward;
pub mod utils;

pub use config::{InvalidMovePolicy, LearningConfig, TabularUpdate};
pub use error::{Error, Result};
pub use maze::{Action, Entities, Grid, Position, Snapshot};
