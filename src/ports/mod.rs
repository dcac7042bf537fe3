//! Ports (trait boundaries) between the learners and the training loop.
//!
//! The training pipeline only talks to learners and observers through these
//! traits, so tabular, linear and baseline agents are interchangeable.

pub mod learner;
pub mod observer;

pub use learner::Learner;
pub use observer::Observer;
