//! Linear function-approximation Q-learning
//!
//! A state is summarised by a [`FeatureVector`]; its value is the dot
//! product with a learned [`LinearModel`] weight vector. Unlike the tabular
//! learner, action selection here never mutates the weights.

pub mod agent;
pub mod features;
pub mod model;

pub use agent::LinearAgent;
pub use features::{FeatureVector, NUM_FEATURES, evaluate_features};
pub use model::{LinearModel, max_qsa, qsa};
