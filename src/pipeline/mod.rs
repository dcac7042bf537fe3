//! Training and evaluation pipeline
//!
//! This module provides:
//! - An episode loop that trains any [`Learner`] on a fixed grid
//! - Greedy evaluation runs without learning
//! - Observers for progress display, metrics and JSONL export

pub mod baseline;
pub mod observers;
pub mod training;

pub use baseline::RandomLearner;
pub use observers::{EpisodeRecord, JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Learner, Observer};
