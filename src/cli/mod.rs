//! CLI infrastructure for the cat-and-mouse trainer
//!
//! This module provides the command-line interface for training and
//! evaluating maze learners.

pub mod commands;
pub mod output;
