//! Observer implementations for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! the episode loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    maze::{Action, EpisodeOutcome, EpisodeSummary, Snapshot},
    ports::Observer,
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    fed: usize,
    caught: usize,
    timed_out: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            fed: 0,
            caught: 0,
            timed_out: 0,
        }
    }

    fn message(&self) -> String {
        format!("fed:{} caught:{} timeout:{}", self.fed, self.caught, self.timed_out)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, summary: &EpisodeSummary) -> Result<()> {
        match summary.outcome {
            EpisodeOutcome::AteAllCheese => self.fed += 1,
            EpisodeOutcome::Caught => self.caught += 1,
            EpisodeOutcome::TimedOut => self.timed_out += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks training metrics
pub struct MetricsObserver {
    fed: usize,
    caught: usize,
    timed_out: usize,
    returns: Vec<f64>,
    step_counts: Vec<usize>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            fed: 0,
            caught: 0,
            timed_out: 0,
            returns: Vec::new(),
            step_counts: Vec::new(),
        }
    }

    pub fn total_episodes(&self) -> usize {
        self.returns.len()
    }

    /// Fraction of episodes in which every cheese was eaten
    pub fn fed_rate(&self) -> f64 {
        rate(self.fed, self.total_episodes())
    }

    /// Fraction of episodes ending in capture
    pub fn caught_rate(&self) -> f64 {
        rate(self.caught, self.total_episodes())
    }

    /// Mean return over the last `window` episodes (all episodes if fewer)
    pub fn recent_mean_return(&self, window: usize) -> f64 {
        let start = self.returns.len().saturating_sub(window);
        let recent = &self.returns[start..];
        if recent.is_empty() {
            0.0
        } else {
            recent.iter().sum::<f64>() / recent.len() as f64
        }
    }

    /// Get average episode length
    pub fn avg_episode_length(&self) -> f64 {
        if self.step_counts.is_empty() {
            0.0
        } else {
            self.step_counts.iter().sum::<usize>() as f64 / self.step_counts.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total_episodes(),
            fed: self.fed,
            caught: self.caught,
            timed_out: self.timed_out,
            fed_rate: self.fed_rate(),
            caught_rate: self.caught_rate(),
            avg_episode_length: self.avg_episode_length(),
            mean_return: self.recent_mean_return(self.returns.len()),
        }
    }
}

fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub fed: usize,
    pub caught: usize,
    pub timed_out: usize,
    pub fed_rate: f64,
    pub caught_rate: f64,
    pub avg_episode_length: f64,
    pub mean_return: f64,
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, summary: &EpisodeSummary) -> Result<()> {
        match summary.outcome {
            EpisodeOutcome::AteAllCheese => self.fed += 1,
            EpisodeOutcome::Caught => self.caught += 1,
            EpisodeOutcome::TimedOut => self.timed_out += 1,
        }
        self.returns.push(summary.total_reward);
        self.step_counts.push(summary.steps);
        Ok(())
    }
}

/// One line of JSONL output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub episode: usize,
    pub outcome: EpisodeOutcome,
    pub steps: usize,
    pub total_reward: f64,
    /// Actions taken, in order
    pub actions: Vec<Action>,
    /// Starting configuration
    pub start: Option<Snapshot>,
}

/// JSONL observer - Exports one record per episode to JSON Lines format
pub struct JsonlObserver {
    writer: BufWriter<File>,
    actions: Vec<Action>,
    start: Option<Snapshot>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            actions: Vec::new(),
            start: None,
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.actions.clear();
        self.start = None;
        Ok(())
    }

    fn on_step(
        &mut self,
        _episode: usize,
        _step: usize,
        snapshot: &Snapshot,
        action: Action,
        _reward: f64,
    ) -> Result<()> {
        if self.start.is_none() {
            self.start = Some(*snapshot);
        }
        self.actions.push(action);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, summary: &EpisodeSummary) -> Result<()> {
        let record = EpisodeRecord {
            episode,
            outcome: summary.outcome,
            steps: summary.steps,
            total_reward: summary.total_reward,
            actions: std::mem::take(&mut self.actions),
            start: self.start.take(),
        };

        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(outcome: EpisodeOutcome, steps: usize, total_reward: f64) -> EpisodeSummary {
        EpisodeSummary {
            outcome,
            steps,
            total_reward,
        }
    }

    #[test]
    fn test_metrics_observer() {
        let mut metrics = MetricsObserver::new();
        metrics
            .on_episode_end(0, &summary(EpisodeOutcome::Caught, 3, -100.0))
            .unwrap();
        metrics
            .on_episode_end(1, &summary(EpisodeOutcome::AteAllCheese, 5, 40.0))
            .unwrap();
        metrics
            .on_episode_end(2, &summary(EpisodeOutcome::AteAllCheese, 7, 60.0))
            .unwrap();

        let s = metrics.summary();
        assert_eq!(s.total_episodes, 3);
        assert_eq!(s.fed, 2);
        assert_eq!(s.avg_episode_length, 5.0);
        assert_eq!(metrics.recent_mean_return(2), 50.0);
        assert_eq!(metrics.recent_mean_return(10), 0.0);
    }
}
