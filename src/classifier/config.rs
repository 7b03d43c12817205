//! Training hyperparameters.

use crate::error::{ClassifierError, Result};
use serde::{Deserialize, Serialize};

/// Hyperparameters for [`Trainer`](super::Trainer).
///
/// Missing fields fall back to their defaults when deserializing, so a
/// partial JSON document such as `{"max_iterations": 100}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Log progress through `tracing` at info level.
    pub verbose: bool,
    /// Step size of the default Adam optimizer.
    pub learning_rate: f32,
    /// Number of passes over the training split.
    pub max_iterations: usize,
    /// Points per mini-batch; the last batch of an epoch may be smaller.
    pub batch_size: usize,
    /// Seed for every random draw of a fit; `None` seeds from entropy.
    pub random_state: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            learning_rate: 0.01,
            max_iterations: 2500,
            batch_size: 500,
            random_state: None,
        }
    }
}

impl TrainConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the learning rate.
    #[must_use]
    pub fn with_learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the number of epochs.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the mini-batch size.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Fix the seed for reproducible training.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Checks the hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns an invalid-hyperparameter configuration error if `batch_size`
    /// is zero or `learning_rate` is not a positive finite number.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(ClassifierError::invalid_hyperparameter(
                "batch_size",
                self.batch_size,
                "must be at least 1",
            ));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ClassifierError::invalid_hyperparameter(
                "learning_rate",
                self.learning_rate,
                "must be positive and finite",
            ));
        }
        Ok(())
    }
}
