//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use kmeans_classifier::prelude::*;
//! ```

pub use crate::classifier::{predict, train, ModelArtifact, Prediction, TrainConfig, TrainedModel, Trainer};
pub use crate::cluster::{Clusterer, KMeans};
pub use crate::error::{ClassifierError, ConfigurationError, Result};
pub use crate::metrics::AccuracyReport;
pub use crate::optim::{Adam, Optimizer, SGD};
pub use crate::primitives::{Matrix, Vector};
