//! The k-means distance-weighted logistic classifier.
//!
//! Training derives a fixed set of centers per class with a [`Clusterer`],
//! then fits one weight per (center, class) pair so that
//! `σ(Σ_k d(x, g_k) · w[k][c])` scores class `c`. Prediction takes the
//! highest-scoring class.
//!
//! # Example
//!
//! ```
//! use kmeans_classifier::classifier::{predict, train, TrainConfig};
//! use kmeans_classifier::primitives::Matrix;
//!
//! let points = Matrix::from_vec(10, 2, vec![
//!     0.0, 0.0,  0.2, 0.1,  0.1, 0.3,  0.3, 0.2,  0.2, 0.2,
//!     5.0, 5.0,  5.2, 5.1,  5.1, 5.3,  5.3, 5.2,  5.2, 5.2,
//! ]).expect("10x2");
//! let labels = [0, 0, 0, 0, 0, 1, 1, 1, 1, 1];
//!
//! let config = TrainConfig::default()
//!     .with_max_iterations(50)
//!     .with_random_state(42);
//! let model = train(&points, &labels, &[1, 1], &config).expect("valid inputs");
//!
//! let artifact = &model.artifact;
//! let prediction = predict(&points, artifact.weights(), artifact.centers(), None)
//!     .expect("shapes agree");
//! assert_eq!(prediction.scores.shape(), (10, 2));
//! assert!(prediction.labels.iter().all(|&l| l < 2));
//! ```
//!
//! [`Clusterer`]: crate::cluster::Clusterer

mod artifact;
mod config;
mod trainer;

pub use artifact::{predict, ModelArtifact, Prediction};
pub use config::TrainConfig;
pub use trainer::{TrainedModel, Trainer};

use crate::error::Result;
use crate::primitives::Matrix;

/// Trains with k-means centers and Adam, using `config` for everything else.
///
/// `cluster_counts[c]` is the number of centers for class `c`; classes
/// without an entry get none.
///
/// # Errors
///
/// See [`Trainer::fit_with_rng`].
pub fn train(
    points: &Matrix<f32>,
    labels: &[usize],
    cluster_counts: &[usize],
    config: &TrainConfig,
) -> Result<TrainedModel> {
    Trainer::new(config.clone()).fit(points, labels, cluster_counts)
}
