//! K-means distance-weighted logistic classifier in pure Rust.
//!
//! Each class is summarized by a few k-means centers. A point is described
//! by its (fourth-root) distances to every center, and one logistic score per
//! class is learned over those distances with mini-batch Adam.
//!
//! # Quick Start
//!
//! ```
//! use kmeans_classifier::prelude::*;
//!
//! // two well-separated groups on a line
//! let points = Matrix::from_vec(10, 1, vec![
//!     0.0, 0.2, 0.4, 0.6, 0.8,
//!     8.0, 8.2, 8.4, 8.6, 8.8,
//! ]).expect("10x1");
//! let labels = [0, 0, 0, 0, 0, 1, 1, 1, 1, 1];
//!
//! let config = TrainConfig::default()
//!     .with_max_iterations(100)
//!     .with_random_state(1);
//! let model = train(&points, &labels, &[1, 1], &config).expect("valid inputs");
//!
//! let prediction = model.artifact.predict(&points, Some(&labels[..])).expect("shapes agree");
//! assert_eq!(prediction.labels.len(), 10);
//! assert!(prediction.report.is_some());
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`cluster`]: Clustering strategies (K-Means)
//! - [`partition`]: Per-class grouping and center construction
//! - [`scorer`]: Distance features and logistic class scores
//! - [`loss`]: Binary cross-entropy and its gradient
//! - [`optim`]: Optimization algorithms (Adam, SGD)
//! - [`init`]: Weight initialization
//! - [`model_selection`]: Train/test splitting and mini-batching
//! - [`metrics`]: Accuracy and per-class accuracy
//! - [`classifier`]: Training, prediction and model artifacts
//!
//! # Logging
//!
//! Progress is emitted as [`tracing`] events. The library never installs a
//! subscriber; binaries and tests choose their own.

pub mod classifier;
pub mod cluster;
pub mod error;
pub mod init;
pub mod loss;
pub mod metrics;
pub mod model_selection;
pub mod optim;
pub mod partition;
pub mod prelude;
pub mod primitives;
pub mod scorer;

pub use classifier::{predict, train, ModelArtifact, Prediction, TrainConfig, TrainedModel, Trainer};
pub use error::{ClassifierError, ConfigurationError, Result};
pub use primitives::{Matrix, Vector};
