//! Clustering strategies used to derive per-class centers.
//!
//! The classifier only needs "give me `k` representative points for this
//! subset", expressed by the [`Clusterer`] trait. [`KMeans`] is the shipped
//! implementation.
//!
//! # Example
//!
//! ```
//! use kmeans_classifier::cluster::{Clusterer, KMeans};
//! use kmeans_classifier::primitives::Matrix;
//! use rand::SeedableRng;
//!
//! let data = Matrix::from_vec(6, 2, vec![
//!     1.0, 1.0, 1.5, 1.5, 2.0, 2.0,
//!     10.0, 10.0, 10.5, 10.5, 11.0, 11.0,
//! ]).expect("6x2 matrix");
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let centers = KMeans::new().fit(&data, 2, &mut rng).expect("2 <= 6 samples");
//! assert_eq!(centers.shape(), (2, 2));
//! ```

mod kmeans;

pub use kmeans::{KMeans, KMeansFit};

use crate::error::Result;
use crate::primitives::Matrix;
use rand::Rng;

/// Derives `k` representative centers from a set of points.
///
/// Implementations must return a `k × n_features` matrix. `k == 0` must yield
/// an empty `0 × n_features` matrix rather than an error.
pub trait Clusterer {
    /// Computes `k` centers for `x`, drawing any randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` cannot support `k` clusters.
    fn fit<R: Rng + ?Sized>(&self, x: &Matrix<f32>, k: usize, rng: &mut R) -> Result<Matrix<f32>>;
}
