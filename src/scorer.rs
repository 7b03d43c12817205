//! Distance-weighted logistic scoring.
//!
//! A point is described by its distances to every center, passed through a
//! fourth root:
//!
//! ```text
//! d[i][k] = (Σ_j (x[i][j] - g[k][j])²)^(1/4)
//! ```
//!
//! Class scores are a logistic link over a weighted sum of those features:
//!
//! ```text
//! ŷ[i][c] = σ(Σ_k d[i][k] · w[k][c])
//! ```
//!
//! Each class is scored independently, so rows of `ŷ` need not sum to one.
//! Every output row depends only on the matching input row.
//!
//! Coordinates, distances and weights are `f32`, but the logit is
//! accumulated and the sigmoid evaluated in `f64`. In `f32`, σ(z) already
//! rounds to 1.0 near z ≈ 17, which would turn distinct class scores into ties.

use crate::error::{ConfigurationError, Result};
use crate::primitives::{squared_euclidean, Matrix};

/// Sigmoid activation function: σ(z) = 1 / (1 + e^(-z))
#[must_use]
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Fourth-root distance from every point to every center (`n × K`).
///
/// # Panics
///
/// Panics in debug builds if points and centers differ in dimension.
#[must_use]
pub fn distance_features(points: &Matrix<f32>, centers: &Matrix<f32>) -> Matrix<f32> {
    let (n, k) = (points.n_rows(), centers.n_rows());
    let mut features = Matrix::zeros(n, k);

    for (i, x) in points.rows().enumerate() {
        for (c, g) in centers.rows().enumerate() {
            features.set(i, c, squared_euclidean(x, g).sqrt().sqrt());
        }
    }
    features
}

/// Applies the weights to precomputed features: `σ(features · weights)` (`n × v`, `f64`).
///
/// # Panics
///
/// Panics if `features` has a different number of columns than `weights` has rows.
#[must_use]
pub fn score_features(features: &Matrix<f32>, weights: &Matrix<f32>) -> Matrix<f64> {
    assert_eq!(
        features.n_cols(),
        weights.n_rows(),
        "feature columns must match weight rows"
    );

    let v = weights.n_cols();
    let mut scores = Matrix::filled(features.n_rows(), v, 0.0_f64);

    for (i, d) in features.rows().enumerate() {
        for c in 0..v {
            let z: f64 = d
                .iter()
                .enumerate()
                .map(|(k, &d_ik)| f64::from(d_ik) * f64::from(weights.get(k, c)))
                .sum();
            scores.set(i, c, sigmoid(z));
        }
    }
    scores
}

/// Checks that `centers` and `weights` can score `points`.
///
/// # Errors
///
/// [`ConfigurationError::WeightCenterMismatch`] if weight rows differ from
/// center rows, [`ConfigurationError::DimensionMismatch`] if centers and
/// points differ in dimension.
pub fn check_shapes(points: &Matrix<f32>, centers: &Matrix<f32>, weights: &Matrix<f32>) -> Result<()> {
    if weights.n_rows() != centers.n_rows() {
        return Err(ConfigurationError::WeightCenterMismatch {
            weight_rows: weights.n_rows(),
            center_rows: centers.n_rows(),
        }
        .into());
    }
    if centers.n_cols() != points.n_cols() {
        return Err(ConfigurationError::DimensionMismatch {
            center_dim: centers.n_cols(),
            point_dim: points.n_cols(),
        }
        .into());
    }
    Ok(())
}

/// Per-class scores in (0, 1) for every point (`n × v`).
///
/// # Errors
///
/// See [`check_shapes`].
///
/// # Examples
///
/// ```
/// use kmeans_classifier::primitives::Matrix;
/// use kmeans_classifier::scorer::score;
///
/// let points = Matrix::from_vec(1, 2, vec![0.0, 0.0]).expect("1x2");
/// let centers = Matrix::from_vec(1, 2, vec![3.0, 4.0]).expect("1x2");
/// let weights = Matrix::from_vec(1, 1, vec![0.0]).expect("1x1");
///
/// let scores = score(&points, &centers, &weights).expect("shapes agree");
/// assert!((scores.get(0, 0) - 0.5).abs() < 1e-6);
/// ```
pub fn score(points: &Matrix<f32>, centers: &Matrix<f32>, weights: &Matrix<f32>) -> Result<Matrix<f64>> {
    check_shapes(points, centers, weights)?;
    Ok(score_features(&distance_features(points, centers), weights))
}
