//! Multi-label binary cross-entropy and its gradient.
//!
//! Every (point, class) score is treated as an independent Bernoulli
//! prediction. The loss is averaged over both points and classes:
//!
//! ```text
//! L = -(1 / (n·v)) Σ_i Σ_c [ y·ln(ŷ + ε) + (1 - y)·ln(1 - ŷ + ε) ]
//! ```
//!
//! Scores are `f64` (see [`scorer`](crate::scorer)); one-hot targets stay `f32`.
//!
//! # Usage
//!
//! ```
//! use kmeans_classifier::loss::{binary_cross_entropy, BinaryCrossEntropy, Loss};
//! use kmeans_classifier::primitives::Matrix;
//!
//! let scores = Matrix::from_vec(1, 2, vec![0.9_f64, 0.1]).expect("1x2");
//! let targets = Matrix::from_vec(1, 2, vec![1.0_f32, 0.0]).expect("1x2");
//!
//! let loss = binary_cross_entropy(&scores, &targets);
//! assert!((loss - BinaryCrossEntropy.compute(&scores, &targets)).abs() < 1e-7);
//! assert!(loss < 0.11);
//! ```

use crate::primitives::Matrix;

/// Added inside both logarithms so saturated scores stay finite.
pub const EPSILON: f64 = 1e-7;

/// Mean binary cross-entropy over every entry of `scores`.
///
/// Returns NaN for an empty matrix.
///
/// # Panics
///
/// Panics if `scores` and `targets` have different shapes.
#[must_use]
pub fn binary_cross_entropy(scores: &Matrix<f64>, targets: &Matrix<f32>) -> f64 {
    assert_eq!(
        scores.shape(),
        targets.shape(),
        "Scores and targets must have same shape"
    );

    let total: f64 = scores
        .as_slice()
        .iter()
        .zip(targets.as_slice())
        .map(|(&p, &y)| {
            let y = f64::from(y);
            -(y * (p + EPSILON).ln() + (1.0 - y) * (1.0 - p + EPSILON).ln())
        })
        .sum();

    total / scores.as_slice().len() as f64
}

/// Trait for losses over score matrices.
pub trait Loss {
    /// Computes the loss between scores and targets of the same shape.
    fn compute(&self, scores: &Matrix<f64>, targets: &Matrix<f32>) -> f64;

    /// Returns the name of the loss function.
    fn name(&self) -> &str;
}

/// Binary cross-entropy for the distance-weighted logistic model.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCrossEntropy;

impl BinaryCrossEntropy {
    /// Gradient of the mean loss with respect to the weights (`K × v`).
    ///
    /// Accumulated in `f64` and rounded to `f32` once, to match the weights.
    ///
    /// `features` are the `n × K` distance features the `scores` were
    /// produced from. The chain rule runs through the logistic link:
    ///
    /// ```text
    /// g[i][c]    = (-y/(ŷ+ε) + (1-y)/(1-ŷ+ε)) · ŷ(1-ŷ) / (n·v)
    /// ∇w[k][c]   = Σ_i d[i][k] · g[i][c]
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `scores` and `targets` differ in shape or `features` has a
    /// different number of rows.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn gradient(&self, features: &Matrix<f32>, scores: &Matrix<f64>, targets: &Matrix<f32>) -> Matrix<f32> {
        assert_eq!(
            scores.shape(),
            targets.shape(),
            "Scores and targets must have same shape"
        );
        assert_eq!(
            features.n_rows(),
            scores.n_rows(),
            "Features and scores must have same number of rows"
        );

        let (n, v) = scores.shape();
        let k = features.n_cols();
        let scale = 1.0 / (n * v) as f64;

        let mut acc = vec![0.0_f64; k * v];
        for i in 0..n {
            let d = features.row(i);
            for c in 0..v {
                let p = scores.get(i, c);
                let y = f64::from(targets.get(i, c));
                let dl_dp = -(y / (p + EPSILON)) + (1.0 - y) / (1.0 - p + EPSILON);
                let g = dl_dp * p * (1.0 - p) * scale;
                if g == 0.0 {
                    continue;
                }
                for (j, &d_ij) in d.iter().enumerate() {
                    acc[j * v + c] += f64::from(d_ij) * g;
                }
            }
        }

        let mut grad = Matrix::zeros(k, v);
        for (dst, &src) in grad.as_mut_slice().iter_mut().zip(&acc) {
            *dst = src as f32;
        }
        grad
    }
}

impl Loss for BinaryCrossEntropy {
    fn compute(&self, scores: &Matrix<f64>, targets: &Matrix<f32>) -> f64 {
        binary_cross_entropy(scores, targets)
    }

    fn name(&self) -> &'static str {
        "BinaryCrossEntropy"
    }
}
