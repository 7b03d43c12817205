//! Trained model state and prediction.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ConfigurationError, Result};
use crate::metrics::{argmax_rows, AccuracyReport};
use crate::primitives::Matrix;
use crate::scorer;

/// Weights and centers produced by training: everything prediction needs.
///
/// Invariant: `weights.n_rows() == centers.n_rows()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    weights: Matrix<f32>,
    centers: Matrix<f32>,
}

/// Output of [`predict`].
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Argmax class per point.
    pub labels: Vec<usize>,
    /// Per-class scores (`n × v`), each in (0, 1).
    pub scores: Matrix<f64>,
    /// Accuracy against the supplied labels, if any were given.
    pub report: Option<AccuracyReport>,
}

impl ModelArtifact {
    /// Pairs a `K × v` weight matrix with its `K × m` center set.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::WeightCenterMismatch`] if the row counts differ,
    /// [`ConfigurationError::NoClasses`] if the weights have no columns.
    pub fn new(weights: Matrix<f32>, centers: Matrix<f32>) -> Result<Self> {
        let artifact = Self { weights, centers };
        artifact.validate()?;
        Ok(artifact)
    }

    fn validate(&self) -> Result<()> {
        if self.weights.n_rows() != self.centers.n_rows() {
            return Err(ConfigurationError::WeightCenterMismatch {
                weight_rows: self.weights.n_rows(),
                center_rows: self.centers.n_rows(),
            }
            .into());
        }
        if self.weights.n_cols() == 0 {
            return Err(ConfigurationError::NoClasses.into());
        }
        Ok(())
    }

    #[must_use]
    pub fn weights(&self) -> &Matrix<f32> {
        &self.weights
    }

    #[must_use]
    pub fn centers(&self) -> &Matrix<f32> {
        &self.centers
    }

    /// Number of classes `v`.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.weights.n_cols()
    }

    /// Total number of centers `K`.
    #[must_use]
    pub fn n_centers(&self) -> usize {
        self.centers.n_rows()
    }

    /// Point dimension `m`.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.centers.n_cols()
    }

    /// Splits the artifact into `(weights, centers)`.
    #[must_use]
    pub fn into_parts(self) -> (Matrix<f32>, Matrix<f32>) {
        (self.weights, self.centers)
    }

    /// Per-class scores for `points` (`n × v`).
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::DimensionMismatch`] if `points` has a different
    /// dimension than the centers.
    pub fn score(&self, points: &Matrix<f32>) -> Result<Matrix<f64>> {
        scorer::score(points, &self.centers, &self.weights)
    }

    /// Labels `points` and, when `labels` is given, reports accuracy.
    ///
    /// # Errors
    ///
    /// See [`predict`].
    pub fn predict(&self, points: &Matrix<f32>, labels: Option<&[usize]>) -> Result<Prediction> {
        predict(points, &self.weights, &self.centers, labels)
    }

    /// Writes the artifact to `path` as JSON.
    ///
    /// # Errors
    ///
    /// Returns an I/O or serialization error if writing fails.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads an artifact written by [`save_json`](Self::save_json).
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, a serialization error
    /// if it is not a valid artifact, or a configuration error if the stored
    /// matrices do not fit together.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let artifact: Self = serde_json::from_reader(reader)?;
        artifact.validate()?;
        Ok(artifact)
    }
}

/// Labels `points` with frozen `weights` and `centers`.
///
/// When `labels` is supplied the returned [`Prediction`] also carries overall
/// and per-class accuracy, which are logged at info level.
///
/// # Errors
///
/// A [`ConfigurationError`] if the label count differs from the point count,
/// weight rows differ from center rows, centers and points differ in
/// dimension, or the weights have no class columns.
///
/// # Examples
///
/// ```
/// use kmeans_classifier::classifier::predict;
/// use kmeans_classifier::primitives::Matrix;
///
/// // one center per class, weights favor the nearer center
/// let centers = Matrix::from_vec(2, 1, vec![0.0, 10.0]).expect("2x1");
/// let weights = Matrix::from_vec(2, 2, vec![-1.0, 1.0, 1.0, -1.0]).expect("2x2");
/// let points = Matrix::from_vec(2, 1, vec![0.5, 9.5]).expect("2x1");
///
/// let prediction = predict(&points, &weights, &centers, Some(&[0, 1][..])).expect("valid shapes");
/// assert_eq!(prediction.labels, vec![0, 1]);
/// assert_eq!(prediction.report.map(|r| r.accuracy), Some(1.0));
/// ```
pub fn predict(
    points: &Matrix<f32>,
    weights: &Matrix<f32>,
    centers: &Matrix<f32>,
    labels: Option<&[usize]>,
) -> Result<Prediction> {
    if let Some(labels) = labels {
        if labels.len() != points.n_rows() {
            return Err(ConfigurationError::PointLabelMismatch {
                points: points.n_rows(),
                labels: labels.len(),
            }
            .into());
        }
    }
    scorer::check_shapes(points, centers, weights)?;
    if weights.n_cols() == 0 {
        return Err(ConfigurationError::NoClasses.into());
    }

    let scores = scorer::score_features(&scorer::distance_features(points, centers), weights);
    let predicted = argmax_rows(&scores);

    let report = labels.map(|truth| {
        let report = AccuracyReport::evaluate(&predicted, truth, weights.n_cols());
        info!(
            accuracy = report.accuracy_percent(),
            per_class = ?report.per_class_percent(),
            "prediction accuracy (%)"
        );
        report
    });

    Ok(Prediction {
        labels: predicted,
        scores,
        report,
    })
}
