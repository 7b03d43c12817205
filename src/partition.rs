//! Per-class partitioning and center construction.
//!
//! Points are grouped by label, each group is handed to a [`Clusterer`]
//! with that class's requested cluster count, and the resulting centers are
//! stacked in class order `0..v`. Center row `i` therefore belongs to the
//! class whose cumulative cluster count first exceeds `i`.

use crate::cluster::Clusterer;
use crate::error::{ClassifierError, ConfigurationError, Result};
use crate::primitives::Matrix;
use rand::Rng;
use tracing::debug;

/// Number of classes implied by a label slice: `max(label) + 1`, or 0 if empty.
#[must_use]
pub fn n_classes(labels: &[usize]) -> usize {
    labels.iter().max().map_or(0, |&m| m + 1)
}

/// Number of points carrying each label in `0..n_classes`.
#[must_use]
pub fn class_populations(labels: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &label in labels {
        if label < n_classes {
            counts[label] += 1;
        }
    }
    counts
}

/// One-hot encoding of `labels` as an `n × n_classes` matrix of 0.0 / 1.0.
///
/// # Examples
///
/// ```
/// use kmeans_classifier::partition::one_hot;
///
/// let y = one_hot(&[1, 0], 3);
/// assert_eq!(y.as_slice(), &[0.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
/// ```
#[must_use]
pub fn one_hot(labels: &[usize], n_classes: usize) -> Matrix<f32> {
    let mut encoded = Matrix::zeros(labels.len(), n_classes);
    for (i, &label) in labels.iter().enumerate() {
        if label < n_classes {
            encoded.set(i, label, 1.0);
        }
    }
    encoded
}

/// Checks the training preconditions and returns the number of classes.
///
/// # Errors
///
/// Returns a [`ConfigurationError`] if the dataset is empty, point and label
/// counts differ, `cluster_counts` is longer than the number of classes, or
/// any class is asked for more centers than it has points.
pub fn validate_training_inputs(
    points: &Matrix<f32>,
    labels: &[usize],
    cluster_counts: &[usize],
) -> Result<usize> {
    if points.n_rows() != labels.len() {
        return Err(ConfigurationError::PointLabelMismatch {
            points: points.n_rows(),
            labels: labels.len(),
        }
        .into());
    }
    if labels.is_empty() {
        return Err(ConfigurationError::EmptyDataset.into());
    }

    let n_classes = n_classes(labels);
    if cluster_counts.len() > n_classes {
        return Err(ConfigurationError::ClusterCountsTooLong {
            len: cluster_counts.len(),
            n_classes,
        }
        .into());
    }

    let populations = class_populations(labels, n_classes);
    for (class, (&requested, &population)) in cluster_counts.iter().zip(&populations).enumerate() {
        if requested > population {
            return Err(ConfigurationError::ClusterCountExceedsPopulation {
                class,
                requested,
                population,
            }
            .into());
        }
    }

    Ok(n_classes)
}

/// A dataset split into one point matrix per class.
#[derive(Debug, Clone)]
pub struct ClassPartition {
    subsets: Vec<Matrix<f32>>,
    n_features: usize,
}

impl ClassPartition {
    /// Validates the inputs and groups points by label.
    ///
    /// # Errors
    ///
    /// See [`validate_training_inputs`].
    pub fn new(points: &Matrix<f32>, labels: &[usize], cluster_counts: &[usize]) -> Result<Self> {
        let n_classes = validate_training_inputs(points, labels, cluster_counts)?;
        let n_features = points.n_cols();

        let mut members: Vec<Vec<usize>> = vec![Vec::new(); n_classes];
        for (i, &label) in labels.iter().enumerate() {
            members[label].push(i);
        }
        let subsets = members.iter().map(|idx| points.select_rows(idx)).collect();

        Ok(Self {
            subsets,
            n_features,
        })
    }

    /// Number of classes `v`.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.subsets.len()
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Points labeled `class`.
    ///
    /// # Panics
    ///
    /// Panics if `class >= n_classes()`.
    #[must_use]
    pub fn subset(&self, class: usize) -> &Matrix<f32> {
        &self.subsets[class]
    }

    /// Class populations in class order.
    #[must_use]
    pub fn populations(&self) -> Vec<usize> {
        self.subsets.iter().map(Matrix::n_rows).collect()
    }

    /// Clusters every class and stacks the centers in class order.
    ///
    /// Classes without an entry in `cluster_counts` get no centers.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::Clustering`] if the clusterer rejects a
    /// subset, or an error if it returns centers of the wrong shape.
    pub fn build_centers<C, R>(
        &self,
        cluster_counts: &[usize],
        clusterer: &C,
        rng: &mut R,
    ) -> Result<Matrix<f32>>
    where
        C: Clusterer,
        R: Rng + ?Sized,
    {
        let mut centers = Matrix::zeros(0, self.n_features);

        for (class, subset) in self.subsets.iter().enumerate() {
            let k = cluster_counts.get(class).copied().unwrap_or(0);
            let class_centers =
                clusterer
                    .fit(subset, k, rng)
                    .map_err(|e| ClassifierError::Clustering {
                        class,
                        message: e.to_string(),
                    })?;

            if class_centers.shape() != (k, self.n_features) {
                return Err(ClassifierError::Clustering {
                    class,
                    message: format!(
                        "expected {k}x{} centers, got {}x{}",
                        self.n_features,
                        class_centers.n_rows(),
                        class_centers.n_cols()
                    ),
                });
            }

            debug!(class, population = subset.n_rows(), centers = k, "clustered class");
            centers.append_rows(&class_centers)?;
        }

        Ok(centers)
    }
}

/// Validates, partitions and clusters in one call; returns the `Σk × m` center set.
///
/// # Errors
///
/// See [`ClassPartition::new`] and [`ClassPartition::build_centers`].
pub fn build_centers<C, R>(
    points: &Matrix<f32>,
    labels: &[usize],
    cluster_counts: &[usize],
    clusterer: &C,
    rng: &mut R,
) -> Result<Matrix<f32>>
where
    C: Clusterer,
    R: Rng + ?Sized,
{
    ClassPartition::new(points, labels, cluster_counts)?.build_centers(cluster_counts, clusterer, rng)
}

#[cfg(test)]
#[path = "partition_tests.rs"]
mod tests;
