//! K-Means clustering algorithm.
//!
//! Uses Lloyd's algorithm with k-means++ initialization for faster convergence.

use super::Clusterer;
use crate::error::{ClassifierError, Result};
use crate::primitives::{squared_euclidean, Matrix};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// K-Means clustering algorithm.
///
/// # Algorithm
///
/// 1. Initialize centroids using k-means++ (D² sampling)
/// 2. Assign each sample to nearest centroid
/// 3. Update centroids as mean of assigned samples
/// 4. Repeat until convergence or max iterations
///
/// The whole procedure is restarted `n_init` times and the run with the
/// lowest inertia wins.
///
/// # Performance
///
/// - Time complexity: O(nkdi) per restart where n=samples, k=clusters, d=features, i=iterations
/// - Space complexity: O(nk)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KMeans {
    /// Maximum Lloyd iterations per restart.
    max_iter: usize,
    /// Convergence tolerance on centroid movement.
    tol: f32,
    /// Number of independent restarts.
    n_init: usize,
}

/// Outcome of a single k-means fit.
#[derive(Debug, Clone)]
pub struct KMeansFit {
    /// Cluster centroids (`k × n_features`).
    pub centroids: Matrix<f32>,
    /// Cluster index of each training sample.
    pub labels: Vec<usize>,
    /// Sum of squared distances to the assigned centroid.
    pub inertia: f32,
    /// Lloyd iterations used by the winning restart.
    pub n_iter: usize,
}

impl Default for KMeans {
    fn default() -> Self {
        Self::new()
    }
}

impl KMeans {
    /// Creates K-Means with 300 iterations, tolerance 1e-4 and 10 restarts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_iter: 300,
            tol: 1e-4,
            n_init: 10,
        }
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tol(mut self, tol: f32) -> Self {
        self.tol = tol;
        self
    }

    /// Sets the number of restarts (at least one is always run).
    #[must_use]
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    #[must_use]
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    #[must_use]
    pub fn tol(&self) -> f32 {
        self.tol
    }

    #[must_use]
    pub fn n_init(&self) -> usize {
        self.n_init
    }

    /// Fits `k` clusters and returns centroids, labels and inertia.
    ///
    /// # Errors
    ///
    /// Returns an error if `k > 0` and `x` has fewer than `k` samples.
    pub fn fit_detailed<R: Rng + ?Sized>(
        &self,
        x: &Matrix<f32>,
        k: usize,
        rng: &mut R,
    ) -> Result<KMeansFit> {
        let (n_samples, n_features) = x.shape();

        if k == 0 {
            return Ok(KMeansFit {
                centroids: Matrix::zeros(0, n_features),
                labels: Vec::new(),
                inertia: 0.0,
                n_iter: 0,
            });
        }
        if n_samples == 0 {
            return Err(ClassifierError::Other(
                "Cannot fit with zero samples".to_string(),
            ));
        }
        if n_samples < k {
            return Err(ClassifierError::Other(format!(
                "Number of samples ({n_samples}) must be >= number of clusters ({k})"
            )));
        }

        let mut best: Option<KMeansFit> = None;
        for _ in 0..self.n_init.max(1) {
            let run = self.run_once(x, k, rng)?;
            if best.as_ref().map_or(true, |b| run.inertia < b.inertia) {
                best = Some(run);
            }
        }

        best.ok_or_else(|| ClassifierError::Other("k-means produced no run".to_string()))
    }

    /// One k-means++ seeding followed by Lloyd iterations.
    fn run_once<R: Rng + ?Sized>(&self, x: &Matrix<f32>, k: usize, rng: &mut R) -> Result<KMeansFit> {
        let mut centroids = Self::kmeans_plusplus_init(x, k, rng)?;
        let (mut labels, mut inertia) = Self::assign_labels(x, &centroids);
        let mut n_iter = 0;

        for iter in 0..self.max_iter {
            let new_centroids = Self::update_centroids(x, &labels, &centroids);
            let converged = self.centroids_converged(&centroids, &new_centroids);
            centroids = new_centroids;
            (labels, inertia) = Self::assign_labels(x, &centroids);
            n_iter = iter + 1;

            if converged {
                break;
            }
        }

        Ok(KMeansFit {
            centroids,
            labels,
            inertia,
            n_iter,
        })
    }

    /// Initializes centroids using k-means++.
    ///
    /// Each new centroid is drawn with probability proportional to its squared
    /// distance to the nearest centroid chosen so far. When every remaining
    /// point coincides with a centroid the draw falls back to uniform.
    fn kmeans_plusplus_init<R: Rng + ?Sized>(
        x: &Matrix<f32>,
        k: usize,
        rng: &mut R,
    ) -> Result<Matrix<f32>> {
        let (n_samples, n_features) = x.shape();
        let mut chosen = Vec::with_capacity(k);
        chosen.push(rng.gen_range(0..n_samples));

        let mut min_distances: Vec<f64> = (0..n_samples)
            .map(|i| f64::from(squared_euclidean(x.row(i), x.row(chosen[0]))))
            .collect();

        while chosen.len() < k {
            let total: f64 = min_distances.iter().sum();
            let next = if total > 0.0 {
                let target = rng.gen::<f64>() * total;
                let mut cumulative = 0.0;
                let mut pick = None;
                for (i, &d) in min_distances.iter().enumerate() {
                    if d <= 0.0 {
                        continue;
                    }
                    cumulative += d;
                    pick = Some(i);
                    if cumulative >= target {
                        break;
                    }
                }
                pick.unwrap_or(0)
            } else {
                rng.gen_range(0..n_samples)
            };

            chosen.push(next);
            for (i, min_dist) in min_distances.iter_mut().enumerate() {
                let d = f64::from(squared_euclidean(x.row(i), x.row(next)));
                if d < *min_dist {
                    *min_dist = d;
                }
            }
        }

        Ok(Matrix::from_rows(
            n_features,
            chosen.iter().map(|&i| x.row(i)),
        )?)
    }

    /// Assigns each sample to the nearest centroid, returning labels and inertia.
    fn assign_labels(x: &Matrix<f32>, centroids: &Matrix<f32>) -> (Vec<usize>, f32) {
        let mut inertia = 0.0;
        let labels = x
            .rows()
            .map(|point| {
                let mut min_dist = f32::INFINITY;
                let mut min_cluster = 0;
                for (c, centroid) in centroids.rows().enumerate() {
                    let dist = squared_euclidean(point, centroid);
                    if dist < min_dist {
                        min_dist = dist;
                        min_cluster = c;
                    }
                }
                inertia += min_dist;
                min_cluster
            })
            .collect();
        (labels, inertia)
    }

    /// Updates centroids as the mean of assigned samples.
    ///
    /// A cluster that lost all of its samples keeps its previous position.
    fn update_centroids(x: &Matrix<f32>, labels: &[usize], previous: &Matrix<f32>) -> Matrix<f32> {
        let (n_clusters, n_features) = previous.shape();
        let mut sums = Matrix::zeros(n_clusters, n_features);
        let mut counts = vec![0usize; n_clusters];

        for (point, &label) in x.rows().zip(labels) {
            counts[label] += 1;
            for (j, &value) in point.iter().enumerate() {
                sums.set(label, j, sums.get(label, j) + value);
            }
        }

        for (c, &count) in counts.iter().enumerate() {
            for j in 0..n_features {
                let value = if count > 0 {
                    sums.get(c, j) / count as f32
                } else {
                    previous.get(c, j)
                };
                sums.set(c, j, value);
            }
        }

        sums
    }

    /// Checks if every centroid moved less than `tol`.
    fn centroids_converged(&self, old: &Matrix<f32>, new: &Matrix<f32>) -> bool {
        old.rows()
            .zip(new.rows())
            .all(|(a, b)| squared_euclidean(a, b) <= self.tol * self.tol)
    }
}

impl Clusterer for KMeans {
    fn fit<R: Rng + ?Sized>(&self, x: &Matrix<f32>, k: usize, rng: &mut R) -> Result<Matrix<f32>> {
        Ok(self.fit_detailed(x, k, rng)?.centroids)
    }
}
