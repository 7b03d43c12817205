//! Mini-batch training of the distance weights.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::{ModelArtifact, TrainConfig};
use crate::cluster::{Clusterer, KMeans};
use crate::error::Result;
use crate::init::standard_normal_matrix;
use crate::loss::{BinaryCrossEntropy, Loss};
use crate::metrics::{argmax_rows, AccuracyReport};
use crate::model_selection::{shuffled_batches, train_test_split_indices, TrainTestSplit, TRAIN_FRACTION};
use crate::optim::{Adam, Optimizer};
use crate::partition::{one_hot, ClassPartition};
use crate::primitives::{Matrix, Vector};
use crate::scorer::{distance_features, score_features};

/// Epoch interval between verbose loss reports.
const LOG_EVERY: usize = 100;

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    /// Learned weights and the fixed center set.
    pub artifact: ModelArtifact,
    /// Accuracy on the held-out split.
    pub report: AccuracyReport,
    /// Loss over the whole training split after the last epoch.
    pub final_loss: f64,
    /// Optimizer steps taken (one per mini-batch).
    pub steps: usize,
    /// Row indices used for training and for the held-out evaluation.
    pub split: TrainTestSplit,
}

impl TrainedModel {
    /// Overall held-out accuracy.
    #[must_use]
    pub fn accuracy(&self) -> f32 {
        self.report.accuracy
    }

    /// Held-out accuracy per class (NaN for classes absent from the split).
    #[must_use]
    pub fn per_class_accuracy(&self) -> &[f32] {
        &self.report.per_class
    }
}

/// Trains a distance-weighted logistic classifier.
///
/// Centers come from the clusterer `C` (k-means by default), weights are
/// fitted with the optimizer `O` (Adam by default).
///
/// # Example
///
/// ```
/// use kmeans_classifier::classifier::{TrainConfig, Trainer};
/// use kmeans_classifier::optim::SGD;
/// use kmeans_classifier::primitives::Matrix;
///
/// let points = Matrix::from_vec(10, 1, vec![
///     0.0, 0.1, 0.2, 0.3, 0.4,
///     9.6, 9.7, 9.8, 9.9, 10.0,
/// ]).expect("10x1");
/// let labels = [0, 0, 0, 0, 0, 1, 1, 1, 1, 1];
///
/// let config = TrainConfig::default()
///     .with_max_iterations(20)
///     .with_random_state(7);
/// let mut trainer = Trainer::new(config).with_optimizer(SGD::new(0.05));
/// let model = trainer.fit(&points, &labels, &[1, 1]).expect("valid inputs");
///
/// assert_eq!(model.artifact.weights().shape(), (2, 2));
/// assert_eq!(model.split.test.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Trainer<C = KMeans, O = Adam> {
    config: TrainConfig,
    clusterer: C,
    optimizer: O,
}

impl Trainer {
    /// Creates a trainer with k-means centers and Adam at `config.learning_rate`.
    #[must_use]
    pub fn new(config: TrainConfig) -> Self {
        let optimizer = Adam::new(config.learning_rate);
        Self {
            config,
            clusterer: KMeans::new(),
            optimizer,
        }
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new(TrainConfig::default())
    }
}

impl<C: Clusterer, O: Optimizer> Trainer<C, O> {
    /// Replaces the clustering strategy.
    #[must_use]
    pub fn with_clusterer<C2: Clusterer>(self, clusterer: C2) -> Trainer<C2, O> {
        Trainer {
            config: self.config,
            clusterer,
            optimizer: self.optimizer,
        }
    }

    /// Replaces the optimizer. Its own learning rate takes effect;
    /// `config.learning_rate` is still validated.
    #[must_use]
    pub fn with_optimizer<O2: Optimizer>(self, optimizer: O2) -> Trainer<C, O2> {
        Trainer {
            config: self.config,
            clusterer: self.clusterer,
            optimizer,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    #[must_use]
    pub fn clusterer(&self) -> &C {
        &self.clusterer
    }

    #[must_use]
    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    /// Trains with an RNG seeded from `config.random_state` (entropy if unset).
    ///
    /// # Errors
    ///
    /// See [`fit_with_rng`](Self::fit_with_rng).
    pub fn fit(&mut self, points: &Matrix<f32>, labels: &[usize], cluster_counts: &[usize]) -> Result<TrainedModel> {
        let mut rng = match self.config.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.fit_with_rng(points, labels, cluster_counts, &mut rng)
    }

    /// Trains with randomness drawn from `rng`.
    ///
    /// Clustering, the train/test split, weight initialization and batch
    /// shuffling all consume `rng` in that order.
    ///
    /// # Errors
    ///
    /// A configuration error for invalid hyperparameters, a point/label count
    /// mismatch, an empty dataset, a cluster-count vector longer than the
    /// number of classes, or a cluster count above a class population. A
    /// clustering error if the clusterer rejects a class subset.
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &mut self,
        points: &Matrix<f32>,
        labels: &[usize],
        cluster_counts: &[usize],
        rng: &mut R,
    ) -> Result<TrainedModel> {
        self.config.validate()?;
        let verbose = self.config.verbose;
        if verbose {
            info!(
                points = points.n_rows(),
                features = points.n_cols(),
                "training k-means classifier"
            );
        }

        let partition = ClassPartition::new(points, labels, cluster_counts)?;
        let n_classes = partition.n_classes();
        if verbose {
            info!(classes = n_classes, "calculating k-means clusters");
        }
        let centers = partition.build_centers(cluster_counts, &self.clusterer, rng)?;
        let n_centers = centers.n_rows();

        let split = train_test_split_indices(points.n_rows(), TRAIN_FRACTION, rng);
        let mut weights = standard_normal_matrix(n_centers, n_classes, rng);
        debug!(
            centers = n_centers,
            train = split.train.len(),
            test = split.test.len(),
            "initialized weights"
        );

        // Centers never move, so distances are computed once.
        let features = distance_features(points, &centers);
        let targets = one_hot(labels, n_classes);
        let train_features = features.select_rows(&split.train);
        let train_targets = targets.select_rows(&split.train);

        let loss = BinaryCrossEntropy;
        let batch_size = self.config.batch_size;
        let mut order = split.train.clone();
        let mut steps = 0;

        self.optimizer.reset();
        if verbose {
            info!(
                epochs = self.config.max_iterations,
                batch_size, "training using k-means clustering"
            );
        }

        for epoch in 0..self.config.max_iterations {
            for batch in shuffled_batches(&mut order, batch_size, rng) {
                let batch_features = features.select_rows(batch);
                let batch_targets = targets.select_rows(batch);
                let scores = score_features(&batch_features, &weights);
                let gradient = loss.gradient(&batch_features, &scores, &batch_targets);
                weights = apply_step(&mut self.optimizer, weights, gradient)?;
                steps += 1;
            }

            if verbose && epoch % LOG_EVERY == 0 {
                let epoch_loss = loss.compute(&score_features(&train_features, &weights), &train_targets);
                info!(epoch, loss = epoch_loss, "training progress");
            }
        }

        let final_loss = loss.compute(&score_features(&train_features, &weights), &train_targets);
        if !weights.is_finite() {
            warn!(loss = final_loss, "training produced non-finite weights");
        }

        let test_scores = score_features(&features.select_rows(&split.test), &weights);
        let predicted = argmax_rows(&test_scores);
        let truth: Vec<usize> = split.test.iter().map(|&i| labels[i]).collect();
        let report = AccuracyReport::evaluate(&predicted, &truth, n_classes);

        if verbose {
            info!(loss = final_loss, steps, "final training loss");
            info!(
                accuracy = report.accuracy_percent(),
                per_class = ?report.per_class_percent(),
                "final testing accuracy (%)"
            );
        }

        Ok(TrainedModel {
            artifact: ModelArtifact::new(weights, centers)?,
            report,
            final_loss,
            steps,
            split,
        })
    }
}

/// Runs one optimizer step on the flattened weight matrix.
fn apply_step<O: Optimizer + ?Sized>(
    optimizer: &mut O,
    weights: Matrix<f32>,
    gradient: Matrix<f32>,
) -> Result<Matrix<f32>> {
    let (rows, cols) = weights.shape();
    let mut params = Vector::from_vec(weights.into_vec());
    optimizer.step(&mut params, &Vector::from_vec(gradient.into_vec()));
    Ok(Matrix::from_vec(rows, cols, params.into_vec())?)
}
