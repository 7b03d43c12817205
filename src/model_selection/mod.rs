//! Index bookkeeping for hold-out evaluation and mini-batching.
//!
//! Everything here works on row indices rather than copies of the data, and
//! draws randomness from the caller's RNG.

use rand::seq::SliceRandom;
use rand::Rng;

/// Fraction of points reserved for training by the classifier.
pub const TRAIN_FRACTION: f64 = 0.8;

/// Row indices of a random train/test partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    /// Indices used for optimization.
    pub train: Vec<usize>,
    /// Held-out indices used for accuracy reporting.
    pub test: Vec<usize>,
}

/// Returns `0..n_samples` in random order.
pub fn shuffle_indices<R: Rng + ?Sized>(n_samples: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n_samples).collect();
    indices.shuffle(rng);
    indices
}

/// Number of training rows for a given sample count: `⌊fraction · n⌋`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn train_size(n_samples: usize, train_fraction: f64) -> usize {
    ((n_samples as f64 * train_fraction).floor() as usize).min(n_samples)
}

/// Randomly permutes `0..n_samples` and splits it into train and test parts.
///
/// The first `⌊train_fraction · n⌋` shuffled indices train, the rest test.
/// Either side may be empty for tiny datasets.
///
/// # Examples
///
/// ```
/// use kmeans_classifier::model_selection::train_test_split_indices;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let split = train_test_split_indices(10, 0.8, &mut rng);
/// assert_eq!(split.train.len(), 8);
/// assert_eq!(split.test.len(), 2);
/// ```
pub fn train_test_split_indices<R: Rng + ?Sized>(
    n_samples: usize,
    train_fraction: f64,
    rng: &mut R,
) -> TrainTestSplit {
    let mut indices = shuffle_indices(n_samples, rng);
    let test = indices.split_off(train_size(n_samples, train_fraction));
    TrainTestSplit {
        train: indices,
        test,
    }
}

/// Shuffles `indices` in place and returns consecutive mini-batches.
///
/// Every batch has `batch_size` indices except possibly the last one.
///
/// # Panics
///
/// Panics if `batch_size` is zero.
pub fn shuffled_batches<'a, R: Rng + ?Sized>(
    indices: &'a mut [usize],
    batch_size: usize,
    rng: &mut R,
) -> std::slice::Chunks<'a, usize> {
    indices.shuffle(rng);
    indices.chunks(batch_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut indices = shuffle_indices(50, &mut rng);
        indices.sort_unstable();
        assert_eq!(indices, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_train_size_floors() {
        assert_eq!(train_size(10, 0.8), 8);
        assert_eq!(train_size(9, 0.8), 7);
        assert_eq!(train_size(4, 0.8), 3);
        assert_eq!(train_size(1, 0.8), 0);
        assert_eq!(train_size(0, 0.8), 0);
    }

    #[test]
    fn test_split_covers_all_indices_once() {
        let mut rng = StdRng::seed_from_u64(11);
        let split = train_test_split_indices(23, TRAIN_FRACTION, &mut rng);
        assert_eq!(split.train.len(), 18);
        assert_eq!(split.test.len(), 5);

        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..23).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_reproducible_with_seed() {
        let a = train_test_split_indices(40, 0.8, &mut StdRng::seed_from_u64(9));
        let b = train_test_split_indices(40, 0.8, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_split_different_seeds_differ() {
        let a = train_test_split_indices(40, 0.8, &mut StdRng::seed_from_u64(1));
        let b = train_test_split_indices(40, 0.8, &mut StdRng::seed_from_u64(2));
        assert_ne!(a.train, b.train);
    }

    #[test]
    fn test_batches_sizes() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut indices: Vec<usize> = (0..11).collect();
        let sizes: Vec<usize> = shuffled_batches(&mut indices, 4, &mut rng)
            .map(<[usize]>::len)
            .collect();
        assert_eq!(sizes, vec![4, 4, 3]);
    }

    #[test]
    fn test_batches_larger_than_data() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut indices: Vec<usize> = (0..3).collect();
        let batches: Vec<&[usize]> = shuffled_batches(&mut indices, 500, &mut rng).collect();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 3);
    }

    #[test]
    fn test_batches_empty_indices() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut indices: Vec<usize> = Vec::new();
        assert_eq!(shuffled_batches(&mut indices, 4, &mut rng).count(), 0);
    }
}
