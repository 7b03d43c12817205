//! Classification metrics for evaluating classifier performance.
//!
//! Per-class accuracy here is the fraction of points truly labeled `c` that
//! were also predicted `c` (per-class recall). A class with no true members
//! has no defined accuracy and reports `f32::NAN`.

use crate::primitives::Matrix;

/// Index of the largest value in `row`, ties broken by the lowest index.
///
/// Returns 0 for an empty row. Like numpy, the first NaN (any value not
/// equal to itself) is returned as the maximum.
///
/// # Examples
///
/// ```
/// use kmeans_classifier::metrics::argmax;
///
/// assert_eq!(argmax(&[0.2, 0.9, 0.9]), 1);
/// assert_eq!(argmax(&[0.5]), 0);
/// assert_eq!(argmax(&[0.2, f64::NAN, 0.9]), 1);
/// ```
#[must_use]
pub fn argmax<T: PartialOrd + Copy>(row: &[T]) -> usize {
    let mut best = 0;
    for (i, &value) in row.iter().enumerate() {
        if value.partial_cmp(&value).is_none() {
            return i;
        }
        if value > row[best] {
            best = i;
        }
    }
    best
}

/// Row-wise [`argmax`] of a score matrix.
#[must_use]
pub fn argmax_rows<T: PartialOrd + Copy>(scores: &Matrix<T>) -> Vec<usize> {
    scores.rows().map(argmax).collect()
}

/// Compute classification accuracy.
///
/// accuracy = `correct_predictions` / `total_predictions`
///
/// An empty evaluation set yields NaN (0 / 0).
///
/// # Panics
///
/// Panics if slices have different lengths.
///
/// # Examples
///
/// ```
/// use kmeans_classifier::metrics::accuracy;
///
/// let y_true = vec![0, 1, 2, 0, 1, 2];
/// let y_pred = vec![0, 2, 1, 0, 0, 1];
/// let acc = accuracy(&y_pred, &y_true);
/// assert!((acc - 0.333333).abs() < 0.001);
/// ```
#[must_use]
pub fn accuracy(y_pred: &[usize], y_true: &[usize]) -> f32 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");

    let correct = y_pred
        .iter()
        .zip(y_true.iter())
        .filter(|(p, t)| p == t)
        .count();

    correct as f32 / y_true.len() as f32
}

/// Accuracy restricted to each true class `0..n_classes`.
///
/// `result[c] = |pred == c ∧ true == c| / |true == c|`, NaN when class `c`
/// does not occur in `y_true`.
///
/// # Panics
///
/// Panics if slices have different lengths.
///
/// # Examples
///
/// ```
/// use kmeans_classifier::metrics::per_class_accuracy;
///
/// let y_true = vec![0, 0, 1, 1];
/// let y_pred = vec![0, 1, 1, 1];
/// let acc = per_class_accuracy(&y_pred, &y_true, 3);
/// assert!((acc[0] - 0.5).abs() < 1e-6);
/// assert!((acc[1] - 1.0).abs() < 1e-6);
/// assert!(acc[2].is_nan());
/// ```
#[must_use]
pub fn per_class_accuracy(y_pred: &[usize], y_true: &[usize], n_classes: usize) -> Vec<f32> {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");

    let mut hits = vec![0usize; n_classes];
    let mut support = vec![0usize; n_classes];
    for (&p, &t) in y_pred.iter().zip(y_true) {
        if t < n_classes {
            support[t] += 1;
            if p == t {
                hits[t] += 1;
            }
        }
    }

    hits.iter()
        .zip(&support)
        .map(|(&h, &s)| h as f32 / s as f32)
        .collect()
}

/// Overall and per-class accuracy of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyReport {
    /// Fraction of correctly labeled points (NaN for an empty set).
    pub accuracy: f32,
    /// Per-class accuracy, indexed by class (NaN for absent classes).
    pub per_class: Vec<f32>,
}

impl AccuracyReport {
    /// Scores predictions against the truth for classes `0..n_classes`.
    ///
    /// # Panics
    ///
    /// Panics if slices have different lengths.
    #[must_use]
    pub fn evaluate(y_pred: &[usize], y_true: &[usize], n_classes: usize) -> Self {
        Self {
            accuracy: accuracy(y_pred, y_true),
            per_class: per_class_accuracy(y_pred, y_true, n_classes),
        }
    }

    /// Per-class accuracies as percentages rounded to two decimals.
    #[must_use]
    pub fn per_class_percent(&self) -> Vec<f32> {
        self.per_class.iter().map(|&a| round_percent(a)).collect()
    }

    /// Overall accuracy as a percentage rounded to two decimals.
    #[must_use]
    pub fn accuracy_percent(&self) -> f32 {
        round_percent(self.accuracy)
    }
}

fn round_percent(fraction: f32) -> f32 {
    (fraction * 10_000.0).round() / 100.0
}

#[cfg(test)]
#[path = "tests_classification_contract.rs"]
mod tests_classification_contract;
