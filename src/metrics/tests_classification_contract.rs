// =========================================================================
// FALSIFY-MC: accuracy bookkeeping contract
//
// Invariants checked:
//   - accuracy ∈ [0, 1] and equals mean(pred == true)
//   - per-class accuracy = hits(c) / support(c), NaN when support(c) = 0
//   - argmax is strict with lowest-index tie-breaking
//   - argmax returns the first NaN, as numpy does
// =========================================================================

use super::*;

/// FALSIFY-MC-001: Accuracy ∈ [0, 1]
#[test]
fn falsify_mc_001_accuracy_bounded() {
    let y_true = vec![0, 1, 2, 0, 1, 2];
    let y_pred = vec![0, 2, 1, 0, 0, 1];

    let acc = accuracy(&y_pred, &y_true);
    assert!(
        (0.0..=1.0).contains(&acc),
        "FALSIFIED MC-001: accuracy={acc} not in [0, 1]"
    );
}

/// FALSIFY-MC-002: Perfect predictions → accuracy = 1.0
#[test]
fn falsify_mc_002_perfect_accuracy() {
    let y = vec![0, 1, 2, 0, 1, 2];
    let acc = accuracy(&y, &y);
    assert!(
        (acc - 1.0).abs() < 1e-6,
        "FALSIFIED MC-002: accuracy={acc} for perfect predictions, expected 1.0"
    );
}

/// FALSIFY-MC-003: Empty evaluation set → NaN, not a panic
#[test]
fn falsify_mc_003_empty_accuracy_is_nan() {
    let acc = accuracy(&[], &[]);
    assert!(acc.is_nan(), "FALSIFIED MC-003: accuracy={acc}, expected NaN");
}

/// FALSIFY-MC-004: Per-class accuracy = hits / support
#[test]
fn falsify_mc_004_per_class_ratio() {
    let y_true = vec![0, 0, 0, 1, 1, 2];
    let y_pred = vec![0, 1, 0, 1, 0, 2];
    let acc = per_class_accuracy(&y_pred, &y_true, 3);

    assert!((acc[0] - 2.0 / 3.0).abs() < 1e-6, "FALSIFIED MC-004: class 0 = {}", acc[0]);
    assert!((acc[1] - 0.5).abs() < 1e-6, "FALSIFIED MC-004: class 1 = {}", acc[1]);
    assert!((acc[2] - 1.0).abs() < 1e-6, "FALSIFIED MC-004: class 2 = {}", acc[2]);
}

/// FALSIFY-MC-005: Class absent from the truth → NaN
#[test]
fn falsify_mc_005_absent_class_nan() {
    let acc = per_class_accuracy(&[0, 0], &[0, 0], 2);
    assert!((acc[0] - 1.0).abs() < 1e-6);
    assert!(acc[1].is_nan(), "FALSIFIED MC-005: class 1 = {}, expected NaN", acc[1]);
}

/// FALSIFY-MC-006: True labels beyond n_classes are ignored per class
#[test]
fn falsify_mc_006_out_of_range_truth_ignored() {
    let acc = per_class_accuracy(&[0, 5], &[0, 5], 1);
    assert_eq!(acc.len(), 1);
    assert!((acc[0] - 1.0).abs() < 1e-6);
}

/// FALSIFY-MC-007: argmax ties resolve to the lowest index
#[test]
fn falsify_mc_007_argmax_ties_lowest() {
    assert_eq!(argmax(&[0.3, 0.7, 0.7, 0.1]), 1);
    assert_eq!(argmax(&[0.5, 0.5]), 0);
    assert_eq!(argmax::<f32>(&[]), 0);
}

/// FALSIFY-MC-008: argmax_rows yields one label per row, each < n_cols
#[test]
fn falsify_mc_008_argmax_rows() {
    let scores = Matrix::from_vec(3, 2, vec![0.9, 0.1, 0.2, 0.8, 0.5, 0.5]).expect("3x2");
    let labels = argmax_rows(&scores);
    assert_eq!(labels, vec![0, 1, 0]);
    assert!(labels.iter().all(|&l| l < 2));
}

/// FALSIFY-MC-009: Report agrees with the free functions
#[test]
fn falsify_mc_009_report_consistent() {
    let y_true = vec![0, 1, 1, 2];
    let y_pred = vec![0, 1, 2, 2];
    let report = AccuracyReport::evaluate(&y_pred, &y_true, 3);

    assert!((report.accuracy - 0.75).abs() < 1e-6);
    assert_eq!(report.per_class, per_class_accuracy(&y_pred, &y_true, 3));
    assert!((report.accuracy_percent() - 75.0).abs() < 1e-4);
    assert!((report.per_class_percent()[1] - 50.0).abs() < 1e-4);
}

/// FALSIFY-MC-010: The first NaN is the argmax, wherever it sits
#[test]
fn falsify_mc_010_argmax_first_nan_wins() {
    assert_eq!(argmax(&[f32::NAN, 0.5]), 0);
    assert_eq!(argmax(&[0.1, f32::NAN, 0.9]), 1);
    assert_eq!(argmax(&[0.9, 0.1, f64::NAN, f64::NAN]), 2);
    assert_eq!(argmax_rows(&Matrix::from_vec(2, 2, vec![0.2, f32::NAN, 0.7, 0.3]).expect("2x2")), vec![1, 0]);
}
