//! Property-based tests using proptest.
//!
//! These tests verify invariants of scoring, evaluation and center construction.

use kmeans_classifier::metrics::{accuracy, argmax, per_class_accuracy};
use kmeans_classifier::partition::build_centers;
use kmeans_classifier::prelude::*;
use kmeans_classifier::scorer::score;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// Strategy for generating small matrices
fn matrix_strategy(rows: usize, cols: usize, bound: f32) -> impl Strategy<Value = Matrix<f32>> {
    proptest::collection::vec(-bound..bound, rows * cols)
        .prop_map(move |data| Matrix::from_vec(rows, cols, data).expect("Test data should be valid"))
}

// (points, centers, weights) with compatible shapes; logits reach about ±33
fn model_strategy() -> impl Strategy<Value = (Matrix<f32>, Matrix<f32>, Matrix<f32>)> {
    (1usize..8, 1usize..4, 0usize..5, 1usize..4).prop_flat_map(|(n, m, k, v)| {
        (
            matrix_strategy(n, m, 5.0),
            matrix_strategy(k, m, 5.0),
            matrix_strategy(k, v, 2.0),
        )
    })
}

// label pairs over `v` classes
fn label_pairs() -> impl Strategy<Value = (Vec<usize>, Vec<usize>, usize)> {
    (1usize..5, 1usize..30).prop_flat_map(|(v, n)| {
        (
            proptest::collection::vec(0..v, n),
            proptest::collection::vec(0..v, n),
            Just(v),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn scores_in_open_unit_interval((points, centers, weights) in model_strategy()) {
        let scores = score(&points, &centers, &weights).expect("shapes agree");
        prop_assert_eq!(scores.shape(), (points.n_rows(), weights.n_cols()));
        for &p in scores.as_slice() {
            prop_assert!(p > 0.0 && p < 1.0);
        }
    }

    #[test]
    fn scorer_is_row_independent((points, centers, weights) in model_strategy()) {
        let all = score(&points, &centers, &weights).expect("shapes agree");
        for i in 0..points.n_rows() {
            let single = points.select_rows(&[i]);
            let alone = score(&single, &centers, &weights).expect("shapes agree");
            prop_assert_eq!(all.row(i), alone.row(0));
        }
    }

    #[test]
    fn predicted_labels_below_class_count((points, centers, weights) in model_strategy()) {
        let prediction = predict(&points, &weights, &centers, None).expect("shapes agree");
        prop_assert_eq!(prediction.labels.len(), points.n_rows());
        for (i, &label) in prediction.labels.iter().enumerate() {
            prop_assert!(label < weights.n_cols());
            prop_assert_eq!(label, argmax(prediction.scores.row(i)));
        }
    }

    #[test]
    fn argmax_picks_first_maximum(row in proptest::collection::vec(-3i32..3, 1..10)) {
        let values: Vec<f32> = row.iter().map(|&x| x as f32).collect();
        let best = argmax(&values);
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        prop_assert!((values[best] - max).abs() < f32::EPSILON);
        prop_assert!(values[..best].iter().all(|&x| x < max));
    }

    #[test]
    fn accuracy_is_fraction_of_matches((pred, truth, _v) in label_pairs()) {
        let hits = pred.iter().zip(&truth).filter(|(p, t)| p == t).count();
        let expected = hits as f32 / truth.len() as f32;
        prop_assert!((accuracy(&pred, &truth) - expected).abs() < 1e-6);
    }

    #[test]
    fn per_class_accuracy_definition((pred, truth, v) in label_pairs()) {
        let per_class = per_class_accuracy(&pred, &truth, v);
        prop_assert_eq!(per_class.len(), v);
        for (c, &acc) in per_class.iter().enumerate() {
            let support = truth.iter().filter(|&&t| t == c).count();
            let hits = pred.iter().zip(&truth).filter(|&(&p, &t)| p == c && t == c).count();
            if support == 0 {
                prop_assert!(acc.is_nan());
            } else {
                prop_assert!((acc - hits as f32 / support as f32).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn center_count_is_sum_of_cluster_counts(
        populations in proptest::collection::vec(1usize..6, 1..4),
        fractions in proptest::collection::vec(0.0f64..=1.0, 4),
        seed in any::<u64>(),
    ) {
        let labels: Vec<usize> = populations
            .iter()
            .enumerate()
            .flat_map(|(c, &p)| std::iter::repeat(c).take(p))
            .collect();
        let counts: Vec<usize> = populations
            .iter()
            .zip(&fractions)
            .map(|(&p, &f)| ((p as f64) * f).floor() as usize)
            .collect();
        let data: Vec<f32> = (0..labels.len() * 2).map(|i| (i % 7) as f32 + (i / 7) as f32 * 0.5).collect();
        let points = Matrix::from_vec(labels.len(), 2, data).expect("2 columns");

        let mut rng = StdRng::seed_from_u64(seed);
        let clusterer = KMeans::new().with_n_init(1);
        let centers = build_centers(&points, &labels, &counts, &clusterer, &mut rng).expect("valid inputs");

        prop_assert_eq!(centers.shape(), (counts.iter().sum::<usize>(), 2));
    }
}
