use super::*;
use crate::cluster::KMeans;
use crate::error::ClassifierError;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Returns the first `k` rows of the subset, so centers are predictable.
struct FirstRows;

impl Clusterer for FirstRows {
    fn fit<R: Rng + ?Sized>(&self, x: &Matrix<f32>, k: usize, _rng: &mut R) -> Result<Matrix<f32>> {
        let idx: Vec<usize> = (0..k).collect();
        Ok(x.select_rows(&idx))
    }
}

/// Always returns a single 1-wide center regardless of the request.
struct WrongShape;

impl Clusterer for WrongShape {
    fn fit<R: Rng + ?Sized>(&self, _x: &Matrix<f32>, _k: usize, _rng: &mut R) -> Result<Matrix<f32>> {
        Ok(Matrix::zeros(1, 1))
    }
}

fn dataset() -> (Matrix<f32>, Vec<usize>) {
    // class 1 listed first on purpose
    let points = Matrix::from_vec(
        6,
        2,
        vec![
            10.0, 10.0, // 1
            0.0, 0.0, // 0
            11.0, 11.0, // 1
            0.5, 0.5, // 0
            20.0, 0.0, // 2
            1.0, 1.0, // 0
        ],
    )
    .expect("6x2");
    (points, vec![1, 0, 1, 0, 2, 0])
}

fn config_kind(err: &ClassifierError) -> &ConfigurationError {
    err.as_configuration().expect("configuration error")
}

#[test]
fn test_n_classes_and_populations() {
    assert_eq!(n_classes(&[]), 0);
    assert_eq!(n_classes(&[0, 3, 1]), 4);
    assert_eq!(class_populations(&[0, 3, 1, 3], 4), vec![1, 1, 0, 2]);
}

#[test]
fn test_one_hot_rows() {
    let y = one_hot(&[2, 0, 1], 3);
    assert_eq!(y.shape(), (3, 3));
    assert_eq!(y.row(0), &[0.0, 0.0, 1.0]);
    assert_eq!(y.row(1), &[1.0, 0.0, 0.0]);
    assert_eq!(y.row(2), &[0.0, 1.0, 0.0]);
}

#[test]
fn test_validate_ok() {
    let (points, labels) = dataset();
    assert_eq!(validate_training_inputs(&points, &labels, &[2, 1, 1]).expect("valid"), 3);
}

#[test]
fn test_validate_point_label_mismatch() {
    let points = Matrix::zeros(10, 2);
    let labels = vec![0; 8];
    let err = validate_training_inputs(&points, &labels, &[1]).unwrap_err();
    assert_eq!(
        config_kind(&err),
        &ConfigurationError::PointLabelMismatch {
            points: 10,
            labels: 8
        }
    );
}

#[test]
fn test_validate_cluster_counts_too_long() {
    let (points, labels) = dataset();
    let err = validate_training_inputs(&points, &labels, &[1, 1, 1, 1]).unwrap_err();
    assert_eq!(
        config_kind(&err),
        &ConfigurationError::ClusterCountsTooLong { len: 4, n_classes: 3 }
    );
}

#[test]
fn test_validate_cluster_count_exceeds_population() {
    let points = Matrix::zeros(3, 2);
    let err = validate_training_inputs(&points, &[0, 0, 0], &[5]).unwrap_err();
    assert_eq!(
        config_kind(&err),
        &ConfigurationError::ClusterCountExceedsPopulation {
            class: 0,
            requested: 5,
            population: 3
        }
    );
}

#[test]
fn test_validate_empty_dataset() {
    let err = validate_training_inputs(&Matrix::zeros(0, 2), &[], &[]).unwrap_err();
    assert_eq!(config_kind(&err), &ConfigurationError::EmptyDataset);
}

#[test]
fn test_partition_groups_in_label_order() {
    let (points, labels) = dataset();
    let partition = ClassPartition::new(&points, &labels, &[1, 1, 1]).expect("valid");

    assert_eq!(partition.n_classes(), 3);
    assert_eq!(partition.n_features(), 2);
    assert_eq!(partition.populations(), vec![3, 2, 1]);
    assert_eq!(partition.subset(0).as_slice(), &[0.0, 0.0, 0.5, 0.5, 1.0, 1.0]);
    assert_eq!(partition.subset(1).as_slice(), &[10.0, 10.0, 11.0, 11.0]);
    assert_eq!(partition.subset(2).as_slice(), &[20.0, 0.0]);
}

#[test]
fn test_centers_concatenated_in_class_order() {
    let (points, labels) = dataset();
    let mut rng = StdRng::seed_from_u64(0);
    let centers = build_centers(&points, &labels, &[2, 1, 1], &FirstRows, &mut rng).expect("valid");

    assert_eq!(centers.shape(), (4, 2));
    assert_eq!(centers.row(0), &[0.0, 0.0]);
    assert_eq!(centers.row(1), &[0.5, 0.5]);
    assert_eq!(centers.row(2), &[10.0, 10.0]);
    assert_eq!(centers.row(3), &[20.0, 0.0]);
}

#[test]
fn test_short_cluster_counts_give_no_centers_for_tail() {
    let (points, labels) = dataset();
    let mut rng = StdRng::seed_from_u64(0);
    let centers = build_centers(&points, &labels, &[1], &FirstRows, &mut rng).expect("valid");
    assert_eq!(centers.shape(), (1, 2));
}

#[test]
fn test_center_count_is_sum_with_kmeans() {
    let (points, labels) = dataset();
    let mut rng = StdRng::seed_from_u64(3);
    let centers = build_centers(&points, &labels, &[3, 2, 0], &KMeans::new(), &mut rng).expect("valid");
    assert_eq!(centers.shape(), (5, 2));
    // class 1 centers are its two points, in some order
    let class1: Vec<&[f32]> = vec![centers.row(3), centers.row(4)];
    assert!(class1.contains(&&[10.0_f32, 10.0][..]));
    assert!(class1.contains(&&[11.0_f32, 11.0][..]));
}

#[test]
fn test_wrong_shaped_centers_rejected() {
    let (points, labels) = dataset();
    let mut rng = StdRng::seed_from_u64(0);
    let err = build_centers(&points, &labels, &[1, 1, 1], &WrongShape, &mut rng).unwrap_err();
    assert!(matches!(err, ClassifierError::Clustering { class: 0, .. }));
}

#[test]
fn test_validation_happens_before_clustering() {
    let points = Matrix::zeros(10, 2);
    let mut rng = StdRng::seed_from_u64(0);
    let err = build_centers(&points, &[0; 8], &[1], &WrongShape, &mut rng).unwrap_err();
    assert!(err.is_configuration());
}
