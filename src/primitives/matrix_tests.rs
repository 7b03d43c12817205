pub(crate) use super::*;

#[test]
fn test_from_vec() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    assert_eq!(m.shape(), (2, 3));
    assert!((m.get(0, 0) - 1.0).abs() < 1e-6);
    assert!((m.get(1, 2) - 6.0).abs() < 1e-6);
}

#[test]
fn test_from_vec_error() {
    let result = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0]);
    assert!(result.is_err());
}

#[test]
fn test_zeros() {
    let m = Matrix::zeros(2, 3);
    assert_eq!(m.shape(), (2, 3));
    assert!(m.as_slice().iter().all(|&x| x == 0.0));
}

#[test]
fn test_row_slice() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    assert_eq!(m.row(0), &[1.0, 2.0, 3.0]);
    assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
    assert_eq!(m.rows().count(), 2);
}

#[test]
fn test_set() {
    let mut m = Matrix::zeros(2, 2);
    m.set(1, 0, 7.0);
    assert!((m.get(1, 0) - 7.0).abs() < 1e-6);
    assert_eq!(m.as_slice(), &[0.0, 0.0, 7.0, 0.0]);
}

#[test]
fn test_from_rows() {
    let a = [1.0_f32, 2.0];
    let b = [3.0_f32, 4.0];
    let m = Matrix::from_rows(2, [&a[..], &b[..]]).expect("equal row lengths");
    assert_eq!(m.shape(), (2, 2));
    assert_eq!(m.row(1), &[3.0, 4.0]);
}

#[test]
fn test_from_rows_empty_keeps_width() {
    let m: Matrix<f32> = Matrix::from_rows(4, std::iter::empty()).expect("empty is fine");
    assert_eq!(m.shape(), (0, 4));
}

#[test]
fn test_from_rows_ragged_error() {
    let a = [1.0_f32, 2.0];
    let b = [3.0_f32];
    assert!(Matrix::from_rows(2, [&a[..], &b[..]]).is_err());
}

#[test]
fn test_select_rows_preserves_order() {
    let m = Matrix::from_vec(3, 2, vec![0.0_f32, 0.5, 1.0, 1.5, 2.0, 2.5]).expect("3x2");
    let picked = m.select_rows(&[2, 0, 2]);
    assert_eq!(picked.shape(), (3, 2));
    assert_eq!(picked.as_slice(), &[2.0, 2.5, 0.0, 0.5, 2.0, 2.5]);
}

#[test]
fn test_select_rows_empty() {
    let m = Matrix::from_vec(2, 2, vec![1.0_f32, 2.0, 3.0, 4.0]).expect("2x2");
    assert_eq!(m.select_rows(&[]).shape(), (0, 2));
}

#[test]
fn test_append_rows() {
    let mut top = Matrix::from_vec(1, 2, vec![1.0_f32, 2.0]).expect("1x2");
    let bottom = Matrix::from_vec(2, 2, vec![3.0_f32, 4.0, 5.0, 6.0]).expect("2x2");
    top.append_rows(&bottom).expect("same width");
    assert_eq!(top.shape(), (3, 2));
    assert_eq!(top.row(2), &[5.0, 6.0]);
}

#[test]
fn test_append_rows_width_mismatch() {
    let mut top = Matrix::zeros(1, 2);
    let bottom = Matrix::zeros(1, 3);
    assert!(top.append_rows(&bottom).is_err());
}

#[test]
fn test_is_finite() {
    let mut m = Matrix::zeros(1, 2);
    assert!(m.is_finite());
    m.set(0, 1, f32::NAN);
    assert!(!m.is_finite());
}

#[test]
fn test_into_vec() {
    let m = Matrix::from_vec(1, 3, vec![1.0_f32, -2.0, 0.5]).expect("1x3");
    assert_eq!(m.into_vec(), vec![1.0, -2.0, 0.5]);
}

#[test]
fn test_filled() {
    let m = Matrix::filled(2, 2, 0.5_f64);
    assert_eq!(m.shape(), (2, 2));
    assert!(m.as_slice().iter().all(|&x| (x - 0.5).abs() < f64::EPSILON));
}

#[test]
fn test_deserialize_checks_length() {
    let ok: Matrix<f32> = serde_json::from_str(r#"{"data":[1.0,2.0],"rows":1,"cols":2}"#).expect("consistent shape");
    assert_eq!(ok.row(0), &[1.0, 2.0]);

    let short: Result<Matrix<f32>, _> = serde_json::from_str(r#"{"data":[0.5],"rows":1,"cols":2}"#);
    let err = short.unwrap_err().to_string();
    assert!(err.contains("rows * cols"), "unexpected error: {err}");
}
