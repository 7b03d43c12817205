//! Core compute primitives (Vector, Matrix).
//!
//! Row-major dense storage; every algorithm in the crate works on these.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;

/// Squared Euclidean distance between two equally long rows.
///
/// # Panics
///
/// Panics in debug builds if lengths differ.
#[must_use]
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "rows must have the same length");
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum()
}
