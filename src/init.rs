//! Weight initialization.
//!
//! The trainer starts from independent standard-normal weights. Samples are
//! drawn with the Box–Muller transform from the caller's RNG so a seeded
//! generator gives reproducible weights.

use crate::primitives::Matrix;
use rand::Rng;

/// Draws one sample from N(0, 1).
#[allow(clippy::cast_possible_truncation)]
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    // u1 in (0, 1] keeps ln(u1) finite
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z as f32
}

/// Fills a `rows × cols` matrix with samples from N(mean, std²).
pub fn normal<R: Rng + ?Sized>(rows: usize, cols: usize, mean: f32, std: f32, rng: &mut R) -> Matrix<f32> {
    let mut m = Matrix::zeros(rows, cols);
    for value in m.as_mut_slice() {
        *value = mean + std * standard_normal(rng);
    }
    m
}

/// Standard-normal `rows × cols` matrix.
pub fn standard_normal_matrix<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix<f32> {
    normal(rows, cols, 0.0, 1.0, rng)
}
