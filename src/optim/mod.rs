//! Gradient-based optimizers for mini-batch training.
//!
//! The trainer flattens the `K × v` weight matrix into one parameter
//! [`Vector`], computes the batch gradient with
//! [`BinaryCrossEntropy`](crate::loss::BinaryCrossEntropy), and hands both to
//! an [`Optimizer`]. The optimizer never sees the loss itself.
//!
//! # Available Optimizers
//!
//! - [`Adam`] - Adaptive Moment Estimation (the trainer's default)
//! - [`SGD`] - Stochastic Gradient Descent with optional momentum
//!
//! # Example
//!
//! ```
//! use kmeans_classifier::optim::{Optimizer, SGD};
//! use kmeans_classifier::primitives::Vector;
//!
//! let mut optimizer = SGD::new(0.01);
//! let mut params = Vector::from_slice(&[1.0, 2.0, 3.0]);
//! let gradients = Vector::from_slice(&[0.1, 0.2, 0.3]);
//!
//! optimizer.step(&mut params, &gradients);
//! assert!((params[0] - 0.999).abs() < 1e-6);
//! ```

use crate::primitives::Vector;

mod stochastic;

pub use stochastic::{Adam, SGD};

/// Stochastic optimizer interface.
///
/// Implementations keep whatever per-parameter state they need (momentum,
/// moment estimates) between calls to [`step`](Optimizer::step).
pub trait Optimizer {
    /// Updates parameters in-place given the gradient of the current mini-batch.
    ///
    /// # Panics
    ///
    /// Implementations may panic if `params` and `gradients` differ in length.
    fn step(&mut self, params: &mut Vector<f32>, gradients: &Vector<f32>);

    /// Resets the optimizer state (momentum, moment estimates, step count).
    ///
    /// The trainer calls this before each fit so a reused optimizer starts
    /// from scratch.
    fn reset(&mut self);
}
