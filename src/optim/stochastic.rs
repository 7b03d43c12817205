//! Stochastic optimizers for mini-batch gradient descent.

use serde::{Deserialize, Serialize};

use crate::primitives::Vector;

use super::Optimizer;

/// Stochastic Gradient Descent (SGD) optimizer with optional momentum.
///
/// # Update Rule
///
/// Without momentum: `θ = θ - η * ∇f(θ)`
///
/// With momentum:
/// ```text
/// v = γ * v + η * ∇f(θ)
/// θ = θ - v
/// ```
///
/// # Example
///
/// ```
/// use kmeans_classifier::optim::SGD;
/// use kmeans_classifier::primitives::Vector;
///
/// let mut optimizer = SGD::new(0.1);
/// let mut params = Vector::from_slice(&[1.0, 2.0]);
/// let gradients = Vector::from_slice(&[0.5, 1.0]);
///
/// optimizer.step(&mut params, &gradients);
/// assert!((params[0] - 0.95).abs() < 1e-6);
/// assert!((params[1] - 1.9).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SGD {
    /// Learning rate (step size)
    learning_rate: f32,
    /// Momentum coefficient (0.0 = no momentum)
    momentum: f32,
    /// Velocity for momentum, sized lazily on the first step
    velocity: Option<Vec<f32>>,
}

impl SGD {
    /// Creates a new SGD optimizer with the given learning rate.
    #[must_use]
    pub fn new(learning_rate: f32) -> Self {
        Self {
            learning_rate,
            momentum: 0.0,
            velocity: None,
        }
    }

    /// Sets the momentum coefficient (typical: 0.9).
    #[must_use]
    pub fn with_momentum(mut self, momentum: f32) -> Self {
        self.momentum = momentum;
        self
    }

    #[must_use]
    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    #[must_use]
    pub fn momentum(&self) -> f32 {
        self.momentum
    }

    #[must_use]
    pub fn has_momentum(&self) -> bool {
        self.momentum > 0.0
    }

    /// Updates parameters using gradients.
    ///
    /// # Panics
    ///
    /// Panics if params and gradients have different lengths.
    pub fn step(&mut self, params: &mut Vector<f32>, gradients: &Vector<f32>) {
        assert_eq!(
            params.len(),
            gradients.len(),
            "Parameters and gradients must have same length"
        );

        let lr = self.learning_rate;
        let params = params.as_mut_slice();
        let gradients = gradients.as_slice();

        if self.has_momentum() {
            let momentum = self.momentum;
            if self.velocity.as_ref().map_or(true, |v| v.len() != params.len()) {
                self.velocity = Some(vec![0.0; params.len()]);
            }
            let Some(velocity) = self.velocity.as_mut() else {
                return;
            };
            for ((p, v), g) in params.iter_mut().zip(velocity.iter_mut()).zip(gradients) {
                *v = momentum * *v + lr * g;
                *p -= *v;
            }
        } else {
            for (p, g) in params.iter_mut().zip(gradients) {
                *p -= lr * g;
            }
        }
    }

    /// Resets the velocity.
    pub fn reset(&mut self) {
        self.velocity = None;
    }
}

impl Optimizer for SGD {
    fn step(&mut self, params: &mut Vector<f32>, gradients: &Vector<f32>) {
        self.step(params, gradients);
    }

    fn reset(&mut self) {
        self.reset();
    }
}

/// Adam (Adaptive Moment Estimation) optimizer, Kingma & Ba (2014).
///
/// Update rules:
///
/// ```text
/// m_t = β₁ * m_{t-1} + (1 - β₁) * g_t
/// v_t = β₂ * v_{t-1} + (1 - β₂) * g_t²
/// m̂_t = m_t / (1 - β₁^t)
/// v̂_t = v_t / (1 - β₂^t)
/// θ_t = θ_{t-1} - α * m̂_t / (√v̂_t + ε)
/// ```
///
/// Defaults: β₁ = 0.9, β₂ = 0.999, ε = 1e-8.
///
/// # Example
///
/// ```
/// use kmeans_classifier::optim::Adam;
/// use kmeans_classifier::primitives::Vector;
///
/// let mut optimizer = Adam::new(0.001);
/// let mut params = Vector::from_slice(&[1.0, 2.0]);
/// let gradients = Vector::from_slice(&[0.1, 0.2]);
///
/// optimizer.step(&mut params, &gradients);
/// // First step moves every parameter by ~lr against the gradient sign
/// assert!((params[0] - 0.999).abs() < 1e-5);
/// assert_eq!(optimizer.steps(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adam {
    /// Learning rate (step size)
    learning_rate: f32,
    /// Exponential decay rate for first moment estimates
    beta1: f32,
    /// Exponential decay rate for second moment estimates
    beta2: f32,
    /// Small constant for numerical stability
    epsilon: f32,
    /// First moment estimates (mean)
    m: Option<Vec<f32>>,
    /// Second moment estimates (uncentered variance)
    v: Option<Vec<f32>>,
    /// Number of steps taken (for bias correction)
    t: usize,
}

impl Adam {
    /// Creates Adam with the given learning rate and default decay rates.
    #[must_use]
    pub fn new(learning_rate: f32) -> Self {
        Self {
            learning_rate,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            m: None,
            v: None,
            t: 0,
        }
    }

    #[must_use]
    pub fn with_beta1(mut self, beta1: f32) -> Self {
        self.beta1 = beta1;
        self
    }

    #[must_use]
    pub fn with_beta2(mut self, beta2: f32) -> Self {
        self.beta2 = beta2;
        self
    }

    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    #[must_use]
    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    #[must_use]
    pub fn beta1(&self) -> f32 {
        self.beta1
    }

    #[must_use]
    pub fn beta2(&self) -> f32 {
        self.beta2
    }

    #[must_use]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Number of steps taken since creation or the last reset.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.t
    }

    /// Updates parameters with bias-corrected adaptive steps.
    ///
    /// Moment buffers are (re)allocated when the parameter count changes,
    /// which also restarts bias correction.
    ///
    /// # Panics
    ///
    /// Panics if params and gradients have different lengths.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn step(&mut self, params: &mut Vector<f32>, gradients: &Vector<f32>) {
        assert_eq!(
            params.len(),
            gradients.len(),
            "Parameters and gradients must have same length"
        );

        let n = params.len();
        if self.m.as_ref().map_or(true, |m| m.len() != n) {
            self.m = Some(vec![0.0; n]);
            self.v = Some(vec![0.0; n]);
            self.t = 0;
        }
        self.t += 1;

        let (beta1, beta2) = (self.beta1, self.beta2);
        let bias1 = 1.0 - beta1.powi(self.t as i32);
        let bias2 = 1.0 - beta2.powi(self.t as i32);
        let step_size = self.learning_rate;
        let epsilon = self.epsilon;

        let (Some(m), Some(v)) = (self.m.as_mut(), self.v.as_mut()) else {
            return;
        };

        for (((p, g), m_i), v_i) in params
            .as_mut_slice()
            .iter_mut()
            .zip(gradients.as_slice())
            .zip(m.iter_mut())
            .zip(v.iter_mut())
        {
            *m_i = beta1 * *m_i + (1.0 - beta1) * g;
            *v_i = beta2 * *v_i + (1.0 - beta2) * g * g;
            let m_hat = *m_i / bias1;
            let v_hat = *v_i / bias2;
            *p -= step_size * m_hat / (v_hat.sqrt() + epsilon);
        }
    }

    /// Clears moment estimates and the step counter.
    pub fn reset(&mut self) {
        self.m = None;
        self.v = None;
        self.t = 0;
    }
}

impl Optimizer for Adam {
    fn step(&mut self, params: &mut Vector<f32>, gradients: &Vector<f32>) {
        self.step(params, gradients);
    }

    fn reset(&mut self) {
        self.reset();
    }
}

#[cfg(test)]
#[path = "stochastic_tests.rs"]
mod tests;
