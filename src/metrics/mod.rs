//! Evaluation metrics for the classifier.
//!
//! Accuracy bookkeeping shared by the trainer (held-out split) and the
//! predictor (caller-supplied labels).

pub mod classification;

pub use classification::{accuracy, argmax, argmax_rows, per_class_accuracy, AccuracyReport};
