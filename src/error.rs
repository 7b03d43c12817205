//! Error types for classifier operations.
//!
//! Every precondition failure is a [`ConfigurationError`], raised before any
//! numeric work starts. Numerical trouble (NaN, overflow, divergence) is not an
//! error: it shows up in the returned values.

use std::fmt;

/// Precondition violations detected while validating inputs.
///
/// # Examples
///
/// ```
/// use kmeans_classifier::error::{ClassifierError, ConfigurationError};
///
/// let err = ClassifierError::from(ConfigurationError::PointLabelMismatch {
///     points: 10,
///     labels: 8,
/// });
/// assert!(err.is_configuration());
/// assert!(err.to_string().contains("10 points"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Number of points and number of labels differ.
    PointLabelMismatch {
        /// Rows in the point matrix
        points: usize,
        /// Length of the label slice
        labels: usize,
    },

    /// Cluster-count vector has more entries than there are classes.
    ClusterCountsTooLong {
        /// Length of the cluster-count vector
        len: usize,
        /// Number of classes (max label + 1)
        n_classes: usize,
    },

    /// A class was asked for more centers than it has points.
    ClusterCountExceedsPopulation {
        /// Offending class label
        class: usize,
        /// Requested number of centers
        requested: usize,
        /// Points carrying this label
        population: usize,
    },

    /// Weight matrix and center set disagree on the number of centers.
    WeightCenterMismatch {
        /// Rows of the weight matrix
        weight_rows: usize,
        /// Rows of the center matrix
        center_rows: usize,
    },

    /// Centers and points live in different dimensions.
    DimensionMismatch {
        /// Columns of the center matrix
        center_dim: usize,
        /// Columns of the point matrix
        point_dim: usize,
    },

    /// No points were supplied.
    EmptyDataset,

    /// Weight matrix has no class columns.
    NoClasses,

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::PointLabelMismatch { points, labels } => write!(
                f,
                "point and label counts must match, got {points} points and {labels} labels"
            ),
            ConfigurationError::ClusterCountsTooLong { len, n_classes } => write!(
                f,
                "cluster-count vector has {len} entries but there are only {n_classes} classes"
            ),
            ConfigurationError::ClusterCountExceedsPopulation {
                class,
                requested,
                population,
            } => write!(
                f,
                "class {class} has {population} points, cannot derive {requested} centers"
            ),
            ConfigurationError::WeightCenterMismatch {
                weight_rows,
                center_rows,
            } => write!(
                f,
                "weights have {weight_rows} rows but centers have {center_rows} rows"
            ),
            ConfigurationError::DimensionMismatch {
                center_dim,
                point_dim,
            } => write!(
                f,
                "centers have dimension {center_dim} but points have dimension {point_dim}"
            ),
            ConfigurationError::EmptyDataset => write!(f, "dataset contains no points"),
            ConfigurationError::NoClasses => write!(f, "weight matrix has no class columns"),
            ConfigurationError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => write!(
                f,
                "invalid hyperparameter: {param} = {value}, expected {constraint}"
            ),
        }
    }
}

/// Main error type for classifier operations.
#[derive(Debug)]
pub enum ClassifierError {
    /// Inputs violate a precondition.
    Configuration(ConfigurationError),

    /// The clustering collaborator rejected a class subset.
    Clustering {
        /// Class whose subset was being clustered
        class: usize,
        /// Reason reported by the clusterer
        message: String,
    },

    /// I/O error while persisting or loading an artifact.
    Io(std::io::Error),

    /// Artifact (de)serialization error.
    Serialization(String),

    /// Internal shape error from the matrix primitives.
    Other(String),
}

impl ClassifierError {
    /// Returns true for precondition failures.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, ClassifierError::Configuration(_))
    }

    /// Returns the configuration error, if this is one.
    #[must_use]
    pub fn as_configuration(&self) -> Option<&ConfigurationError> {
        match self {
            ClassifierError::Configuration(e) => Some(e),
            _ => None,
        }
    }

    /// Create an invalid-hyperparameter configuration error.
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        ClassifierError::Configuration(ConfigurationError::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        })
    }
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierError::Configuration(e) => write!(f, "Configuration error: {e}"),
            ClassifierError::Clustering { class, message } => {
                write!(f, "Clustering failed for class {class}: {message}")
            }
            ClassifierError::Io(e) => write!(f, "I/O error: {e}"),
            ClassifierError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            ClassifierError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ClassifierError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClassifierError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigurationError> for ClassifierError {
    fn from(err: ConfigurationError) -> Self {
        ClassifierError::Configuration(err)
    }
}

impl From<std::io::Error> for ClassifierError {
    fn from(err: std::io::Error) -> Self {
        ClassifierError::Io(err)
    }
}

impl From<serde_json::Error> for ClassifierError {
    fn from(err: serde_json::Error) -> Self {
        ClassifierError::Serialization(err.to_string())
    }
}

impl From<&str> for ClassifierError {
    fn from(msg: &str) -> Self {
        ClassifierError::Other(msg.to_string())
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, ClassifierError>;
