//! Classifier port: Trait for the pre-trained estimator.
//!
//! Abstracts the concrete model runtime from the application logic.

use thiserror::Error;

/// Errors surfaced by classifier implementations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The artifact could not be read or parsed.
    #[error("Failed to read model artifact: {0}")]
    Artifact(String),

    /// The artifact parsed but its parameters are inconsistent.
    #[error("Invalid model artifact: {0}")]
    Schema(String),

    /// A feature vector did not match the estimator's input arity.
    #[error("Feature dimension mismatch: expected {expected}, got {got}")]
    Dimension { expected: usize, got: usize },
}

/// Trait for a pre-trained binary classifier.
///
/// Implementations are immutable once constructed: the estimator is
/// loaded exactly once per process and shared read-only afterwards.
pub trait Classifier: Send + Sync {
    /// Input dimensionality the estimator was trained on.
    fn feature_count(&self) -> usize;

    /// Classify one feature vector, returning the class label (0 or 1).
    ///
    /// # Errors
    /// Returns `ModelError::Dimension` if the vector length does not match
    /// [`Classifier::feature_count`].
    fn predict(&self, features: &[f64]) -> Result<u8, ModelError>;

    /// Estimate class membership probabilities for one feature vector.
    ///
    /// Returns `[p_legitimate, p_fraudulent]`; the pair sums to 1.
    ///
    /// # Errors
    /// Returns `ModelError::Dimension` on an arity mismatch.
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ModelError>;
}
