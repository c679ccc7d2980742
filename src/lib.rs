//! # Fraudscope
//!
//! Interactive credit-card fraud detection demo.
//!
//! A pre-trained logistic regression (exported from the Python training
//! run as a JSON artifact) is loaded once at startup. Six transaction
//! features are adjusted with sliders in a terminal UI, padded into the
//! model's 30-element feature vector, and scored on demand.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (transaction input, assessment)
//! - `ports`: Trait definition for the estimator seam
//! - `adapters`: Concrete implementations (linear model, log redaction)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Assessment, TransactionInput, Verdict};

/// Result type for Fraudscope operations
pub type Result<T> = std::result::Result<T, FraudscopeError>;

/// Main error type for Fraudscope
#[derive(Debug, thiserror::Error)]
pub enum FraudscopeError {
    #[error("Model operation failed: {0}")]
    Model(#[from] ports::ModelError),

    #[error("Invalid transaction input: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
