//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the integrations behind the trait seams:
//! - `linear`: logistic-regression artifact loader and evaluator
//! - `redact`: card-data filtering for logs

pub mod linear;
pub mod redact;
