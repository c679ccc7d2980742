//! Model artifact inspection utility.
//!
//! Loads an exported estimator and prints a summary: feature count,
//! intercept, and the strongest coefficients. Useful for checking what a
//! training export actually contains before pointing the simulator at it.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin inspect_model -- [path/to/fraud_model.json]
//! ```
//!
//! Without an argument, falls back to `FRAUDSCOPE_MODEL_PATH` and then to
//! the default artifact location.

use std::env;
use std::path::PathBuf;

use fraudscope::adapters::linear::LinearModel;

fn main() -> Result<(), String> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| env::var("FRAUDSCOPE_MODEL_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("models/fraud_model.json"));

    let model = LinearModel::load(&path).map_err(|e| format!("Failed to load {path:?}: {e}"))?;

    println!(
        "Model: {} ({} features)",
        model.model_type(),
        model.feature_names().len()
    );
    println!("Intercept: {:+.6}", model.intercept());

    let mut ranked: Vec<(&str, f64)> = model
        .feature_names()
        .iter()
        .map(String::as_str)
        .zip(model.coefficients().iter().copied())
        .collect();
    ranked.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));

    println!("Strongest coefficients:");
    for (name, coef) in ranked.iter().take(10) {
        println!("  {name:>14}  {coef:+.6}");
    }

    Ok(())
}
