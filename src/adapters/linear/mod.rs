//! Linear model adapter: `Classifier` over an exported logistic regression.
//!
//! The artifact is the JSON export produced by the Python training run:
//! feature names, one coefficient per feature, the intercept, and the two
//! class labels. Loading it is the only disk read of the process; a
//! missing or inconsistent artifact is fatal to startup.
//!
//! # Immutability
//!
//! The model is never written after load. Evaluation is plain f64
//! arithmetic with no interior mutability, so a loaded model can be
//! shared freely.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ports::{Classifier, ModelError};

/// Model parameters exported by the Python training run.
///
/// This matches the JSON structure written by the training pipeline's
/// export step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedEstimator {
    pub model_type: String,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub classes: Vec<u8>,
}

/// Pre-trained logistic regression evaluated in plain f64 arithmetic.
#[derive(Debug)]
pub struct LinearModel {
    params: ExportedEstimator,
}

impl LinearModel {
    /// Load and validate an exported artifact.
    ///
    /// # Errors
    /// Returns `ModelError::Artifact` if the file cannot be read or
    /// parsed, and `ModelError::Schema` if the parameters are
    /// inconsistent.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ModelError::Artifact(format!("{}: {e}", path.display())))?;
        let params: ExportedEstimator = serde_json::from_str(&content)
            .map_err(|e| ModelError::Artifact(format!("{}: {e}", path.display())))?;

        let model = Self::from_params(params)?;

        tracing::info!(
            "Loaded {} from {} ({} features, intercept {:.4})",
            model.params.model_type,
            path.display(),
            model.params.feature_names.len(),
            model.params.intercept
        );

        Ok(model)
    }

    /// Validate already-deserialized parameters.
    ///
    /// # Errors
    /// Returns `ModelError::Schema` on inconsistent parameters.
    pub fn from_params(params: ExportedEstimator) -> Result<Self, ModelError> {
        let n = params.feature_names.len();
        if n == 0 {
            return Err(ModelError::Schema("feature_names is empty".into()));
        }
        if params.coefficients.len() != n {
            return Err(ModelError::Schema(format!(
                "coefficient count {} does not match feature count {n}",
                params.coefficients.len()
            )));
        }
        if params.classes != [0, 1] {
            return Err(ModelError::Schema(format!(
                "expected binary classes [0, 1], got {:?}",
                params.classes
            )));
        }
        if !params.intercept.is_finite() || params.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::Schema("non-finite model parameters".into()));
        }

        Ok(Self { params })
    }

    /// Feature names in training order, for diagnostics.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.params.feature_names
    }

    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.params.coefficients
    }

    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.params.intercept
    }

    #[must_use]
    pub fn model_type(&self) -> &str {
        &self.params.model_type
    }

    /// Linear combination of features and coefficients plus the intercept.
    fn decision_function(&self, features: &[f64]) -> Result<f64, ModelError> {
        let expected = self.params.coefficients.len();
        if features.len() != expected {
            return Err(ModelError::Dimension {
                expected,
                got: features.len(),
            });
        }

        let dot: f64 = self
            .params
            .coefficients
            .iter()
            .zip(features)
            .map(|(coef, x)| coef * x)
            .sum();

        Ok(dot + self.params.intercept)
    }

    fn sigmoid(x: f64) -> f64 {
        1.0 / (1.0 + (-x).exp())
    }
}

impl Classifier for LinearModel {
    fn feature_count(&self) -> usize {
        self.params.coefficients.len()
    }

    fn predict(&self, features: &[f64]) -> Result<u8, ModelError> {
        let p = Self::sigmoid(self.decision_function(features)?);
        Ok(if p >= 0.5 {
            self.params.classes[1]
        } else {
            self.params.classes[0]
        })
    }

    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ModelError> {
        let p = Self::sigmoid(self.decision_function(features)?);
        Ok([1.0 - p, p])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn test_params() -> ExportedEstimator {
        ExportedEstimator {
            model_type: "logistic_regression".into(),
            feature_names: vec!["a".into(), "b".into()],
            coefficients: vec![1.0, -2.0],
            intercept: 0.5,
            classes: vec![0, 1],
        }
    }

    fn write_artifact(dir: &Path, params: &ExportedEstimator) -> PathBuf {
        let path = dir.join("fraud_model.json");
        let json = serde_json::to_string(params).expect("serialize model");
        fs::write(&path, json).expect("write model");
        path
    }

    #[test]
    fn test_load_roundtrip() {
        let temp = tempdir().expect("tempdir");
        let path = write_artifact(temp.path(), &test_params());

        let model = LinearModel::load(&path).expect("load artifact");
        assert_eq!(model.feature_count(), 2);
        assert_eq!(model.model_type(), "logistic_regression");
        assert!((model.intercept() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = tempdir().expect("tempdir");
        let err = LinearModel::load(&temp.path().join("nope.json")).expect_err("must fail");
        assert!(matches!(err, ModelError::Artifact(_)));
    }

    #[test]
    fn test_load_corrupt_artifact() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("fraud_model.json");
        fs::write(&path, "{not json").expect("write file");

        let err = LinearModel::load(&path).expect_err("must fail");
        assert!(matches!(err, ModelError::Artifact(_)));
    }

    #[test]
    fn test_coefficient_arity_mismatch_rejected() {
        let mut params = test_params();
        params.coefficients.push(3.0);
        let err = LinearModel::from_params(params).expect_err("must fail");
        assert!(matches!(err, ModelError::Schema(_)));
    }

    #[test]
    fn test_non_binary_classes_rejected() {
        let mut params = test_params();
        params.classes = vec![0, 1, 2];
        let err = LinearModel::from_params(params).expect_err("must fail");
        assert!(matches!(err, ModelError::Schema(_)));
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        let mut params = test_params();
        params.coefficients[0] = f64::NAN;
        let err = LinearModel::from_params(params).expect_err("must fail");
        assert!(matches!(err, ModelError::Schema(_)));
    }

    #[test]
    fn test_dimension_mismatch() {
        let model = LinearModel::from_params(test_params()).expect("valid params");
        let err = model.predict(&[1.0]).expect_err("must fail");
        assert!(matches!(
            err,
            ModelError::Dimension {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let model = LinearModel::from_params(test_params()).expect("valid params");
        for features in [[0.0, 0.0], [3.5, -1.25], [-10.0, 10.0]] {
            let proba = model.predict_proba(&features).expect("predict_proba");
            assert!((proba[0] + proba[1] - 1.0).abs() < 1e-12);
            assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)));
        }
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let model = LinearModel::from_params(test_params()).expect("valid params");
        let features = [0.7, -0.3];

        let first = model.predict_proba(&features).expect("predict_proba");
        let second = model.predict_proba(&features).expect("predict_proba");
        assert_eq!(first, second);
        assert_eq!(
            model.predict(&features).expect("predict"),
            model.predict(&features).expect("predict")
        );
    }

    #[test]
    fn test_label_matches_probability_threshold() {
        // logit = a - 2b + 0.5
        let model = LinearModel::from_params(test_params()).expect("valid params");

        let fraud = model.predict(&[2.0, 0.0]).expect("predict");
        assert_eq!(fraud, 1);

        let legit = model.predict(&[-2.0, 1.0]).expect("predict");
        assert_eq!(legit, 0);
    }
}
