//! Assessment service: Orchestrates one-shot fraud scoring.
//!
//! Validates the input, pads it into the model's feature vector, and
//! invokes the classifier's two operations. One synchronous call per
//! user action; nothing is persisted.

use std::sync::Arc;

use crate::domain::{Assessment, AssessmentResult, TransactionInput};
use crate::ports::Classifier;
use crate::FraudscopeError;

/// Service for scoring simulated transactions.
pub struct AssessmentService<C>
where
    C: Classifier,
{
    classifier: Arc<C>,
}

impl<C> AssessmentService<C>
where
    C: Classifier,
{
    /// Create a new assessment service.
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// Input dimensionality of the underlying estimator.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.classifier.feature_count()
    }

    /// Score one simulated transaction.
    ///
    /// Runs the full path: validate, build the feature vector, classify,
    /// estimate probabilities.
    ///
    /// # Errors
    /// Returns error if validation or either estimator call fails.
    pub fn assess(&self, input: TransactionInput) -> Result<Assessment, FraudscopeError> {
        if let Err(errors) = input.validate() {
            return Err(FraudscopeError::Validation(errors.join(", ")));
        }

        let features = input.to_feature_vector();
        let label = self.classifier.predict(&features)?;
        let probabilities = self.classifier.predict_proba(&features)?;

        let assessment = Assessment::new(AssessmentResult::from_model_output(label, probabilities));

        tracing::info!(
            assessment_id = %assessment.id,
            verdict = %assessment.result.verdict,
            risk_band = %assessment.risk_band,
            confidence = format!("{:.2}%", assessment.result.confidence * 100.0),
            "Assessment complete"
        );

        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::linear::{ExportedEstimator, LinearModel};
    use crate::domain::{Verdict, FEATURE_COUNT, SLIDERS};
    use std::path::Path;

    fn create_test_service() -> AssessmentService<LinearModel> {
        let model =
            LinearModel::load(Path::new("models/fraud_model.json")).expect("Model should load");
        AssessmentService::new(Arc::new(model))
    }

    #[test]
    fn test_shipped_artifact_matches_simulator() {
        let service = create_test_service();
        assert_eq!(service.feature_count(), FEATURE_COUNT);
    }

    #[test]
    fn test_defaults_are_legitimate() {
        let service = create_test_service();
        let assessment = service
            .assess(TransactionInput::default())
            .expect("Should assess");

        assert_eq!(assessment.result.verdict, Verdict::Legitimate);
        assert!(assessment.result.confidence > 0.5);
        assert!(assessment.result.fraud_probability < 0.5);
    }

    #[test]
    fn test_fraud_sample_is_fraudulent() {
        // The demo hint: V14 at -8 and V12 at -3, everything else default.
        let service = create_test_service();
        let assessment = service
            .assess(TransactionInput::fraud_sample())
            .expect("Should assess");

        assert_eq!(assessment.result.verdict, Verdict::Fraudulent);
        assert!(assessment.result.confidence > 0.5);
        assert!(assessment.result.fraud_probability > 0.5);
    }

    #[test]
    fn test_probabilities_are_consistent() {
        let service = create_test_service();
        let assessment = service
            .assess(TransactionInput::fraud_sample())
            .expect("Should assess");

        let p = assessment.result.fraud_probability;
        assert!((0.0..=1.0).contains(&p));
        assert!((0.0..=1.0).contains(&assessment.result.confidence));
        // Confidence is the probability of the predicted class.
        assert!(
            (assessment.result.confidence - p).abs() < 1e-12
                || (assessment.result.confidence - (1.0 - p)).abs() < 1e-12
        );
    }

    #[test]
    fn test_assessment_is_deterministic() {
        let service = create_test_service();
        let first = service
            .assess(TransactionInput::fraud_sample())
            .expect("Should assess");
        let second = service
            .assess(TransactionInput::fraud_sample())
            .expect("Should assess");

        assert_eq!(first.result.verdict, second.result.verdict);
        assert!((first.result.confidence - second.result.confidence).abs() < f64::EPSILON);
        assert!(
            (first.result.fraud_probability - second.result.fraud_probability).abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn test_slider_extremes_do_not_fail() {
        let service = create_test_service();

        let at_min =
            TransactionInput::from_slider_values(&std::array::from_fn(|i| SLIDERS[i].min));
        let at_max =
            TransactionInput::from_slider_values(&std::array::from_fn(|i| SLIDERS[i].max));

        for input in [at_min, at_max] {
            let assessment = service.assess(input).expect("Should assess");
            assert!((0.0..=1.0).contains(&assessment.result.fraud_probability));
        }
    }

    #[test]
    fn test_out_of_range_input_rejected() {
        let service = create_test_service();
        let input = TransactionInput {
            v10: 1000.0,
            ..TransactionInput::default()
        };

        let err = service.assess(input).expect_err("must be rejected");
        assert!(matches!(err, FraudscopeError::Validation(_)));
    }

    #[test]
    fn test_arity_mismatch_surfaces_as_error() {
        // An estimator with the wrong arity must fail the call, not panic.
        let model = LinearModel::from_params(ExportedEstimator {
            model_type: "logistic_regression".into(),
            feature_names: vec!["a".into(), "b".into()],
            coefficients: vec![0.1, 0.2],
            intercept: 0.0,
            classes: vec![0, 1],
        })
        .expect("valid params");
        let service = AssessmentService::new(Arc::new(model));

        let err = service
            .assess(TransactionInput::default())
            .expect_err("must fail");
        assert!(matches!(err, FraudscopeError::Model(_)));
    }
}
