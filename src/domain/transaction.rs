//! Transaction input types for fraud scoring.
//!
//! The model was trained on the anonymized credit-card dataset: a scaled
//! time aggregate, 28 PCA components (V1..V28), and a scaled amount
//! aggregate, in that order. The simulator exposes the six components
//! with the most predictive weight; every other position stays at zero.

use serde::{Deserialize, Serialize};

/// Number of features the estimator was trained on.
pub const FEATURE_COUNT: usize = 30;

/// A bounded slider exposed by the simulator.
#[derive(Debug, Clone, Copy)]
pub struct SliderSpec {
    /// Feature name as exported in the model artifact.
    pub name: &'static str,
    /// Position in the training-time feature ordering.
    pub index: usize,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

/// Slider table mapping each user-facing feature to its vector position.
///
/// Ordering matters: the first three render in the "key features" column,
/// the last three in the "other influential features" column, and
/// [`TransactionInput::from_slider_values`] consumes values in this order.
/// Ranges come from the training data distribution.
pub const SLIDERS: [SliderSpec; 6] = [
    SliderSpec {
        name: "V14",
        index: 14,
        min: -19.0,
        max: 11.0,
        default: -1.0,
        step: 0.1,
    },
    SliderSpec {
        name: "V10",
        index: 10,
        min: -25.0,
        max: 24.0,
        default: -0.5,
        step: 0.1,
    },
    SliderSpec {
        name: "V12",
        index: 12,
        min: -18.0,
        max: 8.0,
        default: -0.6,
        step: 0.1,
    },
    SliderSpec {
        name: "V17",
        index: 17,
        min: -26.0,
        max: 10.0,
        default: -0.5,
        step: 0.1,
    },
    SliderSpec {
        name: "V4",
        index: 4,
        min: -6.0,
        max: 17.0,
        default: 0.4,
        step: 0.1,
    },
    SliderSpec {
        name: "V11",
        index: 11,
        min: -5.0,
        max: 12.0,
        default: -0.5,
        step: 0.1,
    },
];

/// The six user-controlled components of a simulated transaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub v4: f64,
    pub v10: f64,
    pub v11: f64,
    pub v12: f64,
    pub v14: f64,
    pub v17: f64,
}

impl Default for TransactionInput {
    fn default() -> Self {
        Self::from_slider_values(&std::array::from_fn(|i| SLIDERS[i].default))
    }
}

impl TransactionInput {
    /// Build an input from values given in [`SLIDERS`] order.
    #[must_use]
    pub fn from_slider_values(values: &[f64; SLIDERS.len()]) -> Self {
        Self {
            v14: values[0],
            v10: values[1],
            v12: values[2],
            v17: values[3],
            v4: values[4],
            v11: values[5],
        }
    }

    /// Component values in [`SLIDERS`] order.
    #[must_use]
    pub fn slider_values(&self) -> [f64; SLIDERS.len()] {
        [self.v14, self.v10, self.v12, self.v17, self.v4, self.v11]
    }

    /// The demo preset the model scores as likely fraudulent.
    #[must_use]
    pub fn fraud_sample() -> Self {
        Self {
            v14: -8.0,
            v12: -3.0,
            ..Self::default()
        }
    }

    /// Pad the six components into the model's full feature vector.
    ///
    /// Positions not driven by a slider stay at zero. Zero-filling the 24
    /// omitted components is a modeling approximation; the UI disclaimer
    /// states as much.
    #[must_use]
    pub fn to_feature_vector(&self) -> [f64; FEATURE_COUNT] {
        let mut features = [0.0; FEATURE_COUNT];
        for (spec, value) in SLIDERS.iter().zip(self.slider_values()) {
            features[spec.index] = value;
        }
        features
    }

    /// Validate that every component is within its slider range.
    ///
    /// The UI cannot produce out-of-range values (sliders clamp at their
    /// bounds), so this exists for programmatic callers.
    ///
    /// # Errors
    /// Returns validation errors as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (spec, value) in SLIDERS.iter().zip(self.slider_values()) {
            if !(spec.min..=spec.max).contains(&value) {
                errors.push(format!(
                    "{} {} out of range [{}, {}]",
                    spec.name, value, spec.min, spec.max
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_table_is_consistent() {
        for spec in &SLIDERS {
            assert!(spec.index < FEATURE_COUNT);
            assert!(spec.min < spec.max);
            assert!((spec.min..=spec.max).contains(&spec.default));
            assert!(spec.step > 0.0);
        }

        // Each slider drives a distinct vector position.
        let mut indices: Vec<usize> = SLIDERS.iter().map(|s| s.index).collect();
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), SLIDERS.len());
    }

    #[test]
    fn test_feature_vector_layout() {
        let input = TransactionInput {
            v4: 1.5,
            v10: -2.0,
            v11: 3.0,
            v12: -4.0,
            v14: -5.5,
            v17: 6.0,
        };

        let features = input.to_feature_vector();
        assert_eq!(features.len(), FEATURE_COUNT);
        assert!((features[4] - 1.5).abs() < f64::EPSILON);
        assert!((features[10] - -2.0).abs() < f64::EPSILON);
        assert!((features[11] - 3.0).abs() < f64::EPSILON);
        assert!((features[12] - -4.0).abs() < f64::EPSILON);
        assert!((features[14] - -5.5).abs() < f64::EPSILON);
        assert!((features[17] - 6.0).abs() < f64::EPSILON);

        // All remaining positions are zero.
        let driven: Vec<usize> = SLIDERS.iter().map(|s| s.index).collect();
        for (i, value) in features.iter().enumerate() {
            if !driven.contains(&i) {
                assert_eq!(*value, 0.0, "position {i} should be zero-filled");
            }
        }
    }

    #[test]
    fn test_builder_is_pure() {
        let input = TransactionInput::fraud_sample();
        assert_eq!(input.to_feature_vector(), input.to_feature_vector());
    }

    #[test]
    fn test_slider_value_roundtrip() {
        let input = TransactionInput::default();
        let roundtripped = TransactionInput::from_slider_values(&input.slider_values());
        assert_eq!(input, roundtripped);
    }

    #[test]
    fn test_defaults_validate() {
        assert!(TransactionInput::default().validate().is_ok());
        assert!(TransactionInput::fraud_sample().validate().is_ok());
    }

    #[test]
    fn test_extremes_validate_and_build() {
        let at_min = TransactionInput::from_slider_values(&std::array::from_fn(|i| SLIDERS[i].min));
        let at_max = TransactionInput::from_slider_values(&std::array::from_fn(|i| SLIDERS[i].max));

        assert!(at_min.validate().is_ok());
        assert!(at_max.validate().is_ok());
        assert_eq!(at_min.to_feature_vector().len(), FEATURE_COUNT);
        assert_eq!(at_max.to_feature_vector().len(), FEATURE_COUNT);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let input = TransactionInput {
            v14: -100.0, // below the V14 slider minimum
            ..TransactionInput::default()
        };
        let errors = input.validate().expect_err("must be rejected");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("V14"));
    }
}
