//! Assessment result types.
//!
//! Represents the output of a single fraud-scoring call.

use serde::{Deserialize, Serialize};

/// Binary verdict as returned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Transaction appears legitimate (class 0)
    Legitimate,
    /// Transaction is likely fraudulent (class 1)
    Fraudulent,
}

impl Verdict {
    /// Map the classifier's class label to a verdict.
    #[must_use]
    pub fn from_label(label: u8) -> Self {
        if label == 1 {
            Self::Fraudulent
        } else {
            Self::Legitimate
        }
    }

    /// Class index in the probability-estimate output.
    #[must_use]
    pub fn class_index(&self) -> usize {
        match self {
            Self::Legitimate => 0,
            Self::Fraudulent => 1,
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Legitimate => "This transaction appears to be legitimate",
            Self::Fraudulent => "This transaction is likely fraudulent",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Legitimate => write!(f, "LEGITIMATE"),
            Self::Fraudulent => write!(f, "FRAUDULENT"),
        }
    }
}

/// Display band for the fraud probability.
///
/// Drives gauge colors only; the verdict itself comes straight from the
/// classifier and is never re-derived from these thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Elevated,
    High,
}

impl RiskBand {
    /// Band the raw fraud probability for display.
    #[must_use]
    pub fn from_probability(p: f64) -> Self {
        if p < 0.3 {
            Self::Low
        } else if p < 0.7 {
            Self::Elevated
        } else {
            Self::High
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Elevated => write!(f, "ELEVATED"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Raw model output for one feature vector (before presentation).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Probability of the fraud class (0.0 to 1.0)
    pub fraud_probability: f64,

    /// Verdict from the classify operation
    pub verdict: Verdict,

    /// Probability of the predicted class (0.0 to 1.0)
    pub confidence: f64,
}

impl AssessmentResult {
    /// Combine the classifier's two outputs.
    ///
    /// `probabilities` is `[p_legitimate, p_fraudulent]` from the
    /// probability-estimate operation. The verdict comes from the classify
    /// operation and is not re-derived here.
    #[must_use]
    pub fn from_model_output(label: u8, probabilities: [f64; 2]) -> Self {
        let verdict = Verdict::from_label(label);
        Self {
            fraud_probability: probabilities[1],
            verdict,
            confidence: probabilities[verdict.class_index()],
        }
    }

    /// Get the display band for the fraud probability.
    #[must_use]
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_probability(self.fraud_probability)
    }
}

/// Complete record of one evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// Unique identifier, used for log correlation only
    pub id: String,

    /// The model output
    pub result: AssessmentResult,

    /// Display band of the fraud probability
    pub risk_band: RiskBand,

    /// Timestamp of the evaluation
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    /// Create a new assessment record from a model result.
    #[must_use]
    pub fn new(result: AssessmentResult) -> Self {
        Self {
            id: uuid_v4(),
            risk_band: result.risk_band(),
            result,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Generate a simple UUID v4 (random) using a CSPRNG.
///
/// ChaCha20Rng seeded from OS entropy keeps identifiers unpredictable on
/// all platforms.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_band_from_probability() {
        assert_eq!(RiskBand::from_probability(0.05), RiskBand::Low);
        assert_eq!(RiskBand::from_probability(0.5), RiskBand::Elevated);
        assert_eq!(RiskBand::from_probability(0.9), RiskBand::High);
    }

    #[test]
    fn test_result_from_model_output() {
        let result = AssessmentResult::from_model_output(1, [0.25, 0.75]);
        assert_eq!(result.verdict, Verdict::Fraudulent);
        assert!((result.fraud_probability - 0.75).abs() < f64::EPSILON);
        assert!((result.confidence - 0.75).abs() < f64::EPSILON);

        let result = AssessmentResult::from_model_output(0, [0.9, 0.1]);
        assert_eq!(result.verdict, Verdict::Legitimate);
        assert!((result.confidence - 0.9).abs() < f64::EPSILON);
        assert!((result.fraud_probability - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_assessment_creation() {
        let result = AssessmentResult::from_model_output(1, [0.2, 0.8]);
        let assessment = Assessment::new(result);

        assert_eq!(assessment.risk_band, RiskBand::High);
        assert_eq!(assessment.result.verdict, Verdict::Fraudulent);
    }

    #[test]
    fn test_uuid_generation() {
        let id1 = uuid_v4();
        let id2 = uuid_v4();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36); // UUID format with dashes
    }
}
