//! Domain layer: Core business types and logic.
//!
//! Pure types with no UI or model-runtime dependencies.

mod assessment;
mod transaction;

pub use assessment::{Assessment, AssessmentResult, RiskBand, Verdict};
pub use transaction::{SliderSpec, TransactionInput, FEATURE_COUNT, SLIDERS};
