pub mod components;
pub mod hybrid;
pub mod risk;
pub mod rule_based;
pub mod thresholds;

pub use components::ComponentScorer;
pub use hybrid::HybridFuser;
pub use rule_based::RuleBasedFuser;

use crate::domain::opinion::{Action, Confidence};

/// Result of either fusion path.
#[derive(Debug, Clone, PartialEq)]
pub struct Fusion {
    pub score: f64,
    pub action: Action,
    pub confidence: Confidence,
    pub reasoning: String,
}

pub(crate) fn clamp_score(x: f64) -> f64 {
    x.clamp(0.0, 100.0)
}
