use crate::domain::opinion::{Action, AiOpinion, Confidence, RiskLevel};
use crate::llm::error::OpinionError;
use serde::{Deserialize, Serialize};

/// Loosely typed opinion as emitted by the LLM. Enum-like fields arrive as free text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmOpinionPayload {
    pub ai_score: f64,
    pub recommendation: String,
    #[serde(default)]
    pub confidence: Option<String>,
    #[serde(default)]
    pub investment_thesis: Option<String>,
    #[serde(default)]
    pub target_price: Option<f64>,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub time_horizon: Option<String>,
    #[serde(default)]
    pub catalysts: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub technical_summary: Option<String>,
}

impl LlmOpinionPayload {
    pub fn validate_and_into_opinion(self) -> Result<AiOpinion, OpinionError> {
        if !self.ai_score.is_finite() || !(0.0..=100.0).contains(&self.ai_score) {
            return Err(OpinionError::Invalid(format!(
                "ai_score must be between 0 and 100 (got {})",
                self.ai_score
            )));
        }

        let recommendation = self
            .recommendation
            .parse::<Action>()
            .map_err(OpinionError::Invalid)?;

        let confidence = match non_empty(self.confidence) {
            Some(s) => s.parse::<Confidence>().map_err(OpinionError::Invalid)?,
            None => Confidence::Medium,
        };

        let risk_level = match non_empty(self.risk_level) {
            Some(s) => Some(s.parse::<RiskLevel>().map_err(OpinionError::Invalid)?),
            None => None,
        };

        if let Some(target) = self.target_price {
            if !target.is_finite() || target <= 0.0 {
                return Err(OpinionError::Invalid(format!(
                    "target_price must be positive (got {target})"
                )));
            }
        }

        Ok(AiOpinion {
            ai_score: self.ai_score,
            recommendation,
            confidence,
            investment_thesis: non_empty(self.investment_thesis).unwrap_or_default(),
            target_price: self.target_price,
            risk_level,
            time_horizon: non_empty(self.time_horizon),
            catalysts: non_empty_lines(self.catalysts),
            risks: non_empty_lines(self.risks),
            technical_summary: non_empty(self.technical_summary),
        })
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn non_empty_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
