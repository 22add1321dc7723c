use crate::domain::opinion::{Action, Confidence, RiskLevel};
use crate::domain::sentiment::SentimentLabel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Four independent sub-scores, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub sentiment_component: f64,
    pub technical_component: f64,
    pub fundamental_component: f64,
    pub news_coverage_component: f64,
}

/// Provenance of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisSource {
    #[serde(rename = "Rule-based")]
    RuleBased,
    #[serde(rename = "Rule-based (AI failed)")]
    RuleBasedAiFailed,
    #[serde(rename = "AI + Sentiment Fusion")]
    Hybrid,
}

impl AnalysisSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisSource::RuleBased => "Rule-based",
            AnalysisSource::RuleBasedAiFailed => "Rule-based (AI failed)",
            AnalysisSource::Hybrid => "AI + Sentiment Fusion",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub symbol: String,
    pub sector: String,
    pub current_price: f64,
    pub price_change: f64,
    pub volume_ratio: f64,
    pub market_cap: f64,
    pub rsi: f64,

    pub sentiment: SentimentLabel,
    pub sentiment_score: f64,
    pub article_count: u32,
    /// False when no sentiment input existed and the neutral default was scored.
    pub sentiment_available: bool,

    pub composite_score: f64,
    pub action: Action,
    pub confidence: Confidence,
    pub reasoning: String,
    pub risk_level: RiskLevel,
    pub analysis_source: AnalysisSource,
    pub components: ComponentScores,
    pub ai_base_score: Option<f64>,

    pub target_price: Option<f64>,
    pub time_horizon: Option<String>,
    pub catalysts: Vec<String>,
    pub risks: Vec<String>,
    pub technical_summary: Option<String>,

    pub generated_at: DateTime<Utc>,
}

/// Output of one analysis cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationBatch {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub items: Vec<Recommendation>,
}

impl RecommendationBatch {
    pub fn new(generated_at: DateTime<Utc>, items: Vec<Recommendation>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_source_serializes_to_provenance_label() {
        for source in [
            AnalysisSource::RuleBased,
            AnalysisSource::RuleBasedAiFailed,
            AnalysisSource::Hybrid,
        ] {
            assert_eq!(serde_json::to_value(source).unwrap(), source.as_str());
        }
    }
}
