use crate::config::HybridWeights;
use crate::domain::opinion::AiOpinion;
use crate::domain::recommendation::ComponentScores;
use crate::domain::sentiment::SentimentRecord;
use crate::llm::error::OpinionError;
use crate::scoring::{clamp_score, thresholds, Fusion};

const THESIS_MAX_CHARS: usize = 100;

const NEWS_QUALITY_MIN_ARTICLES: u32 = 5;
const NEWS_QUALITY_SENTIMENT: f64 = 0.2;
const NEWS_QUALITY_ADJUSTMENT: f64 = 5.0;

const ALIGNMENT_BAND: f64 = 10.0;
const ALIGNMENT_BONUS: f64 = 2.0;

/// Blends an AI opinion with the locally computed sentiment component.
#[derive(Debug, Clone, Default)]
pub struct HybridFuser {
    weights: HybridWeights,
}

impl HybridFuser {
    pub fn new(weights: HybridWeights) -> Self {
        Self { weights }
    }

    pub fn score(
        &self,
        ai: &AiOpinion,
        components: &ComponentScores,
        sentiment: &SentimentRecord,
    ) -> Result<f64, OpinionError> {
        if !ai.ai_score.is_finite() {
            return Err(OpinionError::Invalid(format!(
                "ai_score is not a number: {}",
                ai.ai_score
            )));
        }

        let mut score =
            ai.ai_score * self.weights.ai + components.sentiment_component * self.weights.sentiment;

        if sentiment.article_count >= NEWS_QUALITY_MIN_ARTICLES {
            if sentiment.sentiment_score > NEWS_QUALITY_SENTIMENT {
                score += NEWS_QUALITY_ADJUSTMENT;
            } else if sentiment.sentiment_score < -NEWS_QUALITY_SENTIMENT {
                score -= NEWS_QUALITY_ADJUSTMENT;
            }
        }

        if (ai.ai_score - components.technical_component).abs() < ALIGNMENT_BAND {
            score += ALIGNMENT_BONUS;
        }

        Ok(clamp_score(score))
    }

    pub fn fuse(
        &self,
        ai: &AiOpinion,
        components: &ComponentScores,
        sentiment: &SentimentRecord,
    ) -> Result<Fusion, OpinionError> {
        let score = self.score(ai, components, sentiment)?;
        let (action, confidence) = thresholds::classify(score);
        Ok(Fusion {
            score,
            action,
            confidence,
            reasoning: reasoning(ai, components),
        })
    }
}

fn reasoning(ai: &AiOpinion, c: &ComponentScores) -> String {
    let mut parts = Vec::with_capacity(3);

    let thesis = ai.investment_thesis.trim();
    if !thesis.is_empty() {
        parts.push(format!("AI Analysis: {}", truncate_chars(thesis, THESIS_MAX_CHARS)));
    }

    let sentiment_clause = if c.sentiment_component > 60.0 {
        "supported by positive market sentiment"
    } else if c.sentiment_component < 40.0 {
        "tempered by negative market sentiment"
    } else {
        "with neutral market sentiment"
    };
    parts.push(sentiment_clause.to_string());

    if c.technical_component > 60.0 {
        parts.push("and strong technical indicators".to_string());
    } else if c.technical_component < 40.0 {
        parts.push("despite weak technical indicators".to_string());
    }

    parts.join(". ")
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
