use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const LABEL_THRESHOLD: f64 = 0.1;
const RECENCY_DECAY: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl SentimentLabel {
    pub fn from_score(score: f64) -> Self {
        if score > LABEL_THRESHOLD {
            SentimentLabel::Positive
        } else if score < -LABEL_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

/// Per-symbol news sentiment aggregated over the lookback window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    #[serde(default)]
    pub overall_sentiment: SentimentLabel,
    /// In [-1, 1].
    #[serde(default)]
    pub sentiment_score: f64,
    #[serde(default)]
    pub article_count: u32,
    /// In [0, 1].
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub positive_count: u32,
    #[serde(default)]
    pub negative_count: u32,
    #[serde(default)]
    pub neutral_count: u32,
}

impl Default for SentimentRecord {
    fn default() -> Self {
        Self::neutral()
    }
}

/// A news article that has already been through the sentiment model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredArticle {
    pub published_at: DateTime<Utc>,
    pub sentiment: SentimentLabel,
    pub sentiment_score: f64,
    #[serde(default)]
    pub confidence: f64,
}

impl SentimentRecord {
    pub fn neutral() -> Self {
        Self {
            overall_sentiment: SentimentLabel::Neutral,
            sentiment_score: 0.0,
            article_count: 0,
            confidence: 0.0,
            positive_count: 0,
            negative_count: 0,
            neutral_count: 0,
        }
    }

    pub fn sanitize(&self) -> (SentimentRecord, Vec<&'static str>) {
        let mut out = self.clone();
        let mut touched = Vec::new();

        if !out.sentiment_score.is_finite() {
            out.sentiment_score = 0.0;
            touched.push("sentiment_score");
        } else if !(-1.0..=1.0).contains(&out.sentiment_score) {
            out.sentiment_score = out.sentiment_score.clamp(-1.0, 1.0);
            touched.push("sentiment_score");
        }

        if !out.confidence.is_finite() {
            out.confidence = 0.0;
            touched.push("confidence");
        } else if !(0.0..=1.0).contains(&out.confidence) {
            out.confidence = out.confidence.clamp(0.0, 1.0);
            touched.push("confidence");
        }

        (out, touched)
    }

    /// Aggregates scored articles into one record. Newest articles weigh most:
    /// the i-th newest gets `exp(-0.1 * i)`.
    pub fn aggregate(articles: &[ScoredArticle]) -> Self {
        let mut usable: Vec<&ScoredArticle> = articles
            .iter()
            .filter(|a| a.sentiment_score.is_finite())
            .collect();
        if usable.is_empty() {
            return Self::neutral();
        }

        usable.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        let mut weighted = 0.0;
        let mut total_weight = 0.0;
        let mut confidence_sum = 0.0;
        let (mut positive, mut negative, mut neutral) = (0u32, 0u32, 0u32);

        for (i, article) in usable.iter().enumerate() {
            let w = (-(i as f64) * RECENCY_DECAY).exp();
            weighted += article.sentiment_score.clamp(-1.0, 1.0) * w;
            total_weight += w;
            if article.confidence.is_finite() {
                confidence_sum += article.confidence.clamp(0.0, 1.0);
            }
            match article.sentiment {
                SentimentLabel::Positive => positive += 1,
                SentimentLabel::Negative => negative += 1,
                SentimentLabel::Neutral => neutral += 1,
            }
        }

        let score = weighted / total_weight;
        let count = usable.len();

        Self {
            overall_sentiment: SentimentLabel::from_score(score),
            sentiment_score: score,
            article_count: u32::try_from(count).unwrap_or(u32::MAX),
            confidence: confidence_sum / count as f64,
            positive_count: positive,
            negative_count: negative,
            neutral_count: neutral,
        }
    }
}
