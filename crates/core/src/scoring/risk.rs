use crate::domain::feature::FeatureRecord;
use crate::domain::opinion::RiskLevel;
use crate::domain::sentiment::SentimentRecord;

const HIGH_VOLATILITY: f64 = 0.4;
const HIGH_BETA: f64 = 1.5;
const EXTREME_MOVE: f64 = 0.03;
const SMALL_CAP: f64 = 5e9;

/// Counts risk factors: one point each for high volatility, high beta, thin news
/// coverage, an extreme daily move and a small market cap.
pub fn risk_factors(feature: &FeatureRecord, sentiment: &SentimentRecord, min_news_articles: u32) -> u32 {
    let checks = [
        feature.volatility > HIGH_VOLATILITY,
        feature.beta.is_some_and(|b| b > HIGH_BETA),
        sentiment.article_count < min_news_articles,
        feature.price_change.abs() > EXTREME_MOVE,
        feature.market_cap < SMALL_CAP,
    ];
    checks.iter().filter(|hit| **hit).count() as u32
}

pub fn assess(feature: &FeatureRecord, sentiment: &SentimentRecord, min_news_articles: u32) -> RiskLevel {
    match risk_factors(feature, sentiment, min_news_articles) {
        n if n >= 3 => RiskLevel::High,
        n if n >= 1 => RiskLevel::Medium,
        _ => RiskLevel::Low,
    }
}
