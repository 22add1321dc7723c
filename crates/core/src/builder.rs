use crate::config::ScoringConfig;
use crate::domain::feature::FeatureRecord;
use crate::domain::opinion::AiOpinion;
use crate::domain::recommendation::{AnalysisSource, Recommendation};
use crate::domain::sentiment::SentimentRecord;
use crate::llm::error::OpinionError;
use crate::scoring::{risk, ComponentScorer, Fusion, HybridFuser, RuleBasedFuser};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Everything known about one symbol for a single analysis cycle.
#[derive(Debug, Clone)]
pub struct SymbolAnalysis {
    pub feature: FeatureRecord,
    /// `None` when no sentiment could be produced for the symbol at all.
    pub sentiment: Option<SentimentRecord>,
    /// `None` when AI analysis was not requested.
    pub opinion: Option<Result<AiOpinion, OpinionError>>,
}

#[derive(Debug, Clone)]
pub struct RecommendationBuilder {
    scorer: ComponentScorer,
    rule_based: RuleBasedFuser,
    hybrid: HybridFuser,
    min_news_articles: u32,
}

impl Default for RecommendationBuilder {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

impl RecommendationBuilder {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            scorer: ComponentScorer::new(config),
            rule_based: RuleBasedFuser::new(config.weights),
            hybrid: HybridFuser::new(config.hybrid),
            min_news_articles: config.min_news_articles,
        }
    }

    pub fn build(
        &self,
        feature: &FeatureRecord,
        sentiment: Option<&SentimentRecord>,
        opinion: Option<Result<AiOpinion, OpinionError>>,
    ) -> Recommendation {
        self.build_at(feature, sentiment, opinion, Utc::now())
    }

    pub fn build_at(
        &self,
        feature: &FeatureRecord,
        sentiment: Option<&SentimentRecord>,
        opinion: Option<Result<AiOpinion, OpinionError>>,
        generated_at: DateTime<Utc>,
    ) -> Recommendation {
        let (feature, touched) = feature.sanitize();
        if !touched.is_empty() {
            tracing::warn!(symbol = %feature.symbol, fields = ?touched, "defaulted anomalous feature fields");
        }

        let sentiment_available = sentiment.is_some();
        let sentiment = match sentiment {
            Some(s) => {
                let (s, touched) = s.sanitize();
                if !touched.is_empty() {
                    tracing::warn!(symbol = %feature.symbol, fields = ?touched, "defaulted anomalous sentiment fields");
                }
                s
            }
            None => {
                tracing::debug!(symbol = %feature.symbol, "sentiment unavailable; scoring as neutral");
                SentimentRecord::neutral()
            }
        };

        let components = self.scorer.score(&feature, &sentiment);

        let (fusion, source, opinion) = match opinion {
            None => (self.rule_based.fuse(&components), AnalysisSource::RuleBased, None),
            Some(Err(err)) => {
                tracing::warn!(symbol = %feature.symbol, error = %err, "AI opinion unavailable; using rule-based fusion");
                (
                    self.rule_based.fuse(&components),
                    AnalysisSource::RuleBasedAiFailed,
                    None,
                )
            }
            Some(Ok(ai)) => match self.hybrid.fuse(&ai, &components, &sentiment) {
                Ok(fusion) => (fusion, AnalysisSource::Hybrid, Some(ai)),
                Err(err) => {
                    tracing::warn!(symbol = %feature.symbol, error = %err, "hybrid fusion failed; using rule-based fusion");
                    (
                        self.rule_based.fuse(&components),
                        AnalysisSource::RuleBasedAiFailed,
                        None,
                    )
                }
            },
        };

        let risk_level = opinion
            .as_ref()
            .and_then(|ai| ai.risk_level)
            .unwrap_or_else(|| risk::assess(&feature, &sentiment, self.min_news_articles));

        let Fusion {
            score,
            action,
            confidence,
            reasoning,
        } = fusion;

        tracing::debug!(
            symbol = %feature.symbol,
            score,
            %action,
            source = source.as_str(),
            "built recommendation"
        );

        let (ai_base_score, target_price, time_horizon, catalysts, risks, technical_summary) =
            match opinion {
                Some(ai) => (
                    Some(ai.ai_score),
                    ai.target_price,
                    ai.time_horizon,
                    ai.catalysts,
                    ai.risks,
                    ai.technical_summary,
                ),
                None => (None, None, None, Vec::new(), Vec::new(), None),
            };

        Recommendation {
            symbol: feature.symbol,
            sector: feature.sector,
            current_price: feature.current_price,
            price_change: feature.price_change,
            volume_ratio: feature.volume_ratio,
            market_cap: feature.market_cap,
            rsi: feature.rsi,
            sentiment: sentiment.overall_sentiment,
            sentiment_score: sentiment.sentiment_score,
            article_count: sentiment.article_count,
            sentiment_available,
            composite_score: score,
            action,
            confidence,
            reasoning,
            risk_level,
            analysis_source: source,
            components,
            ai_base_score,
            target_price,
            time_horizon,
            catalysts,
            risks,
            technical_summary,
            generated_at,
        }
    }

    /// Builds every symbol independently and orders the result by composite score,
    /// highest first. Ties are ordered by symbol so output is reproducible.
    pub fn build_batch(&self, inputs: Vec<SymbolAnalysis>) -> Vec<Recommendation> {
        let generated_at = Utc::now();
        let mut out: Vec<Recommendation> = inputs
            .into_iter()
            .map(|input| {
                self.build_at(
                    &input.feature,
                    input.sentiment.as_ref(),
                    input.opinion,
                    generated_at,
                )
            })
            .collect();

        sort_by_score(&mut out);
        tracing::info!(count = out.len(), "built recommendation batch");
        out
    }
}

pub fn sort_by_score(recs: &mut [Recommendation]) {
    recs.sort_by(|a, b| {
        b.composite_score
            .partial_cmp(&a.composite_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
}
