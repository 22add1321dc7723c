pub mod builder;
pub mod domain;
pub mod ingest;
pub mod llm;
pub mod scoring;
pub mod screening;
pub mod summary;

pub mod config {
    use anyhow::{ensure, Context};

    const DEFAULT_MIN_VOLUME_RATIO: f64 = 1.5;
    const DEFAULT_MIN_NEWS_ARTICLES: u32 = 3;
    const DEFAULT_MAX_RECOMMENDATIONS: usize = 11;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub use_ai_analysis: bool,
        pub max_recommendations: usize,
        pub scoring: ScoringConfig,
        pub screening: ScreeningConfig,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let use_ai_analysis = match lookup("STOCKPULSE_USE_AI") {
                Some(s) => parse_bool(&s).with_context(|| format!("invalid STOCKPULSE_USE_AI: {s}"))?,
                None => true,
            };

            let max_recommendations = parse_or(&lookup, "MAX_RECOMMENDATIONS", DEFAULT_MAX_RECOMMENDATIONS)?;

            let scoring = ScoringConfig::from_lookup(&lookup)?;
            let screening = ScreeningConfig::from_lookup(&lookup)?;

            Ok(Self {
                sentry_dsn: lookup("SENTRY_DSN").filter(|s| !s.trim().is_empty()),
                use_ai_analysis,
                max_recommendations,
                scoring,
                screening,
            })
        }
    }

    /// Weights and thresholds consumed read-only by the scoring engine.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ScoringConfig {
        pub min_volume_ratio: f64,
        pub min_news_articles: u32,
        pub weights: RuleWeights,
        pub hybrid: HybridWeights,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct RuleWeights {
        pub sentiment: f64,
        pub technical: f64,
        pub fundamental: f64,
        pub news_coverage: f64,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct HybridWeights {
        pub ai: f64,
        pub sentiment: f64,
    }

    impl Default for RuleWeights {
        fn default() -> Self {
            Self {
                sentiment: 0.4,
                technical: 0.3,
                fundamental: 0.2,
                news_coverage: 0.1,
            }
        }
    }

    impl Default for HybridWeights {
        fn default() -> Self {
            Self {
                ai: 0.7,
                sentiment: 0.3,
            }
        }
    }

    impl Default for ScoringConfig {
        fn default() -> Self {
            Self {
                min_volume_ratio: DEFAULT_MIN_VOLUME_RATIO,
                min_news_articles: DEFAULT_MIN_NEWS_ARTICLES,
                weights: RuleWeights::default(),
                hybrid: HybridWeights::default(),
            }
        }
    }

    impl ScoringConfig {
        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let d = Self::default();
            let out = Self {
                min_volume_ratio: parse_or(&lookup, "MIN_VOLUME_RATIO", d.min_volume_ratio)?,
                min_news_articles: parse_or(&lookup, "MIN_NEWS_ARTICLES", d.min_news_articles)?,
                weights: RuleWeights {
                    sentiment: parse_or(&lookup, "WEIGHT_SENTIMENT", d.weights.sentiment)?,
                    technical: parse_or(&lookup, "WEIGHT_TECHNICAL", d.weights.technical)?,
                    fundamental: parse_or(&lookup, "WEIGHT_FUNDAMENTAL", d.weights.fundamental)?,
                    news_coverage: parse_or(&lookup, "WEIGHT_NEWS_COVERAGE", d.weights.news_coverage)?,
                },
                hybrid: HybridWeights {
                    ai: parse_or(&lookup, "HYBRID_WEIGHT_AI", d.hybrid.ai)?,
                    sentiment: parse_or(&lookup, "HYBRID_WEIGHT_SENTIMENT", d.hybrid.sentiment)?,
                },
            };
            out.validate()?;
            Ok(out)
        }

        pub fn validate(&self) -> anyhow::Result<()> {
            ensure!(
                self.min_volume_ratio.is_finite() && self.min_volume_ratio >= 0.0,
                "MIN_VOLUME_RATIO must be a non-negative number (got {})",
                self.min_volume_ratio
            );

            let w = &self.weights;
            let rule = [w.sentiment, w.technical, w.fundamental, w.news_coverage];
            ensure!(
                rule.iter().all(|x| x.is_finite() && *x >= 0.0),
                "rule-based weights must be non-negative numbers (got {rule:?})"
            );
            ensure!(rule.iter().sum::<f64>() > 0.0, "rule-based weights must not all be zero");

            let h = &self.hybrid;
            ensure!(
                [h.ai, h.sentiment].iter().all(|x| x.is_finite() && *x >= 0.0),
                "hybrid weights must be non-negative numbers (got ai={}, sentiment={})",
                h.ai,
                h.sentiment
            );
            ensure!(h.ai + h.sentiment > 0.0, "hybrid weights must not both be zero");
            Ok(())
        }
    }

    /// Pre-scoring screen applied by the batch runner.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ScreeningConfig {
        pub min_market_cap: f64,
        pub min_volume_ratio: f64,
        pub max_price_change: f64,
        pub max_rsi: f64,
    }

    impl Default for ScreeningConfig {
        fn default() -> Self {
            Self {
                min_market_cap: 10_000_000_000.0,
                min_volume_ratio: 0.5,
                max_price_change: 0.05,
                max_rsi: 80.0,
            }
        }
    }

    impl ScreeningConfig {
        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let d = Self::default();
            Ok(Self {
                min_market_cap: parse_or(&lookup, "SCREEN_MIN_MARKET_CAP", d.min_market_cap)?,
                min_volume_ratio: parse_or(&lookup, "SCREEN_MIN_VOLUME_RATIO", d.min_volume_ratio)?,
                max_price_change: parse_or(&lookup, "SCREEN_MAX_PRICE_CHANGE", d.max_price_change)?,
                max_rsi: parse_or(&lookup, "SCREEN_MAX_RSI", d.max_rsi)?,
            })
        }
    }

    fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match lookup(key).map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
            Some(s) => s
                .parse::<T>()
                .map_err(|e| anyhow::anyhow!("invalid {key}={s}: {e}")),
            None => Ok(default),
        }
    }

    fn parse_bool(s: &str) -> Option<bool> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        }
    }

}
