use crate::config::ScoringConfig;
use crate::domain::feature::FeatureRecord;
use crate::domain::recommendation::ComponentScores;
use crate::domain::sentiment::SentimentRecord;
use crate::scoring::clamp_score;

const BASE: f64 = 50.0;
const LARGE_CAP: f64 = 10e9;
const MID_CAP: f64 = 2e9;

/// Derives the four 0..=100 sub-scores. Pure; absent `pe_ratio`/`beta` never adjust.
#[derive(Debug, Clone)]
pub struct ComponentScorer {
    min_volume_ratio: f64,
}

impl ComponentScorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            min_volume_ratio: config.min_volume_ratio,
        }
    }

    pub fn score(&self, feature: &FeatureRecord, sentiment: &SentimentRecord) -> ComponentScores {
        ComponentScores {
            sentiment_component: sentiment_component(sentiment.sentiment_score),
            technical_component: self.technical_component(feature),
            fundamental_component: fundamental_component(feature),
            news_coverage_component: news_coverage_component(sentiment.article_count),
        }
    }

    fn technical_component(&self, f: &FeatureRecord) -> f64 {
        let mut score = BASE;

        if (30.0..=70.0).contains(&f.rsi) {
            score += 20.0;
        } else if f.rsi < 30.0 {
            // Oversold: potential reversal.
            score += 10.0;
        } else if f.rsi > 70.0 {
            score -= 20.0;
        }

        if f.volume_ratio > self.min_volume_ratio {
            score += 15.0;
        }

        if f.price_change > 0.0 && f.price_change < 0.03 {
            score += 15.0;
        } else if f.price_change < -0.02 {
            score += 10.0;
        }

        clamp_score(score)
    }
}

impl Default for ComponentScorer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

fn sentiment_component(sentiment_score: f64) -> f64 {
    if sentiment_score.is_nan() {
        return BASE;
    }
    clamp_score((sentiment_score + 1.0) * 50.0)
}

fn fundamental_component(f: &FeatureRecord) -> f64 {
    let mut score = BASE;

    if f.market_cap > LARGE_CAP {
        score += 20.0;
    } else if f.market_cap > MID_CAP {
        score += 10.0;
    }

    if let Some(pe) = f.pe_ratio {
        if (10.0..=25.0).contains(&pe) {
            score += 15.0;
        }
    }

    if let Some(beta) = f.beta {
        if (0.8..=1.2).contains(&beta) {
            score += 10.0;
        }
    }

    clamp_score(score)
}

fn news_coverage_component(article_count: u32) -> f64 {
    (f64::from(article_count) * 10.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feature::fixtures::feature;

    fn sentiment(score: f64, articles: u32) -> SentimentRecord {
        SentimentRecord {
            sentiment_score: score,
            article_count: articles,
            ..SentimentRecord::neutral()
        }
    }

    fn in_range(c: &ComponentScores) -> bool {
        [
            c.sentiment_component,
            c.technical_component,
            c.fundamental_component,
            c.news_coverage_component,
        ]
        .iter()
        .all(|x| (0.0..=100.0).contains(x))
    }

    #[test]
    fn worked_example_components() {
        let f = FeatureRecord {
            rsi: 65.0,
            volume_ratio: 1.2,
            price_change: 0.025,
            market_cap: 15e9,
            pe_ratio: Some(15.5),
            ..feature("RELIANCE.NS")
        };
        let c = ComponentScorer::default().score(&f, &sentiment(0.0, 0));
        // 50 + 20 (rsi in band) + 15 (momentum); volume 1.2 does not clear 1.5.
        assert_eq!(c.technical_component, 85.0);
        assert_eq!(c.fundamental_component, 85.0);
        assert_eq!(c.sentiment_component, 50.0);
        assert_eq!(c.news_coverage_component, 0.0);
    }

    #[test]
    fn technical_rsi_bands() {
        let scorer = ComponentScorer::default();
        let s = sentiment(0.0, 0);
        let tech = |rsi: f64| {
            scorer
                .score(&FeatureRecord { rsi, ..feature("X") }, &s)
                .technical_component
        };

        assert_eq!(tech(30.0), 70.0);
        assert_eq!(tech(70.0), 70.0);
        assert_eq!(tech(29.9), 60.0);
        assert_eq!(tech(70.1), 30.0);
    }

    #[test]
    fn volume_and_momentum_bonuses() {
        let scorer = ComponentScorer::default();
        let s = sentiment(0.0, 0);

        let f = FeatureRecord { volume_ratio: 1.6, ..feature("X") };
        assert_eq!(scorer.score(&f, &s).technical_component, 85.0);

        let f = FeatureRecord { price_change: -0.05, ..feature("X") };
        assert_eq!(scorer.score(&f, &s).technical_component, 80.0);

        // Strong rally gets no momentum bonus.
        let f = FeatureRecord { price_change: 0.04, ..feature("X") };
        assert_eq!(scorer.score(&f, &s).technical_component, 70.0);
    }

    #[test]
    fn volume_threshold_follows_config() {
        let config = ScoringConfig {
            min_volume_ratio: 1.0,
            ..ScoringConfig::default()
        };
        let f = FeatureRecord { volume_ratio: 1.2, ..feature("X") };
        let c = ComponentScorer::new(&config).score(&f, &sentiment(0.0, 0));
        assert_eq!(c.technical_component, 85.0);
    }

    #[test]
    fn fundamental_tiers_are_exclusive() {
        let scorer = ComponentScorer::default();
        let s = sentiment(0.0, 0);
        let fund = |market_cap: f64| {
            scorer
                .score(&FeatureRecord { market_cap, ..feature("X") }, &s)
                .fundamental_component
        };
        assert_eq!(fund(20e9), 70.0);
        assert_eq!(fund(5e9), 60.0);
        assert_eq!(fund(1e9), 50.0);
    }

    #[test]
    fn absent_optionals_do_not_adjust() {
        let scorer = ComponentScorer::default();
        let s = sentiment(0.0, 0);

        let none = scorer.score(&feature("X"), &s).fundamental_component;
        let out_of_band = scorer
            .score(
                &FeatureRecord {
                    pe_ratio: Some(60.0),
                    beta: Some(2.0),
                    ..feature("X")
                },
                &s,
            )
            .fundamental_component;
        let in_band = scorer
            .score(
                &FeatureRecord {
                    pe_ratio: Some(20.0),
                    beta: Some(1.0),
                    ..feature("X")
                },
                &s,
            )
            .fundamental_component;

        assert_eq!(none, 50.0);
        assert_eq!(out_of_band, 50.0);
        assert_eq!(in_band, 75.0);
    }

    #[test]
    fn extreme_inputs_stay_in_range() {
        let scorer = ComponentScorer::default();
        let extremes = [
            FeatureRecord {
                rsi: 0.0,
                volume_ratio: 9.0,
                price_change: 0.01,
                market_cap: 1e15,
                pe_ratio: Some(12.0),
                beta: Some(1.0),
                ..feature("X")
            },
            FeatureRecord {
                rsi: 100.0,
                price_change: 0.5,
                ..feature("X")
            },
            FeatureRecord {
                rsi: 50.0,
                volume_ratio: 100.0,
                price_change: 0.02,
                ..feature("X")
            },
        ];
        for f in &extremes {
            for s in [sentiment(5.0, 1000), sentiment(-5.0, 0), sentiment(f64::NAN, 3)] {
                let c = scorer.score(f, &s);
                assert!(in_range(&c), "{c:?}");
            }
        }
    }

    #[test]
    fn sentiment_component_is_monotonic() {
        let scorer = ComponentScorer::default();
        let f = feature("X");
        let mut prev = f64::NEG_INFINITY;
        for i in -30..=30 {
            let s = f64::from(i) / 10.0;
            let v = scorer.score(&f, &sentiment(s, 0)).sentiment_component;
            assert!(v >= prev, "not monotonic at {s}");
            prev = v;
        }
        assert_eq!(scorer.score(&f, &sentiment(-1.0, 0)).sentiment_component, 0.0);
        assert_eq!(scorer.score(&f, &sentiment(1.0, 0)).sentiment_component, 100.0);
    }

    #[test]
    fn news_coverage_saturates() {
        let scorer = ComponentScorer::default();
        let f = feature("X");
        assert_eq!(scorer.score(&f, &sentiment(0.0, 3)).news_coverage_component, 30.0);
        assert_eq!(scorer.score(&f, &sentiment(0.0, 25)).news_coverage_component, 100.0);
    }
}
